//! Display filters for the preview surface.
//!
//! The host page lets the user dial brightness, contrast, saturation and
//! inversion of the simulated device screen. [`FilterChain`] stores one
//! percentage per filter name, in first-insertion order, and renders them as
//! a CSS filter string:
//!
//! ```
//! use edgy_color_picker::filters::FilterChain;
//!
//! let mut filters = FilterChain::new();
//! filters.set_filter("brightness", 120.0);
//! filters.set_filter("invert", 0.0);
//! filters.set_filter("brightness", 90.0);
//! assert_eq!(filters.css(), "brightness(90%) invert(0%)");
//! ```

/// Receives the rendered filter string, e.g. the style of a canvas element.
pub trait FilterTarget {
    fn set_css_filter(&mut self, css: &str);
}

impl FilterTarget for String {
    fn set_css_filter(&mut self, css: &str) {
        css.clone_into(self);
    }
}

/// Ordered `name -> percent` map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterChain {
    filters: Vec<(String, f64)>,
}

impl FilterChain {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a filter's percentage. Existing filters keep their position.
    pub fn set_filter(&mut self, name: impl Into<String>, percent: f64) {
        let name = name.into();
        match self.filters.iter_mut().find(|(n, _)| *n == name) {
            Some((_, value)) => *value = percent,
            None => self.filters.push((name, percent)),
        }
    }

    /// Percentage of `name`, `0` when unset.
    #[must_use]
    pub fn filter_value(&self, name: &str) -> f64 {
        self.filters
            .iter()
            .find(|(n, _)| n == name)
            .map_or(0.0, |(_, value)| *value)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Filters joined as `name(value%)`, space separated.
    #[must_use]
    pub fn css(&self) -> String {
        self.filters
            .iter()
            .map(|(name, value)| format!("{name}({value}%)"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Render and hand the string to `target`.
    pub fn apply(&self, target: &mut impl FilterTarget) {
        let css = self.css();
        log::debug!("applying display filter: {css:?}");
        target.set_css_filter(&css);
    }
}
