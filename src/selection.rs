//! The hue/saturation/value selection of one picker.
//!
//! [`SelectionState`] keeps the HSV triple and the packed [`Rgb565`] color it
//! produces in step. It has no presentation side effects: every setter
//! reports what changed as [`Redraw`] flags and leaves refreshing outputs to
//! the owning controller.

use bitflags::bitflags;

use crate::color::{Hsv, Rgb565, clamp_unit, normalize_hue};

bitflags! {
    /// Outputs invalidated by a selection change.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Redraw: u8 {
        /// Packed color changed (trigger label, swatch, hex field, 888 readout).
        const COLOR  = 1 << 0;
        /// Hue changed (saturation/value plane, hue indicator).
        const HUE    = 1 << 1;
        /// Saturation or value changed (plane cursor).
        const CURSOR = 1 << 2;
    }
}

/// Current selection: HSV plus the derived packed color.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionState {
    hsv: Hsv,
    color: Rgb565,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self::new(Rgb565::BLACK)
    }
}

impl SelectionState {
    /// Start from `initial`, with HSV derived from it.
    #[must_use]
    pub fn new(initial: Rgb565) -> Self {
        Self {
            hsv: initial.to_hsv(),
            color: initial,
        }
    }

    #[must_use]
    pub fn hue(&self) -> f64 {
        self.hsv.hue
    }

    #[must_use]
    pub fn saturation(&self) -> f64 {
        self.hsv.saturation
    }

    #[must_use]
    pub fn value(&self) -> f64 {
        self.hsv.value
    }

    #[must_use]
    pub fn hsv(&self) -> Hsv {
        self.hsv
    }

    #[must_use]
    pub fn color(&self) -> Rgb565 {
        self.color
    }

    /// Set the hue (wrapped into `[0, 360)`) and recompute the color.
    pub fn set_hue(&mut self, hue: f64) -> Redraw {
        self.update(Hsv {
            hue: normalize_hue(hue),
            ..self.hsv
        })
    }

    /// Set the saturation (clamped to `[0, 1]`) and recompute the color.
    pub fn set_saturation(&mut self, saturation: f64) -> Redraw {
        self.update(Hsv {
            saturation: clamp_unit(saturation),
            ..self.hsv
        })
    }

    /// Set the value (clamped to `[0, 1]`) and recompute the color.
    pub fn set_value(&mut self, value: f64) -> Redraw {
        self.update(Hsv {
            value: clamp_unit(value),
            ..self.hsv
        })
    }

    /// Set saturation and value together, recomputing the color once.
    pub fn set_saturation_value(&mut self, saturation: f64, value: f64) -> Redraw {
        self.update(Hsv {
            saturation: clamp_unit(saturation),
            value: clamp_unit(value),
            ..self.hsv
        })
    }

    /// Store `color` as-is and resynchronize the HSV triple from it.
    ///
    /// Afterwards `Rgb565::from_hsv(hue, saturation, value) == color`. Grays
    /// and black reset the hue to 0.
    pub fn set_color_directly(&mut self, color: Rgb565) -> Redraw {
        let hsv = color.to_hsv();
        let redraw = Self::diff(self.hsv, hsv) | self.color_redraw(color);
        self.hsv = hsv;
        self.color = color;
        redraw
    }

    fn update(&mut self, hsv: Hsv) -> Redraw {
        let color = hsv.to_rgb565();
        let redraw = Self::diff(self.hsv, hsv) | self.color_redraw(color);
        self.hsv = hsv;
        self.color = color;
        redraw
    }

    fn color_redraw(&self, color: Rgb565) -> Redraw {
        if color == self.color {
            Redraw::empty()
        } else {
            Redraw::COLOR
        }
    }

    #[expect(clippy::float_cmp, reason = "exact change detection")]
    fn diff(old: Hsv, new: Hsv) -> Redraw {
        let mut redraw = Redraw::empty();
        if old.hue != new.hue {
            redraw |= Redraw::HUE;
        }
        if old.saturation != new.saturation || old.value != new.value {
            redraw |= Redraw::CURSOR;
        }
        redraw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_black() {
        let state = SelectionState::default();
        assert_eq!(state.color(), Rgb565::BLACK);
        assert_eq!(state.hsv(), Hsv::default());
    }

    #[test]
    fn test_new_derives_hsv() {
        let state = SelectionState::new(Rgb565::from_value(0x001F));
        assert!((state.hue() - 240.0).abs() < 1e-9);
        assert!((state.saturation() - 1.0).abs() < 1e-9);
        assert!((state.value() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_set_hue_recomputes_from_all_components() {
        let mut state = SelectionState::default();
        state.set_saturation(1.0);
        state.set_value(1.0);
        let redraw = state.set_hue(120.0);
        assert_eq!(state.color().value(), 0x07E0);
        assert!(redraw.contains(Redraw::HUE | Redraw::COLOR));
        assert!(!redraw.contains(Redraw::CURSOR));
    }

    #[test]
    fn test_hue_change_on_black_does_not_change_color() {
        let mut state = SelectionState::default();
        let redraw = state.set_hue(200.0);
        assert_eq!(redraw, Redraw::HUE);
        assert_eq!(state.color(), Rgb565::BLACK);
    }

    #[test]
    fn test_unchanged_setter_reports_nothing() {
        let mut state = SelectionState::new(Rgb565::from_value(0xF800));
        assert_eq!(state.set_hue(0.0), Redraw::empty());
        assert_eq!(state.set_saturation_value(1.0, 1.0), Redraw::empty());
    }

    #[test]
    fn test_setters_clamp_and_wrap() {
        let mut state = SelectionState::default();
        state.set_saturation(4.0);
        state.set_value(-1.0);
        state.set_hue(725.0);
        assert_eq!(state.saturation(), 1.0);
        assert_eq!(state.value(), 0.0);
        assert!((state.hue() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_set_saturation_value_reports_cursor() {
        let mut state = SelectionState::default();
        let redraw = state.set_saturation_value(0.5, 0.5);
        assert_eq!(redraw, Redraw::CURSOR | Redraw::COLOR);
        assert_eq!(state.color(), Rgb565::from_hsv(0.0, 0.5, 0.5));
    }

    #[test]
    fn test_set_color_directly_resyncs_hsv() {
        let mut state = SelectionState::default();
        let redraw = state.set_color_directly(Rgb565::from_value(0x07E0));
        assert_eq!(redraw, Redraw::all());
        assert!((state.hue() - 120.0).abs() < 1e-9);
        assert_eq!(state.color().value(), 0x07E0);
    }

    #[test]
    fn test_set_color_directly_gray_resets_hue() {
        let mut state = SelectionState::default();
        state.set_hue(200.0);
        state.set_color_directly(Rgb565::WHITE);
        assert_eq!(state.hue(), 0.0);
        assert_eq!(state.saturation(), 0.0);
        assert_eq!(state.value(), 1.0);
    }

    #[test]
    fn test_set_color_directly_reproducible_for_every_565_value() {
        let mut state = SelectionState::default();
        for value in 0..=u16::MAX {
            let color = Rgb565::from_value(value);
            state.set_color_directly(color);
            let hsv = state.hsv();
            assert_eq!(
                Rgb565::from_hsv(hsv.hue, hsv.saturation, hsv.value),
                color,
                "HSV did not reproduce {color} (got {hsv})"
            );
        }
    }
}
