//! Theme palette and the picker group that edits it.
//!
//! A theme is six named RGB565 colors. [`ThemePalette`] stores them and
//! [`ThemeEditor`] binds one [`PickerController`] to each slot, all sharing one
//! [`PopoverCoordinator`] so that at most one picker is open at a time.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;
use std::sync::Arc;

use crate::color::{HexParseError, Rgb565};
use crate::controller::{PickerConfig, PickerController};
use crate::coordinator::PopoverCoordinator;

/// A named color slot of a theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ThemeSlot {
    Background,
    Background2,
    Background3,
    Foreground,
    Foreground2,
    Foreground3,
}

impl ThemeSlot {
    /// All slots, in display order.
    pub const ALL: [Self; 6] = [
        Self::Background,
        Self::Background2,
        Self::Background3,
        Self::Foreground,
        Self::Foreground2,
        Self::Foreground3,
    ];

    /// Canonical key of this slot.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Background2 => "background2",
            Self::Background3 => "background3",
            Self::Foreground => "foreground",
            Self::Foreground2 => "foreground2",
            Self::Foreground3 => "foreground3",
        }
    }

    /// Look up a slot by key. `background1` and `foreground1` are accepted as
    /// aliases of the first slot of each group.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "background" | "background1" => Some(Self::Background),
            "background2" => Some(Self::Background2),
            "background3" => Some(Self::Background3),
            "foreground" | "foreground1" => Some(Self::Foreground),
            "foreground2" => Some(Self::Foreground2),
            "foreground3" => Some(Self::Foreground3),
            _ => None,
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ThemeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ThemeSlot {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s).ok_or_else(|| ThemeError::UnknownSlot(s.to_string()))
    }
}

/// Errors returned by [`ThemePalette`] operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeError {
    UnknownSlot(String),
    InvalidColor {
        slot: ThemeSlot,
        source: HexParseError,
    },
}

impl fmt::Display for ThemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownSlot(key) => write!(f, "unknown theme slot {key:?}"),
            Self::InvalidColor { slot, source } => {
                write!(f, "invalid color for theme slot {slot}: {source}")
            }
        }
    }
}

impl std::error::Error for ThemeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::UnknownSlot(_) => None,
            Self::InvalidColor { source, .. } => Some(source),
        }
    }
}

/// Six RGB565 colors indexed by [`ThemeSlot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ThemePalette {
    colors: [Rgb565; 6],
}

impl Default for ThemePalette {
    /// Dark backgrounds, light foregrounds.
    ///
    /// Every default is a neutral gray whose 8-bit expansion has equal
    /// channels, so its picker opens at hue 0 with zero saturation.
    fn default() -> Self {
        Self {
            colors: [
                Rgb565::from_value(0x0000),
                Rgb565::from_value(0x1082),
                Rgb565::from_value(0x3186),
                Rgb565::from_value(0xFFFF),
                Rgb565::from_value(0xEF7D),
                Rgb565::from_value(0xCE79),
            ],
        }
    }
}

impl ThemePalette {
    /// Palette with every slot set to `color`.
    #[must_use]
    pub const fn filled(color: Rgb565) -> Self {
        Self { colors: [color; 6] }
    }

    /// Build a palette from `(key, hex)` pairs on top of the default palette.
    ///
    /// Keys follow [`ThemeSlot::from_key`]; colors follow [`Rgb565::parse_hex`].
    pub fn from_hex_definitions<I, K, V>(definitions: I) -> Result<Self, ThemeError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut palette = Self::default();
        for (key, hex) in definitions {
            let slot: ThemeSlot = key.as_ref().parse()?;
            let color = Rgb565::parse_hex(hex.as_ref())
                .map_err(|source| ThemeError::InvalidColor { slot, source })?;
            palette.set(slot, color);
        }
        Ok(palette)
    }

    #[must_use]
    pub const fn get(&self, slot: ThemeSlot) -> Rgb565 {
        self.colors[slot.index()]
    }

    pub fn set(&mut self, slot: ThemeSlot, color: Rgb565) {
        self.colors[slot.index()] = color;
    }

    /// Apply a host change event. Unknown keys are logged and rejected.
    pub fn apply_change(&mut self, key: &str, value: u16) -> Result<ThemeSlot, ThemeError> {
        let Some(slot) = ThemeSlot::from_key(key) else {
            log::warn!("unknown theme key {key:?}");
            return Err(ThemeError::UnknownSlot(key.to_string()));
        };
        self.set(slot, Rgb565::from_value(value));
        Ok(slot)
    }

    /// Slots and their colors, in [`ThemeSlot::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (ThemeSlot, Rgb565)> + '_ {
        ThemeSlot::ALL.into_iter().map(|slot| (slot, self.get(slot)))
    }

    /// One `key = #RRRR` line per slot.
    #[must_use]
    pub fn listing(&self) -> String {
        let mut out = String::new();
        for (slot, color) in self.iter() {
            out.push_str(slot.name());
            out.push_str(" = ");
            out.push_str(&color.hex());
            out.push('\n');
        }
        out
    }
}

type ThemeListener = Box<dyn FnMut(ThemeSlot, Rgb565)>;

/// One picker per theme slot, writing through to a shared palette.
///
/// Pickers and the host listener are single-threaded callbacks, so the
/// palette is shared with them through `Rc<RefCell<_>>`. Only the coordinator
/// is `Arc`, since it may be shared with pickers outside this editor.
pub struct ThemeEditor {
    coordinator: Arc<PopoverCoordinator>,
    palette: Rc<RefCell<ThemePalette>>,
    pickers: Vec<(ThemeSlot, PickerController)>,
    listener: Rc<RefCell<Option<ThemeListener>>>,
}

impl fmt::Debug for ThemeEditor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeEditor")
            .field("palette", &*self.palette.borrow())
            .field("open", &self.coordinator.open_instance())
            .finish_non_exhaustive()
    }
}

impl ThemeEditor {
    /// Create pickers for every slot of `palette`, initialized to its colors.
    #[must_use]
    pub fn new(palette: ThemePalette) -> Self {
        Self::with_coordinator(Arc::new(PopoverCoordinator::new()), palette)
    }

    /// Like [`ThemeEditor::new`], joining an existing exclusivity group.
    #[must_use]
    pub fn with_coordinator(coordinator: Arc<PopoverCoordinator>, palette: ThemePalette) -> Self {
        let shared = Rc::new(RefCell::new(palette));
        let listener: Rc<RefCell<Option<ThemeListener>>> = Rc::new(RefCell::new(None));

        let pickers = palette
            .iter()
            .map(|(slot, color)| {
                let config = PickerConfig::new(slot.name()).initial_color(color);
                let mut picker = PickerController::new(&coordinator, config);

                let palette = Rc::clone(&shared);
                let listener = Rc::clone(&listener);
                picker.on_change(move |color| {
                    palette.borrow_mut().set(slot, color);
                    log::debug!("theme slot {slot} changed to {color}");
                    if let Some(callback) = listener.borrow_mut().as_mut() {
                        callback(slot, color);
                    }
                });
                (slot, picker)
            })
            .collect();

        Self {
            coordinator,
            palette: shared,
            pickers,
            listener,
        }
    }

    /// Register the host listener for user-driven slot changes. A later
    /// registration replaces it.
    pub fn on_theme_change<F>(&mut self, callback: F)
    where
        F: FnMut(ThemeSlot, Rgb565) + 'static,
    {
        *self.listener.borrow_mut() = Some(Box::new(callback));
    }

    /// Snapshot of the current palette.
    #[must_use]
    pub fn palette(&self) -> ThemePalette {
        *self.palette.borrow()
    }

    #[must_use]
    pub fn coordinator(&self) -> &Arc<PopoverCoordinator> {
        &self.coordinator
    }

    #[must_use]
    pub fn picker(&self, slot: ThemeSlot) -> &PickerController {
        &self.pickers[slot.index()].1
    }

    pub fn picker_mut(&mut self, slot: ThemeSlot) -> &mut PickerController {
        &mut self.pickers[slot.index()].1
    }

    pub fn pickers(&self) -> impl Iterator<Item = (ThemeSlot, &PickerController)> {
        self.pickers.iter().map(|(slot, picker)| (*slot, picker))
    }

    /// Apply a host change event to the palette and move the matching picker.
    ///
    /// The host listener is not notified.
    pub fn apply_change(&mut self, key: &str, value: u16) -> Result<ThemeSlot, ThemeError> {
        let slot = self.palette.borrow_mut().apply_change(key, value)?;
        self.picker_mut(slot).set_color(Rgb565::from_value(value));
        Ok(slot)
    }
}
