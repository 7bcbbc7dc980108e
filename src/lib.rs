//! # edgy_color_picker
//!
//! An HSV color picker that produces RGB565 colors for small embedded
//! displays.
//!
//! The picker edits a hue/saturation/value selection through a gradient plane
//! and a hue strip, and emits the packed 16-bit color the device understands.
//! Several pickers on one page behave as a group: opening one closes the rest.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use edgy_color_picker::prelude::*;
//!
//! let coordinator = Arc::new(PopoverCoordinator::new());
//! let mut picker = PickerController::new(&coordinator, PickerConfig::new("foreground"));
//!
//! picker.toggle();
//! picker.pointer_down(Surface::HueStrip, 100.0, 5.0);
//! picker.pointer_down(Surface::SaturationValue, 200.0, 200.0);
//! assert_eq!(picker.color().hex(), "#07FF");
//! ```
//!
//! ## Core Concepts
//!
//! - **Color**: RGB565/RGB888 packing and HSV conversion ([`color`])
//! - **Raster**: RGBA previews of the hue strip and saturation/value plane ([`raster`])
//! - **Selection**: the HSV triple and the color it produces ([`selection`])
//! - **Controller**: one picker's popover, pointer and hex-field handling ([`controller`])
//! - **Coordinator**: the single-open rule across pickers ([`coordinator`])
//! - **Theme**: a six-slot RGB565 palette edited by a picker group ([`theme`])

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod color;
pub mod controller;
pub mod coordinator;
pub mod filters;
pub mod logging;
pub mod raster;
pub mod selection;
pub mod sync;
pub mod theme;

/// Re-exports for convenient usage
pub mod prelude {
    pub use crate::color::{ChannelDepth, HexParseError, Hsv, Rgb565, Rgb888};
    pub use crate::controller::{PickerConfig, PickerController, PickerView, PopoverState, Surface};
    pub use crate::coordinator::{InstanceId, PopoverCoordinator, Subscription};
    pub use crate::filters::{FilterChain, FilterTarget};
    pub use crate::logging::PickerLogger;
    pub use crate::raster::Raster;
    pub use crate::selection::{Redraw, SelectionState};
    pub use crate::theme::{ThemeEditor, ThemeError, ThemePalette, ThemeSlot};
}

// Re-export key types at crate root
pub use color::{HexParseError, Hsv, Rgb565, Rgb888};
pub use controller::{PickerConfig, PickerController, Surface};
pub use coordinator::PopoverCoordinator;
pub use theme::{ThemeEditor, ThemePalette, ThemeSlot};
