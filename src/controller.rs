//! One visible color picker.
//!
//! A [`PickerController`] owns a [`SelectionState`], turns pointer and text
//! events into selection changes, keeps a [`PickerView`] of every presentation
//! output current, notifies the host of committed color changes and takes
//! part in the single-open popover protocol of a [`PopoverCoordinator`].
//!
//! # State machine
//!
//! ```text
//!             toggle()                    toggle()
//!   Closed ───────────────▶ Open ───────────────────▶ Closed
//!                            │   close-others(other)
//!                            └──────────────────────▶ Closed
//! ```
//!
//! Opening broadcasts `close-others` naming this instance. Pointer drags are
//! only accepted while open. A drag starts with
//! [`pointer_down`](PickerController::pointer_down) over a surface and ends
//! with [`pointer_up`](PickerController::pointer_up) or
//! [`pointer_leave`](PickerController::pointer_leave).
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use edgy_color_picker::prelude::*;
//!
//! let coordinator = Arc::new(PopoverCoordinator::new());
//! let mut picker = PickerController::new(&coordinator, PickerConfig::new("background"));
//!
//! picker.toggle();
//! picker.pointer_down(Surface::SaturationValue, 200.0, 200.0);
//! picker.pointer_up();
//! assert_eq!(picker.color(), Rgb565::from_value(0xF800));
//! assert_eq!(picker.view().hex_field, "#F800");
//! assert_eq!(picker.view().rgb888_readout, "#FF0000");
//! ```

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::color::{HexParseError, Rgb565, Rgb888, clamp_unit};
use crate::coordinator::{InstanceId, PopoverCoordinator, Subscription};
use crate::raster::{self, Raster};
use crate::selection::{Redraw, SelectionState};

/// Largest hue a drag can select; the hue range is half-open.
const MAX_HUE: f64 = f64::from_bits(360.0_f64.to_bits() - 1);

const DEFAULT_PLANE_SIZE: (u32, u32) = (200, 200);
const DEFAULT_STRIP_SIZE: (u32, u32) = (200, 10);

/// Construction options for a [`PickerController`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerConfig {
    label: String,
    initial_color: Rgb565,
    plane_size: (u32, u32),
    strip_size: (u32, u32),
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self::new("")
    }
}

impl PickerConfig {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            initial_color: Rgb565::BLACK,
            plane_size: DEFAULT_PLANE_SIZE,
            strip_size: DEFAULT_STRIP_SIZE,
        }
    }

    /// Color selected at construction.
    #[must_use]
    pub fn initial_color(mut self, color: Rgb565) -> Self {
        self.initial_color = color;
        self
    }

    /// Saturation/value surface size in pixels. Zero is raised to 1.
    #[must_use]
    pub fn plane_size(mut self, width: u32, height: u32) -> Self {
        self.plane_size = (width.max(1), height.max(1));
        self
    }

    /// Hue strip size in pixels. Zero is raised to 1.
    #[must_use]
    pub fn strip_size(mut self, width: u32, height: u32) -> Self {
        self.strip_size = (width.max(1), height.max(1));
        self
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn color(&self) -> Rgb565 {
        self.initial_color
    }

    #[must_use]
    pub fn plane_dimensions(&self) -> (u32, u32) {
        self.plane_size
    }

    #[must_use]
    pub fn strip_dimensions(&self) -> (u32, u32) {
        self.strip_size
    }
}

/// Popover visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PopoverState {
    #[default]
    Closed,
    Open,
}

/// Interactive surface inside the popover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Surface {
    /// 2-D plane: saturation across, value down.
    SaturationValue,
    /// 1-D hue gradient.
    HueStrip,
}

/// Everything the presentation layer shows for one picker.
///
/// Refreshed synchronously by every controller operation that changes it.
#[derive(Debug, Clone, PartialEq)]
pub struct PickerView {
    /// Caption next to the trigger control.
    pub label: String,
    /// Trigger button text, the 565 hex.
    pub trigger_text: String,
    /// Trigger background color.
    pub swatch: Rgb888,
    /// Hex text field. Holds the uncommitted draft while the user types.
    pub hex_field: String,
    /// Expanded 8-bit color as `#RRGGBB`.
    pub rgb888_readout: String,
    /// Hue indicator position as a fraction of the strip width.
    pub hue_position: f64,
    /// Plane cursor as `(saturation, value)` fractions of the plane.
    pub cursor: (f64, f64),
    pub hue_strip: Arc<Raster>,
    pub plane: Arc<Raster>,
}

type ChangeCallback = Box<dyn FnMut(Rgb565)>;

/// Controller for one picker widget instance.
pub struct PickerController {
    id: InstanceId,
    config: PickerConfig,
    selection: SelectionState,
    visible: Arc<AtomicBool>,
    drag: Option<Surface>,
    view: PickerView,
    on_change: Option<ChangeCallback>,
    coordinator: Arc<PopoverCoordinator>,
    _subscription: Subscription,
}

impl fmt::Debug for PickerController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PickerController")
            .field("id", &self.id)
            .field("label", &self.config.label)
            .field("state", &self.state())
            .field("color", &self.selection.color())
            .field("drag", &self.drag)
            .finish_non_exhaustive()
    }
}

impl PickerController {
    /// Create a closed picker and subscribe it to `coordinator`.
    #[must_use]
    pub fn new(coordinator: &Arc<PopoverCoordinator>, config: PickerConfig) -> Self {
        let id = coordinator.register();
        let visible = Arc::new(AtomicBool::new(false));

        let flag = Arc::clone(&visible);
        let subscription = coordinator.subscribe(move |opened| {
            if opened != id && flag.swap(false, Ordering::SeqCst) {
                log::debug!("{id} closed because {opened} opened");
            }
        });

        let selection = SelectionState::new(config.initial_color);
        let view = Self::initial_view(&config, &selection);
        log::debug!(
            "{id} created for {:?} with {}",
            config.label,
            selection.color()
        );

        Self {
            id,
            config,
            selection,
            visible,
            drag: None,
            view,
            on_change: None,
            coordinator: Arc::clone(coordinator),
            _subscription: subscription,
        }
    }

    fn initial_view(config: &PickerConfig, selection: &SelectionState) -> PickerView {
        let color = selection.color();
        let (strip_w, strip_h) = config.strip_size;
        let (plane_w, plane_h) = config.plane_size;
        PickerView {
            label: config.label.clone(),
            trigger_text: color.hex(),
            swatch: color.to_rgb888(),
            hex_field: color.hex(),
            rgb888_readout: color.to_rgb888().hex(),
            hue_position: selection.hue() / 360.0,
            cursor: (selection.saturation(), selection.value()),
            hue_strip: raster::hue_strip(strip_w, strip_h),
            plane: raster::saturation_value_plane(plane_w, plane_h, selection.hue()),
        }
    }

    #[must_use]
    pub fn id(&self) -> InstanceId {
        self.id
    }

    #[must_use]
    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> PopoverState {
        if self.visible.load(Ordering::SeqCst) {
            PopoverState::Open
        } else {
            PopoverState::Closed
        }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state() == PopoverState::Open
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some() && self.is_open()
    }

    #[must_use]
    pub fn color(&self) -> Rgb565 {
        self.selection.color()
    }

    #[must_use]
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    #[must_use]
    pub fn view(&self) -> &PickerView {
        &self.view
    }

    /// Register the change callback. A later registration replaces it.
    ///
    /// The callback runs synchronously on every committed color change.
    /// Panics inside it are not caught.
    pub fn on_change<F>(&mut self, callback: F)
    where
        F: FnMut(Rgb565) + 'static,
    {
        self.on_change = Some(Box::new(callback));
    }

    /// Activate the trigger control: open when closed, close when open.
    pub fn toggle(&mut self) -> PopoverState {
        if self.is_open() {
            self.close();
        } else {
            self.open();
        }
        self.state()
    }

    /// Open the popover and broadcast `close-others`.
    pub fn open(&mut self) {
        if self.visible.swap(true, Ordering::SeqCst) {
            return;
        }
        log::debug!("{} opened", self.id);
        self.coordinator.announce_open(self.id);
    }

    /// Close the popover. Any drag in progress ends.
    pub fn close(&mut self) {
        self.drag = None;
        if self.visible.swap(false, Ordering::SeqCst) {
            log::debug!("{} closed", self.id);
            self.coordinator.release(self.id);
        }
    }

    /// Pointer pressed at `(x, y)` relative to `surface`'s top-left corner.
    ///
    /// Starts a drag and applies the position. Ignored while closed.
    pub fn pointer_down(&mut self, surface: Surface, x: f64, y: f64) {
        if !self.is_open() {
            return;
        }
        self.drag = Some(surface);
        self.drag_to(surface, x, y);
    }

    /// Pointer moved to `(x, y)` relative to the surface the drag started on.
    ///
    /// Positions outside the surface clamp to its edges.
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        if !self.is_open() {
            self.drag = None;
            return;
        }
        if let Some(surface) = self.drag {
            self.drag_to(surface, x, y);
        }
    }

    /// Pointer released anywhere.
    pub fn pointer_up(&mut self) {
        self.drag = None;
    }

    /// Pointer left the surface.
    pub fn pointer_leave(&mut self) {
        self.drag = None;
    }

    fn drag_to(&mut self, surface: Surface, x: f64, y: f64) {
        let redraw = match surface {
            Surface::SaturationValue => {
                let (width, height) = self.config.plane_size;
                self.selection.set_saturation_value(
                    clamp_unit(x / f64::from(width)),
                    clamp_unit(y / f64::from(height)),
                )
            }
            Surface::HueStrip => {
                let (width, _) = self.config.strip_size;
                let hue = (clamp_unit(x / f64::from(width)) * 360.0).min(MAX_HUE);
                self.selection.set_hue(hue)
            }
        };
        self.commit(redraw);
    }

    /// Replace the hex field draft. Nothing else changes until
    /// [`commit_hex`](Self::commit_hex).
    pub fn edit_hex(&mut self, text: &str) {
        self.view.hex_field = text.to_string();
    }

    /// Confirm the hex field draft.
    ///
    /// # Errors
    ///
    /// Returns the parse error when the draft is not a four-digit hex color.
    /// The selection is left untouched and the field shows the current color
    /// again.
    pub fn commit_hex(&mut self) -> Result<Rgb565, HexParseError> {
        match Rgb565::parse_hex(&self.view.hex_field) {
            Ok(color) => {
                let redraw = self.selection.set_color_directly(color);
                self.commit(redraw);
                self.view.hex_field = color.hex();
                Ok(color)
            }
            Err(err) => {
                log::warn!("{}: rejected hex input: {err}", self.id);
                self.view.hex_field = self.selection.color().hex();
                Err(err)
            }
        }
    }

    /// Move the selection from the host side (e.g. a theme source).
    ///
    /// Does not invoke the change callback.
    pub fn set_color(&mut self, color: Rgb565) {
        let redraw = self.selection.set_color_directly(color);
        self.refresh(redraw);
        self.view.hex_field = color.hex();
    }

    fn commit(&mut self, redraw: Redraw) {
        self.refresh(redraw);
        if redraw.contains(Redraw::COLOR) {
            let color = self.selection.color();
            if let Some(callback) = self.on_change.as_mut() {
                callback(color);
            }
        }
    }

    fn refresh(&mut self, redraw: Redraw) {
        if redraw.contains(Redraw::COLOR) {
            let color = self.selection.color();
            let wide = color.to_rgb888();
            self.view.trigger_text = color.hex();
            self.view.swatch = wide;
            self.view.hex_field = color.hex();
            self.view.rgb888_readout = wide.hex();
        }
        if redraw.contains(Redraw::HUE) {
            let (width, height) = self.config.plane_size;
            let hue = self.selection.hue();
            self.view.hue_position = hue / 360.0;
            self.view.plane = raster::saturation_value_plane(width, height, hue);
        }
        if redraw.contains(Redraw::CURSOR) {
            self.view.cursor = (self.selection.saturation(), self.selection.value());
        }
    }
}

impl Drop for PickerController {
    fn drop(&mut self) {
        if self.visible.load(Ordering::SeqCst) {
            self.coordinator.release(self.id);
        }
    }
}
