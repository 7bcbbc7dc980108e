//! Shared test utilities and logging setup.
//!
//! The library logs through the `log` facade. `tracing-subscriber`'s default
//! `tracing-log` bridge forwards those records, so `init_test_logging()` shows
//! picker, coordinator and raster logs next to test phases.
//!
//! ```rust,ignore
//! mod common;
//! use common::init_test_logging;
//!
//! #[test]
//! fn my_test() {
//!     init_test_logging();
//!     // test code...
//! }
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG=edgy_color_picker=trace` - include raster renders
//! - `RUST_LOG=edgy_color_picker::coordinator=debug` - only popover broadcasts

#![allow(dead_code)]

pub mod assertions;

use std::sync::{Arc, Once};

use edgy_color_picker::{PickerConfig, PickerController, PopoverCoordinator, Rgb565};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

static INIT: Once = Once::new();

/// Initialize test logging. Idempotent.
///
/// Output goes through the test writer, so it is only shown for failing tests
/// or with `--nocapture`.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("edgy_color_picker=debug,test=info"));

        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_test_writer()
                    .with_file(true)
                    .with_line_number(true)
                    .with_thread_ids(true)
                    .with_target(true)
                    .compact(),
            )
            .try_init()
            .ok();
    });
}

/// A span guard that logs entry into a named test phase.
pub fn test_phase(name: &str) -> tracing::span::EnteredSpan {
    let span = tracing::info_span!("test_phase", phase = name);
    tracing::info!(phase = name, "entering test phase");
    span.entered()
}

/// Log test context information.
pub fn log_test_context(test_name: &str, description: &str) {
    tracing::info!(
        test_name = test_name,
        description = description,
        "test context"
    );
}

/// A picker on `coordinator` with the default 200x200 plane and 200x10 strip.
pub fn picker(coordinator: &Arc<PopoverCoordinator>, label: &str) -> PickerController {
    PickerController::new(coordinator, PickerConfig::new(label))
}

/// Like [`picker`], starting at a packed 565 value.
pub fn picker_at(coordinator: &Arc<PopoverCoordinator>, label: &str, value: u16) -> PickerController {
    PickerController::new(
        coordinator,
        PickerConfig::new(label).initial_color(Rgb565::from_value(value)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_is_idempotent() {
        init_test_logging();
        init_test_logging();
    }

    #[test]
    fn test_phase_logging() {
        init_test_logging();
        let _setup = test_phase("setup");
        tracing::debug!("setting up");
    }
}
