//! Line-oriented logger for the `log` facade.
//!
//! The crate itself only emits `log` records: a `debug` line per picker
//! lifecycle event and popover broadcast, `trace` for raster renders and `warn`
//! for rejected hex input or unknown theme keys. Hosts that don't bring their
//! own logger can install [`PickerLogger`], which formats each record as
//!
//! ```text
//! 12:03:44 DEBUG    edgy_color_picker::coordinator: close-others: picker#1 opened, notifying 2 subscribers
//! ```
//!
//! and hands the finished line to a sink. The default sink is stderr; a
//! browser host plugs in its console instead.

use std::fmt;
use std::sync::{Arc, Mutex};

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};
use time::{OffsetDateTime, format_description::OwnedFormatItem};

use crate::sync::lock_recover;

/// Destination of formatted log lines.
pub type LogSink = Arc<dyn Fn(&str) + Send + Sync>;

const DEFAULT_TIME_FORMAT: &str = "[hour]:[minute]:[second]";

/// Logger for the `log` crate, configured with builder methods.
///
/// # Thread Safety
///
/// `Log` requires `Sync`. The only mutable state is the last printed timestamp,
/// kept behind a mutex with poison recovery; concurrent records may both print
/// the same time.
pub struct PickerLogger {
    level: LevelFilter,
    show_time: bool,
    omit_repeated_times: bool,
    show_level: bool,
    show_target: bool,
    time_format: OwnedFormatItem,
    sink: LogSink,
    last_time: Mutex<Option<String>>,
}

impl Default for PickerLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PickerLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PickerLogger")
            .field("level", &self.level)
            .field("show_time", &self.show_time)
            .field("omit_repeated_times", &self.omit_repeated_times)
            .field("show_level", &self.show_level)
            .field("show_target", &self.show_target)
            .finish_non_exhaustive()
    }
}

impl PickerLogger {
    /// Logger at `Info` writing to stderr.
    #[must_use]
    pub fn new() -> Self {
        let time_format = time::format_description::parse_owned::<2>(DEFAULT_TIME_FORMAT)
            .unwrap_or_else(|_| OwnedFormatItem::Literal(Vec::<u8>::new().into_boxed_slice()));
        Self {
            level: LevelFilter::Info,
            show_time: true,
            omit_repeated_times: false,
            show_level: true,
            show_target: true,
            time_format,
            sink: Arc::new(|line| eprintln!("{line}")),
            last_time: Mutex::new(None),
        }
    }

    /// Set the minimum log level.
    #[must_use]
    pub fn level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    /// Enable or disable timestamps.
    #[must_use]
    pub fn show_time(mut self, show: bool) -> Self {
        self.show_time = show;
        self
    }

    /// Blank out a timestamp equal to the previous line's.
    #[must_use]
    pub fn omit_repeated_times(mut self, omit: bool) -> Self {
        self.omit_repeated_times = omit;
        self
    }

    /// Enable or disable the level column.
    #[must_use]
    pub fn show_level(mut self, show: bool) -> Self {
        self.show_level = show;
        self
    }

    /// Enable or disable the `target:` prefix.
    #[must_use]
    pub fn show_target(mut self, show: bool) -> Self {
        self.show_target = show;
        self
    }

    /// Override the time format (`time` crate format description syntax).
    ///
    /// An unparsable description keeps the current format.
    #[must_use]
    pub fn time_format(mut self, format: &str) -> Self {
        if let Ok(parsed) = time::format_description::parse_owned::<2>(format) {
            self.time_format = parsed;
        }
        self
    }

    /// Send formatted lines to `sink` instead of stderr.
    #[must_use]
    pub fn sink<F>(mut self, sink: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.sink = Arc::new(sink);
        self
    }

    /// Install as the global logger.
    pub fn init(self) -> Result<(), SetLoggerError> {
        log::set_max_level(self.level);
        log::set_boxed_logger(Box::new(self))
    }

    fn format_time(&self) -> String {
        let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
        now.format(&self.time_format)
            .unwrap_or_else(|_| now.to_string())
    }

    fn format_record(&self, record: &Record<'_>) -> String {
        let mut line = String::new();

        if self.show_time {
            let time_str = self.format_time();
            if self.omit_repeated_times {
                let mut last = lock_recover(&self.last_time);
                if last.as_ref() == Some(&time_str) {
                    line.push_str(&" ".repeat(time_str.len()));
                } else {
                    line.push_str(&time_str);
                    *last = Some(time_str);
                }
            } else {
                line.push_str(&time_str);
            }
            line.push(' ');
        }

        if self.show_level {
            line.push_str(&format!("{:<8} ", record.level().as_str()));
        }

        if self.show_target && !record.target().is_empty() {
            line.push_str(record.target());
            line.push_str(": ");
        }

        line.push_str(&record.args().to_string());
        line
    }
}

impl Log for PickerLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = self.format_record(record);
        (self.sink)(&line);
    }

    fn flush(&self) {}
}
