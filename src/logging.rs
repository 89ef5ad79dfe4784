//! Diagnostics emitted by the scanner and extractor.
//!
//! The library never installs or reconfigures a global logger. Callers hand a
//! [`log::Log`] implementation to [`Scanner::new`](crate::pipeline::Scanner::new)
//! (the CLI passes [`log::logger()`] after initializing `env_logger`), and every
//! event is routed to that sink through [`Diagnostics`].

use log::{Level, Log, Record};
use std::fmt;

/// Target attached to every record emitted by this crate.
pub const LOG_TARGET: &str = "gps_exif_extractor";

/// A borrowed log sink plus the verbosity of the current scan.
///
/// Debug events are only forwarded when `verbose` is set. Everything else is
/// forwarded unconditionally and left to the sink's own filter.
#[derive(Clone, Copy)]
pub struct Diagnostics<'a> {
    sink: &'a dyn Log,
    verbose: bool,
}

impl<'a> Diagnostics<'a> {
    pub fn new(sink: &'a dyn Log, verbose: bool) -> Self {
        Self { sink, verbose }
    }

    pub fn debug(&self, args: fmt::Arguments<'_>) {
        if self.verbose {
            self.emit(Level::Debug, args);
        }
    }

    pub fn info(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Info, args);
    }

    pub fn warn(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Warn, args);
    }

    /// Used for conditions that end a scan.
    pub fn error(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Error, args);
    }

    fn emit(&self, level: Level, args: fmt::Arguments<'_>) {
        let record = Record::builder()
            .args(args)
            .level(level)
            .target(LOG_TARGET)
            .build();
        if self.sink.enabled(record.metadata()) {
            self.sink.log(&record);
        }
    }
}

impl fmt::Debug for Diagnostics<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Diagnostics")
            .field("verbose", &self.verbose)
            .finish_non_exhaustive()
    }
}
