//! Shared, lockable logger and the `log` crate bridge.
//!
//! [`SharedLogger`] holds a [`Logger`] behind a `parking_lot::Mutex`. The lock
//! is held for the whole of each call, so the threshold check, the stopwatch
//! update and the history append/evict happen as one unit even with several
//! producers.
//!
//! [`init_log_bridge`] installs a `SharedLogger` as the global `log` backend,
//! so `log::info!()` and friends render as sparklog lines.

use crate::config::{InvalidLevel, Level};
use crate::logger::Logger;
use parking_lot::{Mutex, MutexGuard};
use std::fmt;
use std::io;
use std::sync::Arc;

/// Clonable handle to one logger session.
#[derive(Clone)]
pub struct SharedLogger {
    inner: Arc<Mutex<Logger>>,
}

impl SharedLogger {
    pub fn new(logger: Logger) -> Self {
        Self {
            inner: Arc::new(Mutex::new(logger)),
        }
    }

    /// Direct access for several operations under one lock.
    pub fn lock(&self) -> MutexGuard<'_, Logger> {
        self.inner.lock()
    }

    pub fn log(&self, level: Level, message: impl fmt::Display) -> io::Result<()> {
        self.inner.lock().log(level, message)
    }

    pub fn set_level(&self, name: &str) -> Result<(), InvalidLevel> {
        self.inner.lock().set_level(name)
    }

    pub fn threshold(&self) -> Level {
        self.inner.lock().threshold()
    }

    pub fn start_stopwatch(&self) {
        self.inner.lock().start_stopwatch();
    }

    pub fn debug(&self, message: impl fmt::Display) -> io::Result<()> {
        self.log(Level::Debug, message)
    }

    pub fn info(&self, message: impl fmt::Display) -> io::Result<()> {
        self.log(Level::Info, message)
    }

    pub fn warning(&self, message: impl fmt::Display) -> io::Result<()> {
        self.log(Level::Warning, message)
    }

    pub fn error(&self, message: impl fmt::Display) -> io::Result<()> {
        self.log(Level::Error, message)
    }

    pub fn critical(&self, message: impl fmt::Display) -> io::Result<()> {
        self.log(Level::Critical, message)
    }
}

/// Map a `log` record level onto a sparklog level.
pub fn from_log_level(level: log::Level) -> Level {
    match level {
        log::Level::Error => Level::Error,
        log::Level::Warn => Level::Warning,
        log::Level::Info => Level::Info,
        log::Level::Debug | log::Level::Trace => Level::Debug,
    }
}

impl log::Log for SharedLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        self.inner.lock().is_enabled(from_log_level(metadata.level()))
    }

    fn log(&self, record: &log::Record) {
        let level = from_log_level(record.level());
        let mut logger = self.inner.lock();
        if logger.is_enabled(level) {
            // A failed write cannot be reported from inside the log facade
            let _ = logger.log(level, record.args());
        }
    }

    fn flush(&self) {
        let _ = self.inner.lock().flush();
    }
}

/// Install `logger` as the global `log` backend.
///
/// Returns a handle to the same session so the caller can keep adjusting the
/// threshold. Fails if another `log` backend is already installed.
pub fn init_log_bridge(logger: Logger) -> Result<SharedLogger, log::SetLoggerError> {
    let shared = SharedLogger::new(logger);
    log::set_boxed_logger(Box::new(shared.clone()))?;
    // Filtering happens against the live threshold in `enabled`
    log::set_max_level(log::LevelFilter::Trace);
    Ok(shared)
}
