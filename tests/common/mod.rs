//! Shared integration test helpers for sparklog.
//!
//! # Usage
//!
//! ```ignore
//! mod common;
//! use common::{TestLogger, test_logger};
//! ```
//!
//! Rust integration tests use `mod common;` to bring in helpers from
//! `tests/common/mod.rs`. The `#![allow(dead_code)]` attribute suppresses
//! warnings when only a subset of helpers are used per file.

#![allow(dead_code)]

use parking_lot::Mutex;
use sparklog::{Config, Logger, ManualClock};
use std::io::{self, Write};
use std::sync::Arc;

/// Clock reading the test logger starts at (an arbitrary recent instant).
pub const START_MS: u64 = 1_700_000_000_000;

/// In-memory writer whose contents stay readable after it is boxed into a logger.
#[derive(Clone, Default)]
pub struct SharedBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8(self.bytes.lock().clone()).expect("log output is valid UTF-8")
    }

    /// Output split into lines, without newlines.
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    /// Lines with the leading `YYYY-MM-DD HH:MM:SS ` timestamp removed.
    pub fn bodies(&self) -> Vec<String> {
        self.lines()
            .into_iter()
            .map(|l| l.get(20..).unwrap_or_default().to_string())
            .collect()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A logger wired to a manual clock and an in-memory buffer.
pub struct TestLogger {
    pub logger: Logger,
    pub clock: ManualClock,
    pub output: SharedBuffer,
}

/// Build a [`TestLogger`] from `config` with color off.
pub fn test_logger(config: &Config) -> TestLogger {
    test_logger_with_color(config, false)
}

pub fn test_logger_with_color(config: &Config, color: bool) -> TestLogger {
    let clock = ManualClock::new(START_MS);
    let output = SharedBuffer::default();
    let logger = Logger::with_output(
        config,
        Arc::new(clock.clone()),
        Box::new(output.clone()),
        color,
    );
    TestLogger {
        logger,
        clock,
        output,
    }
}

/// A writer that always fails.
pub struct BrokenPipe;

impl Write for BrokenPipe {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
    }
}
