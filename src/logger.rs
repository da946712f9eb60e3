//! The level filter and line dispatcher.
//!
//! A [`Logger`] owns one session: the threshold, the stopwatch and the timing
//! history. Every accepted call ticks the stopwatch, records the delta,
//! renders the history as a sparkline and writes exactly one flushed line:
//!
//! ```text
//! 2026-10-17 09:41:07     INFO +1.50s 3.02s ▁▃█ message
//! ```

use crate::ansi;
use crate::clock::{Clock, SystemClock};
use crate::config::{Config, DEFAULT_TIMESTAMP_FORMAT, InvalidLevel, Level};
use crate::duration::format_duration;
use crate::history::TimingHistory;
use crate::sparkline;
use crate::stopwatch::{Stopwatch, Tick};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, TimeZone};
use std::fmt;
use std::io::{self, IsTerminal, Write};
use std::sync::Arc;

/// Width of the level column; fits `CRITICAL`.
pub const LEVEL_WIDTH: usize = 8;

/// Everything needed to render one output line.
#[derive(Debug, Clone)]
pub struct LogEvent {
    pub level: Level,
    pub message: String,
    pub tick: Tick,
    /// History including this call's delta
    pub history: Vec<u64>,
    pub color: bool,
}

impl LogEvent {
    /// Local time of the tick.
    pub fn timestamp(&self) -> DateTime<Local> {
        i64::try_from(self.tick.now_ms)
            .ok()
            .and_then(|ms| Local.timestamp_millis_opt(ms).single())
            .unwrap_or_else(Local::now)
    }

    /// Compose the line, without the trailing newline.
    ///
    /// `timestamp_format` must already be a valid strftime string.
    pub fn render(&self, timestamp_format: &str, sparkline: bool) -> String {
        let mut line = self.timestamp().format(timestamp_format).to_string();

        line.push(' ');
        let level = format!("{:>width$}", self.level, width = LEVEL_WIDTH);
        match ansi::level_color(self.level).filter(|_| self.color) {
            Some(color) => line.push_str(&ansi::paint(color, &level)),
            None => line.push_str(&level),
        }

        line.push_str(" +");
        line.push_str(&format_duration(self.tick.elapsed_ms));
        line.push(' ');
        line.push_str(&format_duration(self.tick.total_ms));

        if sparkline && self.history.len() > 1 {
            line.push(' ');
            line.push_str(&sparkline::render(&self.history, self.color));
        }

        line.push(' ');
        line.push_str(&self.message);
        line
    }
}

/// Check a strftime string without formatting anything.
///
/// chrono panics while formatting an invalid specifier, so this has to run
/// before the string is ever used.
pub fn is_valid_timestamp_format(format: &str) -> bool {
    !format.is_empty() && StrftimeItems::new(format).all(|item| !matches!(item, Item::Error))
}

/// A leveled, timed logger writing one line per accepted call.
pub struct Logger {
    threshold: Level,
    stopwatch: Stopwatch,
    history: TimingHistory,
    color: bool,
    sparkline: bool,
    timestamp_format: String,
    out: Box<dyn Write + Send>,
}

impl Logger {
    /// Log to stdout using the system clock.
    ///
    /// Color is decided here, once: the configured mode resolved against
    /// whether stdout is a terminal.
    pub fn new(config: &Config) -> Self {
        let stdout = io::stdout();
        let is_terminal = stdout.is_terminal();
        Self::to_writer(config, Box::new(stdout), is_terminal)
    }

    /// Log to stderr using the system clock.
    pub fn stderr(config: &Config) -> Self {
        let stderr = io::stderr();
        let is_terminal = stderr.is_terminal();
        Self::to_writer(config, Box::new(stderr), is_terminal)
    }

    /// Log to `out` using the configured system clock; `is_terminal` feeds
    /// [`ColorMode::Auto`](crate::config::ColorMode::Auto).
    pub fn to_writer(config: &Config, out: Box<dyn Write + Send>, is_terminal: bool) -> Self {
        let color = config.color.resolve(is_terminal);
        Self::with_output(
            config,
            Arc::new(SystemClock::from_preference(config.clock)),
            out,
            color,
        )
    }

    /// Fully explicit construction. The stopwatch starts now.
    pub fn with_output(
        config: &Config,
        clock: Arc<dyn Clock>,
        out: Box<dyn Write + Send>,
        color: bool,
    ) -> Self {
        let timestamp_format = if is_valid_timestamp_format(&config.timestamp_format) {
            config.timestamp_format.clone()
        } else {
            log::warn!(
                "Invalid timestamp format {:?}, using {:?}",
                config.timestamp_format,
                DEFAULT_TIMESTAMP_FORMAT
            );
            DEFAULT_TIMESTAMP_FORMAT.to_string()
        };

        Self {
            threshold: config.level,
            stopwatch: Stopwatch::new(clock),
            history: TimingHistory::new(),
            color,
            sparkline: config.sparkline,
            timestamp_format,
            out,
        }
    }

    /// Set the threshold by name. On error the threshold is unchanged.
    pub fn set_level(&mut self, name: &str) -> Result<(), InvalidLevel> {
        self.threshold = name.parse()?;
        Ok(())
    }

    pub fn set_threshold(&mut self, level: Level) {
        self.threshold = level;
    }

    pub fn threshold(&self) -> Level {
        self.threshold
    }

    /// Whether a call at `level` would produce output.
    pub fn is_enabled(&self, level: Level) -> bool {
        level >= self.threshold
    }

    pub fn color_enabled(&self) -> bool {
        self.color
    }

    pub fn history(&self) -> &TimingHistory {
        &self.history
    }

    pub fn stopwatch(&self) -> &Stopwatch {
        &self.stopwatch
    }

    /// Restart the session clock and forget the timing history.
    pub fn start_stopwatch(&mut self) {
        self.stopwatch.start();
        self.history.clear();
    }

    /// Emit `message` at `level`.
    ///
    /// Calls below the threshold return immediately without touching the
    /// stopwatch or history.
    pub fn log(&mut self, level: Level, message: impl fmt::Display) -> io::Result<()> {
        if !self.is_enabled(level) {
            return Ok(());
        }

        let tick = self.stopwatch.tick();
        self.history.record(tick.elapsed_ms);

        let event = LogEvent {
            level,
            message: message.to_string(),
            tick,
            history: self.history.snapshot(),
            color: self.color,
        };
        let line = event.render(&self.timestamp_format, self.sparkline);

        writeln!(self.out, "{line}")?;
        self.out.flush()
    }

    pub fn debug(&mut self, message: impl fmt::Display) -> io::Result<()> {
        self.log(Level::Debug, message)
    }

    pub fn info(&mut self, message: impl fmt::Display) -> io::Result<()> {
        self.log(Level::Info, message)
    }

    pub fn warning(&mut self, message: impl fmt::Display) -> io::Result<()> {
        self.log(Level::Warning, message)
    }

    pub fn error(&mut self, message: impl fmt::Display) -> io::Result<()> {
        self.log(Level::Error, message)
    }

    pub fn critical(&mut self, message: impl fmt::Display) -> io::Result<()> {
        self.log(Level::Critical, message)
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

// Formatting macros, usable with a `Logger` or a `SharedLogger`

#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $($arg:tt)*) => {
        $logger.log($crate::config::Level::Debug, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($arg:tt)*) => {
        $logger.log($crate::config::Level::Info, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_warning {
    ($logger:expr, $($arg:tt)*) => {
        $logger.log($crate::config::Level::Warning, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_error {
    ($logger:expr, $($arg:tt)*) => {
        $logger.log($crate::config::Level::Error, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_critical {
    ($logger:expr, $($arg:tt)*) => {
        $logger.log($crate::config::Level::Critical, format_args!($($arg)*))
    };
}
