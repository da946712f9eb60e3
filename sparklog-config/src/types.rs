//! Core configuration value types shared by the logger and the CLI.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity level of a log call.
///
/// Levels carry a numeric rank and are totally ordered by it, so
/// `Level::Debug < Level::Info` holds and threshold checks are plain
/// comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Level {
    /// Lets every call through when used as a threshold
    NotSet = 0,
    Debug = 10,
    /// Default threshold
    #[default]
    Info = 20,
    Warning = 30,
    Error = 40,
    Critical = 50,
}

/// Returned when a level name is not one of the six recognized names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid level {name:?} (expected one of NOTSET, DEBUG, INFO, WARNING, ERROR, CRITICAL)")]
pub struct InvalidLevel {
    /// The rejected input, as given
    pub name: String,
}

impl Level {
    /// Numeric rank used for threshold comparisons.
    pub fn rank(self) -> u8 {
        self as u8
    }

    /// Canonical upper-case name, as printed in log lines.
    pub fn name(self) -> &'static str {
        match self {
            Level::NotSet => "NOTSET",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
            Level::Critical => "CRITICAL",
        }
    }

    /// All levels in rank order.
    pub fn all() -> &'static [Level] {
        &[
            Level::NotSet,
            Level::Debug,
            Level::Info,
            Level::Warning,
            Level::Error,
            Level::Critical,
        ]
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `pad` so width/alignment flags apply to the name
        f.pad(self.name())
    }
}

impl FromStr for Level {
    type Err = InvalidLevel;

    /// Names match ASCII case-insensitively; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Level::all()
            .iter()
            .copied()
            .find(|level| level.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| InvalidLevel {
                name: s.to_string(),
            })
    }
}

impl TryFrom<String> for Level {
    type Error = InvalidLevel;

    fn try_from(value: String) -> Result<Self, InvalidLevel> {
        value.parse()
    }
}

impl From<Level> for String {
    fn from(level: Level) -> Self {
        level.name().to_string()
    }
}

/// Whether log lines carry ANSI color sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Color when the output stream is an interactive terminal
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Decide color capability for a stream.
    ///
    /// Environment no-color signals are folded into the mode by
    /// [`Config::apply_env`](crate::Config::apply_env) before this is called.
    pub fn resolve(self, is_terminal: bool) -> bool {
        match self {
            ColorMode::Auto => is_terminal,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// Which clock reading the stopwatch uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClockPreference {
    /// Probe sources from most to least precise and keep the first that works
    #[default]
    Auto,
    HighResolution,
    EpochMillis,
    EpochSeconds,
}
