//! Environment variables recognized by sparklog.
//!
//! All lookups go through a caller-supplied function so the override logic
//! can be exercised without touching the process environment.

/// Standard no-color signal (<https://no-color.org>).
pub const NO_COLOR: &str = "NO_COLOR";

/// Tool-specific no-color signal.
pub const SPARKLOG_NO_COLOR: &str = "SPARKLOG_NO_COLOR";

/// Initial threshold level.
pub const SPARKLOG_LEVEL: &str = "SPARKLOG_LEVEL";

/// Alternate config file path.
pub const SPARKLOG_CONFIG: &str = "SPARKLOG_CONFIG";

/// Level for the CLI's own diagnostics on stderr.
pub const SPARKLOG_DEBUG: &str = "SPARKLOG_DEBUG";

/// Names that force colorless output when present, whatever their value.
pub const NO_COLOR_VARS: &[&str] = &[NO_COLOR, SPARKLOG_NO_COLOR];

/// Look a variable up in the real process environment.
///
/// Values that are not valid Unicode are treated as present but empty, so a
/// no-color signal still counts.
pub fn process_env(name: &str) -> Option<String> {
    std::env::var_os(name).map(|v| v.into_string().unwrap_or_default())
}

/// Whether any no-color signal is present.
pub fn no_color_requested(lookup: impl Fn(&str) -> Option<String>) -> bool {
    NO_COLOR_VARS.iter().any(|name| lookup(name).is_some())
}
