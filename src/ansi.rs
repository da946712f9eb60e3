//! ANSI SGR sequences used in log lines.

use crate::config::Level;

pub const RESET: &str = "\x1b[0m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const BOLD_RED: &str = "\x1b[1;31m";

/// Color for a level name, or `None` for levels printed plain.
pub fn level_color(level: Level) -> Option<&'static str> {
    match level {
        Level::NotSet => None,
        Level::Debug => Some(BLUE),
        Level::Info => Some(GREEN),
        Level::Warning => Some(YELLOW),
        Level::Error => Some(RED),
        Level::Critical => Some(BOLD_RED),
    }
}

/// Wrap `text` in `color` followed by a reset.
pub fn paint(color: &str, text: &str) -> String {
    format!("{color}{text}{RESET}")
}
