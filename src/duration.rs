//! Human-readable duration strings for log lines.
//!
//! Buckets are chosen so the string stays short: `500ms`, `1.50s`, `1m05s`,
//! `1h01m`. All arithmetic is integer; nothing here rounds up.

const SECOND: u64 = 1000;
const MINUTE: u64 = 60 * SECOND;
const HOUR: u64 = 60 * MINUTE;

/// Format a millisecond count.
pub fn format_duration(ms: u64) -> String {
    if ms < SECOND {
        format!("{ms}ms")
    } else if ms < MINUTE {
        let centis = ms * 100 / SECOND;
        format!("{}.{:02}s", centis / 100, centis % 100)
    } else if ms < HOUR {
        format!("{}m{:02}s", ms / MINUTE, (ms % MINUTE) / SECOND)
    } else {
        format!("{}h{:02}m", ms / HOUR, (ms % HOUR) / MINUTE)
    }
}

/// Format a raw textual millisecond value.
///
/// Input that is not a non-negative integer is passed through unchanged with
/// an `ms` suffix instead of failing.
pub fn format_duration_str(raw: &str) -> String {
    match raw.trim().parse::<u64>() {
        Ok(ms) => format_duration(ms),
        Err(_) => format!("{raw}ms"),
    }
}
