// Library exports for the sparklog binary and for embedding in other tools.
//
// A `Logger` is a single-owner value; wrap it in a `SharedLogger` when more
// than one producer writes to the same session.

/// Application version (root crate version).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod ansi;
pub mod bridge;
pub mod cli;
pub mod clock;
pub mod duration;
pub mod history;
#[macro_use]
pub mod logger;
pub mod sparkline;
pub mod stopwatch;

pub use sparklog_config as config;

pub use bridge::{SharedLogger, init_log_bridge};
pub use clock::{Clock, ClockSource, ManualClock, SystemClock};
pub use sparklog_config::{ColorMode, Config, InvalidLevel, Level};
pub use duration::{format_duration, format_duration_str};
pub use history::{HISTORY_CAPACITY, TimingHistory};
pub use logger::{LogEvent, Logger};
pub use stopwatch::{Stopwatch, Tick};
