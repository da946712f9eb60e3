//! Millisecond clock sources for the stopwatch.
//!
//! Readings are wall-clock based. They are good enough for elapsed-time
//! display but are not monotonic across clock adjustments; the stopwatch
//! saturates instead of going negative.

use crate::config::ClockPreference;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Anything that can report the current time in epoch milliseconds.
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> u64;
}

/// A concrete way of reading the system time, most precise first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockSource {
    /// `SystemTime` with sub-second precision
    HighResolution,
    /// Epoch milliseconds returned directly by chrono
    EpochMillis,
    /// Epoch seconds times 1000; only second granularity
    EpochSeconds,
}

impl ClockSource {
    /// Sources in preference order.
    pub const PREFERENCE: [ClockSource; 3] = [
        ClockSource::HighResolution,
        ClockSource::EpochMillis,
        ClockSource::EpochSeconds,
    ];

    /// Take one reading, or `None` if this source is unusable right now.
    pub fn read(self) -> Option<u64> {
        match self {
            ClockSource::HighResolution => SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .ok()
                .and_then(|d| u64::try_from(d.as_millis()).ok()),
            ClockSource::EpochMillis => u64::try_from(chrono::Utc::now().timestamp_millis()).ok(),
            ClockSource::EpochSeconds => epoch_seconds().map(|s| s.saturating_mul(1000)),
        }
    }
}

#[cfg(unix)]
fn epoch_seconds() -> Option<u64> {
    // SAFETY: time(2) with a null pointer only returns the value
    let secs = unsafe { libc::time(std::ptr::null_mut()) };
    u64::try_from(secs).ok()
}

#[cfg(not(unix))]
fn epoch_seconds() -> Option<u64> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .ok()
        .map(|d| d.as_secs())
}

/// The process wall clock, read through the best available [`ClockSource`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    source: ClockSource,
}

impl SystemClock {
    /// Probe sources in preference order and keep the first that yields a reading.
    pub fn detect() -> Self {
        let source = ClockSource::PREFERENCE
            .into_iter()
            .find(|s| s.read().is_some())
            .unwrap_or(ClockSource::EpochSeconds);
        log::debug!("Selected clock source {:?}", source);
        Self { source }
    }

    /// Use a fixed source.
    pub fn with_source(source: ClockSource) -> Self {
        Self { source }
    }

    /// Build the clock a [`ClockPreference`] asks for.
    pub fn from_preference(preference: ClockPreference) -> Self {
        match preference {
            ClockPreference::Auto => Self::detect(),
            ClockPreference::HighResolution => Self::with_source(ClockSource::HighResolution),
            ClockPreference::EpochMillis => Self::with_source(ClockSource::EpochMillis),
            ClockPreference::EpochSeconds => Self::with_source(ClockSource::EpochSeconds),
        }
    }

    pub fn source(&self) -> ClockSource {
        self.source
    }
}

impl Clock for SystemClock {
    /// Falls back to the less precise sources if the selected one fails, and
    /// to 0 if none can be read.
    fn now_millis(&self) -> u64 {
        self.source
            .read()
            .or_else(|| {
                ClockSource::PREFERENCE
                    .into_iter()
                    .filter(|s| *s != self.source)
                    .find_map(ClockSource::read)
            })
            .unwrap_or(0)
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same time, so a test can keep one handle and give the
/// other to a logger.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: Arc::new(AtomicU64::new(start_ms)),
        }
    }

    pub fn set(&self, ms: u64) {
        self.now.store(ms, Ordering::SeqCst);
    }

    pub fn advance(&self, ms: u64) {
        self.now.fetch_add(ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_source_reads() {
        for source in ClockSource::PREFERENCE {
            assert!(source.read().is_some(), "{source:?} failed");
        }
    }

    #[test]
    fn test_detect_prefers_high_resolution() {
        assert_eq!(SystemClock::detect().source(), ClockSource::HighResolution);
    }

    #[test]
    fn test_epoch_seconds_is_whole_seconds() {
        let ms = ClockSource::EpochSeconds.read().unwrap();
        assert_eq!(ms % 1000, 0);
    }

    #[test]
    fn test_sources_agree_within_a_second() {
        let hi = ClockSource::HighResolution.read().unwrap();
        let ms = ClockSource::EpochMillis.read().unwrap();
        let s = ClockSource::EpochSeconds.read().unwrap();
        assert!(ms.abs_diff(hi) < 1000);
        assert!(hi.abs_diff(s) < 2000);
    }

    #[test]
    fn test_preference_mapping() {
        assert_eq!(
            SystemClock::from_preference(ClockPreference::EpochMillis).source(),
            ClockSource::EpochMillis
        );
        assert_eq!(
            SystemClock::from_preference(ClockPreference::EpochSeconds).source(),
            ClockSource::EpochSeconds
        );
    }

    #[test]
    fn test_manual_clock_shared_between_clones() {
        let clock = ManualClock::new(100);
        let other = clock.clone();
        clock.advance(50);
        assert_eq!(other.now_millis(), 150);
        other.set(7);
        assert_eq!(clock.now_millis(), 7);
    }
}
