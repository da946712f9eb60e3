//! Integration tests for `Logger`: filtering, timing, sparkline and output.

mod common;

use common::{BrokenPipe, START_MS, test_logger, test_logger_with_color};
use sparklog::ansi;
use sparklog::{ColorMode, Config, HISTORY_CAPACITY, Level, Logger, ManualClock};
use std::sync::Arc;

fn config_at(level: Level) -> Config {
    Config {
        level,
        ..Config::default()
    }
}

// ---------------------------------------------------------------------------
// Level filtering
// ---------------------------------------------------------------------------

#[test]
fn default_threshold_is_info() {
    let mut t = test_logger(&Config::default());
    t.logger.debug("hidden").unwrap();
    t.logger.info("shown").unwrap();
    assert_eq!(t.output.lines().len(), 1);
    assert!(t.output.contents().contains("shown"));
}

#[test]
fn emitted_lines_match_calls_at_or_above_threshold() {
    let mut t = test_logger(&config_at(Level::Warning));
    let calls = [
        Level::Debug,
        Level::Info,
        Level::Warning,
        Level::Error,
        Level::Critical,
        Level::Info,
        Level::Warning,
    ];
    for level in calls {
        t.logger.log(level, "x").unwrap();
    }
    let expected = calls.iter().filter(|l| **l >= Level::Warning).count();
    assert_eq!(t.output.lines().len(), expected);
}

#[test]
fn threshold_changes_apply_to_later_calls() {
    let mut t = test_logger(&Config::default());
    t.logger.debug("a").unwrap();
    t.logger.set_level("DEBUG").unwrap();
    t.logger.debug("b").unwrap();
    t.logger.set_level("critical").unwrap();
    t.logger.error("c").unwrap();
    assert_eq!(t.output.bodies().len(), 1);
    assert!(t.output.bodies()[0].ends_with(" b"));
}

#[test]
fn notset_threshold_lets_everything_through() {
    let mut t = test_logger(&config_at(Level::NotSet));
    t.logger.log(Level::NotSet, "zero").unwrap();
    t.logger.debug("ten").unwrap();
    assert_eq!(t.output.lines().len(), 2);
}

#[test]
fn invalid_level_leaves_threshold_unchanged() {
    let mut t = test_logger(&config_at(Level::Error));
    let err = t.logger.set_level("BOGUS").unwrap_err();
    assert_eq!(err.name, "BOGUS");
    assert_eq!(t.logger.threshold(), Level::Error);

    t.logger.info("still filtered").unwrap();
    assert!(t.output.lines().is_empty());
    t.logger.error("passes").unwrap();
    assert_eq!(t.output.lines().len(), 1);
}

#[test]
fn set_threshold_takes_a_level_directly() {
    let mut t = test_logger(&Config::default());
    t.logger.set_threshold(Level::Critical);
    assert_eq!(t.logger.threshold(), Level::Critical);
    assert!(!t.logger.is_enabled(Level::Error));
    t.logger.error("hidden").unwrap();
    t.logger.critical("shown").unwrap();
    assert_eq!(t.output.lines().len(), 1);
}

#[test]
fn filtered_calls_do_not_touch_session_state() {
    let mut t = test_logger(&config_at(Level::Error));
    t.clock.advance(100);
    t.logger.error("first").unwrap();
    t.clock.advance(5_000);
    t.logger.info("filtered").unwrap();
    t.logger.debug("filtered").unwrap();

    assert_eq!(t.logger.history().len(), 1);
    assert_eq!(t.logger.stopwatch().last_tick_ms(), START_MS + 100);

    t.clock.advance(1_000);
    t.logger.error("second").unwrap();
    // elapsed spans the filtered calls: 5s + 1s
    assert!(t.output.bodies()[1].contains(" +6.00s 6.10s "));
}

// ---------------------------------------------------------------------------
// Line composition
// ---------------------------------------------------------------------------

#[test]
fn first_line_has_no_sparkline() {
    let mut t = test_logger(&Config::default());
    t.clock.advance(1_500);
    t.logger.info("hello").unwrap();
    assert_eq!(t.output.bodies(), vec!["    INFO +1.50s 1.50s hello"]);
}

#[test]
fn sparkline_appears_from_second_line() {
    let mut t = test_logger(&Config::default());
    t.clock.advance(10);
    t.logger.info("one").unwrap();
    t.clock.advance(50);
    t.logger.warning("two").unwrap();
    t.clock.advance(100);
    t.logger.error("three").unwrap();

    assert_eq!(
        t.output.bodies(),
        vec![
            "    INFO +10ms 10ms one",
            " WARNING +50ms 60ms ▂█ two",
            "   ERROR +100ms 160ms ▁▄█ three",
        ]
    );
}

#[test]
fn sparkline_can_be_disabled() {
    let config = Config {
        sparkline: false,
        ..Config::default()
    };
    let mut t = test_logger(&config);
    for _ in 0..3 {
        t.clock.advance(10);
        t.logger.info("m").unwrap();
    }
    for body in t.output.bodies() {
        assert!(!body.contains('▁') && !body.contains('█'), "{body}");
    }
}

#[test]
fn message_is_verbatim() {
    let mut t = test_logger(&Config::default());
    t.logger.info("  spaced  {braces} %d  ").unwrap();
    assert!(t.output.contents().ends_with("0ms   spaced  {braces} %d  \n"));
}

#[test]
fn macros_format_arguments() {
    let mut t = test_logger(&config_at(Level::Debug));
    sparklog::log_debug!(t.logger, "step {} of {}", 1, 3).unwrap();
    sparklog::log_critical!(t.logger, "{:>4}", "x").unwrap();
    let bodies = t.output.bodies();
    assert!(bodies[0].ends_with(" step 1 of 3"));
    assert!(bodies[1].starts_with("CRITICAL "));
    assert!(bodies[1].ends_with("    x"));
}

#[test]
fn one_newline_per_line() {
    let mut t = test_logger(&Config::default());
    t.logger.info("a").unwrap();
    t.logger.info("b").unwrap();
    assert_eq!(t.output.contents().matches('\n').count(), 2);
}

#[test]
fn invalid_timestamp_format_falls_back() {
    let config = Config {
        timestamp_format: "%".to_string(),
        ..Config::default()
    };
    let mut t = test_logger(&config);
    t.logger.info("ok").unwrap();
    let line = &t.output.lines()[0];
    assert_eq!(&line[4..5], "-");
    assert_eq!(&line[13..14], ":");
}

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

#[test]
fn no_escape_sequences_without_color() {
    let mut t = test_logger(&Config::default());
    for ms in [1, 50, 100] {
        t.clock.advance(ms);
        t.logger.error("x").unwrap();
    }
    assert!(!t.output.contents().contains('\x1b'));
}

#[test]
fn color_decision_is_reported() {
    assert!(!test_logger(&Config::default()).logger.color_enabled());
    assert!(
        test_logger_with_color(&Config::default(), true)
            .logger
            .color_enabled()
    );

    let always = Config {
        color: ColorMode::Always,
        ..Config::default()
    };
    let logger = Logger::to_writer(&always, Box::new(std::io::sink()), false);
    assert!(logger.color_enabled());
    let auto = Logger::to_writer(&Config::default(), Box::new(std::io::sink()), false);
    assert!(!auto.color_enabled());
}

#[test]
fn colored_level_and_sparkline_bands() {
    let mut t = test_logger_with_color(&Config::default(), true);
    t.clock.advance(10);
    t.logger.warning("a").unwrap();
    t.clock.advance(50);
    t.logger.warning("b").unwrap();
    t.clock.advance(100);
    t.logger.warning("c").unwrap();

    let last = t.output.lines().pop().unwrap();
    assert!(last.contains(&format!("{} WARNING{}", ansi::YELLOW, ansi::RESET)));
    let spark = format!(
        "{}▁{}▄{}█{}",
        ansi::GREEN,
        ansi::RESET,
        ansi::RED,
        ansi::RESET
    );
    assert!(last.contains(&spark), "{last:?}");
}

// ---------------------------------------------------------------------------
// Stopwatch and history
// ---------------------------------------------------------------------------

#[test]
fn history_is_bounded() {
    let mut t = test_logger(&Config::default());
    for i in 1..=25u64 {
        t.clock.advance(i);
        t.logger.info("tick").unwrap();
        assert!(t.logger.history().len() <= HISTORY_CAPACITY);
    }
    assert_eq!(t.logger.history().snapshot(), (6..=25).collect::<Vec<u64>>());
}

#[test]
fn start_stopwatch_resets_totals_and_history() {
    let mut t = test_logger(&Config::default());
    t.clock.advance(2_000);
    t.logger.info("a").unwrap();
    t.clock.advance(2_000);
    t.logger.info("b").unwrap();

    t.clock.advance(70_000);
    t.logger.start_stopwatch();
    assert!(t.logger.history().is_empty());

    t.clock.advance(5);
    t.logger.info("c").unwrap();
    assert_eq!(t.output.bodies()[2], "    INFO +5ms 5ms c");
}

#[test]
fn long_sessions_use_larger_units() {
    let mut t = test_logger(&Config::default());
    t.clock.advance(65_000);
    t.logger.info("a").unwrap();
    t.clock.advance(3_635_000);
    t.logger.info("b").unwrap();
    let bodies = t.output.bodies();
    assert!(bodies[0].contains(" +1m05s 1m05s "));
    assert!(bodies[1].contains(" +1h00m 1h01m "));
}

#[test]
fn construction_starts_the_stopwatch() {
    let clock = ManualClock::new(42);
    let logger = Logger::with_output(
        &Config::default(),
        Arc::new(clock.clone()),
        Box::new(std::io::sink()),
        false,
    );
    assert_eq!(logger.stopwatch().start_time_ms(), 42);
    assert_eq!(logger.stopwatch().last_tick_ms(), 42);
}

// ---------------------------------------------------------------------------
// Output failures
// ---------------------------------------------------------------------------

#[test]
fn write_failure_is_returned_to_the_caller() {
    let mut logger = Logger::with_output(
        &Config::default(),
        Arc::new(ManualClock::new(0)),
        Box::new(BrokenPipe),
        false,
    );
    let err = logger.info("lost").unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::BrokenPipe);
    // filtered calls never reach the writer
    assert!(logger.debug("never written").is_ok());
}
