//! Command-line interface for sparklog.
//!
//! One-shot commands (`sparklog info "message"`) print a single line. Since
//! each process is its own session, timing is only interesting in `pipe`
//! mode, where every stdin line shares one stopwatch and history.

use crate::bridge;
use crate::config::env_vars::{self, SPARKLOG_DEBUG};
use crate::config::{ColorMode, Config, Level};
use crate::duration::format_duration_str;
use crate::logger::Logger;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;

/// A stdin line equal to this restarts the stopwatch in `pipe` mode.
pub const RESTART_DIRECTIVE: &str = "--restart";

/// Color argument for CLI
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ColorArg {
    Auto,
    Always,
    Never,
}

impl From<ColorArg> for ColorMode {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => ColorMode::Auto,
            ColorArg::Always => ColorMode::Always,
            ColorArg::Never => ColorMode::Never,
        }
    }
}

/// sparklog - leveled, timed log lines with a timing sparkline
#[derive(Parser)]
#[command(name = "sparklog")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Minimum level to print (NOTSET, DEBUG, INFO, WARNING, ERROR, CRITICAL)
    #[arg(long, global = true, value_name = "LEVEL")]
    pub level: Option<String>,

    /// When to color output (overrides config and environment)
    #[arg(long, global = true, value_enum, value_name = "WHEN")]
    pub color: Option<ColorArg>,

    /// Never color output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Do not draw the timing sparkline
    #[arg(long, global = true)]
    pub no_sparkline: bool,

    /// Config file to use instead of ~/.config/sparklog/config.yaml
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log a DEBUG message
    Debug {
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        message: Vec<String>,
    },
    /// Log an INFO message
    Info {
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        message: Vec<String>,
    },
    /// Log a WARNING message
    Warning {
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        message: Vec<String>,
    },
    /// Log an ERROR message
    Error {
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        message: Vec<String>,
    },
    /// Log a CRITICAL message
    Critical {
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        message: Vec<String>,
    },
    /// Log each stdin line within one timing session
    ///
    /// A line starting with `LEVEL:` (for example `ERROR: copy failed`) is
    /// logged at that level; a line reading `--restart` restarts the stopwatch.
    Pipe {
        /// Level for lines without a `LEVEL:` prefix
        #[arg(long, value_name = "LEVEL", default_value = "INFO")]
        default_level: Level,
    },
    /// Print a millisecond value as a human-readable duration
    Duration {
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
}

/// Parse arguments and run; returns the process exit code.
pub fn process_cli() -> i32 {
    exit_code(run(Cli::parse()))
}

/// Map a command result to an exit code, reporting any error on stderr.
pub fn exit_code(result: Result<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("sparklog: error: {e:#}");
            1
        }
    }
}

/// Run a parsed command line against the process's stdout and stdin.
pub fn run(cli: Cli) -> Result<()> {
    let stdout = io::stdout();
    let is_terminal = stdout.is_terminal();
    execute(cli, Box::new(stdout), is_terminal, io::stdin().lock())
}

/// Run a parsed command line, writing to `out` and reading `pipe` input
/// from `input`. `is_terminal` decides automatic coloring.
pub fn execute(
    cli: Cli,
    mut out: Box<dyn Write + Send>,
    is_terminal: bool,
    input: impl BufRead,
) -> Result<()> {
    if let Commands::Duration { value } = &cli.command {
        writeln!(out, "{}", format_duration_str(value))
            .and_then(|()| out.flush())
            .context("failed to write duration")?;
        return Ok(());
    }

    let config = resolve_config(&cli);
    let mut logger = Logger::to_writer(&config, out, is_terminal);

    if let Some(name) = &cli.level
        && let Err(e) = logger.set_level(name)
    {
        // Non-fatal: the configured threshold stays in effect
        eprintln!("sparklog: {e}");
    }

    let (level, message) = match cli.command {
        Commands::Debug { message } => (Level::Debug, message),
        Commands::Info { message } => (Level::Info, message),
        Commands::Warning { message } => (Level::Warning, message),
        Commands::Error { message } => (Level::Error, message),
        Commands::Critical { message } => (Level::Critical, message),
        Commands::Pipe { default_level } => {
            return pipe(&mut logger, default_level, input);
        }
        Commands::Duration { .. } => return Ok(()),
    };

    logger
        .log(level, message.join(" "))
        .context("failed to write log line")
}

/// Load the config file and environment, then apply command-line flags.
///
/// CLI flags take precedence over the environment, which takes precedence
/// over the config file. A broken config file is reported and replaced by
/// defaults.
pub fn resolve_config(cli: &Cli) -> Config {
    let loaded = match &cli.config {
        Some(path) => Config::load_from(path).map(|mut config| {
            config.apply_env();
            config
        }),
        None => Config::load(),
    };

    let mut config = loaded.unwrap_or_else(|e| {
        eprintln!("sparklog: warning: {e}; using defaults");
        let mut config = Config::default();
        config.apply_env();
        config
    });

    if let Some(color) = cli.color {
        config.color = color.into();
    }
    if cli.no_color {
        config.color = ColorMode::Never;
    }
    if cli.no_sparkline {
        config.sparkline = false;
    }
    config
}

/// Log every line of `input` through `logger`.
///
/// A line starting with `LEVEL:` is logged at that level with the rest as
/// its message; other lines are logged verbatim at `default_level`. A line
/// equal to [`RESTART_DIRECTIVE`] restarts the stopwatch instead of being
/// logged. Bytes that are not UTF-8 are replaced, not rejected.
pub fn pipe(logger: &mut Logger, default_level: Level, input: impl BufRead) -> Result<()> {
    for raw in input.split(b'\n') {
        let raw = raw.context("failed to read stdin")?;
        let bytes = raw.strip_suffix(b"\r").unwrap_or(&raw);
        let line = String::from_utf8_lossy(bytes);
        if line.trim() == RESTART_DIRECTIVE {
            log::debug!("Stopwatch restarted from input");
            logger.start_stopwatch();
            continue;
        }

        let (level, message) = split_level(&line).unwrap_or((default_level, &*line));
        logger
            .log(level, message)
            .context("failed to write log line")?;
    }
    Ok(())
}

/// Split a leading `LEVEL:` prefix off `line`.
pub fn split_level(line: &str) -> Option<(Level, &str)> {
    let (word, rest) = line.trim_start().split_once(':')?;
    if word.contains(char::is_whitespace) {
        return None;
    }
    let level = word.parse().ok()?;
    Some((level, rest.trim_start()))
}

/// Route this crate's own `log` diagnostics to stderr when `SPARKLOG_DEBUG`
/// names a level.
///
/// Diagnostics never go to stdout, which carries the log lines themselves.
pub fn init_diagnostics() {
    let Some(raw) = env_vars::process_env(SPARKLOG_DEBUG) else {
        return;
    };
    let level = match raw.parse::<Level>() {
        Ok(level) => level,
        Err(e) => {
            eprintln!("sparklog: ignoring {SPARKLOG_DEBUG}: {e}");
            return;
        }
    };

    let mut config = Config::default();
    config.apply_env();
    config.level = level;

    if let Err(e) = bridge::init_log_bridge(Logger::stderr(&config)) {
        eprintln!("sparklog: could not install diagnostics logger: {e}");
    }
}
