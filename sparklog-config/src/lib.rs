//! Configuration system for the sparklog command-line logger.
//!
//! This crate provides:
//!
//! - The [`Level`] enumeration and its [`InvalidLevel`] parse error
//! - Color and clock policy types
//! - YAML config file loading and environment overrides

pub mod config;
pub mod env_vars;
pub mod error;
mod types;

pub use config::{Config, DEFAULT_TIMESTAMP_FORMAT};
pub use error::ConfigError;
pub use types::{ClockPreference, ColorMode, InvalidLevel, Level};
