//! Typed error variants for the sparklog-config crate.
//!
//! Callers that only want to report the failure can rely on `Display`;
//! callers that want to distinguish a missing-permission read from a broken
//! YAML file can match on the variant.

use std::path::PathBuf;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("I/O error reading config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file contained invalid YAML or an unknown value.
    #[error("YAML parse error in config: {0}")]
    Parse(#[from] serde_yaml_ng::Error),
}
