//! Infrastructure error types shared across the workspace.

use thiserror::Error;

/// Errors raised by infrastructure concerns (files, parsing, configuration).
///
/// Domain-level failures live in `mecsim-offload`'s own error type; this
/// enum only covers what the shared plumbing can get wrong.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid configuration value.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem failure while reading a scenario.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed YAML in a scenario file.
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml::Error),
}

/// Result alias for infrastructure operations.
pub type Result<T> = std::result::Result<T, Error>;
