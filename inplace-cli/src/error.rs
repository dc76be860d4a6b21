//! Error types for the inplace host

use std::path::PathBuf;

use thiserror::Error;

/// Result type for host operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors surfaced by the command-line host
#[derive(Debug, Error)]
pub enum CliError {
    /// Rendering rejected the options bag
    #[error(transparent)]
    Render(#[from] inplace_fields::ConfigError),

    /// Configuration file given explicitly does not exist
    #[error("configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Configuration file extension not recognized
    #[error("unsupported configuration file format: {path}")]
    UnsupportedFormat { path: PathBuf },

    /// Configuration could not be merged or extracted
    #[error("failed to load configuration: {0}")]
    Config(#[from] Box<figment::Error>),

    /// Failed to read an input file
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Record or options JSON is malformed
    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Options YAML is malformed
    #[error("invalid YAML in {path}: {source}")]
    Yaml {
        path: PathBuf,
        source: serde_yaml_ng::Error,
    },
}

impl From<figment::Error> for CliError {
    fn from(error: figment::Error) -> Self {
        CliError::Config(Box::new(error))
    }
}
