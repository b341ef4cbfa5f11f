//! Error types for configuration and output helpers.
//!
//! Schema derivation itself never fails; these errors only come from
//! loading or saving [`SchemaConfig`](crate::SchemaConfig) files and from
//! the JSON convenience helpers on [`JsonSchema`](crate::JsonSchema).

use thiserror::Error;

/// Errors raised outside the derivation path.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias for results with [`SchemaError`].
pub type Result<T> = std::result::Result<T, SchemaError>;
