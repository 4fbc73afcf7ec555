//! Error types for documentation generation.
//!
//! Covers every way a run can fail: reading input, decoding the manifest or
//! configuration, invalid command records, and the external generator.

use command_api_core::ModelError;
use thiserror::Error;

/// Errors that can occur while generating documentation.
#[derive(Debug, Error)]
pub enum DocgenError {
    /// File or pipe I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Manifest is not valid JSON or is missing required fields.
    #[error("malformed manifest: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Configuration file could not be parsed.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// A manifest record violates the input contract.
    #[error("invalid manifest: {0}")]
    InvalidManifest(#[from] ModelError),

    /// Configuration values are out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// The generator could not be started.
    #[error("failed to run generator '{program}': {source}")]
    GeneratorSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The generator exited unsuccessfully.
    #[error("generator failed ({status}): {stderr}")]
    GeneratorFailed { status: String, stderr: String },

    /// The generator did not finish in time and was killed.
    #[error("generator timed out after {seconds}s")]
    GeneratorTimeout { seconds: u64 },
}

/// Convenience alias for results with [`DocgenError`].
pub type Result<T> = std::result::Result<T, DocgenError>;
