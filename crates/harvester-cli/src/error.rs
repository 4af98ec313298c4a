//! Error types for the CLI application.

use harvester_domain::traits::SourceError;
use harvester_llm::LlmError;
use harvester_pipeline::PipelineError;
use harvester_store::StoreError;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pipeline run failed
    #[error("{0}")]
    Pipeline(#[from] PipelineError),

    /// Storage error outside a pipeline run
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// Source could not be set up
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// LLM provider could not be set up
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Ctrl-C received
    #[error("Interrupted. Partial data and checkpoint preserved; re-run to resume.")]
    Interrupted,
}

impl CliError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Interrupted => 130,
            _ => 1,
        }
    }
}
