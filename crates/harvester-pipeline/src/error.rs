//! Error types for pipeline runs

use harvester_domain::traits::SourceError;
use harvester_extractor::ExtractorError;
use harvester_store::StoreError;
use thiserror::Error;

/// Errors that abort a pipeline run
///
/// Every variant leaves the partial stores and the last saved checkpoint
/// consistent, so the run can simply be started again.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Partial store or artifact write failed
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// Source failed after the retry budget, or failed permanently
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// Invalid configuration or input
    #[error("Configuration error: {0}")]
    Config(String),

    /// The checkpoint could not be written; the previous one is still valid
    #[error("Failed to save checkpoint: {0}")]
    CheckpointSave(#[source] StoreError),
}

impl From<ExtractorError> for PipelineError {
    fn from(e: ExtractorError) -> Self {
        PipelineError::Config(e.to_string())
    }
}
