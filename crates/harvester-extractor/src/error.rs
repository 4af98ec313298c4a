//! Error types for the Extractor

use thiserror::Error;

/// Errors that can occur while setting up a processor
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The configured server pattern does not compile
    #[error("Invalid server pattern: {0}")]
    Regex(#[from] regex::Error),
}
