//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the pipeline core and the
//! services it talks to. Implementations live in other crates.

use crate::{Cursor, Issue, TechLabel};
use async_trait::async_trait;
use thiserror::Error;

/// One page returned by an [`IssueSource`]
#[derive(Debug, Clone, Default)]
pub struct Page {
    /// Issues on this page, in source order
    pub items: Vec<Issue>,

    /// Cursor for the following page, or [`Cursor::Exhausted`]
    pub next: Cursor,

    /// Entries on this page the source could not decode and dropped
    pub rejected: usize,
}

impl Page {
    /// A page of decoded issues
    pub fn new(items: Vec<Issue>, next: Cursor) -> Self {
        Self {
            items,
            next,
            rejected: 0,
        }
    }

    /// Final page of a source
    pub fn last(items: Vec<Issue>) -> Self {
        Self::new(items, Cursor::Exhausted)
    }

    /// Record entries dropped while decoding this page
    pub fn with_rejected(mut self, rejected: usize) -> Self {
        self.rejected = rejected;
        self
    }
}

/// Failure reported by an issue source
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SourceError {
    /// Timeout, rate limit, 5xx; worth retrying
    #[error("Transient source error: {0}")]
    Transient(String),

    /// The cursor handed to the source is no longer accepted
    #[error("Cursor rejected by source: {0}")]
    InvalidCursor(String),

    /// Anything that will not get better by retrying
    #[error("Source error: {0}")]
    Fatal(String),
}

impl SourceError {
    /// Whether the core should retry this failure
    pub fn is_transient(&self) -> bool {
        matches!(self, SourceError::Transient(_))
    }
}

/// Trait for paginated issue sources
///
/// Implemented by the adapter layer (harvester-source). Sources never touch
/// checkpoint state; the pipeline advances the checkpoint after a page has
/// been processed.
#[async_trait]
pub trait IssueSource: Send {
    /// Fetch the page at `cursor`
    async fn next_page(&mut self, cursor: &Cursor) -> Result<Page, SourceError>;
}

/// Trait for LLM provider operations
///
/// Implemented by the infrastructure layer (harvester-llm)
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Error type for LLM operations
    type Error: std::fmt::Display + Send;

    /// Generate a completion for `prompt` under the given system instruction
    async fn generate(&self, system: &str, prompt: &str) -> Result<String, Self::Error>;

    /// Model identifier, for logging
    fn model_name(&self) -> &str;
}

/// Why an issue could not be classified
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClassifyError {
    /// Nothing to classify
    #[error("Empty input text")]
    EmptyInput,

    /// The provider call failed
    #[error("Provider error: {0}")]
    Provider(String),

    /// The provider did not answer in time
    #[error("Classification timed out")]
    Timeout,

    /// The reply was not one of the allowed labels
    #[error("Label outside the allowed set: {0:?}")]
    OutOfSet(String),
}

/// Trait for assigning a technology label to issue text
///
/// Implemented by the application layer (harvester-extractor)
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Classify free text into exactly one label
    async fn classify(&self, text: &str) -> Result<TechLabel, ClassifyError>;
}
