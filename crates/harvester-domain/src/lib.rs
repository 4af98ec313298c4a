//! Harvester Domain Layer
//!
//! This crate contains the core types of the issue harvesting pipeline and the
//! trait interfaces every other layer depends upon. It does no I/O of its own;
//! the only runtime dependency is the timer used between retries.
//!
//! ## Key Concepts
//!
//! - **Issue**: One record pulled from the external tracker, identified by its key
//! - **Checkpoint**: Durable marker of how far a run got
//! - **Derived records**: Server mentions and technology annotations, one per issue
//! - **Aggregate**: Category → count mapping, recomputable from derived records
//! - **Retry policy**: Bounded attempts with capped exponential backoff, and
//!   the single async executor that applies it
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture:
//! - Pure pipeline vocabulary only
//! - Persistence, HTTP and LLM implementations live in other crates
//! - Trait definitions for all external interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod aggregate;
pub mod checkpoint;
pub mod issue;
pub mod label;
pub mod record;
pub mod retry;
pub mod traits;

// Re-exports for convenience
pub use aggregate::Aggregate;
pub use checkpoint::{Checkpoint, Cursor};
pub use issue::Issue;
pub use label::TechLabel;
pub use record::{Keyed, ServerMention, Tally, TechAnnotation};
pub use retry::{retry_with_policy, RetryPolicy, StepFuture};
