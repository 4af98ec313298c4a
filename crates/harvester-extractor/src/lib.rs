//! Harvester Extractor
//!
//! Per-issue processors for the analysis stage.
//!
//! # Overview
//!
//! Two processors share the same shape (issue text in, derived record out) but
//! differ in how they fail:
//!
//! - **Server extraction**: local regex scan for server identifiers. Pure,
//!   deterministic, never fails. An empty result is a valid outcome.
//! - **Technology classification**: asks an LLM for exactly one label from the
//!   closed `TechLabel` set. Timeouts, provider errors and out-of-set replies
//!   surface as `ClassifyError` so the caller can leave the issue unresolved.
//!
//! # Architecture
//!
//! ```text
//! Issue text → ServerExtractor → Vec<server id>
//! Issue text → LlmClassifier → LLM → parse_label → TechLabel
//! ```
//!
//! # Example Usage
//!
//! ```no_run
//! use harvester_extractor::{ClassificationConfig, ExtractionConfig, LlmClassifier, ServerExtractor};
//! use harvester_domain::traits::Classifier;
//! use harvester_llm::MockProvider;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let extractor = ServerExtractor::new(&ExtractionConfig::default())?;
//! let servers = extractor.extract("contact srv-db1 and srv-auth03 about the outage");
//! assert_eq!(servers, vec!["srv-db1", "srv-auth03"]);
//!
//! let classifier = LlmClassifier::new(MockProvider::new("database"), ClassificationConfig::default());
//! let label = classifier.classify("replica lag on the primary").await?;
//! println!("{}", label);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod classifier;
mod config;
mod error;
mod parser;
mod prompt;
mod servers;


pub use classifier::LlmClassifier;
pub use config::{ClassificationConfig, ExtractionConfig};
pub use error::ExtractorError;
pub use parser::parse_label;
pub use prompt::{build_prompt, SYSTEM_PROMPT};
pub use servers::ServerExtractor;
