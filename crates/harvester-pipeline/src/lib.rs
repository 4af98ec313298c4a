//! Harvester Pipeline
//!
//! Fault-tolerant incremental stages built on the stores in `harvester-store`.
//!
//! # Overview
//!
//! Both stages follow the same pattern:
//!
//! - **Resume**: load the checkpoint for the run target and rebuild the dedup
//!   index from the partial store
//! - **Process**: one page (fetch) or one issue (analysis) at a time
//! - **Persist**: durable append first, checkpoint second
//! - **Consolidate**: once the input is exhausted, rewrite the final
//!   artifacts from the partial stores
//!
//! Any abort leaves a state from which a new run picks up where the last
//! durable step ended.
//!
//! # Fetch
//!
//! ```no_run
//! use harvester_domain::traits::IssueSource;
//! use harvester_pipeline::{FetchPipeline, PipelineConfig};
//!
//! # async fn example<S: IssueSource>(mut source: S) -> Result<(), Box<dyn std::error::Error>> {
//! let config = PipelineConfig::default();
//! let pipeline = FetchPipeline::new(&config, "project = OPS ORDER BY created DESC");
//! let report = pipeline.run(&mut source).await?;
//! println!("{} issues\n{}", report.consolidated, report.metrics.summary());
//! # Ok(())
//! # }
//! ```
//!
//! # Analysis
//!
//! ```no_run
//! use harvester_extractor::{ClassificationConfig, LlmClassifier};
//! use harvester_llm::MockProvider;
//! use harvester_pipeline::{load_issues, AnalysisPipeline, PipelineConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PipelineConfig::default();
//! let input = config.output.issues_data();
//! let issues = load_issues(&input)?;
//!
//! let classifier = LlmClassifier::new(MockProvider::new("database"), ClassificationConfig::default());
//! let pipeline = AnalysisPipeline::new(&config, classifier, input.display().to_string())?;
//! let report = pipeline.run(&issues).await?;
//! println!("{} unresolved", report.consolidation.unresolved.len());
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! ```toml
//! [output]
//! dir = "output"
//!
//! [fetch]
//! project = "OPS"
//! jql_suffix = "ORDER BY created DESC"
//! page_size = 50
//!
//! [retry]
//! max_attempts = 5
//! initial_backoff_ms = 1000
//! multiplier = 2.0
//! max_backoff_ms = 30000
//!
//! [extraction]
//! prefix = "srv-"
//! min_suffix_len = 2
//! max_suffix_len = 10
//!
//! [classification]
//! timeout_secs = 60
//! reask_on_invalid = true
//! ```

#![warn(missing_docs)]

mod analyze;
mod config;
mod consolidate;
mod error;
mod fetch;
mod metrics;

pub use analyze::{load_issues, read_issues, AnalysisPipeline, AnalysisReport, IssueInput};
pub use config::{
    FetchConfig, JiraSettings, LlmSettings, OutputConfig, PipelineConfig, MAX_PAGE_SIZE,
};
pub use consolidate::{
    consolidate, malformed_issues, unresolved_issues, ConsolidationReport, Consolidator, ServerCount,
    TechnologyCount, UnresolvedIssue, UnresolvedReason,
};
pub use error::PipelineError;
pub use fetch::{FetchPipeline, FetchReport};
pub use metrics::RunMetrics;
