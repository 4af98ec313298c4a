//! Resumable analysis stage
//!
//! Each issue goes through two independent processors, each with its own
//! partial store and dedup index:
//!
//! - server extraction always produces a record (possibly with no servers)
//! - classification produces a record only on success, so failures stay out
//!   of the index and are retried on the next pass

use crate::config::{OutputConfig, PipelineConfig};
use crate::consolidate::{ConsolidationReport, Consolidator};
use crate::error::PipelineError;
use crate::metrics::RunMetrics;
use harvester_domain::traits::Classifier;
use harvester_domain::{Checkpoint, Cursor, Issue, ServerMention, TechAnnotation};
use harvester_extractor::ServerExtractor;
use harvester_store::{AppendOutcome, CheckpointStore, PartialStore};
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Issue array read from disk
#[derive(Debug, Clone, Default)]
pub struct IssueInput {
    /// Entries that decoded as issues, in input order
    pub issues: Vec<Issue>,

    /// Keys of entries that did not decode (empty when no key was readable)
    pub rejected: Vec<String>,
}

impl From<Vec<Issue>> for IssueInput {
    fn from(issues: Vec<Issue>) -> Self {
        Self {
            issues,
            rejected: Vec::new(),
        }
    }
}

/// Read a consolidated issue array, entry by entry
///
/// Only an unreadable file or a document that is not a JSON array is an
/// error. Entries that do not decode are skipped with a warning and their
/// keys kept in [`IssueInput::rejected`].
pub fn read_issues(path: &Path) -> Result<IssueInput, PipelineError> {
    let content = fs::read_to_string(path).map_err(|e| {
        PipelineError::Config(format!("Cannot read input {}: {}", path.display(), e))
    })?;
    let entries: Vec<Value> = serde_json::from_str(&content).map_err(|e| {
        PipelineError::Config(format!("Input {} is not a JSON array: {}", path.display(), e))
    })?;

    let mut input = IssueInput::default();
    for (index, entry) in entries.into_iter().enumerate() {
        let key = entry
            .get("key")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        match serde_json::from_value::<Issue>(entry) {
            Ok(issue) => input.issues.push(issue),
            Err(e) => {
                warn!(index, key = %key, "Skipping malformed issue: {}", e);
                input.rejected.push(key);
            }
        }
    }
    Ok(input)
}

/// Read a consolidated issue array, dropping entries that do not decode
pub fn load_issues(path: &Path) -> Result<Vec<Issue>, PipelineError> {
    Ok(read_issues(path)?.issues)
}

/// Outcome of an analysis run
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    /// Index the run resumed from
    pub resumed_from: usize,

    /// Issues considered by this run (after `limit`)
    pub total: usize,

    /// Issues already done by both processors
    pub already_complete: usize,

    /// Issues processed by at least one processor in this run
    pub processed: usize,

    /// Consolidation result
    pub consolidation: ConsolidationReport,

    /// Run counters
    pub metrics: RunMetrics,
}

/// Per-issue extraction and classification over an issue array
pub struct AnalysisPipeline<C: Classifier> {
    output: OutputConfig,
    extractor: ServerExtractor,
    classifier: C,
    target: String,
    limit: Option<usize>,
    rejected: Vec<String>,
}

impl<C: Classifier> AnalysisPipeline<C> {
    /// Create an analysis pipeline; `target` names the input (its path)
    pub fn new(
        config: &PipelineConfig,
        classifier: C,
        target: impl Into<String>,
    ) -> Result<Self, PipelineError> {
        Ok(Self {
            output: config.output.clone(),
            extractor: ServerExtractor::new(&config.extraction)?,
            classifier,
            target: target.into(),
            limit: None,
            rejected: Vec::new(),
        })
    }

    /// Only consider the first `limit` issues of the input
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit.filter(|&n| n > 0);
        self
    }

    /// Keys of input entries that could not be decoded
    ///
    /// They count as skipped and are listed as unresolved at consolidation.
    pub fn with_rejected(mut self, rejected: Vec<String>) -> Self {
        self.rejected = rejected;
        self
    }

    /// Process every pending issue, then consolidate
    pub async fn run(&self, issues: &[Issue]) -> Result<AnalysisReport, PipelineError> {
        let started = Instant::now();
        let mut metrics = RunMetrics::new();

        let issues = match self.limit {
            Some(limit) => &issues[..limit.min(issues.len())],
            None => issues,
        };

        let mut servers = PartialStore::<ServerMention>::open(self.output.server_partial())?;
        let mut techs = PartialStore::<TechAnnotation>::open(self.output.tech_partial())?;
        let checkpoints = CheckpointStore::new(self.output.analysis_checkpoint());

        let resumed_from = match checkpoints.load_for(&self.target)?.map(|c| c.cursor) {
            Some(Cursor::Offset(offset)) if (offset as usize) <= issues.len() => offset as usize,
            Some(Cursor::Offset(offset)) => {
                warn!(offset, "Checkpoint is beyond the input, starting over");
                0
            }
            _ => 0,
        };
        info!(
            "Loaded {} issues, resuming at {} ({} extracted, {} classified so far)",
            issues.len(),
            resumed_from,
            servers.len(),
            techs.len()
        );

        if !self.rejected.is_empty() {
            warn!("{} input entries could not be read as issues", self.rejected.len());
            metrics.record_rejected(self.rejected.len());
        }

        let mut already_complete = 0;
        let mut processed = 0;

        for (index, issue) in issues.iter().enumerate().skip(resumed_from) {
            metrics.record_item();

            if !issue.has_key() {
                warn!(index, "Skipping issue without a key");
                metrics.record_skipped();
            } else if servers.contains(&issue.key) && techs.contains(&issue.key) {
                debug!(key = %issue.key, "Already complete");
                metrics.record_duplicate();
                already_complete += 1;
            } else {
                self.process(issue, &mut servers, &mut techs, &mut metrics)
                    .await?;
                processed += 1;
            }

            checkpoints
                .save(&Checkpoint::new(
                    self.target.clone(),
                    Cursor::Offset(index as u64 + 1),
                    servers.len() as u64,
                ))
                .map_err(PipelineError::CheckpointSave)?;

            if processed > 0 && processed % 25 == 0 {
                info!("Processed {} issues this run", processed);
            }
        }

        let consolidation = Consolidator::new(self.output.clone())
            .with_rejected(self.rejected.clone())
            .run(issues)?;
        checkpoints.clear()?;
        metrics.runtime = started.elapsed();

        Ok(AnalysisReport {
            resumed_from,
            total: issues.len(),
            already_complete,
            processed,
            consolidation,
            metrics,
        })
    }

    async fn process(
        &self,
        issue: &Issue,
        servers: &mut PartialStore<ServerMention>,
        techs: &mut PartialStore<TechAnnotation>,
        metrics: &mut RunMetrics,
    ) -> Result<(), PipelineError> {
        let text = issue.text();

        if !servers.contains(&issue.key) {
            let found = self.extractor.extract(&text);
            metrics.record_extraction(found.len());
            if servers.append(&ServerMention::new(issue.key.clone(), found))? == AppendOutcome::Written {
                metrics.record_written();
            }
        }

        if !techs.contains(&issue.key) {
            match self.classifier.classify(&text).await {
                Ok(label) => {
                    debug!(key = %issue.key, %label, "Classified");
                    metrics.record_classification(true);
                    if techs.append(&TechAnnotation::new(issue.key.clone(), label))?
                        == AppendOutcome::Written
                    {
                        metrics.record_written();
                    }
                }
                Err(e) => {
                    warn!(key = %issue.key, "Classification failed: {}", e);
                    metrics.record_classification(false);
                }
            }
        }

        Ok(())
    }
}
