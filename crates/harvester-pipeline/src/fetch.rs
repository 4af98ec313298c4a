//! Resumable fetch stage
//!
//! ```text
//! load checkpoint → next_page (retried) → append each issue → save checkpoint
//!        ↑                                                          │
//!        └──────────────────── until Exhausted ─────────────────────┘
//!                                    ↓
//!                     consolidate into issues_data.json
//! ```

use crate::config::{OutputConfig, PipelineConfig};
use crate::consolidate::consolidate;
use crate::error::PipelineError;
use crate::metrics::RunMetrics;
use harvester_domain::traits::{IssueSource, Page, SourceError};
use harvester_domain::{retry_with_policy, Checkpoint, Cursor, Issue, RetryPolicy};
use harvester_store::{AppendOutcome, CheckpointStore, PartialStore};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Outcome of a fetch run
#[derive(Debug, Clone)]
pub struct FetchReport {
    /// Cursor the run started from
    pub resumed_from: Cursor,

    /// Whether pages were requested at all (false when already complete)
    pub fetched: bool,

    /// Issues in the partial store at the end of the run
    pub stored: usize,

    /// Issues written to the final artifact
    pub consolidated: usize,

    /// Run counters
    pub metrics: RunMetrics,
}

/// Drives an [`IssueSource`] into the issue partial store
///
/// The checkpoint is saved only after every issue of a page is durable, so a
/// crash at any point re-fetches at most one page and the dedup index turns
/// the repeats into no-ops.
pub struct FetchPipeline {
    output: OutputConfig,
    retry: RetryPolicy,
    target: String,
    refresh: bool,
}

impl FetchPipeline {
    /// Create a fetch pipeline for `target` (the query string)
    pub fn new(config: &PipelineConfig, target: impl Into<String>) -> Self {
        Self {
            output: config.output.clone(),
            retry: config.retry.clone(),
            target: target.into(),
            refresh: false,
        }
    }

    /// Fetch again even when the checkpoint says the source is exhausted
    pub fn with_refresh(mut self, refresh: bool) -> Self {
        self.refresh = refresh;
        self
    }

    /// The query this pipeline checkpoints against
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Run until the source is exhausted, then consolidate
    pub async fn run<S: IssueSource>(&self, source: &mut S) -> Result<FetchReport, PipelineError> {
        let started = Instant::now();
        let mut metrics = RunMetrics::new();

        let mut store = PartialStore::<Issue>::open(self.output.issues_partial())?;
        let checkpoints = CheckpointStore::new(self.output.fetch_checkpoint());
        info!("Found {} already saved issues", store.len());

        let mut cursor = match checkpoints.load_for(&self.target)? {
            Some(checkpoint) if (store.len() as u64) < checkpoint.count => {
                warn!(
                    "Checkpoint recorded {} issues but only {} are stored, fetching from the beginning",
                    checkpoint.count,
                    store.len()
                );
                Cursor::Start
            }
            Some(checkpoint) => checkpoint.cursor,
            None => Cursor::Start,
        };
        if cursor.is_exhausted() && self.refresh {
            info!("Refresh requested, fetching from the beginning");
            cursor = Cursor::Start;
        }
        let resumed_from = cursor.clone();

        let fetched = !cursor.is_exhausted();
        if fetched {
            self.drain(source, &mut store, &checkpoints, cursor, &mut metrics)
                .await?;
        } else {
            info!("Source already exhausted for this query, consolidating only");
        }

        let issues: Vec<Issue> = consolidate(store.path(), &self.output.issues_data())?;
        metrics.runtime = started.elapsed();

        Ok(FetchReport {
            resumed_from,
            fetched,
            stored: store.len(),
            consolidated: issues.len(),
            metrics,
        })
    }

    async fn drain<S: IssueSource>(
        &self,
        source: &mut S,
        store: &mut PartialStore<Issue>,
        checkpoints: &CheckpointStore,
        mut cursor: Cursor,
        metrics: &mut RunMetrics,
    ) -> Result<(), PipelineError> {
        let mut page_index = 0usize;

        loop {
            let page = match self.fetch_page(source, &cursor).await {
                Ok(page) => page,
                Err(SourceError::InvalidCursor(reason))
                    if cursor.is_resumed() && metrics.cursor_resets == 0 =>
                {
                    warn!(
                        "Resume cursor rejected ({}), restarting from the beginning with dedup",
                        reason
                    );
                    metrics.record_cursor_reset();
                    cursor = Cursor::Start;
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            page_index += 1;
            metrics.record_page(page.items.len());
            if page.rejected > 0 {
                warn!(page = page_index, "Source dropped {} malformed issues", page.rejected);
                metrics.record_rejected(page.rejected);
            }
            let written_before = metrics.written;

            for issue in &page.items {
                if !issue.has_key() {
                    warn!(page = page_index, "Skipping issue without a key");
                    metrics.record_skipped();
                    continue;
                }
                match store.append(issue)? {
                    AppendOutcome::Written => metrics.record_written(),
                    AppendOutcome::Duplicate => {
                        debug!(key = %issue.key, "Already saved");
                        metrics.record_duplicate();
                    }
                }
            }

            checkpoints
                .save(&Checkpoint::new(
                    self.target.clone(),
                    page.next.clone(),
                    store.len() as u64,
                ))
                .map_err(PipelineError::CheckpointSave)?;

            info!(
                page = page_index,
                "Saved {} new issues (total unique so far: {})",
                metrics.written - written_before,
                store.len()
            );

            if page.next.is_exhausted() {
                info!("Source exhausted after {} pages", page_index);
                return Ok(());
            }
            cursor = page.next;
        }
    }

    async fn fetch_page<S: IssueSource>(
        &self,
        source: &mut S,
        cursor: &Cursor,
    ) -> Result<Page, SourceError> {
        retry_with_policy(&self.retry, source, SourceError::is_transient, |source| {
            let cursor = cursor.clone();
            Box::pin(async move { source.next_page(&cursor).await })
        })
        .await
    }
}
