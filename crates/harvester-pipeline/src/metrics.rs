//! Counters collected during a pipeline run

use std::time::Duration;

/// Run counters
///
/// Nothing here is persisted; the partial stores stay the source of truth.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunMetrics {
    /// Pages received from the source
    pub pages: usize,

    /// Items seen (fetched or read from the input)
    pub items_seen: usize,

    /// Records appended to a partial store
    pub written: usize,

    /// Items already present and skipped by the dedup index
    pub duplicates: usize,

    /// Items without a key or that could not be decoded
    pub skipped: usize,

    /// Times a rejected resume cursor forced a restart from the beginning
    pub cursor_resets: usize,

    /// Items whose text had at least one server identifier
    pub server_matches: usize,

    /// Items with no server identifier
    pub no_server_match: usize,

    /// Items that received a label
    pub classified: usize,

    /// Items whose classification failed
    pub classification_failed: usize,

    /// Wall-clock time of the run
    pub runtime: Duration,
}

impl RunMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a received page
    pub fn record_page(&mut self, items: usize) {
        self.pages += 1;
        self.items_seen += items;
    }

    /// Record an item read from a local input
    pub fn record_item(&mut self) {
        self.items_seen += 1;
    }

    /// Record a durable append
    pub fn record_written(&mut self) {
        self.written += 1;
    }

    /// Record a dedup hit
    pub fn record_duplicate(&mut self) {
        self.duplicates += 1;
    }

    /// Record an item skipped for lack of a key
    pub fn record_skipped(&mut self) {
        self.skipped += 1;
    }

    /// Record items the source or the input could not decode
    pub fn record_rejected(&mut self, count: usize) {
        self.items_seen += count;
        self.skipped += count;
    }

    /// Record a restart after the source rejected a resume cursor
    pub fn record_cursor_reset(&mut self) {
        self.cursor_resets += 1;
    }

    /// Record an extraction outcome
    pub fn record_extraction(&mut self, servers: usize) {
        if servers == 0 {
            self.no_server_match += 1;
        } else {
            self.server_matches += 1;
        }
    }

    /// Record a classification outcome
    pub fn record_classification(&mut self, success: bool) {
        if success {
            self.classified += 1;
        } else {
            self.classification_failed += 1;
        }
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Run Metrics Summary".to_string(),
            "===================".to_string(),
            format!("Runtime: {:.1}s", self.runtime.as_secs_f64()),
            format!("Items seen: {}", self.items_seen),
            format!("Written: {}", self.written),
            format!("Duplicates: {}", self.duplicates),
            format!("Skipped (no key or malformed): {}", self.skipped),
        ];

        if self.pages > 0 || self.cursor_resets > 0 {
            lines.push(format!("Pages: {}", self.pages));
            lines.push(format!("Cursor resets: {}", self.cursor_resets));
        }

        if self.server_matches + self.no_server_match > 0 {
            lines.push(format!("Server matches: {}", self.server_matches));
            lines.push(format!("No server match: {}", self.no_server_match));
        }

        if self.classified + self.classification_failed > 0 {
            lines.push(format!("Classified: {}", self.classified));
            lines.push(format!("Classification failed: {}", self.classification_failed));
        }

        lines.join("\n")
    }
}
