//! Issue module - the unit of work flowing through both pipeline stages

use crate::record::Keyed;
use serde::{Deserialize, Serialize};

/// One issue pulled from the external tracker
///
/// The key is stable across runs and is the only identity the pipeline relies on.
/// Content is treated as immutable once fetched.
///
/// # Examples
///
/// ```
/// use harvester_domain::Issue;
///
/// let issue = Issue::new("OPS-1", "Database down", "srv-db1 refuses connections");
/// assert_eq!(issue.text(), "Database down\nsrv-db1 refuses connections");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// Tracker key (e.g. "OPS-123")
    #[serde(default)]
    pub key: String,

    /// Issue type name as reported by the tracker
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub issue_type: Option<String>,

    /// One-line summary
    #[serde(default)]
    pub summary: String,

    /// Plain-text description
    #[serde(default)]
    pub description: String,

    /// Opaque payload kept verbatim from the source, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<serde_json::Value>,
}

impl Issue {
    /// Create an issue with the given key, summary and description
    pub fn new(
        key: impl Into<String>,
        summary: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            issue_type: None,
            summary: summary.into(),
            description: description.into(),
            raw: None,
        }
    }

    /// Set the issue type
    pub fn with_type(mut self, issue_type: impl Into<String>) -> Self {
        self.issue_type = Some(issue_type.into());
        self
    }

    /// Free text used for extraction and classification
    ///
    /// Summary and description joined by a newline, trimmed.
    pub fn text(&self) -> String {
        format!("{}\n{}", self.summary, self.description)
            .trim()
            .to_string()
    }

    /// Whether the issue carries a usable key
    pub fn has_key(&self) -> bool {
        !self.key.trim().is_empty()
    }
}

impl Keyed for Issue {
    fn key(&self) -> &str {
        &self.key
    }
}
