//! Derived records produced by the analysis stage

use crate::TechLabel;
use serde::{Deserialize, Serialize};

/// Anything stored in a partial store: carries the key it was derived from
pub trait Keyed {
    /// Stable identifier used for deduplication
    fn key(&self) -> &str;
}

/// Anything that contributes categories to an [`Aggregate`](crate::Aggregate)
pub trait Tally {
    /// Categories this record counts towards (may be empty)
    fn categories(&self) -> Vec<&str>;
}

/// Server identifiers mentioned by one issue
///
/// An empty `servers` list is a valid, processed result: the issue is
/// unresolved for operator follow-up but is not extracted again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerMention {
    /// Issue key
    pub key: String,

    /// Distinct server identifiers in first-seen order
    #[serde(default)]
    pub servers: Vec<String>,
}

impl ServerMention {
    /// Create a mention record
    pub fn new(key: impl Into<String>, servers: Vec<String>) -> Self {
        Self {
            key: key.into(),
            servers,
        }
    }

    /// Whether no server identifier was found
    pub fn is_unresolved(&self) -> bool {
        self.servers.is_empty()
    }
}

impl Keyed for ServerMention {
    fn key(&self) -> &str {
        &self.key
    }
}

impl Tally for ServerMention {
    fn categories(&self) -> Vec<&str> {
        self.servers.iter().map(String::as_str).collect()
    }
}

/// Technology label assigned to one issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechAnnotation {
    /// Issue key
    pub key: String,

    /// Assigned label
    pub label: TechLabel,
}

impl TechAnnotation {
    /// Create an annotation record
    pub fn new(key: impl Into<String>, label: TechLabel) -> Self {
        Self {
            key: key.into(),
            label,
        }
    }
}

impl Keyed for TechAnnotation {
    fn key(&self) -> &str {
        &self.key
    }
}

impl Tally for TechAnnotation {
    fn categories(&self) -> Vec<&str> {
        vec![self.label.as_str()]
    }
}
