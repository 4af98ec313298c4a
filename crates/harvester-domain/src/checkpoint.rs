//! Checkpoint module - durable resume position for a run

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque position marker within a source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Cursor {
    /// Beginning of the source
    Start,

    /// Page token handed out by a paginated source
    Token(String),

    /// Index of the next item in an item-at-a-time source
    Offset(u64),

    /// Source reported no further data
    Exhausted,
}

impl Cursor {
    /// Whether the source has been fully consumed
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Cursor::Exhausted)
    }

    /// Whether this cursor resumes from somewhere other than the start
    pub fn is_resumed(&self) -> bool {
        !matches!(self, Cursor::Start)
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Cursor::Start
    }
}

/// How far a run against a target got
///
/// `count` is the number of records durably present in the partial store when
/// the checkpoint was saved; it never runs ahead of storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Identity of the run target (query string, input file, ...)
    pub target: String,

    /// Where to resume
    pub cursor: Cursor,

    /// Records durably stored at save time
    pub count: u64,

    /// When the checkpoint was taken
    pub updated_at: DateTime<Utc>,
}

impl Checkpoint {
    /// Create a checkpoint stamped with the current time
    pub fn new(target: impl Into<String>, cursor: Cursor, count: u64) -> Self {
        Self {
            target: target.into(),
            cursor,
            count,
            updated_at: Utc::now(),
        }
    }

    /// Whether this checkpoint belongs to the given target
    pub fn matches(&self, target: &str) -> bool {
        self.target == target
    }
}
