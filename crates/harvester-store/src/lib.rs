//! Harvester Storage Layer
//!
//! Crash-tolerant file persistence for the pipeline.
//!
//! # Architecture
//!
//! - JSON Lines partial stores, appended one record at a time and synced before
//!   the append returns
//! - A dedup index rebuilt from the partial store on every open
//! - Checkpoints and final artifacts written via temp file + rename
//!
//! Nothing here ever leaves a half-written file at a final path: a crash either
//! leaves the previous version or an unterminated partial-store line, which is
//! repaired on the next open.
//!
//! # Examples
//!
//! ```no_run
//! use harvester_domain::ServerMention;
//! use harvester_store::{AppendOutcome, PartialStore};
//!
//! let mut store = PartialStore::<ServerMention>::open("output/server_mentions.jsonl").unwrap();
//! let record = ServerMention::new("OPS-1", vec!["srv-db1".into()]);
//! assert_eq!(store.append(&record).unwrap(), AppendOutcome::Written);
//! assert_eq!(store.append(&record).unwrap(), AppendOutcome::Duplicate);
//! ```

#![warn(missing_docs)]

mod atomic;
mod checkpoint;
mod dedup;
mod partial;

pub use atomic::{write_json_atomic, write_jsonl_atomic};
pub use checkpoint::CheckpointStore;
pub use dedup::{scan_records, DedupIndex, ScanStats};
pub use partial::{read_records, AppendOutcome, PartialStore};

use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Record could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Record has an empty key and cannot be deduplicated
    #[error("Record has no key")]
    MissingKey,
}
