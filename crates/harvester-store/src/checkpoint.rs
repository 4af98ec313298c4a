//! Checkpoint persistence

use crate::atomic::write_json_atomic;
use crate::StoreError;
use harvester_domain::Checkpoint;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Single-file checkpoint, overwritten atomically on every save
///
/// A read after a crash returns either the last saved checkpoint or `None`,
/// never a partial one.
#[derive(Debug, Clone)]
pub struct CheckpointStore {
    path: PathBuf,
}

impl CheckpointStore {
    /// Create a store backed by `path` (the file need not exist)
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the checkpoint file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the checkpoint
    ///
    /// Missing or unparsable files load as `None`; a corrupt checkpoint means
    /// starting over with a full dedup scan, which is always safe.
    pub fn load(&self) -> Result<Option<Checkpoint>, StoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_slice::<Checkpoint>(&bytes) {
            Ok(checkpoint) => Ok(Some(checkpoint)),
            Err(e) => {
                warn!(
                    "Ignoring unreadable checkpoint {}: {}",
                    self.path.display(),
                    e
                );
                Ok(None)
            }
        }
    }

    /// Load the checkpoint only if it belongs to `target`
    pub fn load_for(&self, target: &str) -> Result<Option<Checkpoint>, StoreError> {
        match self.load()? {
            Some(checkpoint) if checkpoint.matches(target) => Ok(Some(checkpoint)),
            Some(checkpoint) => {
                info!(
                    "Checkpoint {} is for '{}', not '{}'; starting from the beginning",
                    self.path.display(),
                    checkpoint.target,
                    target
                );
                Ok(None)
            }
            None => Ok(None),
        }
    }

    /// Atomically replace the checkpoint
    pub fn save(&self, checkpoint: &Checkpoint) -> Result<(), StoreError> {
        write_json_atomic(&self.path, checkpoint)?;
        debug!(
            "Checkpoint saved: {:?} ({} records)",
            checkpoint.cursor, checkpoint.count
        );
        Ok(())
    }

    /// Remove the checkpoint, if any
    pub fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
