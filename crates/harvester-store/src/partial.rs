//! Append-only JSON Lines partial store

use crate::dedup::{scan_records, DedupIndex};
use crate::StoreError;
use harvester_domain::Keyed;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, ErrorKind, Read, Seek, SeekFrom, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Result of an append
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    /// Record written and synced
    Written,

    /// Key already present; nothing written
    Duplicate,
}

/// Append-only store of keyed records, one JSON object per line
///
/// Every successful [`append`](Self::append) has reached the disk before it
/// returns. Appends are idempotent per key: the dedup index is consulted first
/// and only updated after the write is durable.
pub struct PartialStore<T> {
    path: PathBuf,
    file: File,
    index: DedupIndex,
    _record: PhantomData<fn() -> T>,
}

impl<T> PartialStore<T>
where
    T: Serialize + DeserializeOwned + Keyed,
{
    /// Open (or create) the store at `path`
    ///
    /// Repairs an unterminated last line left by a crash, then rebuilds the
    /// dedup index from what remains.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .read(true)
            .append(true)
            .create(true)
            .open(&path)?;

        repair_tail::<T>(&path, &mut file)?;

        file.seek(SeekFrom::Start(0))?;
        let index = DedupIndex::rebuild::<T, _>(BufReader::new(&file))?;

        info!("Opened {} ({} records)", path.display(), index.len());

        Ok(Self {
            path,
            file,
            index,
            _record: PhantomData,
        })
    }

    /// Durably append `record` unless its key is already stored
    pub fn append(&mut self, record: &T) -> Result<AppendOutcome, StoreError> {
        let key = record.key();
        if key.is_empty() {
            return Err(StoreError::MissingKey);
        }
        if self.index.contains(key) {
            debug!("Skipping duplicate {}", key);
            return Ok(AppendOutcome::Duplicate);
        }

        let mut line = serde_json::to_vec(record)?;
        line.push(b'\n');

        // Single write so a crash can only leave a prefix of this one line
        self.file.write_all(&line)?;
        self.file.sync_data()?;

        self.index.insert(key);
        Ok(AppendOutcome::Written)
    }

    /// Whether `key` is already stored
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains(key)
    }

    /// Number of distinct keys stored
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether the store holds no records
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Dedup index backing this store
    pub fn index(&self) -> &DedupIndex {
        &self.index
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every valid record in file order (duplicates included)
    pub fn records(&self) -> Result<Vec<T>, StoreError> {
        read_records(&self.path)
    }
}

/// Read every valid record of a partial store; a missing file reads as empty
pub fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, StoreError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let mut records = Vec::new();
    let stats = scan_records::<T, _, _>(BufReader::new(file), |record| records.push(record))?;
    if stats.skipped > 0 {
        warn!("{}: skipped {} malformed records", path.display(), stats.skipped);
    }
    Ok(records)
}

/// Make the file end on a line boundary
///
/// An unterminated last line that still parses gets its newline; anything
/// else after the last newline is truncated away.
fn repair_tail<T: DeserializeOwned>(path: &Path, file: &mut File) -> Result<(), StoreError> {
    let len = file.metadata()?.len();
    if len == 0 {
        return Ok(());
    }

    let mut last = [0u8; 1];
    file.seek(SeekFrom::Start(len - 1))?;
    file.read_exact(&mut last)?;
    if last[0] == b'\n' {
        return Ok(());
    }

    let mut contents = Vec::with_capacity(len as usize);
    file.seek(SeekFrom::Start(0))?;
    file.read_to_end(&mut contents)?;

    let tail_start = contents
        .iter()
        .rposition(|b| *b == b'\n')
        .map(|i| i + 1)
        .unwrap_or(0);
    let tail = &contents[tail_start..];

    if serde_json::from_slice::<T>(tail).is_ok() {
        info!("{}: completing unterminated last record", path.display());
        file.write_all(b"\n")?;
    } else {
        warn!(
            "{}: dropping {} bytes of truncated last record",
            path.display(),
            tail.len()
        );
        file.set_len(tail_start as u64)?;
    }
    file.sync_data()?;
    Ok(())
}
