//! Dedup index and the line scanner shared by every partial-store reader

use crate::StoreError;
use harvester_domain::Keyed;
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::io::BufRead;
use tracing::{debug, warn};

/// What a scan over a partial store encountered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Lines parsed into records
    pub valid: usize,

    /// Unparsable lines before the last one (skipped, will be redone)
    pub skipped: usize,

    /// Whether an unparsable last line was dropped
    pub discarded_tail: bool,
}

/// Scan JSON Lines from `reader`, handing every valid record to `on_record`
///
/// A parse failure on the last non-empty line is read as a crash mid-append and
/// discarded silently. Earlier failures are skipped with a warning. Lines are
/// split on raw bytes so a tail cut in the middle of a UTF-8 sequence is just
/// another malformed line, not an I/O error.
pub fn scan_records<T, R, F>(reader: R, mut on_record: F) -> Result<ScanStats, StoreError>
where
    T: DeserializeOwned,
    R: BufRead,
    F: FnMut(T),
{
    let mut stats = ScanStats::default();
    let mut pending: Option<(usize, serde_json::Error)> = None;

    for (line_no, line) in reader.split(b'\n').enumerate() {
        let line = line?;
        if line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }

        // A failure is only known to be mid-file once another line follows it
        if let Some((bad_line, err)) = pending.take() {
            warn!("Skipping malformed record on line {}: {}", bad_line + 1, err);
            stats.skipped += 1;
        }

        match serde_json::from_slice::<T>(&line) {
            Ok(record) => {
                stats.valid += 1;
                on_record(record);
            }
            Err(e) => pending = Some((line_no, e)),
        }
    }

    if let Some((bad_line, err)) = pending {
        debug!("Discarding truncated last record on line {}: {}", bad_line + 1, err);
        stats.discarded_tail = true;
    }

    Ok(stats)
}

/// Set of keys already durably written to a partial store
///
/// Derived, never persisted: rebuilt by scanning the store on startup.
#[derive(Debug, Clone, Default)]
pub struct DedupIndex {
    keys: HashSet<String>,
}

impl DedupIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from the lines of a partial store
    ///
    /// # Examples
    ///
    /// ```
    /// use harvester_domain::ServerMention;
    /// use harvester_store::DedupIndex;
    ///
    /// let data = "{\"key\":\"A-1\",\"servers\":[]}\n{\"key\":\"A-2\",\"serv";
    /// let index = DedupIndex::rebuild::<ServerMention, _>(data.as_bytes()).unwrap();
    /// assert!(index.contains("A-1"));
    /// assert!(!index.contains("A-2"));
    /// ```
    pub fn rebuild<T, R>(reader: R) -> Result<Self, StoreError>
    where
        T: DeserializeOwned + Keyed,
        R: BufRead,
    {
        let mut index = Self::new();
        scan_records::<T, _, _>(reader, |record| {
            if !record.key().is_empty() {
                index.insert(record.key());
            }
        })?;
        Ok(index)
    }

    /// Whether `key` has been written
    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    /// Record `key` as written; returns false if it was already present
    pub fn insert(&mut self, key: &str) -> bool {
        self.keys.insert(key.to_string())
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the index is empty
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use harvester_domain::{ServerMention, TechAnnotation};

    #[test]
    fn test_rebuild_discards_truncated_tail() {
        let data = concat!(
            "{\"key\":\"A-1\",\"servers\":[\"srv-db1\"]}\n",
            "{\"key\":\"A-2\",\"servers\":[]}\n",
            "{\"key\":\"A-3\",\"ser",
        );
        let index = DedupIndex::rebuild::<ServerMention, _>(data.as_bytes()).unwrap();

        assert_eq!(index.len(), 2);
        assert!(index.contains("A-1"));
        assert!(index.contains("A-2"));
        assert!(!index.contains("A-3"));
    }

    #[test]
    fn test_scan_reports_tail_and_skips_middle() {
        let data = concat!(
            "{\"key\":\"A-1\",\"label\":\"api\"}\n",
            "not json at all\n",
            "\n",
            "{\"key\":\"A-2\",\"label\":\"storage\"}\n",
            "{\"key\":\"A-3\",\"label\":\"unclassified\"}\n",
        );
        let mut keys = Vec::new();
        let stats = scan_records::<TechAnnotation, _, _>(data.as_bytes(), |r| keys.push(r.key)).unwrap();

        assert_eq!(keys, vec!["A-1", "A-2"]);
        assert_eq!(stats.valid, 2);
        assert_eq!(stats.skipped, 1);
        assert!(stats.discarded_tail);
    }

    #[test]
    fn test_invalid_utf8_tail_is_not_an_error() {
        let data: &[u8] = b"{\"key\":\"A-1\",\"servers\":[]}\n{\"key\":\"A-\xE2\x82";
        let index = DedupIndex::rebuild::<ServerMention, _>(data).unwrap();
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_empty_input() {
        let index = DedupIndex::rebuild::<ServerMention, _>("".as_bytes()).unwrap();
        assert!(index.is_empty());
    }

    #[test]
    fn test_insert_reports_novelty() {
        let mut index = DedupIndex::new();
        assert!(index.insert("A-1"));
        assert!(!index.insert("A-1"));
        assert_eq!(index.len(), 1);
    }
}
