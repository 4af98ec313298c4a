//! Aggregate counts over derived records
//!
//! Folding is purely additive, so partial aggregates can be merged in any order
//! and the result always equals folding the full record set once. Aggregates are
//! never a source of truth; they are recomputed from the partial stores at
//! consolidation time.

use crate::record::Tally;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Category → occurrence count
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aggregate {
    counts: BTreeMap<String, u64>,
}

impl Aggregate {
    /// Create an empty aggregate
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold every record of an iterator into a fresh aggregate
    pub fn from_records<'a, T, I>(records: I) -> Self
    where
        T: Tally + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        let mut aggregate = Self::new();
        for record in records {
            aggregate.fold(record);
        }
        aggregate
    }

    /// Add one record's categories
    pub fn fold<T: Tally + ?Sized>(&mut self, record: &T) {
        for category in record.categories() {
            *self.counts.entry(category.to_string()).or_insert(0) += 1;
        }
    }

    /// Sum two aggregates
    pub fn merge(mut self, other: Aggregate) -> Self {
        for (category, count) in other.counts {
            *self.counts.entry(category).or_insert(0) += count;
        }
        self
    }

    /// Count for a single category
    pub fn get(&self, category: &str) -> u64 {
        self.counts.get(category).copied().unwrap_or(0)
    }

    /// Sum of all counts
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Number of distinct categories
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether nothing has been counted
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Categories sorted by count descending, ties broken alphabetically
    pub fn most_common(&self) -> Vec<(&str, u64)> {
        let mut entries: Vec<(&str, u64)> = self
            .counts
            .iter()
            .map(|(category, count)| (category.as_str(), *count))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }
}
