//! Consolidation of partial stores into final artifacts

use crate::config::OutputConfig;
use crate::error::PipelineError;
use harvester_domain::{Aggregate, Issue, Keyed, ServerMention, TechAnnotation};
use harvester_store::{read_records, write_json_atomic, write_jsonl_atomic};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::info;

/// Re-scan a partial store and write its deduplicated records as a JSON array
///
/// A later record for a key replaces an earlier one but keeps the earlier
/// position. Records with an empty key are dropped. Running it twice over the
/// same partial store produces the same artifact.
pub fn consolidate<T>(partial: &Path, final_path: &Path) -> Result<Vec<T>, PipelineError>
where
    T: Serialize + DeserializeOwned + Keyed,
{
    let records: Vec<T> = read_records(partial)?;
    let scanned = records.len();
    let records = dedup_last_wins(records);

    write_json_atomic(final_path, &records)?;
    info!(
        "Consolidated {} records ({} scanned) into {}",
        records.len(),
        scanned,
        final_path.display()
    );
    Ok(records)
}

fn dedup_last_wins<T: Keyed>(records: Vec<T>) -> Vec<T> {
    let mut slots: Vec<T> = Vec::with_capacity(records.len());
    let mut positions: HashMap<String, usize> = HashMap::new();

    for record in records {
        if record.key().is_empty() {
            continue;
        }
        let existing = positions.get(record.key()).copied();
        match existing {
            Some(index) => slots[index] = record,
            None => {
                positions.insert(record.key().to_string(), slots.len());
                slots.push(record);
            }
        }
    }
    slots
}

/// One line of `server_counts.jsonl`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerCount {
    /// Server identifier
    pub server: String,
    /// Number of issues mentioning it
    pub count: u64,
}

/// One line of `technology_counts.jsonl`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechnologyCount {
    /// Label name
    pub technology: String,
    /// Number of issues carrying it
    pub count: u64,
}

/// Why an issue is listed as unresolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnresolvedReason {
    /// No server identifier recorded for the issue
    NoServerMatch,
    /// No label recorded for the issue
    ClassificationFailed,
    /// The input entry could not be read as an issue
    Malformed,
}

/// Entry of `unresolved.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnresolvedIssue {
    /// Issue key
    pub key: String,
    /// Issue summary, for triage
    pub summary: String,
    /// At least one reason
    pub reasons: Vec<UnresolvedReason>,
}

/// Result of an analysis consolidation
#[derive(Debug, Clone, Default)]
pub struct ConsolidationReport {
    /// Distinct server mention records
    pub mentions: usize,
    /// Distinct technology annotation records
    pub annotations: usize,
    /// Server → number of issues
    pub servers: Aggregate,
    /// Label → number of issues
    pub technologies: Aggregate,
    /// Issues lacking a server match or a label
    pub unresolved: Vec<UnresolvedIssue>,
}

/// Turns the analysis partial stores into final artifacts and summaries
pub struct Consolidator {
    output: OutputConfig,
    rejected: Vec<String>,
}

impl Consolidator {
    /// Create a consolidator over an output directory
    pub fn new(output: OutputConfig) -> Self {
        Self {
            output,
            rejected: Vec::new(),
        }
    }

    /// Keys of input entries that could not be decoded; listed as unresolved
    pub fn with_rejected(mut self, rejected: Vec<String>) -> Self {
        self.rejected = rejected;
        self
    }

    /// Consolidate both analysis stores, recompute aggregates, and rewrite
    /// the counts and the unresolved set for `issues`
    pub fn run(&self, issues: &[Issue]) -> Result<ConsolidationReport, PipelineError> {
        let mentions: Vec<ServerMention> =
            consolidate(&self.output.server_partial(), &self.output.server_final())?;
        let annotations: Vec<TechAnnotation> =
            consolidate(&self.output.tech_partial(), &self.output.tech_final())?;

        let servers = Aggregate::from_records(&mentions);
        let technologies = Aggregate::from_records(&annotations);

        write_jsonl_atomic(
            &self.output.server_counts(),
            servers.most_common().into_iter().map(|(server, count)| ServerCount {
                server: server.to_string(),
                count,
            }),
        )?;
        write_jsonl_atomic(
            &self.output.tech_counts(),
            technologies
                .most_common()
                .into_iter()
                .map(|(technology, count)| TechnologyCount {
                    technology: technology.to_string(),
                    count,
                }),
        )?;

        let mut unresolved = unresolved_issues(issues, &mentions, &annotations);
        unresolved.extend(malformed_issues(issues, &self.rejected));
        write_json_atomic(&self.output.unresolved(), &unresolved)?;

        info!(
            mentions = mentions.len(),
            annotations = annotations.len(),
            unresolved = unresolved.len(),
            "Analysis consolidated"
        );

        Ok(ConsolidationReport {
            mentions: mentions.len(),
            annotations: annotations.len(),
            servers,
            technologies,
            unresolved,
        })
    }
}

/// Issues with no server identifier on record or no label on record
///
/// Issues never processed count as both. Keyless issues are left out.
pub fn unresolved_issues(
    issues: &[Issue],
    mentions: &[ServerMention],
    annotations: &[TechAnnotation],
) -> Vec<UnresolvedIssue> {
    let with_servers: HashSet<&str> = mentions
        .iter()
        .filter(|m| !m.is_unresolved())
        .map(|m| m.key.as_str())
        .collect();
    let labelled: HashSet<&str> = annotations.iter().map(|a| a.key.as_str()).collect();

    let mut seen = HashSet::new();
    issues
        .iter()
        .filter(|issue| issue.has_key() && seen.insert(issue.key.as_str()))
        .filter_map(|issue| {
            let mut reasons = Vec::new();
            if !with_servers.contains(issue.key.as_str()) {
                reasons.push(UnresolvedReason::NoServerMatch);
            }
            if !labelled.contains(issue.key.as_str()) {
                reasons.push(UnresolvedReason::ClassificationFailed);
            }
            (!reasons.is_empty()).then(|| UnresolvedIssue {
                key: issue.key.clone(),
                summary: issue.summary.clone(),
                reasons,
            })
        })
        .collect()
}

/// Unresolved entries for rejected input keys
///
/// Empty keys are left out, as is any key a decodable issue already carries.
pub fn malformed_issues(issues: &[Issue], rejected: &[String]) -> Vec<UnresolvedIssue> {
    let known: HashSet<&str> = issues.iter().map(|issue| issue.key.as_str()).collect();
    let mut seen = HashSet::new();
    rejected
        .iter()
        .filter(|key| !key.is_empty() && !known.contains(key.as_str()))
        .filter(|key| seen.insert(key.as_str()))
        .map(|key| UnresolvedIssue {
            key: key.clone(),
            summary: String::new(),
            reasons: vec![UnresolvedReason::Malformed],
        })
        .collect()
}
