//! Server identifier extraction

use crate::config::ExtractionConfig;
use crate::error::ExtractorError;
use regex::{Regex, RegexBuilder};
use std::collections::HashSet;

/// Finds server identifiers in free text
///
/// # Examples
///
/// ```
/// use harvester_extractor::{ExtractionConfig, ServerExtractor};
///
/// let extractor = ServerExtractor::new(&ExtractionConfig::default()).unwrap();
/// assert_eq!(
///     extractor.extract("contact srv-db1 and srv-auth03 about the outage"),
///     vec!["srv-db1", "srv-auth03"]
/// );
/// assert!(extractor.extract("general outage, no server named").is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct ServerExtractor {
    pattern: Regex,
    normalize_lowercase: bool,
}

impl ServerExtractor {
    /// Compile the pattern described by `config`
    pub fn new(config: &ExtractionConfig) -> Result<Self, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;

        let source = format!(
            r"\b{}[a-z0-9]{{{},{}}}\b",
            regex::escape(&config.prefix),
            config.min_suffix_len,
            config.max_suffix_len
        );
        let pattern = RegexBuilder::new(&source)
            .case_insensitive(config.case_insensitive)
            .build()?;

        Ok(Self {
            pattern,
            normalize_lowercase: config.normalize_lowercase,
        })
    }

    /// Distinct matches in first-seen order; empty when nothing matches
    pub fn extract(&self, text: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        self.pattern
            .find_iter(text)
            .map(|m| {
                if self.normalize_lowercase {
                    m.as_str().to_lowercase()
                } else {
                    m.as_str().to_string()
                }
            })
            .filter(|server| seen.insert(server.clone()))
            .collect()
    }
}
