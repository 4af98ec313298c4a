//! Configuration for the processors

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Lexical pattern for server identifiers
///
/// A literal prefix followed by `min_suffix_len..=max_suffix_len` ASCII
/// alphanumerics, on word boundaries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Literal prefix token
    pub prefix: String,

    /// Minimum suffix length
    pub min_suffix_len: usize,

    /// Maximum suffix length
    pub max_suffix_len: usize,

    /// Match regardless of case
    pub case_insensitive: bool,

    /// Report matches lowercased
    pub normalize_lowercase: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            prefix: "srv-".to_string(),
            min_suffix_len: 2,
            max_suffix_len: 10,
            case_insensitive: true,
            normalize_lowercase: true,
        }
    }
}

impl ExtractionConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.prefix.is_empty() {
            return Err("prefix must not be empty".to_string());
        }
        if self.min_suffix_len == 0 {
            return Err("min_suffix_len must be greater than 0".to_string());
        }
        if self.min_suffix_len > self.max_suffix_len {
            return Err("min_suffix_len cannot exceed max_suffix_len".to_string());
        }
        Ok(())
    }
}

/// Configuration for LLM classification
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassificationConfig {
    /// Maximum time for a single provider call (seconds)
    pub timeout_secs: u64,

    /// Ask once more when the first reply is not an allowed label
    pub reask_on_invalid: bool,

    /// Pause before re-asking (milliseconds)
    pub reask_delay_ms: u64,

    /// Issue text beyond this many characters is cut before prompting
    pub max_text_chars: usize,
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 60,
            reask_on_invalid: true,
            reask_delay_ms: 600,
            max_text_chars: 8_000,
        }
    }
}

impl ClassificationConfig {
    /// Get the call timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get the re-ask pause as a Duration
    pub fn reask_delay(&self) -> Duration {
        Duration::from_millis(self.reask_delay_ms)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }
        if self.max_text_chars == 0 {
            return Err("max_text_chars must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
