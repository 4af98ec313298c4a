//! Configuration for pipeline runs
//!
//! One `PipelineConfig` value carries every tunable; each component receives
//! the section it needs. Secrets are never part of it.

use harvester_domain::RetryPolicy;
use harvester_extractor::{ClassificationConfig, ExtractionConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Jira search pages are capped at this size
pub const MAX_PAGE_SIZE: u32 = 100;

/// Full run configuration
///
/// # Examples
///
/// ```
/// use harvester_pipeline::PipelineConfig;
///
/// let config = PipelineConfig::default();
/// assert_eq!(config.fetch.page_size, 50);
///
/// // Slower, more patient settings for flaky networks or strict rate limits
/// let config = PipelineConfig::conservative();
/// assert_eq!(config.fetch.page_size, 25);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Where partial stores, checkpoints and final artifacts live
    pub output: OutputConfig,

    /// Fetch stage settings
    pub fetch: FetchConfig,

    /// Retry budget for source calls
    pub retry: RetryPolicy,

    /// Server identifier pattern
    pub extraction: ExtractionConfig,

    /// Classification behaviour
    pub classification: ClassificationConfig,

    /// Jira connection settings (credentials excluded)
    pub jira: JiraSettings,

    /// LLM endpoint settings (API key excluded)
    pub llm: LlmSettings,
}

impl PipelineConfig {
    /// Smaller pages, more retries, longer timeouts
    pub fn conservative() -> Self {
        Self {
            fetch: FetchConfig {
                page_size: 25,
                ..Default::default()
            },
            retry: RetryPolicy {
                max_attempts: 8,
                initial_backoff_ms: 2_000,
                multiplier: 2.0,
                max_backoff_ms: 120_000,
            },
            classification: ClassificationConfig {
                timeout_secs: 120,
                reask_delay_ms: 2_000,
                ..Default::default()
            },
            jira: JiraSettings {
                timeout_secs: 120,
                ..Default::default()
            },
            llm: LlmSettings {
                timeout_secs: 120,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Validate every section
    pub fn validate(&self) -> Result<(), String> {
        self.fetch.validate()?;
        self.retry.validate()?;
        self.extraction.validate()?;
        self.classification.validate()?;
        if self.jira.timeout_secs == 0 {
            return Err("jira.timeout_secs must be greater than 0".to_string());
        }
        if self.llm.model.trim().is_empty() {
            return Err("llm.model must not be empty".to_string());
        }
        if self.llm.timeout_secs == 0 {
            return Err("llm.timeout_secs must be greater than 0".to_string());
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

/// Output locations
///
/// Every file name is fixed; only the directory is configurable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output directory, created on demand
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("output"),
        }
    }
}

impl OutputConfig {
    /// Output rooted at `dir`
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Fetched issues, one per line
    pub fn issues_partial(&self) -> PathBuf {
        self.dir.join("issues_partial.jsonl")
    }

    /// Fetch resume position
    pub fn fetch_checkpoint(&self) -> PathBuf {
        self.dir.join("fetch_checkpoint.json")
    }

    /// Consolidated issue array
    pub fn issues_data(&self) -> PathBuf {
        self.dir.join("issues_data.json")
    }

    /// Server mentions, one per line
    pub fn server_partial(&self) -> PathBuf {
        self.dir.join("server_mentions.jsonl")
    }

    /// Technology annotations, one per line
    pub fn tech_partial(&self) -> PathBuf {
        self.dir.join("technology_annotations.jsonl")
    }

    /// Analysis resume position
    pub fn analysis_checkpoint(&self) -> PathBuf {
        self.dir.join("analysis_checkpoint.json")
    }

    /// Consolidated server mentions
    pub fn server_final(&self) -> PathBuf {
        self.dir.join("server_mentions.json")
    }

    /// Consolidated technology annotations
    pub fn tech_final(&self) -> PathBuf {
        self.dir.join("technology_annotations.json")
    }

    /// Server counts, most common first
    pub fn server_counts(&self) -> PathBuf {
        self.dir.join("server_counts.jsonl")
    }

    /// Technology counts, most common first
    pub fn tech_counts(&self) -> PathBuf {
        self.dir.join("technology_counts.jsonl")
    }

    /// Issues lacking a server match or a label
    pub fn unresolved(&self) -> PathBuf {
        self.dir.join("unresolved.json")
    }
}

/// Fetch stage settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Project key; the CLI flag takes precedence
    pub project: Option<String>,

    /// Appended to `project = KEY`
    pub jql_suffix: String,

    /// Issues per page (1..=100)
    pub page_size: u32,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            project: None,
            jql_suffix: "ORDER BY created DESC".to_string(),
            page_size: 50,
        }
    }
}

impl FetchConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(format!("fetch.page_size must be between 1 and {}", MAX_PAGE_SIZE));
        }
        Ok(())
    }
}

/// Jira connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JiraSettings {
    /// Site URL; may also come from `JIRA_BASE_URL`
    pub base_url: String,

    /// Per-request timeout (seconds)
    pub timeout_secs: u64,
}

impl Default for JiraSettings {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout_secs: 60,
        }
    }
}

impl JiraSettings {
    /// Get the request timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// LLM endpoint settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    /// OpenAI-compatible base URL
    pub endpoint: String,

    /// Model identifier
    pub model: String,

    /// `HTTP-Referer` header, omitted when empty
    pub referer: String,

    /// `X-Title` header, omitted when empty
    pub title: String,

    /// Per-request timeout (seconds)
    pub timeout_secs: u64,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://openrouter.ai/api/v1".to_string(),
            model: "meta-llama/llama-3.1-8b-instruct".to_string(),
            referer: String::new(),
            title: "Jira Tech Classifier".to_string(),
            timeout_secs: 60,
        }
    }
}

impl LlmSettings {
    /// Get the request timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();
        assert_eq!(config.output.dir, PathBuf::from("output"));
        assert_eq!(config.fetch.page_size, 50);
        assert_eq!(config.fetch.jql_suffix, "ORDER BY created DESC");
        assert_eq!(config.retry.max_attempts, 5);
        assert_eq!(config.extraction.prefix, "srv-");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_conservative_config() {
        let config = PipelineConfig::conservative();
        assert!(config.fetch.page_size < PipelineConfig::default().fetch.page_size);
        assert!(config.retry.max_attempts > RetryPolicy::default().max_attempts);
        assert_eq!(config.classification.timeout_secs, 120);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_page_size_bounds() {
        let mut config = PipelineConfig::default();
        config.fetch.page_size = 0;
        assert!(config.validate().is_err());
        config.fetch.page_size = 101;
        assert!(config.validate().is_err());
        config.fetch.page_size = 100;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_output_paths() {
        let output = OutputConfig::new("/tmp/run");
        assert_eq!(output.issues_partial(), PathBuf::from("/tmp/run/issues_partial.jsonl"));
        assert_eq!(output.unresolved(), PathBuf::from("/tmp/run/unresolved.json"));
        assert_ne!(output.fetch_checkpoint(), output.analysis_checkpoint());
    }

    #[test]
    fn test_partial_toml() {
        let config = PipelineConfig::from_toml(
            r#"
            [output]
            dir = "data"

            [fetch]
            project = "OPS"
            page_size = 10

            [extraction]
            prefix = "host-"
            "#,
        )
        .unwrap();

        assert_eq!(config.output.dir, PathBuf::from("data"));
        assert_eq!(config.fetch.project.as_deref(), Some("OPS"));
        assert_eq!(config.fetch.page_size, 10);
        assert_eq!(config.extraction.prefix, "host-");
        assert_eq!(config.extraction.max_suffix_len, 10);
        assert_eq!(config.llm.model, "meta-llama/llama-3.1-8b-instruct");
    }

    #[test]
    fn test_toml_round_trip() {
        let config = PipelineConfig::conservative();
        let parsed = PipelineConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(parsed.retry, config.retry);
        assert_eq!(parsed.fetch.page_size, config.fetch.page_size);
    }

    #[test]
    fn test_invalid_toml() {
        assert!(PipelineConfig::from_toml("[fetch]\npage_size = \"many\"").is_err());
    }
}
