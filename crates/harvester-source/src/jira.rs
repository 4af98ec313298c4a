//! Jira Cloud search adapter

use crate::adf::adf_to_text;
use crate::error::{from_reqwest, from_status};
use async_trait::async_trait;
use harvester_domain::traits::{IssueSource, Page, SourceError};
use harvester_domain::{Cursor, Issue};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Fields requested for every issue
pub const SEARCH_FIELDS: [&str; 3] = ["issuetype", "summary", "description"];

/// Default request timeout (60 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Build the JQL for one project plus an optional ordering/filter suffix
pub fn jql_for_project(project: &str, suffix: &str) -> String {
    format!("project = {} {}", project, suffix).trim().to_string()
}

/// Connection and query settings for [`JiraSource`]
#[derive(Debug, Clone)]
pub struct JiraConfig {
    /// Site URL, e.g. `https://example.atlassian.net`
    pub base_url: String,

    /// Account email for basic auth
    pub email: String,

    /// API token for basic auth
    pub api_token: String,

    /// Search query
    pub jql: String,

    /// Issues per page
    pub page_size: u32,

    /// Per-request timeout
    pub timeout: Duration,
}

impl JiraConfig {
    /// Settings with the default page size and timeout
    pub fn new(
        base_url: impl Into<String>,
        email: impl Into<String>,
        api_token: impl Into<String>,
        jql: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            email: email.into(),
            api_token: api_token.into(),
            jql: jql.into(),
            page_size: 50,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Set the page size
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchRequest<'a> {
    jql: &'a str,
    max_results: u32,
    fields: [&'static str; 3],
    #[serde(skip_serializing_if = "Option::is_none")]
    next_page_token: Option<&'a str>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResponse {
    #[serde(default)]
    issues: Vec<Value>,
    #[serde(default)]
    next_page_token: Option<String>,
    #[serde(default)]
    is_last: Option<bool>,
}

#[derive(Deserialize)]
struct JiraIssue {
    #[serde(default)]
    key: Option<String>,
    #[serde(default)]
    fields: JiraFields,
}

#[derive(Deserialize, Default)]
struct JiraFields {
    #[serde(default)]
    issuetype: Option<NamedField>,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    description: Value,
}

#[derive(Deserialize)]
struct NamedField {
    #[serde(default)]
    name: Option<String>,
}

impl From<JiraIssue> for Issue {
    fn from(raw: JiraIssue) -> Self {
        Issue {
            key: raw.key.unwrap_or_default(),
            issue_type: raw.fields.issuetype.and_then(|t| t.name),
            summary: raw.fields.summary.unwrap_or_default(),
            description: adf_to_text(&raw.fields.description),
            raw: None,
        }
    }
}

impl SearchResponse {
    fn into_page(self) -> Page {
        let finished = self.issues.is_empty() || self.is_last.unwrap_or(false);
        let next = match self.next_page_token {
            Some(token) if !finished && !token.is_empty() => Cursor::Token(token),
            _ => Cursor::Exhausted,
        };

        let mut items = Vec::with_capacity(self.issues.len());
        let mut rejected = 0;
        for entry in self.issues {
            match decode_issue(entry) {
                Ok(issue) => items.push(issue),
                Err((key, e)) => {
                    warn!(key = %key, "Dropping undecodable issue: {}", e);
                    rejected += 1;
                }
            }
        }
        Page::new(items, next).with_rejected(rejected)
    }
}

/// Decode one search entry; on failure return whatever key it carried
fn decode_issue(entry: Value) -> Result<Issue, (String, serde_json::Error)> {
    let key = entry
        .get("key")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    serde_json::from_value::<JiraIssue>(entry)
        .map(Issue::from)
        .map_err(|e| (key, e))
}

/// Paginated Jira Cloud search (`/rest/api/3/search/jql`)
///
/// Pagination is token based; `Cursor::Offset` is rejected as an invalid
/// cursor and `Cursor::Exhausted` yields an empty final page without a request.
pub struct JiraSource {
    config: JiraConfig,
    client: reqwest::Client,
}

impl JiraSource {
    /// Create a source from its configuration
    pub fn new(config: JiraConfig) -> Result<Self, SourceError> {
        if config.base_url.trim().is_empty() {
            return Err(SourceError::Fatal("Jira base URL is empty".to_string()));
        }
        if config.email.trim().is_empty() || config.api_token.trim().is_empty() {
            return Err(SourceError::Fatal("Missing Jira credentials".to_string()));
        }
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SourceError::Fatal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// The query this source runs
    pub fn jql(&self) -> &str {
        &self.config.jql
    }

    fn url(&self) -> String {
        format!("{}/rest/api/3/search/jql", self.config.base_url.trim_end_matches('/'))
    }

    async fn search(&self, token: Option<&str>) -> Result<Page, SourceError> {
        let body = SearchRequest {
            jql: &self.config.jql,
            max_results: self.config.page_size,
            fields: SEARCH_FIELDS,
            next_page_token: token,
        };

        let response = self
            .client
            .post(self.url())
            .basic_auth(&self.config.email, Some(&self.config.api_token))
            .header("Accept", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            warn!(status = %status, "Jira search failed");
            return Err(from_status(status, token.is_some(), &text));
        }

        let parsed: SearchResponse = response.json().await.map_err(from_reqwest)?;
        let page = parsed.into_page();
        debug!(items = page.items.len(), next = ?page.next, "Jira page received");
        Ok(page)
    }
}

#[async_trait]
impl IssueSource for JiraSource {
    async fn next_page(&mut self, cursor: &Cursor) -> Result<Page, SourceError> {
        match cursor {
            Cursor::Start => self.search(None).await,
            Cursor::Token(token) => self.search(Some(token)).await,
            Cursor::Offset(offset) => Err(SourceError::InvalidCursor(format!(
                "Jira search does not accept offset {}",
                offset
            ))),
            Cursor::Exhausted => Ok(Page::last(Vec::new())),
        }
    }
}
