//! Harvester issue sources
//!
//! Adapters implementing `IssueSource` from `harvester-domain` for external
//! trackers. Sources only translate pages and failures; retry and checkpoint
//! state belong to the pipeline.
//!
//! # Example
//!
//! ```no_run
//! use harvester_domain::traits::IssueSource;
//! use harvester_domain::Cursor;
//! use harvester_source::{jql_for_project, JiraConfig, JiraSource};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let config = JiraConfig::new(
//!     "https://example.atlassian.net",
//!     "me@example.com",
//!     "api-token",
//!     jql_for_project("OPS", "ORDER BY created DESC"),
//! );
//! let mut source = JiraSource::new(config).expect("Failed to build client");
//!
//! let page = source.next_page(&Cursor::Start).await.expect("Failed to fetch");
//! println!("{} issues, next: {:?}", page.items.len(), page.next);
//! # }
//! ```

#![warn(missing_docs)]

mod adf;
mod error;
mod jira;

pub use adf::adf_to_text;
pub use jira::{jql_for_project, JiraConfig, JiraSource, SEARCH_FIELDS};
