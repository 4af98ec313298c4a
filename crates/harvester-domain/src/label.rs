//! Label module - the closed technology label set

use serde::{Deserialize, Serialize};
use std::fmt;

/// Technology area assigned to an issue
///
/// Exactly one label per classified issue. Anything a classifier returns that is
/// not one of these variants is a classification failure, never a new label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TechLabel {
    /// Databases, queries, replication
    Database,

    /// DNS, routing, load balancers, connectivity
    Networking,

    /// Logins, tokens, SSO, permissions
    Authentication,

    /// Service endpoints and integrations
    Api,

    /// Disks, volumes, object stores, backups
    Storage,
}

impl TechLabel {
    /// Every label, in prompt order
    pub const ALL: [TechLabel; 5] = [
        TechLabel::Database,
        TechLabel::Networking,
        TechLabel::Authentication,
        TechLabel::Api,
        TechLabel::Storage,
    ];

    /// Get the label name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            TechLabel::Database => "database",
            TechLabel::Networking => "networking",
            TechLabel::Authentication => "authentication",
            TechLabel::Api => "api",
            TechLabel::Storage => "storage",
        }
    }

    /// Parse a label from a string (case-insensitive, exact word)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "database" => Some(TechLabel::Database),
            "networking" => Some(TechLabel::Networking),
            "authentication" => Some(TechLabel::Authentication),
            "api" => Some(TechLabel::Api),
            "storage" => Some(TechLabel::Storage),
            _ => None,
        }
    }
}

impl fmt::Display for TechLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TechLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid label: {}", s))
    }
}
