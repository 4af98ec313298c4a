//! Output formatting for the CLI.

use crate::cli::CliFormat;
use crate::commands::status::StatusReport;
use crate::error::Result;
use colored::*;
use harvester_domain::Aggregate;
use harvester_pipeline::{AnalysisReport, ConsolidationReport, FetchReport};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Rows shown per count table.
const TOP_N: usize = 10;

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
}

impl From<CliFormat> for OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => OutputFormat::Table,
            CliFormat::Json => OutputFormat::Json,
        }
    }
}

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Whether colored output is enabled.
    pub fn color_enabled(&self) -> bool {
        self.color_enabled
    }

    /// Format the result of a fetch run.
    pub fn fetch_report(&self, report: &FetchReport) -> String {
        let headline = if report.fetched {
            format!(
                "Fetched {} new issues ({} already saved); {} issues consolidated",
                report.metrics.written, report.metrics.duplicates, report.consolidated
            )
        } else {
            format!(
                "Nothing to fetch (use --refresh to re-pull); {} issues consolidated",
                report.consolidated
            )
        };
        format!("{}\n{}", self.success(&headline), report.metrics.summary())
    }

    /// Format the result of an analysis run.
    pub fn analysis_report(&self, report: &AnalysisReport) -> Result<String> {
        let headline = format!(
            "Analyzed {} issues ({} already complete, resumed at {})",
            report.processed, report.already_complete, report.resumed_from
        );
        Ok(format!(
            "{}\n{}\n\n{}",
            self.success(&headline),
            report.metrics.summary(),
            self.consolidation(&report.consolidation)?
        ))
    }

    /// Format aggregates and the unresolved count.
    pub fn consolidation(&self, report: &ConsolidationReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let value = serde_json::json!({
                    "mentions": report.mentions,
                    "annotations": report.annotations,
                    "servers": counts_json(&report.servers, "server"),
                    "technologies": counts_json(&report.technologies, "technology"),
                    "unresolved": report.unresolved.len(),
                });
                Ok(serde_json::to_string_pretty(&value)?)
            }
            OutputFormat::Table => {
                let mut sections = vec![
                    count_table("Server", &report.servers),
                    count_table("Technology", &report.technologies),
                ];
                let unresolved = format!("{} unresolved issues", report.unresolved.len());
                sections.push(if report.unresolved.is_empty() {
                    self.success(&unresolved)
                } else {
                    self.warning(&unresolved)
                });
                Ok(sections.join("\n\n"))
            }
        }
    }

    /// Format the status overview.
    pub fn status(&self, status: &StatusReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(status)?),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Stage", "Target", "Cursor", "Count", "Updated"]);
                for checkpoint in &status.checkpoints {
                    builder.push_record([
                        checkpoint.stage.clone(),
                        checkpoint.target.clone(),
                        checkpoint.cursor.clone(),
                        checkpoint.count.to_string(),
                        checkpoint.updated_at.clone(),
                    ]);
                }
                let checkpoints = if status.checkpoints.is_empty() {
                    self.info("No checkpoints")
                } else {
                    styled(builder)
                };

                let mut builder = Builder::default();
                builder.push_record(["Store", "Records", "Path"]);
                for store in &status.stores {
                    builder.push_record([
                        store.name.clone(),
                        store.records.to_string(),
                        store.path.clone(),
                    ]);
                }

                Ok(format!(
                    "Output directory: {}\n\n{}\n\n{}",
                    status.output_dir,
                    checkpoints,
                    styled(builder)
                ))
            }
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn counts_json(aggregate: &Aggregate, field: &str) -> Vec<serde_json::Value> {
    aggregate
        .most_common()
        .into_iter()
        .map(|(name, count)| {
            let mut entry = serde_json::Map::new();
            entry.insert(field.to_string(), serde_json::Value::from(name));
            entry.insert("count".to_string(), serde_json::Value::from(count));
            serde_json::Value::Object(entry)
        })
        .collect()
}

fn count_table(header: &str, aggregate: &Aggregate) -> String {
    let mut builder = Builder::default();
    builder.push_record([header, "Count"]);
    for (name, count) in aggregate.most_common().into_iter().take(TOP_N) {
        builder.push_record([name.to_string(), count.to_string()]);
    }
    if aggregate.len() > TOP_N {
        builder.push_record([format!("... {} more", aggregate.len() - TOP_N), String::new()]);
    }
    styled(builder)
}

fn styled(builder: Builder) -> String {
    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}
