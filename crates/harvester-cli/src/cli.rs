//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Harvester - fault-tolerant issue fetching and analysis.
#[derive(Debug, Parser)]
#[command(name = "harvester")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path (defaults to ./harvester.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output directory for partial stores, checkpoints and artifacts
    #[arg(short, long, global = true)]
    pub output_dir: Option<PathBuf>,

    /// Verbose (debug) logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch issues page by page into the partial store, resuming if interrupted
    Fetch(FetchArgs),

    /// Extract servers and classify technologies for fetched issues
    Analyze(AnalyzeArgs),

    /// Recompute counts and the unresolved set from the partial stores
    Aggregate,

    /// Show checkpoints and partial store sizes
    Status(StatusArgs),
}

/// Arguments for the fetch command.
#[derive(Debug, Parser)]
pub struct FetchArgs {
    /// Jira project key, e.g. OPS
    #[arg(short, long)]
    pub project: Option<String>,

    /// JQL appended after `project = KEY`
    #[arg(long)]
    pub jql_suffix: Option<String>,

    /// Issues per page (max 100)
    #[arg(long)]
    pub page_size: Option<u32>,

    /// Fetch again even if the last run reached the end
    #[arg(long)]
    pub refresh: bool,

    /// Jira site URL
    #[arg(long, env = "JIRA_BASE_URL")]
    pub base_url: Option<String>,

    /// Jira account email
    #[arg(long, env = "JIRA_EMAIL")]
    pub email: Option<String>,

    /// Jira API token
    #[arg(long, env = "JIRA_API_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,
}

/// Arguments for the analyze command.
#[derive(Debug, Parser)]
pub struct AnalyzeArgs {
    /// Issue array to analyze (defaults to issues_data.json in the output directory)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Only analyze the first N issues
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// OpenRouter (or compatible) API key
    #[arg(long, env = "OPENROUTER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Model identifier
    #[arg(long, env = "OPENROUTER_MODEL")]
    pub model: Option<String>,
}

/// Arguments for the status command.
#[derive(Debug, Parser)]
pub struct StatusArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: CliFormat,
}
