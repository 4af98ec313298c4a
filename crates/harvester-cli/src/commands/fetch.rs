//! Fetch command implementation.

use crate::cli::FetchArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use harvester_pipeline::{FetchPipeline, PipelineConfig};
use harvester_source::{jql_for_project, JiraConfig, JiraSource};

/// Execute the fetch command.
pub async fn execute_fetch(
    args: FetchArgs,
    mut config: PipelineConfig,
    formatter: &Formatter,
) -> Result<()> {
    apply_overrides(&args, &mut config)?;

    let project = config
        .fetch
        .project
        .clone()
        .ok_or_else(|| CliError::InvalidInput("A project key is required (--project)".to_string()))?;
    let email = required(args.email, "JIRA_EMAIL")?;
    let api_token = required(args.api_token, "JIRA_API_TOKEN")?;

    let jql = jql_for_project(&project, &config.fetch.jql_suffix);
    let mut jira = JiraConfig::new(&config.jira.base_url, email, api_token, &jql)
        .with_page_size(config.fetch.page_size);
    jira.timeout = config.jira.timeout();
    let mut source = JiraSource::new(jira)?;

    tracing::info!("Fetching \"{}\" into {}", jql, config.output.dir.display());
    let report = FetchPipeline::new(&config, jql)
        .with_refresh(args.refresh)
        .run(&mut source)
        .await?;

    println!("{}", formatter.fetch_report(&report));
    Ok(())
}

fn apply_overrides(args: &FetchArgs, config: &mut PipelineConfig) -> Result<()> {
    if let Some(project) = &args.project {
        config.fetch.project = Some(project.clone());
    }
    if let Some(suffix) = &args.jql_suffix {
        config.fetch.jql_suffix = suffix.clone();
    }
    if let Some(page_size) = args.page_size {
        config.fetch.page_size = page_size;
    }
    if let Some(base_url) = &args.base_url {
        config.jira.base_url = base_url.clone();
    }
    if config.jira.base_url.trim().is_empty() {
        return Err(CliError::InvalidInput(
            "Jira URL is required (--base-url or JIRA_BASE_URL)".to_string(),
        ));
    }
    config.fetch.validate().map_err(CliError::InvalidInput)
}

fn required(value: Option<String>, var: &str) -> Result<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| CliError::InvalidInput(format!("{} is not set", var)))
}
