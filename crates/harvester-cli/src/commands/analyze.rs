//! Analyze command implementation.

use crate::cli::AnalyzeArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use harvester_extractor::LlmClassifier;
use harvester_llm::{ChatCompletionsProvider, ChatConfig};
use harvester_pipeline::{read_issues, AnalysisPipeline, PipelineConfig};

/// Execute the analyze command.
pub async fn execute_analyze(
    args: AnalyzeArgs,
    config: PipelineConfig,
    formatter: &Formatter,
) -> Result<()> {
    let input = args
        .input
        .clone()
        .unwrap_or_else(|| config.output.issues_data());
    if !input.exists() {
        return Err(CliError::InvalidInput(format!(
            "{} not found; run `harvester fetch` first",
            input.display()
        )));
    }

    let api_key = args
        .api_key
        .clone()
        .filter(|k| !k.trim().is_empty())
        .ok_or_else(|| CliError::InvalidInput("OPENROUTER_API_KEY is not set".to_string()))?;

    let provider = ChatCompletionsProvider::new(chat_config(&args, api_key, &config))?;
    let classifier = LlmClassifier::new(provider, config.classification.clone());

    let issues = read_issues(&input)?;
    tracing::info!("Loaded {} issues from {}", issues.issues.len(), input.display());

    let report = AnalysisPipeline::new(&config, classifier, input.display().to_string())?
        .with_limit(args.limit)
        .with_rejected(issues.rejected)
        .run(&issues.issues)
        .await?;

    println!("{}", formatter.analysis_report(&report)?);
    Ok(())
}

fn chat_config(args: &AnalyzeArgs, api_key: String, config: &PipelineConfig) -> ChatConfig {
    let model = args
        .model
        .clone()
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| config.llm.model.clone());

    let mut chat = ChatConfig::new(api_key, model);
    chat.endpoint = config.llm.endpoint.clone();
    chat.referer = non_empty(&config.llm.referer);
    chat.title = non_empty(&config.llm.title);
    chat.timeout = config.llm.timeout();
    chat.retry = config.retry.clone();
    chat
}

fn non_empty(value: &str) -> Option<String> {
    Some(value.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
