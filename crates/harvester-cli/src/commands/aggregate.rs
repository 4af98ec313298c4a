//! Aggregate command implementation.

use crate::error::Result;
use crate::output::Formatter;
use harvester_pipeline::{read_issues, Consolidator, IssueInput, PipelineConfig};

/// Execute the aggregate command.
///
/// Recomputes the consolidated artifacts from whatever the partial stores
/// hold, without calling the classifier.
pub fn execute_aggregate(config: PipelineConfig, formatter: &Formatter) -> Result<()> {
    let issues_path = config.output.issues_data();
    let input = if issues_path.exists() {
        read_issues(&issues_path)?
    } else {
        tracing::warn!(
            "{} not found; unresolved issues cannot be listed",
            issues_path.display()
        );
        IssueInput::default()
    };

    let report = Consolidator::new(config.output.clone())
        .with_rejected(input.rejected)
        .run(&input.issues)?;
    println!("{}", formatter.consolidation(&report)?);
    Ok(())
}
