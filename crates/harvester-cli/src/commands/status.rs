//! Status command implementation.

use crate::cli::StatusArgs;
use crate::error::Result;
use crate::output::Formatter;
use harvester_domain::{Checkpoint, Cursor, Issue, Keyed, ServerMention, TechAnnotation};
use harvester_pipeline::PipelineConfig;
use harvester_store::{CheckpointStore, DedupIndex};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Snapshot of the output directory.
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    /// Output directory
    pub output_dir: String,
    /// Saved checkpoints, fetch first
    pub checkpoints: Vec<CheckpointStatus>,
    /// Partial stores
    pub stores: Vec<StoreStatus>,
}

/// One saved checkpoint.
#[derive(Debug, Clone, Serialize)]
pub struct CheckpointStatus {
    /// `fetch` or `analysis`
    pub stage: String,
    /// Query or input the checkpoint belongs to
    pub target: String,
    /// Resume position
    pub cursor: String,
    /// Records durably stored when saved
    pub count: u64,
    /// RFC 3339 save time
    pub updated_at: String,
}

/// One partial store.
#[derive(Debug, Clone, Serialize)]
pub struct StoreStatus {
    /// Store name
    pub name: String,
    /// Distinct keys present
    pub records: usize,
    /// File path
    pub path: String,
}

/// Execute the status command.
pub fn execute_status(args: StatusArgs, config: PipelineConfig, formatter: &Formatter) -> Result<()> {
    let formatter = Formatter::new(args.format.into(), formatter.color_enabled());
    let report = collect_status(&config)?;
    println!("{}", formatter.status(&report)?);
    Ok(())
}

/// Read checkpoints and store sizes without modifying anything.
pub fn collect_status(config: &PipelineConfig) -> Result<StatusReport> {
    let output = &config.output;

    let mut checkpoints = Vec::new();
    for (stage, path) in [
        ("fetch", output.fetch_checkpoint()),
        ("analysis", output.analysis_checkpoint()),
    ] {
        if let Some(checkpoint) = CheckpointStore::new(&path).load()? {
            checkpoints.push(checkpoint_status(stage, &checkpoint));
        }
    }

    let stores = vec![
        store_status::<Issue>("issues", &output.issues_partial())?,
        store_status::<ServerMention>("server mentions", &output.server_partial())?,
        store_status::<TechAnnotation>("technology annotations", &output.tech_partial())?,
    ];

    Ok(StatusReport {
        output_dir: output.dir.display().to_string(),
        checkpoints,
        stores,
    })
}

fn checkpoint_status(stage: &str, checkpoint: &Checkpoint) -> CheckpointStatus {
    CheckpointStatus {
        stage: stage.to_string(),
        target: checkpoint.target.clone(),
        cursor: describe_cursor(&checkpoint.cursor),
        count: checkpoint.count,
        updated_at: checkpoint.updated_at.to_rfc3339(),
    }
}

fn describe_cursor(cursor: &Cursor) -> String {
    match cursor {
        Cursor::Start => "start".to_string(),
        Cursor::Token(token) => format!("token {}", token),
        Cursor::Offset(offset) => format!("offset {}", offset),
        Cursor::Exhausted => "exhausted".to_string(),
    }
}

fn store_status<T: DeserializeOwned + Keyed>(name: &str, path: &Path) -> Result<StoreStatus> {
    let records = if path.exists() {
        DedupIndex::rebuild::<T, _>(BufReader::new(File::open(path)?))?.len()
    } else {
        0
    };
    Ok(StoreStatus {
        name: name.to_string(),
        records,
        path: path.display().to_string(),
    })
}
