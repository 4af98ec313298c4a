//! Harvester CLI - fetch issues and analyze them, resuming after any interruption.

use clap::Parser;
use harvester_cli::commands;
use harvester_cli::config::load_config;
use harvester_cli::{Cli, CliError, Command, Formatter, OutputFormat};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays clean for tables and JSON
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if cli.no_color {
        colored::control::set_override(false);
    }
    let formatter = Formatter::new(OutputFormat::Table, !cli.no_color);

    // Every append is durable before the next one starts, so dropping the
    // run future on Ctrl-C loses at most the record in flight
    let result = tokio::select! {
        result = run(cli, &formatter) => result,
        _ = tokio::signal::ctrl_c() => Err(CliError::Interrupted),
    };

    if let Err(e) = result {
        eprintln!("{}", formatter.error(&e.to_string()));
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: Cli, formatter: &Formatter) -> harvester_cli::Result<()> {
    let config = load_config(cli.config.as_deref(), cli.output_dir.as_deref())?;

    match cli.command {
        Command::Fetch(args) => commands::execute_fetch(args, config, formatter).await,
        Command::Analyze(args) => commands::execute_analyze(args, config, formatter).await,
        Command::Aggregate => commands::execute_aggregate(config, formatter),
        Command::Status(args) => commands::execute_status(args, config, formatter),
    }
}
