mod config;
mod deployment;
mod merge;
mod migrate;
mod pbxproj;
mod project;
mod report;
mod rules;
mod version;
mod walk;

#[cfg(test)]
mod testing;

use anyhow::{bail, Context, Result};
use config::RunConfig;
use migrate::Migrator;
use pbxproj::PbxprojStore;
use report::OutputFormat;
use tracing::info;
use tracing_subscriber::EnvFilter;
use walk::{TreeWalker, WalkSummary};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_summary(summary: &WalkSummary, config: &RunConfig) -> Result<()> {
    match config.output {
        OutputFormat::Human => println!(
            "{} project(s): {} migrated{}, {} up to date, {} failed",
            summary.visited,
            summary.migrated,
            if config.dry_run { " (dry run)" } else { "" },
            summary.up_to_date,
            summary.failed
        ),
        OutputFormat::Json => {
            let line = serde_json::json!({ "event": "summary", "summary": summary });
            println!("{}", serde_json::to_string(&line).context("Failed to serialize summary")?);
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    init_tracing();

    let matches = config::command().get_matches();
    let config = RunConfig::from_matches(&matches)?;
    info!(
        root = %config.root.display(),
        target = %config.target,
        recursive = config.recursive,
        dry_run = config.dry_run,
        output = %config.output,
        "starting"
    );

    let store = PbxprojStore;
    let migrator = Migrator::new(&store, config.target).dry_run(config.dry_run);
    let mut sink = report::reporter(config.output);

    let summary = TreeWalker::new(&migrator, config.recursive)
        .walk(&config.root, sink.as_mut())
        .with_context(|| format!("Failed to process {}", config.root.display()))?;

    print_summary(&summary, &config)?;

    if summary.failed > 0 {
        bail!("{} project file(s) could not be migrated", summary.failed);
    }
    Ok(())
}
