use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use bulk_data::config::{BulkConfig, CONFIG_PATH};
use bulk_data::export::{BulkExporter, RunReport};
use bulk_data::storage::PgStorage;
use bulk_data::{db, telemetry};
use clap::Parser;
use shared_types::RunMode;

/// Create the bulk files for every jurisdiction and for "all".
#[derive(Parser, Debug)]
#[command(name = "make-bulk-data", version, about)]
struct Cli {
    /// Config file with a [bulk] section
    #[arg(long, default_value = CONFIG_PATH)]
    config: PathBuf,

    /// auto picks incremental when a type's staging directory is non-empty
    #[arg(long, default_value_t = RunMode::Auto)]
    mode: RunMode,

    /// Skip the citation graph dump
    #[arg(long)]
    skip_citations: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    telemetry::init_logging("info");
    telemetry::init_telemetry("make-bulk-data");

    let code = match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            log::error!("bulk export failed: {e:#}");
            ExitCode::FAILURE
        }
    };

    telemetry::shutdown_telemetry();
    code
}

async fn run(cli: Cli) -> Result<()> {
    let config = BulkConfig::load(&cli.config).context("Invalid bulk configuration")?;
    let pool = db::connect().await.context("Failed to prepare database")?;
    let storage = PgStorage::new(pool);

    let report = BulkExporter::new(&storage, &config, cli.mode)
        .with_citations(!cli.skip_citations)
        .run()
        .await
        .context("Bulk export failed")?;

    print_summary(&report);
    Ok(())
}

fn print_summary(report: &RunReport) {
    println!();
    println!("=== Bulk Export Complete ===");
    println!("Jurisdictions: {}", report.jurisdictions);
    for t in &report.types {
        println!(
            "{:<13} {:<11} {:>9} written {:>9} archived {:>4} files published",
            t.object_type.as_str(),
            t.mode.as_str(),
            t.records_written,
            t.records_archived,
            t.published.len()
        );
        log::info!(
            "bulk export {}: mode={} written={} archived={} published={}",
            t.object_type,
            t.mode.as_str(),
            t.records_written,
            t.records_archived,
            t.published.len()
        );
    }
    if let Some(citations) = &report.citations {
        println!("citations     {} CSV bytes", citations.csv_bytes);
        log::info!("bulk export citations: csv_bytes={}", citations.csv_bytes);
    }
    println!("Duration: {:.1}s", report.elapsed.as_secs_f64());
}
