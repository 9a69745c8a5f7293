use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use bulk_data::import::{self, CountyTable};
use bulk_data::storage::PgStorage;
use bulk_data::{db, telemetry};
use clap::Parser;

/// Import California judges and their positions from a JSON dump.
#[derive(Parser, Debug)]
#[command(name = "import-ca-judges", version, about)]
struct Cli {
    /// JSON file of the form {"count": N, "judges": [...]}
    #[arg(long)]
    input_file: PathBuf,

    /// Narrate progress at info level
    #[arg(long)]
    log: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    telemetry::init_logging(if cli.log { "info" } else { "warn" });
    telemetry::init_telemetry("import-ca-judges");

    let code = match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            log::error!("judge import failed: {e:#}");
            ExitCode::FAILURE
        }
    };

    telemetry::shutdown_telemetry();
    code
}

async fn run(cli: Cli) -> Result<()> {
    let file = import::read_import_file(&cli.input_file)
        .with_context(|| format!("Failed to load {}", cli.input_file.display()))?;

    tracing::info!("Loading json of CA County abbreviations");
    let counties = CountyTable::bundled().context("Bundled county table is invalid")?;

    let pool = db::connect().await.context("Failed to prepare database")?;
    let storage = PgStorage::new(pool);

    let report = import::import_ca_judges(&storage, &file, &counties)
        .await
        .context("Judge import failed")?;

    println!(
        "Imported {} positions ({} judges created, {} matched)",
        report.positions_created, report.judges_created, report.judges_matched
    );
    log::info!(
        "judge import: created={} matched={} positions={}",
        report.judges_created,
        report.judges_matched,
        report.positions_created
    );
    Ok(())
}
