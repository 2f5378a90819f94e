use crate::{
    commands::Commands,
    error::CliError,
    shutdown::{ExitCode, ShutdownCoordinator},
};
use clap::Parser;
use connectors::file::csv::{CsvQuerySource, CsvResult};
use engine_config::settings::SettingsLoader;
use engine_core::{mapping::resolve_schema, metrics::MetricsSnapshot};
use engine_processing::{
    graph::build_device_graph,
    producer::BatchStreamer,
    sink::JsonLinesSinkFactory,
    sync::{SyncWorker, TableReport},
};
use model::entities::{DeviceRelation, PowerDevice};
use serde::Serialize;
use std::{path::Path, sync::Arc};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod commands;
mod error;
mod output;
mod shutdown;

#[derive(Parser, Debug)]
#[command(
    name = "sync-engine",
    version = "0.1.0",
    about = "Streams tabular query results into typed device records"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Serialize)]
struct SyncOutput {
    tables: Vec<TableReport>,
    metrics: MetricsSnapshot,
    cancelled: bool,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let shutdown = ShutdownCoordinator::new();
    shutdown.register_handlers();

    let code = match run(cli.command, &shutdown.cancel_token()).await {
        Ok(()) if shutdown.is_shutdown_requested() => ExitCode::ShutdownRequested,
        Ok(()) => ExitCode::Success,
        Err(CliError::ShutdownRequested) => ExitCode::ShutdownRequested,
        Err(err) => {
            error!(error = %err, "Command failed.");
            ExitCode::GeneralError
        }
    };

    std::process::exit(code.as_i32());
}

async fn run(command: Commands, cancel: &CancellationToken) -> Result<(), CliError> {
    match command {
        Commands::Sync {
            config,
            env,
            output,
        } => {
            let report = sync(&config, env, cancel).await?;
            output::emit(&report, output.as_deref()).await
        }
        Commands::Graph {
            devices,
            relations,
            batch_size,
            output,
        } => {
            let graph = {
                let devices = read_devices(&devices, batch_size, cancel).await?;
                let relations: Vec<DeviceRelation> =
                    serde_json::from_str(&tokio::fs::read_to_string(&relations).await?)?;
                build_device_graph(devices, &relations)
            };
            output::emit(&graph, output.as_deref()).await
        }
        Commands::Schema { file } => {
            let columns = {
                let result = CsvResult::open(&file)?;
                resolve_schema(&result)?
            };
            output::emit(&columns, None).await
        }
    }
}

async fn sync(
    config: &Path,
    env: Option<String>,
    cancel: &CancellationToken,
) -> Result<SyncOutput, CliError> {
    let settings = SettingsLoader::new(config).environment(env).load()?;
    info!(
        tables = settings.tables.len(),
        query_dir = %settings.query_dir.display(),
        output_dir = %settings.output_dir.display(),
        "Starting sync."
    );

    let source = Arc::new(CsvQuerySource::new(&settings.query_dir));
    let sinks = Arc::new(JsonLinesSinkFactory::new(&settings.output_dir));
    let worker = SyncWorker::new(settings, source, sinks);

    let tables = worker.run(cancel).await?;
    let cancelled = cancel.is_cancelled() || tables.iter().any(|table| table.cancelled);
    Ok(SyncOutput {
        tables,
        metrics: worker.metrics().snapshot(),
        cancelled,
    })
}

async fn read_devices(
    path: &Path,
    batch_size: usize,
    cancel: &CancellationToken,
) -> Result<Vec<PowerDevice>, CliError> {
    let mut result = CsvResult::open(path)?;
    let (devices, summary) = BatchStreamer::new(batch_size)?
        .collect::<PowerDevice, _>(&mut result, cancel)
        .await?;

    if summary.cancelled {
        return Err(CliError::ShutdownRequested);
    }

    info!(
        devices = devices.len(),
        batches = summary.batches,
        unmapped = ?summary.unmapped,
        "Read devices."
    );
    Ok(devices)
}
