//! Worker Service
//!
//! Runs the background job loop in the foreground and serves health,
//! readiness and metrics endpoints on a concurrent task.

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tokio::sync::oneshot;
use tracing::{error, info};
use worker_service::worker::{setup_signal_handler, SimulatedJobProcessor, TaskRunner, WorkerState};
use worker_service::{server, telemetry, ServiceConfig};

#[derive(Parser)]
#[command(name = "worker-service")]
#[command(about = "Background job worker with health and metrics endpoints")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    config: ServiceConfig,

    /// Process a single job and exit
    #[arg(long)]
    once: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present, before clap reads the environment
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    telemetry::init(cli.verbose);

    let config = cli.config;
    let state = Arc::new(WorkerState::new(&config));
    info!("Worker started at {}", state.started_at().to_rfc3339());
    let worker_config = config.worker_config();
    let processor = SimulatedJobProcessor::new(&worker_config);
    let runner = TaskRunner::new(Arc::clone(&state), worker_config, processor);

    if cli.once {
        let outcome = runner.run_once().await?;
        println!("Processed {}", outcome.job_id);
        return Ok(());
    }

    let listener = server::bind(config.bind_addr()).await?;
    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let server_handle = tokio::spawn(server::serve_with_shutdown(
        listener,
        Arc::clone(&state),
        async move {
            stop_rx.await.ok();
        },
    ));

    // Setup graceful shutdown
    let _signals = setup_signal_handler(runner.shutdown_handle())?;

    runner.run().await;

    // Stop the server only after the loop has committed its final job
    let _ = stop_tx.send(());
    match server_handle.await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => error!("Health server error: {}", e),
        Err(e) => error!("Health server task failed: {}", e),
    }

    info!("Shutdown complete");
    Ok(())
}
