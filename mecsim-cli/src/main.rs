//! mecsim: tiered task-offloading simulator
//!
//! Loads a scenario file, builds the orchestrator behind its service
//! task, runs the configured number of cycles, and prints the summary.
//!
//! # Usage
//!
//! ```bash
//! mecsim -c config/example.yaml
//! mecsim -c config/example.yaml -n 200 -s 7 --json
//! ```

mod config_loader;

use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tokio::sync::{mpsc, oneshot};
use tracing::{error, info};

use mecsim_common::logging::{init_logging, LogLevel};
use mecsim_offload::{
    Orchestrator, OrchestratorMessage, OrchestratorResponse, OrchestratorService,
    DEFAULT_CHANNEL_CAPACITY,
};

use config_loader::load_and_validate_scenario;

/// mecsim - tiered task-offloading simulator
#[derive(Parser, Debug)]
#[command(name = "mecsim")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the scenario configuration file (YAML)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config_file: String,

    /// Number of cycles to run, overriding the scenario's total_cycles
    #[arg(short = 'n', long = "cycles", value_name = "COUNT")]
    cycles: Option<u64>,

    /// RNG seed, overriding the scenario's seed
    #[arg(short = 's', long = "seed", value_name = "SEED")]
    seed: Option<u64>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", default_value = "info")]
    log_level: String,

    /// Print the summary as JSON instead of text
    #[arg(long = "json")]
    json: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let level = match args.log_level.parse::<LogLevel>() {
        Ok(level) => level,
        Err(e) => {
            eprintln!("ERROR: {e}");
            return ExitCode::FAILURE;
        }
    };
    init_logging(level);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("mecsim failed: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Main simulation run: load, build, run, report.
async fn run(args: Args) -> Result<()> {
    info!("Loading scenario from: {}", args.config_file);
    let mut scenario = load_and_validate_scenario(&args.config_file)
        .with_context(|| format!("failed to load scenario from {}", args.config_file))?;

    if let Some(seed) = args.seed {
        scenario.seed = seed;
    }
    let cycles = args.cycles.unwrap_or(scenario.clock.total_cycles);

    info!(
        "Scenario loaded: {} device(s), {} edge node(s), remote tier: {}, seed {}",
        scenario.devices.len(),
        scenario.edge_nodes.len(),
        if scenario.remote_node.is_some() {
            "yes"
        } else {
            "no"
        },
        scenario.seed
    );

    let orchestrator =
        Orchestrator::from_scenario(&scenario).context("failed to build orchestrator")?;

    let (tx, rx) = mpsc::channel(DEFAULT_CHANNEL_CAPACITY);
    let mut service = OrchestratorService::new(orchestrator);
    let handle = tokio::spawn(async move { service.run(rx).await });

    let (response_tx, response_rx) = oneshot::channel();
    tx.send(OrchestratorMessage::RunCycles {
        count: cycles,
        response_tx: Some(response_tx),
    })
    .await
    .context("orchestrator service is not running")?;

    match response_rx
        .await
        .context("orchestrator service dropped the run response")?
    {
        OrchestratorResponse::Cycles(reports) => {
            info!("Run complete: {} cycle(s) executed", reports.len());
        }
        OrchestratorResponse::Error { message } => bail!("run failed: {message}"),
        other => bail!("unexpected response to run request: {other:?}"),
    }

    let (response_tx, response_rx) = oneshot::channel();
    tx.send(OrchestratorMessage::QuerySummary { response_tx })
        .await
        .context("orchestrator service is not running")?;

    let summary = match response_rx
        .await
        .context("orchestrator service dropped the summary response")?
    {
        OrchestratorResponse::Summary(summary) => summary,
        other => bail!("unexpected response to summary query: {other:?}"),
    };

    drop(tx);
    handle.await.context("orchestrator service panicked")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{summary}");
    }

    Ok(())
}
