//! Async service wrapper around the orchestrator.
//!
//! The orchestrator itself is synchronous single-writer state. This task
//! owns it and serializes every command and query through one mpsc
//! channel, which is what keeps capacity accounting race-free when the
//! rest of the program is async.

use tokio::sync::{mpsc, oneshot};
use tracing::{info, warn};

use crate::messages::{OrchestratorMessage, OrchestratorResponse};
use crate::orchestrator::Orchestrator;

/// Default bound for the service's message channel.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 64;

/// Message-driven task owning an [`Orchestrator`].
pub struct OrchestratorService {
    orchestrator: Orchestrator,
}

impl OrchestratorService {
    /// Wraps an orchestrator for message-driven use.
    pub fn new(orchestrator: Orchestrator) -> Self {
        Self { orchestrator }
    }

    /// The wrapped orchestrator.
    pub fn orchestrator(&self) -> &Orchestrator {
        &self.orchestrator
    }

    /// Mutable access to the wrapped orchestrator.
    pub fn orchestrator_mut(&mut self) -> &mut Orchestrator {
        &mut self.orchestrator
    }

    /// Runs the service loop until every sender is dropped.
    pub async fn run(&mut self, mut rx: mpsc::Receiver<OrchestratorMessage>) {
        info!(
            "Orchestrator service started: {} device(s), {} node(s)",
            self.orchestrator.device_count(),
            self.orchestrator.node_count()
        );

        while let Some(msg) = rx.recv().await {
            self.handle_message(msg);
        }

        info!("Orchestrator service stopped");
    }

    fn handle_message(&mut self, msg: OrchestratorMessage) {
        match msg {
            OrchestratorMessage::RegisterDevice {
                device,
                response_tx,
            } => {
                let response = match self.orchestrator.register_device(device) {
                    Ok(()) => OrchestratorResponse::Ok,
                    Err(e) => {
                        warn!("Device registration failed: {}", e);
                        OrchestratorResponse::Error {
                            message: e.to_string(),
                        }
                    }
                };
                Self::respond(response_tx, response);
            }

            OrchestratorMessage::RegisterNode { node, response_tx } => {
                let response = match self.orchestrator.register_node(node) {
                    Ok(()) => OrchestratorResponse::Ok,
                    Err(e) => {
                        warn!("Node registration failed: {}", e);
                        OrchestratorResponse::Error {
                            message: e.to_string(),
                        }
                    }
                };
                Self::respond(response_tx, response);
            }

            OrchestratorMessage::SubmitTask {
                device_id,
                spec,
                response_tx,
            } => {
                let response = match self.orchestrator.submit_task(device_id, spec) {
                    Ok(result) => OrchestratorResponse::Placement(result),
                    Err(e) => {
                        warn!("Task submission for {} failed: {}", device_id, e);
                        OrchestratorResponse::Error {
                            message: e.to_string(),
                        }
                    }
                };
                Self::respond(response_tx, response);
            }

            OrchestratorMessage::RunCycle { response_tx } => {
                let report = self.orchestrator.run_cycle();
                Self::respond(response_tx, OrchestratorResponse::Cycle(report));
            }

            OrchestratorMessage::RunCycles { count, response_tx } => {
                let reports = self.orchestrator.run(count);
                Self::respond(response_tx, OrchestratorResponse::Cycles(reports));
            }

            OrchestratorMessage::QuerySummary { response_tx } => {
                let summary = self.orchestrator.summary();
                let _ = response_tx.send(OrchestratorResponse::Summary(summary));
            }
        }
    }

    fn respond(tx: Option<oneshot::Sender<OrchestratorResponse>>, response: OrchestratorResponse) {
        if let Some(tx) = tx {
            let _ = tx.send(response);
        }
    }
}
