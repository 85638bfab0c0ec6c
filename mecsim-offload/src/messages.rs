//! Message types for the orchestrator service.
//!
//! Commands carry an optional response channel; queries require one.

use crate::device::{Device, DeviceId};
use crate::node::ComputeNode;
use crate::policy::PlacementResult;
use crate::report::{AggregateReport, CycleReport};
use crate::task::TaskSpec;

/// Messages accepted by the orchestrator service.
#[derive(Debug)]
pub enum OrchestratorMessage {
    // ========================================================================
    // Topology
    // ========================================================================

    /// Register a device.
    RegisterDevice {
        /// The device to register.
        device: Device,
        /// Response channel.
        response_tx: Option<tokio::sync::oneshot::Sender<OrchestratorResponse>>,
    },

    /// Register an edge or remote node.
    RegisterNode {
        /// The node to register.
        node: ComputeNode,
        /// Response channel.
        response_tx: Option<tokio::sync::oneshot::Sender<OrchestratorResponse>>,
    },

    // ========================================================================
    // Workload
    // ========================================================================

    /// Mint a task from a spec and place it immediately.
    SubmitTask {
        /// The device producing the task.
        device_id: DeviceId,
        /// The task's numeric shape.
        spec: TaskSpec,
        /// Response channel.
        response_tx: Option<tokio::sync::oneshot::Sender<OrchestratorResponse>>,
    },

    // ========================================================================
    // Simulation Control
    // ========================================================================

    /// Run a single cycle.
    RunCycle {
        /// Response channel.
        response_tx: Option<tokio::sync::oneshot::Sender<OrchestratorResponse>>,
    },

    /// Run a batch of cycles.
    RunCycles {
        /// How many cycles to run.
        count: u64,
        /// Response channel.
        response_tx: Option<tokio::sync::oneshot::Sender<OrchestratorResponse>>,
    },

    // ========================================================================
    // Queries
    // ========================================================================

    /// Query the cumulative summary.
    QuerySummary {
        /// Response channel.
        response_tx: tokio::sync::oneshot::Sender<OrchestratorResponse>,
    },
}

/// Responses from the orchestrator service.
#[derive(Debug)]
pub enum OrchestratorResponse {
    /// Placement outcome for a submitted task.
    Placement(PlacementResult),

    /// Report for a single cycle.
    Cycle(CycleReport),

    /// Reports for a batch of cycles.
    Cycles(Vec<CycleReport>),

    /// Cumulative run summary.
    Summary(AggregateReport),

    /// Error response.
    Error {
        /// Error message.
        message: String,
    },

    /// Success acknowledgment.
    Ok,
}
