//! Error types for the offload engine.

use thiserror::Error;

use mecsim_common::types::TaskCategory;

use crate::device::DeviceId;
use crate::node::NodeId;

/// Errors produced while building or driving an offload scenario.
///
/// Placement rejection is deliberately absent: a task no node can take is a
/// normal outcome, reported as [`crate::policy::PlacementResult::Rejected`].
/// This enum covers caller mistakes and invalid configuration only.
#[derive(Error, Debug)]
pub enum OffloadError {
    /// Node capacity must be strictly positive.
    #[error("node {node_id}: capacity must be positive, got {capacity_ghz} GHz")]
    InvalidCapacity {
        /// Offending node.
        node_id: NodeId,
        /// The rejected value.
        capacity_ghz: f64,
    },

    /// Edge coverage radius must be strictly positive.
    #[error("node {node_id}: coverage radius must be positive, got {radius}")]
    InvalidCoverageRadius {
        /// Offending node.
        node_id: NodeId,
        /// The rejected value.
        radius: f64,
    },

    /// Remote access latency cannot be negative.
    #[error("node {node_id}: access latency cannot be negative, got {access_latency_ms} ms")]
    InvalidAccessLatency {
        /// Offending node.
        node_id: NodeId,
        /// The rejected value.
        access_latency_ms: f64,
    },

    /// Task payload must be strictly positive.
    #[error("invalid {category} task: payload must be positive, got {payload_mb} MB")]
    InvalidPayload {
        /// Category of the offending spec.
        category: TaskCategory,
        /// The rejected value.
        payload_mb: f64,
    },

    /// Task processing demand must be strictly positive.
    #[error("invalid {category} task: demand must be positive, got {demand_ghz} gigacycles")]
    InvalidDemand {
        /// Category of the offending spec.
        category: TaskCategory,
        /// The rejected value.
        demand_ghz: f64,
    },

    /// Task latency budget must be strictly positive.
    #[error("invalid {category} task: latency budget must be positive, got {latency_budget_ms} ms")]
    InvalidLatencyBudget {
        /// Category of the offending spec.
        category: TaskCategory,
        /// The rejected value.
        latency_budget_ms: f64,
    },

    /// A device with this id is already registered.
    #[error("device {device_id} is already registered")]
    DuplicateDevice {
        /// The colliding id.
        device_id: DeviceId,
    },

    /// A node with this id is already registered.
    #[error("node {node_id} is already registered")]
    DuplicateNode {
        /// The colliding id.
        node_id: NodeId,
    },

    /// The remote tier already has its node.
    #[error("remote node {rejected} rejected: {existing} already serves the remote tier")]
    RemoteAlreadyRegistered {
        /// Node currently serving the remote tier.
        existing: NodeId,
        /// Node whose registration was refused.
        rejected: NodeId,
    },

    /// A submission referenced a device the orchestrator does not know.
    #[error("unknown device {device_id}")]
    UnknownDevice {
        /// The unrecognized id.
        device_id: DeviceId,
    },

    /// A workload profile range is unusable.
    #[error("workload profile for {category}: {reason}")]
    InvalidWorkloadProfile {
        /// Category whose profile failed validation.
        category: TaskCategory,
        /// What was wrong with it.
        reason: String,
    },

    /// Arrival probability outside `[0, 1]`.
    #[error("arrival probability must be within [0, 1], got {value}")]
    InvalidArrivalProbability {
        /// The rejected value.
        value: f64,
    },

    /// Catch-all configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result alias for offload operations.
pub type OffloadResult<T> = std::result::Result<T, OffloadError>;
