//! The task model: units of offloadable work.
//!
//! A task's lifecycle has exactly two mutations after it is minted: the
//! placement step records the assigned node (once), and the advance step
//! records the completion timestamp (once). Everything else is read-only,
//! which is what makes cycle reports and summaries stable.

use std::fmt;

use serde::Serialize;

use mecsim_common::types::TaskCategory;

use crate::device::DeviceId;
use crate::error::{OffloadError, OffloadResult};
use crate::node::NodeId;

/// Unique task identifier, allocated by the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TaskId(u64);

impl TaskId {
    /// Creates a task id.
    pub const fn new(id: u64) -> Self {
        TaskId(id)
    }

    /// The raw id value.
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T-{}", self.0)
    }
}

/// The numeric shape of a task before it is minted: a category plus the
/// three sampled fields. Specs are what generators produce and submitters
/// hand in; the orchestrator turns them into [`Task`]s.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TaskSpec {
    /// Task category.
    pub category: TaskCategory,
    /// Payload shipped to the serving node, in megabytes.
    pub payload_mb: f64,
    /// Work the task carries, in gigacycles. Capacity is GHz, so
    /// `demand / capacity` is service time in seconds.
    pub demand_ghz: f64,
    /// Largest acceptable estimated network latency, in milliseconds.
    pub latency_budget_ms: f64,
}

impl TaskSpec {
    /// Creates a spec. Call [`TaskSpec::validate`] before minting.
    pub const fn new(
        category: TaskCategory,
        payload_mb: f64,
        demand_ghz: f64,
        latency_budget_ms: f64,
    ) -> Self {
        Self {
            category,
            payload_mb,
            demand_ghz,
            latency_budget_ms,
        }
    }

    /// Checks the positivity rules. Invalid specs are refused before a task
    /// is ever minted; nothing downstream clamps.
    pub fn validate(&self) -> OffloadResult<()> {
        // `!(x > 0.0)` also rejects NaN.
        if !(self.payload_mb > 0.0) {
            return Err(OffloadError::InvalidPayload {
                category: self.category,
                payload_mb: self.payload_mb,
            });
        }
        if !(self.demand_ghz > 0.0) {
            return Err(OffloadError::InvalidDemand {
                category: self.category,
                demand_ghz: self.demand_ghz,
            });
        }
        if !(self.latency_budget_ms > 0.0) {
            return Err(OffloadError::InvalidLatencyBudget {
                category: self.category,
                latency_budget_ms: self.latency_budget_ms,
            });
        }
        Ok(())
    }
}

/// A schedulable unit of work produced by a device.
///
/// Owned by whichever node holds it in its pending list once admitted;
/// before that, by the orchestrator's placement path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Task {
    id: TaskId,
    device: DeviceId,
    spec: TaskSpec,
    created_at_ms: f64,
    completed_at_ms: Option<f64>,
    assigned_node: Option<NodeId>,
    network_latency_ms: Option<f64>,
}

impl Task {
    /// Mints a task from a spec that has already passed validation.
    pub fn new(id: TaskId, device: DeviceId, spec: TaskSpec, created_at_ms: f64) -> Self {
        Self {
            id,
            device,
            spec,
            created_at_ms,
            completed_at_ms: None,
            assigned_node: None,
            network_latency_ms: None,
        }
    }

    /// Task identifier.
    pub fn id(&self) -> TaskId {
        self.id
    }

    /// The device that produced this task.
    pub fn device(&self) -> DeviceId {
        self.device
    }

    /// Task category.
    pub fn category(&self) -> TaskCategory {
        self.spec.category
    }

    /// Payload size, in megabytes.
    pub fn payload_mb(&self) -> f64 {
        self.spec.payload_mb
    }

    /// Processing demand, in gigacycles.
    pub fn demand_ghz(&self) -> f64 {
        self.spec.demand_ghz
    }

    /// Latency budget, in milliseconds.
    pub fn latency_budget_ms(&self) -> f64 {
        self.spec.latency_budget_ms
    }

    /// Creation timestamp, simulated milliseconds.
    pub fn created_at_ms(&self) -> f64 {
        self.created_at_ms
    }

    /// Completion timestamp, set exactly once by the advance step.
    pub fn completed_at_ms(&self) -> Option<f64> {
        self.completed_at_ms
    }

    /// The node this task was admitted to, set exactly once at placement.
    pub fn assigned_node(&self) -> Option<NodeId> {
        self.assigned_node
    }

    /// Estimated network latency recorded at placement, for reporting only.
    pub fn network_latency_ms(&self) -> Option<f64> {
        self.network_latency_ms
    }

    /// End-to-end latency in milliseconds; `None` until completed.
    pub fn latency_ms(&self) -> Option<f64> {
        self.completed_at_ms.map(|done| done - self.created_at_ms)
    }

    /// True once the completion timestamp is set.
    pub fn is_completed(&self) -> bool {
        self.completed_at_ms.is_some()
    }

    /// Records the assigned node and the link estimate. A second call is a
    /// no-op: the assignment is immutable once set.
    pub(crate) fn assign(&mut self, node: NodeId, network_latency_ms: f64) {
        if self.assigned_node.is_some() {
            return;
        }
        self.assigned_node = Some(node);
        self.network_latency_ms = Some(network_latency_ms);
    }

    /// Records the completion timestamp. A second call is a no-op.
    pub(crate) fn complete(&mut self, at_ms: f64) {
        if self.completed_at_ms.is_some() {
            return;
        }
        self.completed_at_ms = Some(at_ms);
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}] from {}", self.id, self.spec.category, self.device)
    }
}
