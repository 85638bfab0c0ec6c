//! Compute nodes: the two placement tiers and their capacity accounting.
//!
//! A node's pending list has exactly one door: [`ComputeNode::admit`],
//! which re-checks capacity immediately before mutating and takes ownership
//! of the task. That keeps `0 <= load <= capacity` true at every observable
//! point of a run, whatever order placements arrive in.

use std::fmt;

use serde::Serialize;

use mecsim_common::types::Position;

use crate::error::{OffloadError, OffloadResult};
use crate::task::Task;

/// Unique node identifier.
///
/// Ordering matters: placement ties break toward the smallest id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(u32);

impl NodeId {
    /// Creates a node id.
    pub const fn new(id: u32) -> Self {
        NodeId(id)
    }

    /// The raw id value.
    pub const fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "N-{}", self.0)
    }
}

/// Placement tier a node belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeTier {
    /// Coverage-limited nodes near the devices.
    Edge,
    /// The always-reachable datacenter tier.
    Remote,
}

impl fmt::Display for NodeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeTier::Edge => write!(f, "edge"),
            NodeTier::Remote => write!(f, "remote"),
        }
    }
}

/// What kind of node this is, with the per-kind placement inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum NodeKind {
    /// A node serving only devices inside its coverage radius.
    Edge {
        /// Fixed position on the plane.
        position: Position,
        /// Coverage radius, in plane units.
        coverage_radius: f64,
    },
    /// A node reachable from anywhere behind a fixed access latency.
    Remote {
        /// Access latency from any device, in milliseconds.
        access_latency_ms: f64,
    },
}

impl NodeKind {
    /// The tier this kind belongs to.
    pub fn tier(&self) -> NodeTier {
        match self {
            NodeKind::Edge { .. } => NodeTier::Edge,
            NodeKind::Remote { .. } => NodeTier::Remote,
        }
    }
}

/// A compute node with pending/completed bookkeeping.
#[derive(Debug, Clone)]
pub struct ComputeNode {
    id: NodeId,
    name: String,
    kind: NodeKind,
    capacity_ghz: f64,
    load_ghz: f64,
    pending: Vec<Task>,
    completed: Vec<Task>,
}

impl ComputeNode {
    /// Creates an edge node. Capacity and radius must be positive.
    pub fn edge(
        id: NodeId,
        name: impl Into<String>,
        position: Position,
        coverage_radius: f64,
        capacity_ghz: f64,
    ) -> OffloadResult<Self> {
        if !(capacity_ghz > 0.0) {
            return Err(OffloadError::InvalidCapacity {
                node_id: id,
                capacity_ghz,
            });
        }
        if !(coverage_radius > 0.0) {
            return Err(OffloadError::InvalidCoverageRadius {
                node_id: id,
                radius: coverage_radius,
            });
        }
        Ok(Self {
            id,
            name: name.into(),
            kind: NodeKind::Edge {
                position,
                coverage_radius,
            },
            capacity_ghz,
            load_ghz: 0.0,
            pending: Vec::new(),
            completed: Vec::new(),
        })
    }

    /// Creates the remote datacenter node. Capacity must be positive and
    /// the access latency non-negative.
    pub fn remote(
        id: NodeId,
        name: impl Into<String>,
        access_latency_ms: f64,
        capacity_ghz: f64,
    ) -> OffloadResult<Self> {
        if !(capacity_ghz > 0.0) {
            return Err(OffloadError::InvalidCapacity {
                node_id: id,
                capacity_ghz,
            });
        }
        if !(access_latency_ms >= 0.0) {
            return Err(OffloadError::InvalidAccessLatency {
                node_id: id,
                access_latency_ms,
            });
        }
        Ok(Self {
            id,
            name: name.into(),
            kind: NodeKind::Remote { access_latency_ms },
            capacity_ghz,
            load_ghz: 0.0,
            pending: Vec::new(),
            completed: Vec::new(),
        })
    }

    /// Node identifier.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Human-readable name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The node's kind and per-kind placement inputs.
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// The tier this node serves.
    pub fn tier(&self) -> NodeTier {
        self.kind.tier()
    }

    /// Total processing capacity, GHz.
    pub fn capacity_ghz(&self) -> f64 {
        self.capacity_ghz
    }

    /// Demand currently admitted, GHz.
    pub fn load_ghz(&self) -> f64 {
        self.load_ghz
    }

    /// Capacity still available, GHz.
    pub fn available_ghz(&self) -> f64 {
        self.capacity_ghz - self.load_ghz
    }

    /// Tasks waiting for the next advance step.
    pub fn pending(&self) -> &[Task] {
        &self.pending
    }

    /// Number of pending tasks.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Every task this node has completed, oldest first.
    pub fn completed(&self) -> &[Task] {
        &self.completed
    }

    /// Number of completed tasks.
    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    /// True when the node covers `device_position`. The remote tier covers
    /// the whole plane.
    pub fn covers(&self, device_position: Position) -> bool {
        match self.kind {
            NodeKind::Edge {
                position,
                coverage_radius,
            } => position.distance_to(&device_position) <= coverage_radius,
            NodeKind::Remote { .. } => true,
        }
    }

    /// True when the node can take `task` without oversubscribing.
    pub fn can_admit(&self, task: &Task) -> bool {
        self.load_ghz + task.demand_ghz() <= self.capacity_ghz
    }

    /// Admits a task, taking ownership of it.
    ///
    /// Capacity is re-checked against the current load immediately before
    /// anything mutates; on refusal the task comes back to the caller
    /// unchanged. On success the task joins the pending list with its
    /// assigned node and link estimate recorded.
    pub fn admit(
        &mut self,
        mut task: Task,
        network_latency_ms: f64,
    ) -> std::result::Result<(), Task> {
        if !self.can_admit(&task) {
            return Err(task);
        }
        task.assign(self.id, network_latency_ms);
        self.load_ghz += task.demand_ghz();
        self.pending.push(task);
        Ok(())
    }

    /// Completes every pending task at simulated time `now_ms` and returns
    /// snapshots of them, in admission order.
    ///
    /// Service time is `demand / capacity` seconds. Every pending task
    /// finishes within this single step; queueing across cycles shows up
    /// as extra latency for tasks admitted between cycles.
    pub fn advance(&mut self, now_ms: f64) -> Vec<Task> {
        let mut done = Vec::with_capacity(self.pending.len());
        for mut task in self.pending.drain(..) {
            let service_ms = task.demand_ghz() / self.capacity_ghz * 1000.0;
            task.complete(now_ms + service_ms);
            self.load_ghz = (self.load_ghz - task.demand_ghz()).max(0.0);
            done.push(task.clone());
            self.completed.push(task);
        }
        done
    }

    /// Load as a percentage of capacity.
    pub fn utilization(&self) -> f64 {
        if self.capacity_ghz <= 0.0 {
            return 0.0;
        }
        self.load_ghz / self.capacity_ghz * 100.0
    }
}

impl fmt::Display for ComputeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} '{}' [{}] {:.1}/{:.1} GHz",
            self.id,
            self.name,
            self.tier(),
            self.load_ghz,
            self.capacity_ghz
        )
    }
}
