//! Placement policy: choosing a serving node under coverage, capacity, and
//! latency-budget constraints.
//!
//! [`select_node`] is a pure read over node state. It scans the edge tier
//! first, falls back to the remote tier, and when nothing qualifies it
//! derives a typed rejection reason from the counters it kept during the
//! scan. Admission (and therefore mutation) stays with the caller.

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

use mecsim_common::types::Position;

use crate::device::Device;
use crate::node::{ComputeNode, NodeId, NodeKind, NodeTier};
use crate::task::Task;

/// Floor on the estimated network latency of an edge link, in milliseconds.
pub const MIN_EDGE_LATENCY_MS: f64 = 1.0;

/// Distance measure between two plane positions.
///
/// Implementations supply the metric only; the policy turns an edge
/// distance into estimated latency with the [`MIN_EDGE_LATENCY_MS`] floor.
pub trait DistanceModel: Send + Sync {
    /// Distance between `a` and `b`, in plane units (read as milliseconds).
    fn distance(&self, a: Position, b: Position) -> f64;
}

/// Straight-line distance. The default model.
#[derive(Debug, Clone, Copy, Default)]
pub struct EuclideanDistance;

impl DistanceModel for EuclideanDistance {
    fn distance(&self, a: Position, b: Position) -> f64 {
        a.distance_to(&b)
    }
}

/// Why a task could not be placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RejectReason {
    /// No edge node covers the device and no remote node is registered.
    NoCoverage,
    /// Some node was reachable, but none could admit the demand.
    CapacityExceeded,
    /// Some reachable node could admit, but none met the latency budget.
    LatencyBudgetExceeded,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::NoCoverage => write!(f, "no-coverage"),
            RejectReason::CapacityExceeded => write!(f, "capacity-exceeded"),
            RejectReason::LatencyBudgetExceeded => write!(f, "latency-budget-exceeded"),
        }
    }
}

/// Outcome of a placement attempt.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum PlacementResult {
    /// The named node admitted the task.
    Assigned(NodeId),
    /// No node could take the task.
    Rejected(RejectReason),
}

impl PlacementResult {
    /// True for [`PlacementResult::Assigned`].
    pub fn is_assigned(&self) -> bool {
        matches!(self, PlacementResult::Assigned(_))
    }
}

impl fmt::Display for PlacementResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementResult::Assigned(node_id) => write!(f, "assigned to {node_id}"),
            PlacementResult::Rejected(reason) => write!(f, "rejected ({reason})"),
        }
    }
}

/// A concrete selection: where the task should go and at what link cost.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlacementDecision {
    /// The chosen node.
    pub node_id: NodeId,
    /// Tier of the chosen node.
    pub tier: NodeTier,
    /// Estimated network latency of the chosen link, in milliseconds.
    pub network_latency_ms: f64,
}

/// Counters explaining why candidates were passed over during one scan.
///
/// The final rejection reason is derived from these when no candidate
/// survives: budget misses take precedence over capacity misses, and with
/// no reachable candidate at all the reason is no-coverage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EligibilityReport {
    /// Edge nodes whose coverage radius does not reach the device.
    pub out_of_coverage: u32,
    /// Covering edge nodes that could not admit the demand.
    pub edge_at_capacity: u32,
    /// Covering, admissible edge nodes whose estimated latency missed the
    /// budget.
    pub edge_over_budget: u32,
    /// Remote node whose access latency missed the budget.
    pub remote_over_budget: u32,
    /// Remote node within budget but unable to admit the demand.
    pub remote_at_capacity: u32,
}

impl EligibilityReport {
    /// Derives the typed rejection reason from the scan counters.
    pub fn rejection_reason(&self) -> RejectReason {
        if self.edge_over_budget > 0 || self.remote_over_budget > 0 {
            RejectReason::LatencyBudgetExceeded
        } else if self.edge_at_capacity > 0 || self.remote_at_capacity > 0 {
            RejectReason::CapacityExceeded
        } else {
            RejectReason::NoCoverage
        }
    }

    /// Total candidates passed over.
    pub fn total_passed_over(&self) -> u32 {
        self.out_of_coverage
            + self.edge_at_capacity
            + self.edge_over_budget
            + self.remote_over_budget
            + self.remote_at_capacity
    }
}

/// Picks a serving node for `task` from `device`, mutating nothing.
///
/// An edge node is eligible when it covers the device, can admit the
/// demand, and its estimated latency `max(1.0, distance)` fits the task's
/// budget. The cheapest eligible edge wins, ties breaking toward the
/// smallest node id. Only when no edge qualifies is the remote node
/// considered: it serves iff its access latency fits the budget and it can
/// admit the demand.
pub fn select_node(
    device: &Device,
    task: &Task,
    edges: &[ComputeNode],
    remote: Option<&ComputeNode>,
    distance_model: &dyn DistanceModel,
) -> (Option<PlacementDecision>, EligibilityReport) {
    let mut report = EligibilityReport::default();
    let mut best: Option<(f64, NodeId)> = None;

    for node in edges {
        let (position, coverage_radius) = match node.kind() {
            NodeKind::Edge {
                position,
                coverage_radius,
            } => (position, coverage_radius),
            NodeKind::Remote { .. } => continue,
        };

        let distance = distance_model.distance(device.position(), position);
        if distance > coverage_radius {
            report.out_of_coverage += 1;
            continue;
        }
        if !node.can_admit(task) {
            report.edge_at_capacity += 1;
            continue;
        }
        let latency = distance.max(MIN_EDGE_LATENCY_MS);
        if latency > task.latency_budget_ms() {
            report.edge_over_budget += 1;
            continue;
        }

        let better = match best {
            None => true,
            Some((best_latency, best_id)) => match latency.total_cmp(&best_latency) {
                Ordering::Less => true,
                Ordering::Equal => node.id() < best_id,
                Ordering::Greater => false,
            },
        };
        if better {
            best = Some((latency, node.id()));
        }
    }

    if let Some((network_latency_ms, node_id)) = best {
        return (
            Some(PlacementDecision {
                node_id,
                tier: NodeTier::Edge,
                network_latency_ms,
            }),
            report,
        );
    }

    if let Some(node) = remote {
        if let NodeKind::Remote { access_latency_ms } = node.kind() {
            if access_latency_ms > task.latency_budget_ms() {
                report.remote_over_budget += 1;
            } else if !node.can_admit(task) {
                report.remote_at_capacity += 1;
            } else {
                return (
                    Some(PlacementDecision {
                        node_id: node.id(),
                        tier: NodeTier::Remote,
                        network_latency_ms: access_latency_ms,
                    }),
                    report,
                );
            }
        }
    }

    (None, report)
}
