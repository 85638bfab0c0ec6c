//! Cycle and aggregate reporting.
//!
//! Reports are plain value types: a [`CycleReport`] describes what one
//! cycle did, an [`AggregateReport`] is the cumulative view the summary
//! query returns. Both serialize, so the CLI can print them as JSON.

use std::fmt;

use serde::Serialize;

use crate::node::{NodeId, NodeTier};
use crate::policy::RejectReason;

/// Rejection counters keyed by reason.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RejectionCounts {
    /// Tasks with no covering edge and no remote tier.
    pub no_coverage: u64,
    /// Tasks refused because every reachable node was full.
    pub capacity_exceeded: u64,
    /// Tasks refused because no reachable node met their budget.
    pub latency_budget_exceeded: u64,
}

impl RejectionCounts {
    /// Adds one rejection for `reason`.
    pub fn record(&mut self, reason: RejectReason) {
        match reason {
            RejectReason::NoCoverage => self.no_coverage += 1,
            RejectReason::CapacityExceeded => self.capacity_exceeded += 1,
            RejectReason::LatencyBudgetExceeded => self.latency_budget_exceeded += 1,
        }
    }

    /// Total rejections counted.
    pub fn total(&self) -> u64 {
        self.no_coverage + self.capacity_exceeded + self.latency_budget_exceeded
    }
}

/// Completed-task counters per tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TierCounts {
    /// Tasks completed on edge nodes.
    pub edge: u64,
    /// Tasks completed on the remote node.
    pub remote: u64,
}

impl TierCounts {
    /// Adds `n` completions for `tier`.
    pub fn record(&mut self, tier: NodeTier, n: u64) {
        match tier {
            NodeTier::Edge => self.edge += n,
            NodeTier::Remote => self.remote += n,
        }
    }

    /// Total completions across both tiers.
    pub fn total(&self) -> u64 {
        self.edge + self.remote
    }
}

/// What one Generate, Place, Advance, Report cycle did.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CycleReport {
    /// Cycle index this report covers.
    pub cycle: u64,
    /// Simulated time at the start of the cycle, ms.
    pub sim_time_ms: f64,
    /// Tasks minted in the generate phase.
    pub generated: u64,
    /// Tasks admitted by some node.
    pub placed: u64,
    /// Rejections during this cycle, by reason.
    pub rejections: RejectionCounts,
    /// Tasks completed in the advance phase.
    pub completed: u64,
    /// Mean end-to-end latency of this cycle's completions, ms. Zero when
    /// nothing completed.
    pub mean_latency_ms: f64,
}

/// Utilization snapshot for one node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeUtilization {
    /// Node identifier.
    pub node_id: NodeId,
    /// Node name.
    pub name: String,
    /// Tier the node serves.
    pub tier: NodeTier,
    /// Load over capacity, as a percentage.
    pub utilization_pct: f64,
    /// Tasks the node has completed so far.
    pub completed: u64,
}

/// Cumulative view over a whole run.
///
/// Produced by the orchestrator's summary query; stable across repeated
/// calls when no cycle runs in between.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateReport {
    /// Cycles executed so far.
    pub cycles_run: u64,
    /// Tasks generated over the whole run.
    pub tasks_generated: u64,
    /// Completed-task counts by tier.
    pub completed_by_tier: TierCounts,
    /// Mean end-to-end latency over every completed task, ms. Zero when
    /// nothing has completed.
    pub mean_latency_ms: f64,
    /// Cumulative rejection counters.
    pub rejections: RejectionCounts,
    /// Current utilization per registered node, edges first.
    pub nodes: Vec<NodeUtilization>,
}

impl fmt::Display for AggregateReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "cycles run:         {}", self.cycles_run)?;
        writeln!(f, "tasks generated:    {}", self.tasks_generated)?;
        writeln!(
            f,
            "completed:          {} (edge {}, remote {})",
            self.completed_by_tier.total(),
            self.completed_by_tier.edge,
            self.completed_by_tier.remote
        )?;
        writeln!(
            f,
            "rejected:           {} (coverage {}, capacity {}, budget {})",
            self.rejections.total(),
            self.rejections.no_coverage,
            self.rejections.capacity_exceeded,
            self.rejections.latency_budget_exceeded
        )?;
        writeln!(f, "mean latency:       {:.2} ms", self.mean_latency_ms)?;
        writeln!(f, "nodes:")?;
        for node in &self.nodes {
            writeln!(
                f,
                "  {:<6} {:<16} {:<7} {:>6.1}%  completed {}",
                node.node_id.to_string(),
                node.name,
                node.tier.to_string(),
                node.utilization_pct,
                node.completed
            )?;
        }
        Ok(())
    }
}
