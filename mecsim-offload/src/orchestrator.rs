//! The simulation orchestrator: topology registry plus the cycle loop.
//!
//! The orchestrator owns every device and node, so all placement and
//! capacity accounting goes through one writer. Admission still re-checks
//! capacity right before mutating, which keeps `0 <= load <= capacity`
//! even if a selection went stale between the read and the write.
//!
//! A cycle runs four strictly ordered phases: every device generates
//! before anything is placed, every minted task is placed before any node
//! advances, and the report is built before the clock moves.

use std::collections::HashMap;
use std::fmt;

use tracing::{debug, info};

use mecsim_common::clock::{ClockConfig, SimClock};
use mecsim_common::config::ScenarioConfig;

use crate::device::{Device, DeviceId};
use crate::error::{OffloadError, OffloadResult};
use crate::generator::{RandomTaskGenerator, TaskGenerator};
use crate::node::{ComputeNode, NodeId, NodeKind};
use crate::policy::{self, DistanceModel, EuclideanDistance, PlacementResult, RejectReason};
use crate::report::{AggregateReport, CycleReport, NodeUtilization, RejectionCounts, TierCounts};
use crate::task::{Task, TaskId, TaskSpec};

/// Cumulative counters for the whole run.
#[derive(Debug, Default)]
struct RunStats {
    tasks_generated: u64,
    completed_by_tier: TierCounts,
    latency_sum_ms: f64,
    latency_count: u64,
    rejections: RejectionCounts,
}

impl RunStats {
    fn mean_latency_ms(&self) -> f64 {
        if self.latency_count == 0 {
            0.0
        } else {
            self.latency_sum_ms / self.latency_count as f64
        }
    }
}

/// Drives task generation, placement, and completion over simulated time.
pub struct Orchestrator {
    devices: Vec<Device>,
    device_index: HashMap<DeviceId, usize>,
    edges: Vec<ComputeNode>,
    remote: Option<ComputeNode>,
    clock: SimClock,
    distance_model: Box<dyn DistanceModel>,
    generator: Box<dyn TaskGenerator>,
    next_task_id: u64,
    stats: RunStats,
}

impl fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Orchestrator")
            .field("devices", &self.devices)
            .field("edges", &self.edges)
            .field("remote", &self.remote)
            .field("clock", &self.clock)
            .field("next_task_id", &self.next_task_id)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl Orchestrator {
    /// Creates an empty orchestrator with the straight-line distance model.
    pub fn new(clock_config: ClockConfig, generator: Box<dyn TaskGenerator>) -> Self {
        Self::with_distance_model(clock_config, generator, Box::new(EuclideanDistance))
    }

    /// Creates an empty orchestrator with a caller-supplied distance model.
    pub fn with_distance_model(
        clock_config: ClockConfig,
        generator: Box<dyn TaskGenerator>,
        distance_model: Box<dyn DistanceModel>,
    ) -> Self {
        Self {
            devices: Vec::new(),
            device_index: HashMap::new(),
            edges: Vec::new(),
            remote: None,
            clock: SimClock::new(clock_config),
            distance_model,
            generator,
            next_task_id: 1,
            stats: RunStats::default(),
        }
    }

    /// Builds an orchestrator from a scenario: seeded random generator,
    /// then every device and node registered in file order.
    pub fn from_scenario(scenario: &ScenarioConfig) -> OffloadResult<Self> {
        if scenario.clock.cycle_duration_ms == 0 {
            return Err(OffloadError::Config(
                "clock.cycle_duration_ms must be at least 1".to_string(),
            ));
        }

        let generator = RandomTaskGenerator::new(&scenario.workload, scenario.seed)?;
        let mut orchestrator = Self::new(scenario.clock, Box::new(generator));

        for device in &scenario.devices {
            orchestrator.register_device(Device::new(DeviceId::new(device.id), device.position))?;
        }
        for edge in &scenario.edge_nodes {
            let name = if edge.name.is_empty() {
                format!("edge-{}", edge.id)
            } else {
                edge.name.clone()
            };
            orchestrator.register_node(ComputeNode::edge(
                NodeId::new(edge.id),
                name,
                edge.position,
                edge.coverage_radius,
                edge.capacity_ghz,
            )?)?;
        }
        if let Some(remote) = &scenario.remote_node {
            let name = if remote.name.is_empty() {
                format!("remote-{}", remote.id)
            } else {
                remote.name.clone()
            };
            orchestrator.register_node(ComputeNode::remote(
                NodeId::new(remote.id),
                name,
                remote.access_latency_ms,
                remote.capacity_ghz,
            )?)?;
        }

        Ok(orchestrator)
    }

    /// Registers a device. Ids must be unique.
    pub fn register_device(&mut self, device: Device) -> OffloadResult<()> {
        if self.device_index.contains_key(&device.id()) {
            return Err(OffloadError::DuplicateDevice {
                device_id: device.id(),
            });
        }
        debug!("Registered device {}", device);
        self.device_index.insert(device.id(), self.devices.len());
        self.devices.push(device);
        Ok(())
    }

    /// Registers a node. Ids must be unique across both tiers, and at most
    /// one remote node may exist.
    pub fn register_node(&mut self, node: ComputeNode) -> OffloadResult<()> {
        if self.node(node.id()).is_some() {
            return Err(OffloadError::DuplicateNode { node_id: node.id() });
        }
        match node.kind() {
            NodeKind::Edge { .. } => {
                debug!("Registered edge node {}", node);
                self.edges.push(node);
            }
            NodeKind::Remote { .. } => {
                if let Some(existing) = &self.remote {
                    return Err(OffloadError::RemoteAlreadyRegistered {
                        existing: existing.id(),
                        rejected: node.id(),
                    });
                }
                debug!("Registered remote node {}", node);
                self.remote = Some(node);
            }
        }
        Ok(())
    }

    /// Mints a task from `spec` on behalf of `device_id` and places it
    /// immediately, at the current simulated time.
    ///
    /// The spec is validated before anything is minted; an invalid spec is
    /// an error, not a rejection.
    pub fn submit_task(
        &mut self,
        device_id: DeviceId,
        spec: TaskSpec,
    ) -> OffloadResult<PlacementResult> {
        spec.validate()?;
        let device_idx = *self
            .device_index
            .get(&device_id)
            .ok_or(OffloadError::UnknownDevice { device_id })?;

        let id = self.allocate_task_id();
        let now = self.clock.now_ms();
        let task = self.devices[device_idx].generate_task(id, spec, now);
        self.stats.tasks_generated += 1;

        Ok(self.place(device_idx, task))
    }

    /// Runs one Generate, Place, Advance, Report cycle and returns its
    /// report. The clock moves to the next cycle after the report is built.
    pub fn run_cycle(&mut self) -> CycleReport {
        let cycle = self.clock.current_cycle();
        let now = self.clock.now_ms();

        // Generate: every device draws before anything is placed.
        let mut to_place: Vec<(usize, Task)> = Vec::new();
        for device_idx in 0..self.devices.len() {
            let specs = self.generator.generate(&self.devices[device_idx], now);
            for spec in specs {
                let id = self.allocate_task_id();
                let task = self.devices[device_idx].generate_task(id, spec, now);
                to_place.push((device_idx, task));
            }
        }
        let generated = to_place.len() as u64;
        self.stats.tasks_generated += generated;

        // Place, in mint order.
        let mut placed = 0u64;
        let mut cycle_rejections = RejectionCounts::default();
        for (device_idx, task) in to_place {
            match self.place(device_idx, task) {
                PlacementResult::Assigned(_) => placed += 1,
                PlacementResult::Rejected(reason) => cycle_rejections.record(reason),
            }
        }

        // Advance: every node completes its whole pending list.
        let mut completed = 0u64;
        let mut latency_sum = 0.0;
        let mut latency_count = 0u64;
        for node in self.edges.iter_mut().chain(self.remote.as_mut()) {
            let tier = node.tier();
            let done = node.advance(now);
            completed += done.len() as u64;
            self.stats.completed_by_tier.record(tier, done.len() as u64);
            for task in &done {
                if let Some(latency) = task.latency_ms() {
                    latency_sum += latency;
                    latency_count += 1;
                    self.stats.latency_sum_ms += latency;
                    self.stats.latency_count += 1;
                }
            }
        }

        let mean_latency_ms = if latency_count == 0 {
            0.0
        } else {
            latency_sum / latency_count as f64
        };

        let report = CycleReport {
            cycle: cycle.value(),
            sim_time_ms: now,
            generated,
            placed,
            rejections: cycle_rejections,
            completed,
            mean_latency_ms,
        };

        info!(
            "Cycle {}: generated {}, placed {}, rejected {}, completed {}, mean latency {:.1} ms",
            cycle,
            generated,
            placed,
            cycle_rejections.total(),
            completed,
            mean_latency_ms
        );

        self.clock.advance();
        report
    }

    /// Runs `count` cycles and collects their reports.
    pub fn run(&mut self, count: u64) -> Vec<CycleReport> {
        let mut reports = Vec::with_capacity(count as usize);
        for _ in 0..count {
            reports.push(self.run_cycle());
        }
        reports
    }

    /// The cumulative view of the run so far.
    ///
    /// A pure read: calling this twice without running a cycle in between
    /// yields identical reports.
    pub fn summary(&self) -> AggregateReport {
        let nodes = self
            .edges
            .iter()
            .chain(self.remote.as_ref())
            .map(|node| NodeUtilization {
                node_id: node.id(),
                name: node.name().to_string(),
                tier: node.tier(),
                utilization_pct: node.utilization(),
                completed: node.completed_count() as u64,
            })
            .collect();

        AggregateReport {
            cycles_run: self.clock.current_cycle().value(),
            tasks_generated: self.stats.tasks_generated,
            completed_by_tier: self.stats.completed_by_tier,
            mean_latency_ms: self.stats.mean_latency_ms(),
            rejections: self.stats.rejections,
            nodes,
        }
    }

    /// Number of registered devices.
    pub fn device_count(&self) -> usize {
        self.devices.len()
    }

    /// Number of registered nodes across both tiers.
    pub fn node_count(&self) -> usize {
        self.edges.len() + usize::from(self.remote.is_some())
    }

    /// Looks up a device by id.
    pub fn device(&self, id: DeviceId) -> Option<&Device> {
        self.device_index.get(&id).map(|&idx| &self.devices[idx])
    }

    /// Looks up a node by id across both tiers.
    pub fn node(&self, id: NodeId) -> Option<&ComputeNode> {
        self.edges
            .iter()
            .chain(self.remote.as_ref())
            .find(|node| node.id() == id)
    }

    /// The edge tier, in registration order.
    pub fn edge_nodes(&self) -> &[ComputeNode] {
        &self.edges
    }

    /// The remote node, when registered.
    pub fn remote_node(&self) -> Option<&ComputeNode> {
        self.remote.as_ref()
    }

    /// The simulation clock.
    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    fn allocate_task_id(&mut self) -> TaskId {
        let id = TaskId::new(self.next_task_id);
        self.next_task_id += 1;
        id
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut ComputeNode> {
        self.edges
            .iter_mut()
            .chain(self.remote.as_mut())
            .find(|node| node.id() == id)
    }

    /// Places a minted task, updating the cumulative rejection counters.
    fn place(&mut self, device_idx: usize, task: Task) -> PlacementResult {
        let task_id = task.id();

        let (decision, report) = {
            let device = &self.devices[device_idx];
            policy::select_node(
                device,
                &task,
                &self.edges,
                self.remote.as_ref(),
                self.distance_model.as_ref(),
            )
        };

        let decision = match decision {
            Some(decision) => decision,
            None => {
                let reason = report.rejection_reason();
                debug!(
                    "Rejected {}: {}, {} candidate(s) passed over",
                    task_id,
                    reason,
                    report.total_passed_over()
                );
                self.stats.rejections.record(reason);
                return PlacementResult::Rejected(reason);
            }
        };

        let node = match self.node_mut(decision.node_id) {
            Some(node) => node,
            // Selection only names registered nodes.
            None => {
                self.stats.rejections.record(RejectReason::NoCoverage);
                return PlacementResult::Rejected(RejectReason::NoCoverage);
            }
        };

        match node.admit(task, decision.network_latency_ms) {
            Ok(()) => {
                debug!(
                    "Placed {} on {} [{}], estimated latency {:.1} ms",
                    task_id, decision.node_id, decision.tier, decision.network_latency_ms
                );
                PlacementResult::Assigned(decision.node_id)
            }
            Err(_) => {
                // Admission re-checked capacity and refused.
                self.stats.rejections.record(RejectReason::CapacityExceeded);
                PlacementResult::Rejected(RejectReason::CapacityExceeded)
            }
        }
    }
}
