//! Tiered task-offloading simulation engine.
//!
//! This crate models mobile devices offloading compute tasks onto a
//! two-tier topology: coverage-limited edge nodes close to the devices,
//! with an optional remote datacenter as the fallback.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                           Orchestrator                           │
//! │                                                                  │
//! │  Devices ──generate──▶ Tasks ──select_node──▶ Placement          │
//! │                                     │                            │
//! │              ┌──────────────────────┴───────────────┐            │
//! │              ▼                                      ▼            │
//! │  ┌───────────────────────┐            ┌───────────────────────┐  │
//! │  │       Edge tier       │  fallback  │      Remote tier      │  │
//! │  │  coverage radius,     │ ─────────▶ │  fixed access         │  │
//! │  │  distance = latency   │            │  latency, covers all  │  │
//! │  └───────────────────────┘            └───────────────────────┘  │
//! │              │                                      │            │
//! │              └──────────── advance ─────────────────┘            │
//! │                               │                                  │
//! │                     CycleReport / AggregateReport                │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Placement Model
//!
//! | Tier   | Reachability               | Estimated latency            |
//! |--------|----------------------------|------------------------------|
//! | Edge   | within coverage radius     | `max(1.0, distance)` ms      |
//! | Remote | always                     | fixed access latency         |
//!
//! Eligible edge nodes are compared on estimated latency, ties breaking
//! toward the smallest node id. The remote node is tried only when no
//! edge node qualifies. Tasks that still fit nowhere are rejected with a
//! typed reason.
//!
//! # Example Usage
//!
//! ```ignore
//! use mecsim_offload::{ComputeNode, Device, DeviceId, NodeId, Orchestrator};
//!
//! let mut orchestrator = Orchestrator::from_scenario(&scenario)?;
//! let reports = orchestrator.run(scenario.clock.total_cycles);
//! println!("{}", orchestrator.summary());
//! ```

#![warn(missing_docs)]

pub mod device;
pub mod error;
pub mod generator;
pub mod messages;
pub mod node;
pub mod orchestrator;
pub mod policy;
pub mod report;
pub mod service;
pub mod task;

// Re-export main types
pub use device::{Device, DeviceId};
pub use error::{OffloadError, OffloadResult};
pub use generator::{RandomTaskGenerator, TaskGenerator};
pub use messages::{OrchestratorMessage, OrchestratorResponse};
pub use node::{ComputeNode, NodeId, NodeKind, NodeTier};
pub use orchestrator::Orchestrator;
pub use policy::{
    DistanceModel, EligibilityReport, EuclideanDistance, PlacementDecision, PlacementResult,
    RejectReason, MIN_EDGE_LATENCY_MS,
};
pub use report::{AggregateReport, CycleReport, NodeUtilization, RejectionCounts, TierCounts};
pub use service::{OrchestratorService, DEFAULT_CHANNEL_CAPACITY};
pub use task::{Task, TaskId, TaskSpec};
