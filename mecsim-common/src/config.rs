//! Scenario configuration structures.
//!
//! Plain serde structs describing a simulation scenario. File loading and
//! structural validation live with the CLI's config loader; value-level
//! rules (positive capacities, radii, usable ranges) are enforced by the
//! domain constructors in `mecsim-offload`, so nothing here clamps.

use serde::{Deserialize, Serialize};

use crate::clock::ClockConfig;
use crate::types::{Position, TaskCategory};

/// Inclusive numeric range a workload draw samples from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    /// Lower bound, inclusive.
    pub min: f64,
    /// Upper bound, inclusive.
    pub max: f64,
}

impl ValueRange {
    /// Creates a range.
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// True when `v` lies within the range.
    pub fn contains(&self, v: f64) -> bool {
        v >= self.min && v <= self.max
    }

    /// True when the range satisfies `0 < min <= max` with finite bounds.
    pub fn is_usable(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min > 0.0 && self.min <= self.max
    }
}

/// Per-category draw ranges for generated tasks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryProfile {
    /// The category this profile describes.
    pub category: TaskCategory,
    /// Payload size range, in megabytes.
    pub payload_mb: ValueRange,
    /// Processing demand range, in gigacycles.
    pub demand_ghz: ValueRange,
    /// Latency budget range, in milliseconds.
    pub latency_budget_ms: ValueRange,
}

impl CategoryProfile {
    /// Stock profile for `category`. Latency-critical categories get tight
    /// budgets, telemetry gets loose ones.
    pub const fn stock(category: TaskCategory) -> Self {
        match category {
            TaskCategory::InteractiveVideo => Self {
                category,
                payload_mb: ValueRange::new(5.0, 25.0),
                demand_ghz: ValueRange::new(0.8, 2.5),
                latency_budget_ms: ValueRange::new(60.0, 120.0),
            },
            TaskCategory::ImmersiveReality => Self {
                category,
                payload_mb: ValueRange::new(2.0, 10.0),
                demand_ghz: ValueRange::new(1.5, 4.0),
                latency_budget_ms: ValueRange::new(10.0, 25.0),
            },
            TaskCategory::SensorTelemetry => Self {
                category,
                payload_mb: ValueRange::new(0.05, 0.5),
                demand_ghz: ValueRange::new(0.1, 0.6),
                latency_budget_ms: ValueRange::new(150.0, 500.0),
            },
            TaskCategory::VehicleControl => Self {
                category,
                payload_mb: ValueRange::new(0.2, 1.5),
                demand_ghz: ValueRange::new(0.5, 2.0),
                latency_budget_ms: ValueRange::new(5.0, 15.0),
            },
        }
    }
}

/// Workload generation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkloadConfig {
    /// Probability that a device produces a task in a given cycle.
    #[serde(default = "default_arrival_probability")]
    pub arrival_probability: f64,
    /// Draw ranges per category. All four stock profiles by default.
    #[serde(default = "default_category_profiles")]
    pub categories: Vec<CategoryProfile>,
}

fn default_arrival_probability() -> f64 {
    0.6
}

fn default_category_profiles() -> Vec<CategoryProfile> {
    TaskCategory::all().into_iter().map(CategoryProfile::stock).collect()
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            arrival_probability: default_arrival_probability(),
            categories: default_category_profiles(),
        }
    }
}

/// A mobile device definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Device identifier, unique within the scenario.
    pub id: u32,
    /// Fixed position on the plane.
    pub position: Position,
}

/// An edge node definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeNodeConfig {
    /// Node identifier, unique across both tiers.
    pub id: u32,
    /// Human-readable name; `edge-<id>` when left empty.
    #[serde(default)]
    pub name: String,
    /// Fixed position on the plane.
    pub position: Position,
    /// Coverage radius, in plane units.
    pub coverage_radius: f64,
    /// Processing capacity, in GHz.
    pub capacity_ghz: f64,
}

/// The remote datacenter definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteNodeConfig {
    /// Node identifier, unique across both tiers.
    pub id: u32,
    /// Human-readable name; `remote-<id>` when left empty.
    #[serde(default)]
    pub name: String,
    /// Fixed access latency from anywhere on the plane, in milliseconds.
    pub access_latency_ms: f64,
    /// Processing capacity, in GHz.
    pub capacity_ghz: f64,
}

/// Top-level scenario configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    /// Clock settings.
    #[serde(default)]
    pub clock: ClockConfig,
    /// Seed for the task generator's RNG.
    #[serde(default)]
    pub seed: u64,
    /// Devices in the scenario.
    pub devices: Vec<DeviceConfig>,
    /// Edge tier nodes.
    #[serde(default)]
    pub edge_nodes: Vec<EdgeNodeConfig>,
    /// Optional remote tier node.
    #[serde(default)]
    pub remote_node: Option<RemoteNodeConfig>,
    /// Task generation settings.
    #[serde(default)]
    pub workload: WorkloadConfig,
}
