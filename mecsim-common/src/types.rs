//! Shared primitive types for the mecsim workspace.
//!
//! These are the vocabulary types every crate speaks: positions on the
//! simulation plane and the closed set of task categories devices can
//! produce.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A fixed position on the 2-D simulation plane.
///
/// Coordinates are abstract plane units. The straight-line distance between
/// a device and an edge node doubles as the base for the estimated network
/// latency during placement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Position {
    /// Origin of the plane.
    pub const ORIGIN: Position = Position::new(0.0, 0.0);

    /// Creates a position.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`, in plane units.
    pub fn distance_to(&self, other: &Position) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

/// Category of offloadable work a device can produce.
///
/// The set is closed: every task belongs to exactly one category, and the
/// workload configuration carries one numeric profile per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskCategory {
    /// Streaming and transcoding; moderate payloads, relaxed budgets.
    InteractiveVideo,
    /// AR/VR rendering; latency-critical.
    ImmersiveReality,
    /// Periodic sensor readings; tiny payloads, loose budgets.
    SensorTelemetry,
    /// Driving-assistance decisions; the strictest budgets.
    VehicleControl,
}

impl TaskCategory {
    /// All categories, in a stable order.
    pub const fn all() -> [TaskCategory; 4] {
        [
            TaskCategory::InteractiveVideo,
            TaskCategory::ImmersiveReality,
            TaskCategory::SensorTelemetry,
            TaskCategory::VehicleControl,
        ]
    }
}

impl fmt::Display for TaskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TaskCategory::InteractiveVideo => "interactive-video",
            TaskCategory::ImmersiveReality => "immersive-reality",
            TaskCategory::SensorTelemetry => "sensor-telemetry",
            TaskCategory::VehicleControl => "vehicle-control",
        };
        write!(f, "{s}")
    }
}
