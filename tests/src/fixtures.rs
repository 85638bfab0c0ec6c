//! Test fixtures and scenario builders
//!
//! Provides pre-configured simulation scenarios for integration tests.
//! Every fixture passes the CLI's scenario validation and carries a fixed
//! seed, so runs built from the same fixture are reproducible.

use mecsim_common::{
    ClockConfig, DeviceConfig, EdgeNodeConfig, Position, RemoteNodeConfig, ScenarioConfig,
    WorkloadConfig,
};

/// The full topology: three devices, two edge nodes, one remote datacenter.
///
/// Each device sits inside at least one edge node's coverage and both edge
/// nodes have capacity to spare, so placements land on the edge tier unless
/// a draw's budget is unusually tight.
pub fn three_tier_scenario() -> ScenarioConfig {
    ScenarioConfig {
        clock: ClockConfig {
            cycle_duration_ms: 100,
            total_cycles: 20,
        },
        seed: 42,
        devices: vec![
            DeviceConfig {
                id: 1,
                position: Position::new(0.0, 0.0),
            },
            DeviceConfig {
                id: 2,
                position: Position::new(12.0, 5.0),
            },
            DeviceConfig {
                id: 3,
                position: Position::new(-8.0, 3.0),
            },
        ],
        edge_nodes: vec![
            EdgeNodeConfig {
                id: 10,
                name: "edge-west".to_string(),
                position: Position::new(-5.0, 0.0),
                coverage_radius: 15.0,
                capacity_ghz: 12.0,
            },
            EdgeNodeConfig {
                id: 11,
                name: "edge-east".to_string(),
                position: Position::new(10.0, 4.0),
                coverage_radius: 15.0,
                capacity_ghz: 16.0,
            },
        ],
        remote_node: Some(RemoteNodeConfig {
            id: 99,
            name: "datacenter".to_string(),
            access_latency_ms: 40.0,
            capacity_ghz: 128.0,
        }),
        workload: WorkloadConfig::default(),
    }
}

/// Two devices covered by a single edge node and no remote tier.
///
/// With nowhere to fall back to, anything the edge node cannot take is
/// rejected outright.
pub fn edge_only_scenario() -> ScenarioConfig {
    ScenarioConfig {
        clock: ClockConfig {
            cycle_duration_ms: 100,
            total_cycles: 20,
        },
        seed: 7,
        devices: vec![
            DeviceConfig {
                id: 1,
                position: Position::new(0.0, 0.0),
            },
            DeviceConfig {
                id: 2,
                position: Position::new(4.0, 3.0),
            },
        ],
        edge_nodes: vec![EdgeNodeConfig {
            id: 10,
            name: "lone-edge".to_string(),
            position: Position::new(2.0, 1.0),
            coverage_radius: 10.0,
            capacity_ghz: 12.0,
        }],
        remote_node: None,
        workload: WorkloadConfig::default(),
    }
}

/// An undersized edge node backed by a large remote datacenter.
///
/// Every device produces a task every cycle, so the edge node saturates
/// within the first cycle and the overflow spills to the remote tier. Used
/// to exercise capacity accounting under sustained pressure.
pub fn tight_capacity_scenario() -> ScenarioConfig {
    ScenarioConfig {
        clock: ClockConfig {
            cycle_duration_ms: 100,
            total_cycles: 20,
        },
        seed: 1234,
        devices: vec![
            DeviceConfig {
                id: 1,
                position: Position::new(0.0, 0.0),
            },
            DeviceConfig {
                id: 2,
                position: Position::new(1.0, 1.0),
            },
            DeviceConfig {
                id: 3,
                position: Position::new(-1.0, 2.0),
            },
            DeviceConfig {
                id: 4,
                position: Position::new(2.0, -1.0),
            },
        ],
        edge_nodes: vec![EdgeNodeConfig {
            id: 10,
            name: "small-edge".to_string(),
            position: Position::new(0.0, 0.0),
            coverage_radius: 10.0,
            capacity_ghz: 2.0,
        }],
        remote_node: Some(RemoteNodeConfig {
            id: 99,
            name: "datacenter".to_string(),
            access_latency_ms: 40.0,
            capacity_ghz: 256.0,
        }),
        workload: WorkloadConfig {
            arrival_probability: 1.0,
            ..WorkloadConfig::default()
        },
    }
}

/// A device stranded outside the only edge node's coverage, with no remote.
///
/// Every task the device produces is rejected for lack of coverage.
pub fn uncovered_device_scenario() -> ScenarioConfig {
    ScenarioConfig {
        clock: ClockConfig {
            cycle_duration_ms: 100,
            total_cycles: 10,
        },
        seed: 9,
        devices: vec![DeviceConfig {
            id: 1,
            position: Position::new(100.0, 100.0),
        }],
        edge_nodes: vec![EdgeNodeConfig {
            id: 10,
            name: "far-edge".to_string(),
            position: Position::new(0.0, 0.0),
            coverage_radius: 5.0,
            capacity_ghz: 8.0,
        }],
        remote_node: None,
        workload: WorkloadConfig {
            arrival_probability: 1.0,
            ..WorkloadConfig::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_tier_topology() {
        let scenario = three_tier_scenario();
        assert_eq!(scenario.devices.len(), 3);
        assert_eq!(scenario.edge_nodes.len(), 2);
        assert!(scenario.remote_node.is_some());
    }

    #[test]
    fn test_devices_are_covered() {
        let scenario = three_tier_scenario();
        for device in &scenario.devices {
            let covered = scenario.edge_nodes.iter().any(|edge| {
                device.position.distance_to(&edge.position) <= edge.coverage_radius
            });
            assert!(covered, "device {} has no edge coverage", device.id);
        }
    }

    #[test]
    fn test_uncovered_device_is_out_of_range() {
        let scenario = uncovered_device_scenario();
        let device = &scenario.devices[0];
        let edge = &scenario.edge_nodes[0];
        assert!(device.position.distance_to(&edge.position) > edge.coverage_radius);
        assert!(scenario.remote_node.is_none());
    }

    #[test]
    fn test_tight_capacity_generates_every_cycle() {
        let scenario = tight_capacity_scenario();
        assert_eq!(scenario.workload.arrival_probability, 1.0);
        assert!(scenario.edge_nodes[0].capacity_ghz < scenario.remote_node.unwrap().capacity_ghz);
    }
}
