//! Scenario loading and validation for the mecsim binary.
//!
//! Wraps the `ScenarioConfig` from `mecsim-common` with file loading and
//! structural validation. Value-level rules (positive capacities and
//! radii, usable workload ranges) stay with the domain constructors in
//! `mecsim-offload`; this module checks the things only the whole file
//! can tell you, like id uniqueness.
//!
//! # Example
//!
//! ```rust,ignore
//! let scenario = load_and_validate_scenario("config/example.yaml")?;
//! ```

use std::collections::HashSet;
use std::path::Path;

use thiserror::Error;
use tracing::debug;

use mecsim_common::config::ScenarioConfig;

/// Errors that can occur during scenario loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File I/O error
    #[error("failed to read scenario file: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing error
    #[error("failed to parse scenario: {0}")]
    ParseError(String),

    /// Scenario validation error
    #[error("scenario validation failed: {0}")]
    ValidationError(#[from] ConfigValidationError),
}

/// Errors that can occur during scenario validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    /// No devices configured
    #[error("no devices configured: at least one device is required")]
    NoDevices,

    /// No nodes configured
    #[error("no nodes configured: at least one edge or remote node is required")]
    NoNodes,

    /// Zero cycle duration
    #[error("clock.cycle_duration_ms must be at least 1")]
    ZeroCycleDuration,

    /// Zero total cycles
    #[error("clock.total_cycles must be at least 1")]
    ZeroTotalCycles,

    /// Duplicate device id
    #[error("duplicate device id {0}")]
    DuplicateDeviceId(u32),

    /// Duplicate node id
    #[error("duplicate node id {0}")]
    DuplicateNodeId(u32),
}

/// Loads a scenario from a YAML file without validating it.
pub fn load_scenario<P: AsRef<Path>>(path: P) -> Result<ScenarioConfig, ConfigError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)?;
    let scenario = load_scenario_from_str(&contents)?;
    debug!("Loaded scenario from {}", path.display());
    Ok(scenario)
}

/// Parses a scenario from a YAML string.
pub fn load_scenario_from_str(yaml: &str) -> Result<ScenarioConfig, ConfigError> {
    let scenario: ScenarioConfig =
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    Ok(scenario)
}

/// Validates the structure of a scenario.
///
/// # Validation Rules
///
/// - At least one device, and at least one node on either tier
/// - Cycle duration and total cycles both non-zero
/// - Device ids unique
/// - Node ids unique across the edge and remote tiers
pub fn validate_scenario(scenario: &ScenarioConfig) -> Result<(), ConfigValidationError> {
    if scenario.devices.is_empty() {
        return Err(ConfigValidationError::NoDevices);
    }
    if scenario.edge_nodes.is_empty() && scenario.remote_node.is_none() {
        return Err(ConfigValidationError::NoNodes);
    }
    if scenario.clock.cycle_duration_ms == 0 {
        return Err(ConfigValidationError::ZeroCycleDuration);
    }
    if scenario.clock.total_cycles == 0 {
        return Err(ConfigValidationError::ZeroTotalCycles);
    }

    let mut device_ids = HashSet::new();
    for device in &scenario.devices {
        if !device_ids.insert(device.id) {
            return Err(ConfigValidationError::DuplicateDeviceId(device.id));
        }
    }

    let mut node_ids = HashSet::new();
    for edge in &scenario.edge_nodes {
        if !node_ids.insert(edge.id) {
            return Err(ConfigValidationError::DuplicateNodeId(edge.id));
        }
    }
    if let Some(remote) = &scenario.remote_node {
        if !node_ids.insert(remote.id) {
            return Err(ConfigValidationError::DuplicateNodeId(remote.id));
        }
    }

    Ok(())
}

/// Loads and validates a scenario in one step.
pub fn load_and_validate_scenario<P: AsRef<Path>>(path: P) -> Result<ScenarioConfig, ConfigError> {
    let scenario = load_scenario(path)?;
    validate_scenario(&scenario)?;
    Ok(scenario)
}
