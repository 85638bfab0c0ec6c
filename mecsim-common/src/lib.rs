//! Shared infrastructure for the mecsim workspace.
//!
//! This crate holds everything the domain crates and the CLI have in
//! common:
//!
//! - [`types`] - positions on the simulation plane and task categories
//! - [`clock`] - the logical cycle clock and its configuration
//! - [`config`] - serde structures describing a scenario
//! - [`error`] - infrastructure error types
//! - [`logging`] - tracing subscriber setup

#![warn(missing_docs)]

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;
pub mod types;

pub use clock::{ClockConfig, Cycle, SimClock};
pub use config::{
    CategoryProfile, DeviceConfig, EdgeNodeConfig, RemoteNodeConfig, ScenarioConfig, ValueRange,
    WorkloadConfig,
};
pub use error::{Error, Result};
pub use logging::{init_logging, init_logging_with_filter, LogLevel};
pub use types::{Position, TaskCategory};
