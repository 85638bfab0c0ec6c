//! Integration test framework for mecsim
#![allow(missing_docs)]
//!
//! Shared fixtures and utilities for the integration scenarios under
//! `tests/`.
//!
//! # Components
//!
//! - [`fixtures`] - Ready-made scenario configurations and builders
//! - [`test_utils`] - Logging setup and timing helpers

pub mod fixtures;

pub use fixtures::{
    edge_only_scenario, three_tier_scenario, tight_capacity_scenario, uncovered_device_scenario,
};
pub use test_utils::{init_test_logging, TestResult, DEFAULT_TEST_TIMEOUT};
