//! Task generation: the per-cycle arrival process.
//!
//! The orchestrator invokes a [`TaskGenerator`] once per device per cycle;
//! the generator decides how many tasks arrive and what they look like.
//! Ids, creation stamps, and placement stay with the orchestrator and the
//! devices.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use mecsim_common::config::{CategoryProfile, ValueRange, WorkloadConfig};
use mecsim_common::types::TaskCategory;

use crate::device::Device;
use crate::error::{OffloadError, OffloadResult};
use crate::task::TaskSpec;

/// Produces task specs for a device, once per cycle.
///
/// Implementations must only emit specs that pass
/// [`TaskSpec::validate`]; the built-in generator guarantees this by
/// validating its ranges up front.
pub trait TaskGenerator: Send {
    /// Specs for tasks arriving at `device` during the cycle starting at
    /// `now_ms`. May be empty.
    fn generate(&mut self, device: &Device, now_ms: f64) -> Vec<TaskSpec>;
}

/// Default generator: Bernoulli arrivals, a uniform category pick, and
/// uniform in-range value draws, all from one seeded RNG.
///
/// Determinism: the same seed, topology, and call sequence reproduce the
/// same stream of specs.
pub struct RandomTaskGenerator {
    rng: StdRng,
    arrival_probability: f64,
    profiles: Vec<CategoryProfile>,
}

impl RandomTaskGenerator {
    /// Builds a generator from workload configuration, validating every
    /// range up front so a draw can never produce an invalid spec.
    pub fn new(config: &WorkloadConfig, seed: u64) -> OffloadResult<Self> {
        if !(0.0..=1.0).contains(&config.arrival_probability) {
            return Err(OffloadError::InvalidArrivalProbability {
                value: config.arrival_probability,
            });
        }
        if config.categories.is_empty() {
            return Err(OffloadError::Config(
                "workload configuration lists no categories".to_string(),
            ));
        }
        for profile in &config.categories {
            validate_profile(profile)?;
        }
        Ok(Self {
            rng: StdRng::seed_from_u64(seed),
            arrival_probability: config.arrival_probability,
            profiles: config.categories.clone(),
        })
    }

    fn draw_in(&mut self, range: ValueRange) -> f64 {
        self.rng.gen_range(range.min..=range.max)
    }
}

impl TaskGenerator for RandomTaskGenerator {
    fn generate(&mut self, _device: &Device, _now_ms: f64) -> Vec<TaskSpec> {
        if !self.rng.gen_bool(self.arrival_probability) {
            return Vec::new();
        }
        let profile = self.profiles[self.rng.gen_range(0..self.profiles.len())];
        vec![TaskSpec::new(
            profile.category,
            self.draw_in(profile.payload_mb),
            self.draw_in(profile.demand_ghz),
            self.draw_in(profile.latency_budget_ms),
        )]
    }
}

fn validate_profile(profile: &CategoryProfile) -> OffloadResult<()> {
    check_range(profile.category, "payload_mb", profile.payload_mb)?;
    check_range(profile.category, "demand_ghz", profile.demand_ghz)?;
    check_range(profile.category, "latency_budget_ms", profile.latency_budget_ms)?;
    Ok(())
}

fn check_range(category: TaskCategory, field: &str, range: ValueRange) -> OffloadResult<()> {
    if !range.is_usable() {
        return Err(OffloadError::InvalidWorkloadProfile {
            category,
            reason: format!(
                "{field} range [{}, {}] must satisfy 0 < min <= max",
                range.min, range.max
            ),
        });
    }
    Ok(())
}
