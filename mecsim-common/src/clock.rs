//! Logical simulation clock.
//!
//! Time in mecsim is purely simulated: the clock counts cycles and derives
//! milliseconds from the configured cycle duration. Task timestamps and all
//! latency figures come from these stamps, never from wall-clock time.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Monotonically increasing cycle counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cycle(u64);

impl Cycle {
    /// Creates a cycle counter at `value`.
    pub const fn new(value: u64) -> Self {
        Cycle(value)
    }

    /// The first cycle of a run.
    pub const fn initial() -> Self {
        Cycle(0)
    }

    /// The raw counter value.
    pub const fn value(&self) -> u64 {
        self.0
    }

    /// The cycle after this one.
    #[must_use]
    pub const fn next(&self) -> Self {
        Cycle(self.0 + 1)
    }

    /// Advances this counter by one cycle.
    pub fn advance(&mut self) {
        self.0 += 1;
    }

    /// True for the first cycle of a run.
    pub const fn is_initial(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Cycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Clock configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockConfig {
    /// Simulated duration of one cycle, in milliseconds.
    #[serde(default = "default_cycle_duration_ms")]
    pub cycle_duration_ms: u64,
    /// Number of cycles a full run executes unless overridden.
    #[serde(default = "default_total_cycles")]
    pub total_cycles: u64,
}

fn default_cycle_duration_ms() -> u64 {
    100
}

fn default_total_cycles() -> u64 {
    60
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            cycle_duration_ms: default_cycle_duration_ms(),
            total_cycles: default_total_cycles(),
        }
    }
}

impl ClockConfig {
    /// Simulated time at the start of `cycle`, in milliseconds.
    pub fn time_at(&self, cycle: Cycle) -> f64 {
        cycle.value() as f64 * self.cycle_duration_ms as f64
    }
}

/// The clock driving the Generate, Place, Advance, Report loop.
#[derive(Debug, Clone)]
pub struct SimClock {
    config: ClockConfig,
    current: Cycle,
}

impl SimClock {
    /// Creates a clock at the initial cycle.
    pub fn new(config: ClockConfig) -> Self {
        Self {
            config,
            current: Cycle::initial(),
        }
    }

    /// The cycle currently executing.
    pub fn current_cycle(&self) -> Cycle {
        self.current
    }

    /// Simulated time at the start of the current cycle, in milliseconds.
    pub fn now_ms(&self) -> f64 {
        self.config.time_at(self.current)
    }

    /// Moves to the next cycle and returns it.
    pub fn advance(&mut self) -> Cycle {
        self.current.advance();
        self.current
    }

    /// True once the configured number of cycles has run.
    pub fn is_complete(&self) -> bool {
        self.current.value() >= self.config.total_cycles
    }

    /// The clock's configuration.
    pub fn config(&self) -> &ClockConfig {
        &self.config
    }

    /// Rewinds to the initial cycle.
    pub fn reset(&mut self) {
        self.current = Cycle::initial();
    }
}
