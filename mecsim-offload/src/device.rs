//! Mobile devices: task sources pinned to a plane position.

use std::fmt;

use serde::Serialize;

use mecsim_common::types::Position;

use crate::task::{Task, TaskId, TaskSpec};

/// Unique device identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct DeviceId(u32);

impl DeviceId {
    /// Creates a device id.
    pub const fn new(id: u32) -> Self {
        DeviceId(id)
    }

    /// The raw id value.
    pub const fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "D-{}", self.0)
    }
}

/// A mobile device at a fixed position.
///
/// Devices do not decide placement. They mint tasks on request, stamping
/// the creation time and recording the id in their log, and leave tier
/// selection to the orchestrator. The log is diagnostic only: it tracks
/// what the device produced, not where the tasks went.
#[derive(Debug, Clone)]
pub struct Device {
    id: DeviceId,
    position: Position,
    task_log: Vec<TaskId>,
}

impl Device {
    /// Creates a device with an empty task log.
    pub fn new(id: DeviceId, position: Position) -> Self {
        Self {
            id,
            position,
            task_log: Vec::new(),
        }
    }

    /// Device identifier.
    pub fn id(&self) -> DeviceId {
        self.id
    }

    /// The device's fixed position.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Ids of every task this device has produced, oldest first.
    pub fn task_log(&self) -> &[TaskId] {
        &self.task_log
    }

    /// Mints a task from a spec, stamping `now_ms` as the creation time.
    ///
    /// Never fails: specs reach this point only after range or field
    /// validation has already passed.
    pub fn generate_task(&mut self, id: TaskId, spec: TaskSpec, now_ms: f64) -> Task {
        self.task_log.push(id);
        Task::new(id, self.id, spec, now_ms)
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.id, self.position)
    }
}
