//! Cooperative run-to-completion scheduler for the time-gated tasks.
//!
//! Input processing and the FSM run on every control tick and are driven
//! directly by the [`FanController`](crate::app::service::FanController).
//! The slower refresh work (fan output, display) is gated here.  When a gate
//! opens the scheduler calls the [`TaskDelegate`] with the task identity, so
//! the scheduler itself knows nothing about fans or displays.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  control tick (every loop iteration)                         │
//! │                                                              │
//! │   input ──▶ FSM ──▶ Scheduler.tick(now)                      │
//! │                        │                                     │
//! │          ┌─────────────┴──────────────┐                      │
//! │          ▼                            ▼                      │
//! │   FanOutput gate               Display gate                  │
//! │   (now - last >= 100 ms)       (now - last >= 250 ms)        │
//! │          │                            │                      │
//! │          └──────────▶ TaskDelegate ◀──┘                      │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! A late tick makes a task run late; missed periods are never caught up.

use crate::app::ports::TaskDelegate;
use crate::config::SystemConfig;
use log::info;

// ═══════════════════════════════════════════════════════════════
//  Task identity
// ═══════════════════════════════════════════════════════════════

/// The gated tasks, in the order they run within a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TaskId {
    FanOutput = 0,
    Display = 1,
}

impl TaskId {
    pub const COUNT: usize = 2;

    pub const ALL: [Self; Self::COUNT] = [Self::FanOutput, Self::Display];

    pub const fn name(self) -> &'static str {
        match self {
            Self::FanOutput => "fan-output",
            Self::Display => "display",
        }
    }
}

// ═══════════════════════════════════════════════════════════════
//  Gate bookkeeping
// ═══════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy)]
struct Gate {
    interval_ms: u32,
    /// `None` until the first run, so every task runs on the first tick.
    last_run_ms: Option<u32>,
    runs: u32,
}

impl Gate {
    const fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms,
            last_run_ms: None,
            runs: 0,
        }
    }

    fn is_due(&self, now_ms: u32) -> bool {
        match self.last_run_ms {
            None => true,
            Some(last) => now_ms.wrapping_sub(last) >= self.interval_ms,
        }
    }
}

// ═══════════════════════════════════════════════════════════════
//  Scheduler engine
// ═══════════════════════════════════════════════════════════════

/// Time-gate scheduler for the periodic refresh tasks.
pub struct Scheduler {
    gates: [Gate; TaskId::COUNT],
}

impl Scheduler {
    pub fn new(config: &SystemConfig) -> Self {
        info!(
            "Scheduler: fan every {} ms, display every {} ms",
            config.fan_refresh_ms, config.display_refresh_ms
        );
        Self {
            gates: [
                Gate::new(config.fan_refresh_ms),
                Gate::new(config.display_refresh_ms),
            ],
        }
    }

    /// Open every gate whose interval has elapsed, in [`TaskId::ALL`] order.
    /// Returns the number of tasks run.
    pub fn tick(&mut self, now_ms: u32, delegate: &mut dyn TaskDelegate) -> usize {
        let mut ran = 0;
        for task in TaskId::ALL {
            let gate = &mut self.gates[task as usize];
            if !gate.is_due(now_ms) {
                continue;
            }
            gate.last_run_ms = Some(now_ms);
            gate.runs = gate.runs.wrapping_add(1);
            delegate.run_task(task, now_ms);
            ran += 1;
        }
        ran
    }

    /// How many times `task` has run.
    pub fn run_count(&self, task: TaskId) -> u32 {
        self.gates[task as usize].runs
    }

    /// When `task` last ran, if ever.
    pub fn last_run_ms(&self, task: TaskId) -> Option<u32> {
        self.gates[task as usize].last_run_ms
    }

    pub fn interval_ms(&self, task: TaskId) -> u32 {
        self.gates[task as usize].interval_ms
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
