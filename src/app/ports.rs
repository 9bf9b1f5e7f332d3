//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ FanController (domain)
//! ```
//!
//! Driven adapters (buttons, fan, tachometer, display, event sinks)
//! implement these traits.  The [`FanController`](super::service::FanController)
//! consumes them via generics, so the domain core never touches hardware
//! directly.  Ports are infallible: adapters log their own I/O failures and
//! degrade (a failed read is "not pressed", a failed write is retried on the
//! next refresh).

use crate::input::ButtonLevels;
use crate::scheduler::TaskId;

use super::events::AppEvent;
use super::output::{DisplayFrame, FanCommand};

// ───────────────────────────────────────────────────────────────
// Button input port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: one sample of every button line per control tick.
pub trait ButtonInputPort {
    /// Current levels, `true` = pressed (polarity already applied).
    fn read_levels(&mut self) -> ButtonLevels;
}

// ───────────────────────────────────────────────────────────────
// Fan output port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain pushes the full fan command on every
/// fan-refresh period.  Applying the same command twice must be harmless.
pub trait FanOutputPort {
    fn apply(&mut self, command: FanCommand);
}

// ───────────────────────────────────────────────────────────────
// Tachometer port (driven adapter: hardware → display only)
// ───────────────────────────────────────────────────────────────

/// Fan speed feedback.  Never consulted by the control logic.
pub trait TachometerPort {
    /// Measured fan speed, or `None` when unavailable.
    fn rpm(&mut self) -> Option<u32>;
}

// ───────────────────────────────────────────────────────────────
// Display port (driven adapter: domain → front panel)
// ───────────────────────────────────────────────────────────────

pub trait DisplayPort {
    fn render(&mut self, frame: &DisplayFrame);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`]s through this port.  Adapters
/// decide where they go (serial log, test recorder, ...).
pub trait EventSink {
    fn emit(&mut self, event: &AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Task delegate (decouples scheduler from the refresh work)
// ───────────────────────────────────────────────────────────────

/// Callback trait that the [`Scheduler`](crate::scheduler::Scheduler)
/// invokes when a time gate opens.  The scheduler knows nothing about
/// fans or displays; the controller implements this to run the task.
pub trait TaskDelegate {
    fn run_task(&mut self, task: TaskId, now_ms: u32);
}
