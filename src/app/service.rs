//! Application service — the hexagonal core.
//!
//! [`FanController`] owns the button bank, FSM, shared context and
//! scheduler.  It exposes a clean, hardware-agnostic API.  All I/O flows
//! through port traits injected at call sites, making the entire service
//! testable with mock adapters.
//!
//! ```text
//!  ButtonInputPort ──▶ ┌─────────────────────────────┐ ──▶ EventSink
//!                      │        FanController        │
//!    FanOutputPort ◀── │  buttons · FSM · scheduler  │ ──▶ DisplayPort
//!   TachometerPort ──▶ └─────────────────────────────┘
//! ```
//!
//! One [`tick`](FanController::tick) runs input → FSM → gated tasks, in
//! that order, to completion.

use log::{info, warn};

use crate::config::SystemConfig;
use crate::fsm::context::{FsmContext, SpeedLevel};
use crate::fsm::states::build_state_table;
use crate::fsm::{Fsm, PowerState};
use crate::input::ButtonBank;
use crate::scheduler::{Scheduler, TaskId};

use super::events::AppEvent;
use super::output::{self, DisplayFrame, FanCommand};
use super::ports::{ButtonInputPort, DisplayPort, EventSink, FanOutputPort, TachometerPort, TaskDelegate};

// ───────────────────────────────────────────────────────────────
// Status snapshot
// ───────────────────────────────────────────────────────────────

/// A point-in-time view of the controller, suitable for logging or tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FanStatus {
    pub state: PowerState,
    pub speed: SpeedLevel,
    pub saved_speed: SpeedLevel,
    /// Command the fan is (or will be, at the next refresh) driven with.
    pub command: FanCommand,
    /// Time left on the turbo prompt, while it is shown.
    pub turbo_prompt_remaining_ms: Option<u32>,
    pub tick_count: u64,
}

// ───────────────────────────────────────────────────────────────
// FanController
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct FanController {
    fsm: Fsm,
    ctx: FsmContext,
    buttons: ButtonBank,
    scheduler: Scheduler,
    tick_count: u64,
    last_command: Option<FanCommand>,
    last_frame: Option<DisplayFrame>,
}

impl FanController {
    /// Construct the controller from configuration.
    ///
    /// Does **not** start the FSM — call [`start`](Self::start) next.
    pub fn new(config: SystemConfig) -> Self {
        let buttons = ButtonBank::new(&config);
        let scheduler = Scheduler::new(&config);
        let ctx = FsmContext::new(config);
        let fsm = Fsm::new(build_state_table(), PowerState::Off);

        Self {
            fsm,
            ctx,
            buttons,
            scheduler,
            tick_count: 0,
            last_command: None,
            last_frame: None,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Start the FSM in its initial state (Off).
    pub fn start(&mut self, sink: &mut impl EventSink) {
        self.fsm.start(&mut self.ctx);
        sink.emit(&AppEvent::Started(self.fsm.current_state()));
        info!("FanController started in {:?}", self.fsm.current_state());
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one control tick at `now_ms`: sample buttons → resolve gestures →
    /// FSM → time-gated fan and display refresh.
    ///
    /// The `hw` parameter satisfies every hardware port at once, which
    /// avoids a double mutable borrow while keeping the port boundary
    /// explicit.
    pub fn tick(
        &mut self,
        now_ms: u32,
        hw: &mut (impl ButtonInputPort + FanOutputPort + TachometerPort),
        display: &mut impl DisplayPort,
        sink: &mut impl EventSink,
    ) {
        self.tick_count += 1;
        self.ctx.now_ms = now_ms;
        let prev_state = self.fsm.current_state();
        let prev_speed = self.ctx.speed;

        // 1. Input: sample, debounce, resolve
        let levels = hw.read_levels();
        for event in self.buttons.update(levels, now_ms) {
            sink.emit(&AppEvent::Input(event));
            if !self.ctx.push_event(event) {
                warn!("Input inbox full, dropping {:?}", event);
            }
        }

        // 2. FSM tick (pure state logic)
        self.fsm.tick(&mut self.ctx);

        // 3. Emit what changed
        let state = self.fsm.current_state();
        if state != prev_state {
            sink.emit(&AppEvent::StateChanged {
                from: prev_state,
                to: state,
            });
            if state == PowerState::TurboRequested {
                sink.emit(&AppEvent::TurboPrompt(true));
            } else if prev_state == PowerState::TurboRequested {
                sink.emit(&AppEvent::TurboPrompt(false));
            }
        }
        if self.ctx.speed != prev_speed {
            sink.emit(&AppEvent::SpeedChanged {
                from: prev_speed,
                to: self.ctx.speed,
            });
        }

        // 4. Gated refresh tasks
        let mut dispatch = TaskDispatch {
            ctx: &mut self.ctx,
            state,
            hw,
            display,
            last_command: &mut self.last_command,
            last_frame: &mut self.last_frame,
        };
        self.scheduler.tick(now_ms, &mut dispatch);
    }

    // ── Queries ───────────────────────────────────────────────

    /// Current FSM state.
    pub fn power_state(&self) -> PowerState {
        self.fsm.current_state()
    }

    /// Current fan speed level.
    pub fn speed(&self) -> SpeedLevel {
        self.ctx.speed
    }

    /// Speed the next power-on restores.
    pub fn saved_speed(&self) -> SpeedLevel {
        self.ctx.saved_speed
    }

    /// Total control ticks executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Last command pushed to the fan, if any refresh has run yet.
    pub fn last_command(&self) -> Option<FanCommand> {
        self.last_command
    }

    /// Last frame rendered, if any refresh has run yet.
    pub fn last_frame(&self) -> Option<DisplayFrame> {
        self.last_frame
    }

    /// The live configuration.
    pub fn config(&self) -> &SystemConfig {
        &self.ctx.config
    }

    /// The gated-task scheduler, for run counts.
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Build a status snapshot from the current context.
    pub fn status(&self) -> FanStatus {
        let state = self.fsm.current_state();
        let turbo_prompt_remaining_ms = (state == PowerState::TurboRequested).then(|| {
            self.ctx
                .config
                .turbo_prompt_ms
                .saturating_sub(self.ctx.turbo_prompt_elapsed())
        });
        FanStatus {
            state,
            speed: self.ctx.speed,
            saved_speed: self.ctx.saved_speed,
            command: FanCommand::for_state(state, self.ctx.speed, &self.ctx.config),
            turbo_prompt_remaining_ms,
            tick_count: self.tick_count,
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Task dispatch
// ───────────────────────────────────────────────────────────────

/// Borrows the pieces the gated tasks need while the scheduler is itself
/// mutably borrowed.
struct TaskDispatch<'a, H, D> {
    ctx: &'a mut FsmContext,
    state: PowerState,
    hw: &'a mut H,
    display: &'a mut D,
    last_command: &'a mut Option<FanCommand>,
    last_frame: &'a mut Option<DisplayFrame>,
}

impl<H, D> TaskDelegate for TaskDispatch<'_, H, D>
where
    H: FanOutputPort + TachometerPort,
    D: DisplayPort,
{
    fn run_task(&mut self, task: TaskId, _now_ms: u32) {
        match task {
            TaskId::FanOutput => {
                *self.last_command = Some(output::run_fan_output(&*self.ctx, self.state, &mut *self.hw));
            }
            TaskId::Display => {
                *self.last_frame = Some(output::run_display(
                    &mut *self.ctx,
                    self.state,
                    &mut *self.hw,
                    &mut *self.display,
                ));
            }
        }
    }
}
