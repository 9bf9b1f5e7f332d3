//! Shared mutable context threaded through every FSM handler.
//!
//! `FsmContext` is the single struct that state handlers read from and
//! write to: fan speed, the speed remembered across power-off, the one-shot
//! turbo request, the prompt timer, the pending input events, and the
//! configuration.  Nothing else in the system owns power/speed state.

use heapless::Vec;

use crate::config::SystemConfig;
use crate::input::{LogicalEvent, TickEvents};

// ---------------------------------------------------------------------------
// Speed level
// ---------------------------------------------------------------------------

/// Fan speed level: 0 = off, 1–9 = throttle, 10 = turbo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct SpeedLevel(u8);

impl SpeedLevel {
    pub const OFF: Self = Self(0);
    pub const MIN: Self = Self(1);
    /// Highest level reachable with the step buttons.
    pub const MAX_THROTTLE: Self = Self(9);
    pub const TURBO: Self = Self(10);

    /// Build a level, clamping into `0..=10`.
    pub const fn new(level: u8) -> Self {
        if level > Self::TURBO.0 {
            Self::TURBO
        } else {
            Self(level)
        }
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    pub const fn is_turbo(self) -> bool {
        self.0 == Self::TURBO.0
    }

    /// One step up, never past [`MAX_THROTTLE`](Self::MAX_THROTTLE).
    pub const fn step_up(self) -> Self {
        if self.0 < Self::MAX_THROTTLE.0 {
            Self(self.0 + 1)
        } else {
            self
        }
    }

    /// One step down, never below [`MIN`](Self::MIN).
    pub const fn step_down(self) -> Self {
        if self.0 > Self::MIN.0 {
            Self(self.0 - 1)
        } else {
            self
        }
    }
}

// ---------------------------------------------------------------------------
// FsmContext
// ---------------------------------------------------------------------------

/// The shared context passed to every state handler function.
pub struct FsmContext {
    // -- Timing --
    /// Time of the current control tick (ms, wrapping).
    pub now_ms: u32,
    /// When the turbo prompt was (re)started.
    pub turbo_mark_ms: u32,

    // -- Power / speed --
    /// Current fan speed.  Always [`SpeedLevel::OFF`] while powered off.
    pub speed: SpeedLevel,
    /// Speed restored by the next power-on.
    pub saved_speed: SpeedLevel,

    // -- One-shot signals --
    /// Raised by SpeedUp at the top of the throttle range; cleared every tick.
    pub turbo_request: bool,
    /// Set when the turbo prompt is dismissed; consumed by the display task.
    pub display_clear: bool,

    // -- Input --
    /// Logical events resolved this tick, consumed by the FSM.
    pub pending: TickEvents,

    // -- Configuration --
    pub config: SystemConfig,
}

impl FsmContext {
    /// Create a new context with the given configuration, fan off.
    pub fn new(config: SystemConfig) -> Self {
        Self {
            now_ms: 0,
            turbo_mark_ms: 0,
            speed: SpeedLevel::OFF,
            saved_speed: SpeedLevel::new(config.initial_speed),
            turbo_request: false,
            display_clear: false,
            pending: Vec::new(),
            config,
        }
    }

    /// Queue an event for the next FSM tick.  Returns `false` if the inbox
    /// already holds one event per button.
    pub fn push_event(&mut self, event: LogicalEvent) -> bool {
        self.pending.push(event).is_ok()
    }

    /// Take every queued event, leaving the inbox empty.
    pub fn take_events(&mut self) -> TickEvents {
        core::mem::take(&mut self.pending)
    }

    /// Milliseconds since the turbo prompt was started.
    pub fn turbo_prompt_elapsed(&self) -> u32 {
        self.now_ms.wrapping_sub(self.turbo_mark_ms)
    }
}
