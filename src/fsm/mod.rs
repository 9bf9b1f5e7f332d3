//! Function-pointer finite state machine engine for fan power/speed.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  StateTable                                                             │
//! │  ┌────────────────┬──────────┬──────────┬─────────────┬──────────────┐  │
//! │  │ PowerState     │ on_enter │ on_exit  │ on_event    │ on_update    │  │
//! │  ├────────────────┼──────────┼──────────┼─────────────┼──────────────┤  │
//! │  │ Off            │ fn(ctx)  │ -        │ fn(ctx, ev) │ fn(ctx)      │  │
//! │  │ On             │ -        │ -        │ fn(ctx, ev) │ fn(ctx)      │  │
//! │  │ TurboRequested │ fn(ctx)  │ fn(ctx)  │ fn(ctx, ev) │ fn(ctx)      │  │
//! │  └────────────────┴──────────┴──────────┴─────────────┴──────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each tick the engine first hands every pending [`LogicalEvent`] to the
//! current state's `on_event`, then calls `on_update` once for timers and
//! one-shot flags.  Either may return `Some(next)`, in which case the engine
//! runs `on_exit` for the current state, then `on_enter` for the next, and
//! updates the current pointer.  The turbo request is cleared at the end of
//! every tick whichever branch ran.

pub mod context;
pub mod states;

use context::FsmContext;
use log::info;

use crate::input::LogicalEvent;

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// System power state.
/// Must stay in sync with the state table built in [`states::build_state_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PowerState {
    Off = 0,
    On = 1,
    /// Sub-state of `On` showing the "hold power for turbo" prompt.
    TurboRequested = 2,
}

impl PowerState {
    /// Total number of states — used to size the table array.
    pub const COUNT: usize = 3;

    /// Convert a `u8` index back to `PowerState`.  Panics on out-of-range in
    /// debug builds; returns `Off` in release (fan stopped is the safe fallback).
    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => Self::Off,
            1 => Self::On,
            2 => Self::TurboRequested,
            _ => {
                debug_assert!(false, "invalid state index: {idx}");
                Self::Off
            }
        }
    }

    /// `On` or its turbo-prompt sub-state.
    pub const fn is_powered(self) -> bool {
        !matches!(self, Self::Off)
    }
}

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

/// Signature for `on_enter` and `on_exit` actions.
/// These run exactly once on each state transition.
pub type StateActionFn = fn(&mut FsmContext);

/// Signature for the per-event handler.
/// Returns `Some(next)` to trigger a transition, or `None` to stay.
pub type StateEventFn = fn(&mut FsmContext, LogicalEvent) -> Option<PowerState>;

/// Signature for the per-tick update handler.
/// Returns `Some(next)` to trigger a transition, or `None` to stay.
pub type StateUpdateFn = fn(&mut FsmContext) -> Option<PowerState>;

// ---------------------------------------------------------------------------
// State descriptor (one row in the table)
// ---------------------------------------------------------------------------

/// Static descriptor for a single FSM state.
/// Stored in a fixed-size array — no heap, no `dyn`.
pub struct StateDescriptor {
    pub id: PowerState,
    pub name: &'static str,
    pub on_enter: Option<StateActionFn>,
    pub on_exit: Option<StateActionFn>,
    pub on_event: StateEventFn,
    pub on_update: StateUpdateFn,
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

/// The finite state machine engine.
///
/// Owns the state table (array of [`StateDescriptor`]); the mutable
/// [`FsmContext`] is owned by the caller and threaded through every
/// handler call.
pub struct Fsm {
    /// Fixed-size table indexed by `PowerState as usize`.
    table: [StateDescriptor; PowerState::COUNT],
    /// Index of the currently active state.
    current: usize,
}

impl Fsm {
    /// Construct a new FSM with the given state table, starting in `initial`.
    pub fn new(table: [StateDescriptor; PowerState::COUNT], initial: PowerState) -> Self {
        Self {
            table,
            current: initial as usize,
        }
    }

    /// Run the initial `on_enter` for the starting state.
    /// Call once after construction, before the first `tick()`.
    pub fn start(&mut self, ctx: &mut FsmContext) {
        info!("FSM starting in state: {}", self.table[self.current].name);
        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }

    /// Advance the FSM by one tick.
    ///
    /// 1. Hand each pending event to the current state's `on_event`,
    ///    transitioning between events as requested.
    /// 2. Call `on_update` for the (possibly new) current state.
    /// 3. Clear the one-shot turbo request.
    pub fn tick(&mut self, ctx: &mut FsmContext) {
        for event in ctx.take_events() {
            if let Some(next) = (self.table[self.current].on_event)(ctx, event) {
                self.transition(next, ctx);
            }
        }

        if let Some(next) = (self.table[self.current].on_update)(ctx) {
            self.transition(next, ctx);
        }

        ctx.turbo_request = false;
    }

    /// The current state's identity.
    pub fn current_state(&self) -> PowerState {
        PowerState::from_index(self.current)
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn transition(&mut self, next: PowerState, ctx: &mut FsmContext) {
        let next_idx = next as usize;

        info!(
            "FSM transition: {} -> {}",
            self.table[self.current].name, self.table[next_idx].name
        );

        if let Some(exit) = self.table[self.current].on_exit {
            exit(ctx);
        }

        self.current = next_idx;

        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }
}
