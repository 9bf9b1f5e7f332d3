//! Concrete state handler functions and table builder.
//!
//! Each state is a row of plain `fn` pointers.  `On` and `TurboRequested`
//! share one event handler: the prompt is a display overlay on top of the
//! normal powered behaviour, not a separate mode.
//!
//! ```text
//!            Click(Power)                      SpeedUp at 9
//!   OFF ─────────────────▶ ON ──────────────────────────────▶ TURBO_REQUESTED
//!    ▲  ◀─────────────────  │ ▲ ◀── prompt timeout / turbo engaged ──┘  │
//!    │     Click(Power)       │                                          │
//!    └──────────────────────────────── Click(Power) ─────────────────────┘
//! ```

use super::context::{FsmContext, SpeedLevel};
use super::{PowerState, StateDescriptor};
use crate::input::{ButtonId, Gesture, LogicalEvent};
use log::{debug, info, warn};

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static state table.  Called once at startup.
pub fn build_state_table() -> [StateDescriptor; PowerState::COUNT] {
    [
        // Index 0 — Off
        StateDescriptor {
            id: PowerState::Off,
            name: "Off",
            on_enter: Some(off_enter),
            on_exit: None,
            on_event: off_event,
            on_update: off_update,
        },
        // Index 1 — On
        StateDescriptor {
            id: PowerState::On,
            name: "On",
            on_enter: None,
            on_exit: None,
            on_event: powered_event,
            on_update: on_update,
        },
        // Index 2 — TurboRequested
        StateDescriptor {
            id: PowerState::TurboRequested,
            name: "TurboRequested",
            on_enter: Some(turbo_requested_enter),
            on_exit: Some(turbo_requested_exit),
            on_event: powered_event,
            on_update: turbo_requested_update,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  OFF state
// ═══════════════════════════════════════════════════════════════════════════

fn off_enter(ctx: &mut FsmContext) {
    ctx.speed = SpeedLevel::OFF;
    info!("OFF: fan stopped, saved speed {}", ctx.saved_speed.get());
}

fn off_event(ctx: &mut FsmContext, event: LogicalEvent) -> Option<PowerState> {
    match (event.button, event.gesture) {
        (ButtonId::PowerToggle, Gesture::Click) => {
            ctx.speed = ctx.saved_speed;
            info!("OFF: power on at speed {}", ctx.speed.get());
            Some(PowerState::On)
        }
        (button, gesture) => {
            debug!("OFF: ignoring {gesture:?} on {}", button.name());
            None
        }
    }
}

fn off_update(_ctx: &mut FsmContext) -> Option<PowerState> {
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  Powered event handling (ON and TURBO_REQUESTED)
// ═══════════════════════════════════════════════════════════════════════════

fn powered_event(ctx: &mut FsmContext, event: LogicalEvent) -> Option<PowerState> {
    match (event.button, event.gesture) {
        (ButtonId::PowerToggle, Gesture::Click) => {
            // Off's on_enter zeroes the speed.
            ctx.saved_speed = ctx.speed;
            Some(PowerState::Off)
        }
        (ButtonId::PowerToggle, Gesture::Hold) => {
            if !ctx.speed.is_turbo() {
                info!("TURBO: engaged from speed {}", ctx.speed.get());
            }
            ctx.speed = SpeedLevel::TURBO;
            None
        }
        (ButtonId::SpeedUp, Gesture::Click) => {
            if ctx.speed == SpeedLevel::OFF {
                warn!("ON: speed was 0 while powered, resetting to {}", SpeedLevel::MIN.get());
                ctx.speed = SpeedLevel::MIN;
            } else if ctx.speed < SpeedLevel::MAX_THROTTLE {
                ctx.speed = ctx.speed.step_up();
            } else {
                ctx.turbo_request = true;
            }
            None
        }
        (ButtonId::SpeedDown, Gesture::Click) => {
            ctx.speed = ctx.speed.step_down();
            None
        }
        (ButtonId::SpeedUp | ButtonId::SpeedDown, Gesture::Hold) => None,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  ON state
// ═══════════════════════════════════════════════════════════════════════════

fn on_update(ctx: &mut FsmContext) -> Option<PowerState> {
    if ctx.turbo_request && !ctx.speed.is_turbo() {
        return Some(PowerState::TurboRequested);
    }
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  TURBO_REQUESTED state
// ═══════════════════════════════════════════════════════════════════════════

fn turbo_requested_enter(ctx: &mut FsmContext) {
    ctx.turbo_mark_ms = ctx.now_ms;
    info!(
        "TURBO_REQUESTED: hold power within {} ms for turbo",
        ctx.config.turbo_prompt_ms
    );
}

fn turbo_requested_exit(ctx: &mut FsmContext) {
    ctx.display_clear = true;
}

fn turbo_requested_update(ctx: &mut FsmContext) -> Option<PowerState> {
    if ctx.speed.is_turbo() {
        return Some(PowerState::On);
    }

    if ctx.turbo_request {
        ctx.turbo_mark_ms = ctx.now_ms;
        debug!("TURBO_REQUESTED: prompt restarted");
        return None;
    }

    if ctx.turbo_prompt_elapsed() >= ctx.config.turbo_prompt_ms {
        info!("TURBO_REQUESTED: prompt timed out");
        return Some(PowerState::On);
    }

    None
}
