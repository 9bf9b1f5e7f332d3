//! Gated refresh tasks: FSM state → fan command and display frame.
//!
//! Both mappings are pure; the task functions only read the FSM context
//! (plus the display-clear flag, which the display task consumes).
//!
//! | power | speed | drive                   | relay |
//! |-------|-------|-------------------------|-------|
//! | off   | any   | `Stopped`               | open  |
//! | on    | 0     | `Duty(pwm_min)`         | shut  |
//! | on    | 1..9  | `Duty(linear min..max)` | shut  |
//! | on    | 10    | `Turbo` (fully on)      | shut  |

use crate::config::SystemConfig;
use crate::fsm::PowerState;
use crate::fsm::context::{FsmContext, SpeedLevel};

use super::ports::{DisplayPort, FanOutputPort, TachometerPort};

// ───────────────────────────────────────────────────────────────
// Fan command
// ───────────────────────────────────────────────────────────────

/// PWM drive for the fan channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FanDrive {
    /// Channel fully off.
    Stopped,
    /// 8-bit duty cycle.
    Duty(u8),
    /// Channel fully on, above the throttle range.
    Turbo,
}

/// Complete fan output: PWM drive plus supply relay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FanCommand {
    pub drive: FanDrive,
    pub relay_energized: bool,
}

impl FanCommand {
    pub const STOPPED: Self = Self {
        drive: FanDrive::Stopped,
        relay_energized: false,
    };

    /// Fan command for the given power state and speed.
    pub fn for_state(state: PowerState, speed: SpeedLevel, config: &SystemConfig) -> Self {
        if !state.is_powered() {
            return Self::STOPPED;
        }
        let drive = if speed.is_turbo() {
            FanDrive::Turbo
        } else {
            FanDrive::Duty(throttle_duty(speed, config))
        };
        Self {
            drive,
            relay_energized: true,
        }
    }
}

/// Linear duty over `[pwm_min, pwm_max]` for levels 1..=9.
/// Level 0 maps to `pwm_min` so a powered fan never stalls.
pub fn throttle_duty(speed: SpeedLevel, config: &SystemConfig) -> u8 {
    let min = u16::from(config.pwm_min);
    let max = u16::from(config.pwm_max.max(config.pwm_min));
    let steps = u16::from(SpeedLevel::MAX_THROTTLE.get() - SpeedLevel::MIN.get());
    let level = u16::from(speed.get().clamp(SpeedLevel::MIN.get(), SpeedLevel::MAX_THROTTLE.get()));
    let duty = min + (level - 1) * (max - min) / steps;
    // `duty` lies between two u8 values, so this never saturates.
    u8::try_from(duty).unwrap_or(u8::MAX)
}

/// Push the current fan command to the output port.
pub fn run_fan_output(ctx: &FsmContext, state: PowerState, fan: &mut impl FanOutputPort) -> FanCommand {
    let command = FanCommand::for_state(state, ctx.speed, &ctx.config);
    fan.apply(command);
    command
}

// ───────────────────────────────────────────────────────────────
// Display frame
// ───────────────────────────────────────────────────────────────

/// Everything the front panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayFrame {
    pub power: PowerState,
    pub speed: SpeedLevel,
    /// Measured fan speed, if a tachometer is fitted.
    pub rpm: Option<u32>,
    /// Show the "hold power for turbo" overlay.
    pub turbo_prompt: bool,
    /// Redraw the whole panel (set once after the prompt is dismissed).
    pub full_redraw: bool,
}

/// Render one display frame, consuming the display-clear flag.
pub fn run_display(
    ctx: &mut FsmContext,
    state: PowerState,
    tach: &mut impl TachometerPort,
    display: &mut impl DisplayPort,
) -> DisplayFrame {
    let frame = DisplayFrame {
        power: state,
        speed: ctx.speed,
        rpm: tach.rpm(),
        turbo_prompt: state == PowerState::TurboRequested,
        full_redraw: core::mem::take(&mut ctx.display_clear),
    };
    display.render(&frame);
    frame
}
