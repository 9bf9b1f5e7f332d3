//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the button pins, the fan driver and an optional tachometer,
//! exposing them through [`ButtonInputPort`], [`FanOutputPort`] and
//! [`TachometerPort`].  Ports are infallible, so driver errors stop here:
//! they are logged (rate-limited to the first of each streak) and the
//! adapter degrades instead.

use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::pwm::SetDutyCycle;
use log::{info, warn};

use crate::app::output::FanCommand;
use crate::app::ports::{ButtonInputPort, FanOutputPort, TachometerPort};
use crate::drivers::buttons::ButtonPins;
use crate::drivers::fan::FanDriver;
use crate::input::ButtonLevels;

/// Tachometer stand-in for boards without a tach line.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoTachometer;

impl TachometerPort for NoTachometer {
    fn rpm(&mut self) -> Option<u32> {
        None
    }
}

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<UP, DOWN, POWER, PWM, RELAY, TACH = NoTachometer> {
    buttons: ButtonPins<UP, DOWN, POWER>,
    fan: FanDriver<PWM, RELAY>,
    tach: TACH,
    read_failing: bool,
    write_failing: bool,
}

impl<UP, DOWN, POWER, PWM, RELAY> HardwareAdapter<UP, DOWN, POWER, PWM, RELAY>
where
    UP: InputPin,
    DOWN: InputPin,
    POWER: InputPin,
    PWM: SetDutyCycle,
    RELAY: OutputPin,
{
    pub fn new(buttons: ButtonPins<UP, DOWN, POWER>, fan: FanDriver<PWM, RELAY>) -> Self {
        Self::with_tachometer(buttons, fan, NoTachometer)
    }
}

impl<UP, DOWN, POWER, PWM, RELAY, TACH> HardwareAdapter<UP, DOWN, POWER, PWM, RELAY, TACH>
where
    UP: InputPin,
    DOWN: InputPin,
    POWER: InputPin,
    PWM: SetDutyCycle,
    RELAY: OutputPin,
    TACH: TachometerPort,
{
    pub fn with_tachometer(buttons: ButtonPins<UP, DOWN, POWER>, fan: FanDriver<PWM, RELAY>, tach: TACH) -> Self {
        Self {
            buttons,
            fan,
            tach,
            read_failing: false,
            write_failing: false,
        }
    }

    /// Last command the fan driver accepted.
    pub fn fan_command(&self) -> Option<FanCommand> {
        self.fan.current()
    }
}

// ── ButtonInputPort implementation ────────────────────────────

impl<UP, DOWN, POWER, PWM, RELAY, TACH> ButtonInputPort for HardwareAdapter<UP, DOWN, POWER, PWM, RELAY, TACH>
where
    UP: InputPin,
    DOWN: InputPin,
    POWER: InputPin,
    PWM: SetDutyCycle,
    RELAY: OutputPin,
    TACH: TachometerPort,
{
    fn read_levels(&mut self) -> ButtonLevels {
        match self.buttons.read() {
            Ok(levels) => {
                if self.read_failing {
                    info!("Buttons: GPIO reads recovered");
                    self.read_failing = false;
                }
                levels
            }
            Err(e) => {
                if !self.read_failing {
                    warn!("Buttons: {e}; treating all as released");
                    self.read_failing = true;
                }
                ButtonLevels::released()
            }
        }
    }
}

// ── FanOutputPort implementation ──────────────────────────────

impl<UP, DOWN, POWER, PWM, RELAY, TACH> FanOutputPort for HardwareAdapter<UP, DOWN, POWER, PWM, RELAY, TACH>
where
    UP: InputPin,
    DOWN: InputPin,
    POWER: InputPin,
    PWM: SetDutyCycle,
    RELAY: OutputPin,
    TACH: TachometerPort,
{
    fn apply(&mut self, command: FanCommand) {
        match self.fan.apply(command) {
            Ok(()) => {
                if self.write_failing {
                    info!("Fan: output writes recovered");
                    self.write_failing = false;
                }
            }
            Err(e) => {
                if !self.write_failing {
                    warn!("Fan: {e}; retrying on next refresh");
                    self.write_failing = true;
                }
            }
        }
    }
}

// ── TachometerPort implementation ─────────────────────────────

impl<UP, DOWN, POWER, PWM, RELAY, TACH> TachometerPort for HardwareAdapter<UP, DOWN, POWER, PWM, RELAY, TACH>
where
    UP: InputPin,
    DOWN: InputPin,
    POWER: InputPin,
    PWM: SetDutyCycle,
    RELAY: OutputPin,
    TACH: TachometerPort,
{
    fn rpm(&mut self) -> Option<u32> {
        self.tach.rpm()
    }
}
