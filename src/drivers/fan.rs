//! 12V fan driver: LEDC PWM channel plus supply relay.
//!
//! ## Hardware
//!
//! The fan's PWM input is driven by one PWM channel (25 kHz on the stock
//! board).  A relay switches the 12V supply so a stopped fan draws nothing.
//! The relay is energised before the PWM is raised and released after the
//! PWM is dropped.

use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;
use log::debug;

use crate::app::output::{FanCommand, FanDrive};
use crate::error::{ActuatorError, Result};

/// Full scale of [`FanDrive::Duty`].
const DUTY_SCALE: u16 = u8::MAX as u16;

pub struct FanDriver<PWM, RELAY> {
    pwm: PWM,
    relay: RELAY,
    /// Last command written successfully.
    current: Option<FanCommand>,
}

impl<PWM, RELAY> FanDriver<PWM, RELAY>
where
    PWM: SetDutyCycle,
    RELAY: OutputPin,
{
    pub fn new(pwm: PWM, relay: RELAY) -> Self {
        Self {
            pwm,
            relay,
            current: None,
        }
    }

    /// Drive the fan.  Writing the same command again re-asserts the pins.
    pub fn apply(&mut self, command: FanCommand) -> Result<()> {
        if self.current != Some(command) {
            debug!("Fan: {:?} relay={}", command.drive, command.relay_energized);
        }
        // Invalidate first so a partial write is re-sent in full next time.
        self.current = None;

        if command.relay_energized {
            self.set_relay(true)?;
            self.set_drive(command.drive)?;
        } else {
            self.set_drive(command.drive)?;
            self.set_relay(false)?;
        }

        self.current = Some(command);
        Ok(())
    }

    /// Stop the fan and open the relay.
    pub fn stop(&mut self) -> Result<()> {
        self.apply(FanCommand::STOPPED)
    }

    /// Last command written successfully.
    pub fn current(&self) -> Option<FanCommand> {
        self.current
    }

    fn set_drive(&mut self, drive: FanDrive) -> Result<()> {
        match drive {
            FanDrive::Stopped => self.pwm.set_duty_cycle_fully_off(),
            FanDrive::Duty(duty) => self.pwm.set_duty_cycle_fraction(u16::from(duty), DUTY_SCALE),
            FanDrive::Turbo => self.pwm.set_duty_cycle_fully_on(),
        }
        .map_err(|_| ActuatorError::PwmWriteFailed)?;
        Ok(())
    }

    fn set_relay(&mut self, energized: bool) -> Result<()> {
        if energized {
            self.relay.set_high()
        } else {
            self.relay.set_low()
        }
        .map_err(|_| ActuatorError::RelayWriteFailed)?;
        Ok(())
    }
}
