//! Front-panel button lines.
//!
//! ## Hardware
//!
//! Three momentary switches, one GPIO each.  The stock board wires them
//! active-low with pull-ups; `buttons_active_low = false` flips that for
//! boards with pull-down wiring.  The lines are sampled once per control
//! tick — there is no ISR; debouncing happens in [`crate::input`].

use embedded_hal::digital::InputPin;

use crate::error::{InputError, Result};
use crate::input::{ButtonId, ButtonLevels};

/// The three button inputs, in [`ButtonId`] order.
pub struct ButtonPins<UP, DOWN, POWER> {
    speed_up: UP,
    speed_down: DOWN,
    power: POWER,
    active_low: bool,
}

impl<UP, DOWN, POWER> ButtonPins<UP, DOWN, POWER>
where
    UP: InputPin,
    DOWN: InputPin,
    POWER: InputPin,
{
    pub fn new(speed_up: UP, speed_down: DOWN, power: POWER, active_low: bool) -> Self {
        Self {
            speed_up,
            speed_down,
            power,
            active_low,
        }
    }

    /// Sample every line.  `true` = pressed, polarity already applied.
    pub fn read(&mut self) -> Result<ButtonLevels> {
        Ok(ButtonLevels::new(
            self.read_one(ButtonId::SpeedUp)?,
            self.read_one(ButtonId::SpeedDown)?,
            self.read_one(ButtonId::PowerToggle)?,
        ))
    }

    /// Sample a single line.
    pub fn read_one(&mut self, id: ButtonId) -> Result<bool> {
        let high = match id {
            ButtonId::SpeedUp => self.speed_up.is_high().map_err(|_| InputError::GpioReadFailed),
            ButtonId::SpeedDown => self.speed_down.is_high().map_err(|_| InputError::GpioReadFailed),
            ButtonId::PowerToggle => self.power.is_high().map_err(|_| InputError::GpioReadFailed),
        }?;
        Ok(high != self.active_low)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::digital::{ErrorKind, ErrorType};

    struct Level(bool);

    impl ErrorType for Level {
        type Error = Infallible;
    }

    impl InputPin for Level {
        fn is_high(&mut self) -> core::result::Result<bool, Infallible> {
            Ok(self.0)
        }
        fn is_low(&mut self) -> core::result::Result<bool, Infallible> {
            Ok(!self.0)
        }
    }

    #[derive(Debug)]
    struct Broken;

    impl embedded_hal::digital::Error for Broken {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    struct BrokenPin;

    impl ErrorType for BrokenPin {
        type Error = Broken;
    }

    impl InputPin for BrokenPin {
        fn is_high(&mut self) -> core::result::Result<bool, Broken> {
            Err(Broken)
        }
        fn is_low(&mut self) -> core::result::Result<bool, Broken> {
            Err(Broken)
        }
    }

    #[test]
    fn active_low_lines_read_pressed_when_low() {
        let mut pins = ButtonPins::new(Level(false), Level(true), Level(true), true);
        assert_eq!(pins.read().unwrap(), ButtonLevels::only(ButtonId::SpeedUp));
    }

    #[test]
    fn active_high_lines_read_pressed_when_high() {
        let mut pins = ButtonPins::new(Level(false), Level(false), Level(true), false);
        assert_eq!(pins.read().unwrap(), ButtonLevels::only(ButtonId::PowerToggle));
    }

    #[test]
    fn read_failure_maps_to_input_error() {
        let mut pins = ButtonPins::new(Level(true), BrokenPin, Level(true), true);
        assert_eq!(pins.read_one(ButtonId::SpeedUp), Ok(false));
        assert_eq!(
            pins.read(),
            Err(crate::error::Error::Input(InputError::GpioReadFailed))
        );
    }
}
