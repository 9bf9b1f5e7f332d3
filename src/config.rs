//! System configuration parameters
//!
//! All tunable timing and output parameters for the fan controller.
//! Nothing here is persisted: the firmware boots from [`SystemConfig::default`]
//! and a build may override it from JSON via [`SystemConfig::from_json`].

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    // --- Buttons ---
    /// Minimum stable contact / stable release time (milliseconds)
    pub debounce_ms: u32,
    /// Continuous contact time that turns a press into a Hold (milliseconds)
    pub hold_ms: u32,
    /// Fire another Hold every `hold_ms` while the button stays down
    pub repeat_hold: bool,
    /// Buttons pull the line low when pressed
    pub buttons_active_low: bool,

    // --- Turbo ---
    /// How long the "hold power for turbo" prompt stays up (milliseconds)
    pub turbo_prompt_ms: u32,

    // --- Output ---
    /// PWM value (0-255) for speed level 1
    pub pwm_min: u8,
    /// PWM value (0-255) for speed level 9
    pub pwm_max: u8,
    /// Speed restored on the first power-on after boot (1-9)
    pub initial_speed: u8,

    // --- Timing ---
    /// Fan output refresh interval (milliseconds)
    pub fan_refresh_ms: u32,
    /// Display refresh interval (milliseconds)
    pub display_refresh_ms: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Buttons
            debounce_ms: 40,
            hold_ms: 1000,
            repeat_hold: false,
            buttons_active_low: true,

            // Turbo
            turbo_prompt_ms: 3000,

            // Output
            pwm_min: 80,
            pwm_max: 255,
            initial_speed: 5,

            // Timing
            fan_refresh_ms: 100,     // 10 Hz
            display_refresh_ms: 250, // 4 Hz
        }
    }
}

impl SystemConfig {
    /// Parse a JSON override and validate it.  Missing fields take their
    /// default values.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|_| Error::Config("malformed JSON"))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject out-of-range values.  Nothing is silently clamped.
    pub fn validate(&self) -> Result<()> {
        if self.debounce_ms == 0 {
            return Err(Error::Config("debounce_ms must be non-zero"));
        }
        if self.hold_ms <= self.debounce_ms {
            return Err(Error::Config("hold_ms must exceed debounce_ms"));
        }
        if self.turbo_prompt_ms == 0 {
            return Err(Error::Config("turbo_prompt_ms must be non-zero"));
        }
        if self.pwm_min >= self.pwm_max {
            return Err(Error::Config("pwm_min must be below pwm_max"));
        }
        if !(1..=9).contains(&self.initial_speed) {
            return Err(Error::Config("initial_speed must be within 1..=9"));
        }
        if self.fan_refresh_ms == 0 || self.display_refresh_ms == 0 {
            return Err(Error::Config("refresh intervals must be non-zero"));
        }
        Ok(())
    }
}
