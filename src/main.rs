//! FanCtl Firmware — Main Entry Point
//!
//! Single-threaded cooperative control loop around the hexagonal core.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter          LogDisplay      LogEventSink         │
//! │  (Buttons + Fan + Tach)   (DisplayPort)   (EventSink)          │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │            FanController (pure logic)                  │    │
//! │  │  Buttons · FSM · Scheduler                             │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Pin map (ESP32-S3 board)
//!
//! | Signal      | GPIO | Notes                         |
//! |-------------|------|-------------------------------|
//! | SpeedUp     | 4    | active-low, internal pull-up  |
//! | SpeedDown   | 5    | active-low, internal pull-up  |
//! | PowerToggle | 6    | active-low, internal pull-up  |
//! | Fan PWM     | 7    | LEDC timer 0 / channel 0      |
//! | Fan relay   | 15   | high = 12V supply on          |

#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::gpio::{PinDriver, Pull};
use esp_idf_hal::ledc::config::TimerConfig;
use esp_idf_hal::ledc::{LedcDriver, LedcTimerDriver, Resolution};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::units::FromValueType;
use log::info;

use fanctl::adapters::hardware::HardwareAdapter;
use fanctl::adapters::log_display::LogDisplay;
use fanctl::adapters::log_sink::LogEventSink;
use fanctl::adapters::time::MonotonicClock;
use fanctl::app::service::FanController;
use fanctl::config::SystemConfig;
use fanctl::drivers::buttons::ButtonPins;
use fanctl::drivers::fan::FanDriver;

/// PWM carrier for 4-wire PC fans.
const FAN_PWM_KHZ: u32 = 25;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  FanCtl v{}                        ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config = SystemConfig::default();
    config.validate()?;

    // ── 3. Peripherals ────────────────────────────────────────
    let peripherals = Peripherals::take()?;
    let pins = peripherals.pins;

    let pull = if config.buttons_active_low { Pull::Up } else { Pull::Down };
    let mut up = PinDriver::input(pins.gpio4)?;
    up.set_pull(pull)?;
    let mut down = PinDriver::input(pins.gpio5)?;
    down.set_pull(pull)?;
    let mut power = PinDriver::input(pins.gpio6)?;
    power.set_pull(pull)?;
    let buttons = ButtonPins::new(up, down, power, config.buttons_active_low);

    let timer = LedcTimerDriver::new(
        peripherals.ledc.timer0,
        &TimerConfig::new()
            .frequency(FAN_PWM_KHZ.kHz().into())
            .resolution(Resolution::Bits10),
    )?;
    let pwm = LedcDriver::new(peripherals.ledc.channel0, &timer, pins.gpio7)?;
    let relay = PinDriver::output(pins.gpio15)?;

    let mut fan = FanDriver::new(pwm, relay);
    fan.stop()?;

    // ── 4. Adapters + core ────────────────────────────────────
    let mut hw = HardwareAdapter::new(buttons, fan);
    let mut display = LogDisplay::new();
    let mut sink = LogEventSink::new();
    let clock = MonotonicClock::new();

    let mut app = FanController::new(config);
    app.start(&mut sink);

    info!("System ready. Entering control loop.");

    // ── 5. Control loop ───────────────────────────────────────
    loop {
        app.tick(clock.uptime_ms(), &mut hw, &mut display, &mut sink);
        FreeRtos::delay_ms(1);
    }
}
