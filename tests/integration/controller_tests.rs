//! Integration tests for the buttons → FSM → fan/display pipeline.
//!
//! Every scenario drives raw button levels through the mock hardware at
//! 1 ms per tick and asserts on the events, fan commands and frames that
//! come out the other side.

use fanctl::app::events::AppEvent;
use fanctl::app::output::{FanCommand, FanDrive, throttle_duty};
use fanctl::config::SystemConfig;
use fanctl::fsm::PowerState;
use fanctl::fsm::context::SpeedLevel;
use fanctl::input::{ButtonId, ButtonLevels, Gesture, LogicalEvent};
use fanctl::scheduler::TaskId;

use crate::mock_hw::Rig;

fn config_with_initial(speed: u8) -> SystemConfig {
    SystemConfig {
        initial_speed: speed,
        ..SystemConfig::default()
    }
}

/// Rig already powered on at `speed`, with the event log cleared.
fn powered_rig(speed: u8) -> Rig {
    let mut rig = Rig::with_config(config_with_initial(speed));
    rig.click(ButtonId::PowerToggle);
    assert_eq!(rig.app.power_state(), PowerState::On);
    assert_eq!(rig.app.speed().get(), speed);
    rig.sink.clear();
    rig
}

// ── Boot ──────────────────────────────────────────────────────

#[test]
fn boots_off_with_fan_stopped() {
    let mut rig = Rig::new();
    assert_eq!(rig.sink.events, [AppEvent::Started(PowerState::Off)]);

    rig.run(1);
    assert_eq!(rig.hw.last_command(), Some(FanCommand::STOPPED));
    assert_eq!(rig.display.frames.len(), 1);
    assert_eq!(rig.display.frames[0].power, PowerState::Off);
    assert_eq!(rig.display.frames[0].speed, SpeedLevel::OFF);
}

// ── Power ─────────────────────────────────────────────────────

#[test]
fn power_click_turns_on_at_initial_speed() {
    let mut rig = Rig::new();
    rig.click(ButtonId::PowerToggle);

    let initial = SpeedLevel::new(SystemConfig::default().initial_speed);
    assert_eq!(rig.app.power_state(), PowerState::On);
    assert_eq!(rig.app.speed(), initial);
    assert_eq!(rig.sink.inputs(), [LogicalEvent::click(ButtonId::PowerToggle)]);
    assert!(rig.sink.contains(&AppEvent::StateChanged {
        from: PowerState::Off,
        to: PowerState::On,
    }));
    assert!(rig.sink.contains(&AppEvent::SpeedChanged {
        from: SpeedLevel::OFF,
        to: initial,
    }));

    rig.run(100);
    let cfg = SystemConfig::default();
    assert_eq!(
        rig.hw.last_command(),
        Some(FanCommand {
            drive: FanDrive::Duty(throttle_duty(initial, &cfg)),
            relay_energized: true,
        })
    );
}

#[test]
fn power_cycle_restores_previous_speed() {
    let mut rig = powered_rig(5);
    rig.click(ButtonId::SpeedUp);
    rig.click(ButtonId::SpeedUp);
    assert_eq!(rig.app.speed().get(), 7);

    rig.click(ButtonId::PowerToggle);
    assert_eq!(rig.app.power_state(), PowerState::Off);
    assert_eq!(rig.app.speed(), SpeedLevel::OFF);
    assert_eq!(rig.app.saved_speed().get(), 7);
    rig.run(100);
    assert_eq!(rig.hw.last_command(), Some(FanCommand::STOPPED));

    rig.click(ButtonId::PowerToggle);
    assert_eq!(rig.app.power_state(), PowerState::On);
    assert_eq!(rig.app.speed().get(), 7);
}

// ── Debounce / gesture resolution ─────────────────────────────

#[test]
fn contact_bounce_is_absorbed() {
    let mut rig = powered_rig(5);
    rig.drive(ButtonLevels::only(ButtonId::SpeedUp), 10);
    rig.drive(ButtonLevels::released(), 500);
    assert!(rig.sink.inputs().is_empty());
    assert_eq!(rig.app.speed().get(), 5);
}

#[test]
fn long_press_yields_one_hold_and_no_click() {
    let mut rig = powered_rig(5);
    rig.drive(ButtonLevels::only(ButtonId::SpeedDown), 3500);
    rig.drive(ButtonLevels::released(), 200);
    assert_eq!(rig.sink.inputs(), [LogicalEvent::hold(ButtonId::SpeedDown)]);
    // Holding a speed button does nothing.
    assert_eq!(rig.app.speed().get(), 5);
}

#[test]
fn repeat_hold_refires_while_held() {
    let config = SystemConfig {
        repeat_hold: true,
        ..SystemConfig::default()
    };
    let mut rig = Rig::with_config(config);
    rig.drive(ButtonLevels::only(ButtonId::SpeedUp), 3500);
    rig.drive(ButtonLevels::released(), 200);
    assert_eq!(rig.sink.count_gestures(Gesture::Hold), 3);
    assert_eq!(rig.sink.count_gestures(Gesture::Click), 0);
}

#[test]
fn simultaneous_buttons_resolve_independently() {
    let mut rig = powered_rig(5);
    let both = ButtonLevels::new(true, true, false);
    rig.drive(both, 100);
    rig.drive(ButtonLevels::released(), 100);
    assert_eq!(
        rig.sink.inputs(),
        [
            LogicalEvent::click(ButtonId::SpeedUp),
            LogicalEvent::click(ButtonId::SpeedDown),
        ]
    );
    assert_eq!(rig.app.speed().get(), 5);
}

// ── Speed ─────────────────────────────────────────────────────

#[test]
fn speed_down_at_one_stays_one() {
    let mut rig = powered_rig(1);
    rig.click(ButtonId::SpeedDown);
    assert_eq!(rig.app.speed().get(), 1);
    assert!(!rig.sink.events.iter().any(|e| matches!(e, AppEvent::SpeedChanged { .. })));
}

#[test]
fn speed_buttons_ignored_while_off() {
    let mut rig = Rig::new();
    rig.click(ButtonId::SpeedUp);
    rig.long_press(ButtonId::PowerToggle);
    assert_eq!(rig.app.power_state(), PowerState::Off);
    assert_eq!(rig.app.speed(), SpeedLevel::OFF);
    assert_eq!(rig.sink.inputs().len(), 2);
}

// ── Turbo ─────────────────────────────────────────────────────

#[test]
fn speed_up_at_nine_prompts_then_times_out() {
    let mut rig = powered_rig(9);
    rig.click(ButtonId::SpeedUp);
    assert_eq!(rig.app.power_state(), PowerState::TurboRequested);
    assert_eq!(rig.app.speed().get(), 9);
    assert!(rig.sink.contains(&AppEvent::TurboPrompt(true)));

    let remaining = rig.app.status().turbo_prompt_remaining_ms;
    assert!(matches!(remaining, Some(ms) if ms > 0 && ms <= 3000), "{remaining:?}");

    rig.run(250);
    assert!(rig.app.last_frame().is_some_and(|f| f.turbo_prompt));

    rig.run(3000);
    assert_eq!(rig.app.power_state(), PowerState::On);
    assert_eq!(rig.app.speed().get(), 9);
    assert!(rig.sink.contains(&AppEvent::TurboPrompt(false)));
    assert_eq!(rig.app.status().turbo_prompt_remaining_ms, None);

    let redraws = rig.display.frames.iter().filter(|f| f.full_redraw).count();
    assert_eq!(redraws, 1);
}

#[test]
fn hold_power_during_prompt_engages_turbo() {
    let mut rig = powered_rig(9);
    rig.click(ButtonId::SpeedUp);
    assert_eq!(rig.app.power_state(), PowerState::TurboRequested);

    rig.long_press(ButtonId::PowerToggle);
    assert_eq!(rig.app.speed(), SpeedLevel::TURBO);
    assert_eq!(rig.app.power_state(), PowerState::On);
    assert!(rig.sink.contains(&AppEvent::TurboPrompt(false)));

    rig.run(100);
    assert_eq!(rig.hw.last_command().map(|c| c.drive), Some(FanDrive::Turbo));
}

#[test]
fn hold_power_engages_turbo_from_low_speed() {
    let mut rig = powered_rig(3);
    rig.long_press(ButtonId::PowerToggle);
    assert_eq!(rig.app.speed(), SpeedLevel::TURBO);
    assert_eq!(rig.app.power_state(), PowerState::On);

    rig.click(ButtonId::SpeedDown);
    assert_eq!(rig.app.speed().get(), 9);
}

#[test]
fn power_off_from_turbo_remembers_turbo() {
    let mut rig = powered_rig(4);
    rig.long_press(ButtonId::PowerToggle);
    rig.click(ButtonId::PowerToggle);
    assert_eq!(rig.app.power_state(), PowerState::Off);
    assert_eq!(rig.app.saved_speed(), SpeedLevel::TURBO);

    rig.click(ButtonId::PowerToggle);
    assert_eq!(rig.app.speed(), SpeedLevel::TURBO);
}

// ── Gated refresh ─────────────────────────────────────────────

#[test]
fn fan_refresh_is_idempotent() {
    let mut rig = powered_rig(6);
    rig.hw.commands.clear();
    rig.run(1000);
    assert_eq!(rig.hw.commands.len(), 10);
    let first = rig.hw.commands[0];
    assert!(rig.hw.commands.iter().all(|c| *c == first));
    assert_eq!(rig.app.last_command(), Some(first));
}

#[test]
fn refresh_tasks_follow_their_intervals() {
    let mut rig = Rig::new();
    rig.run(1000);
    assert_eq!(rig.hw.commands.len(), 10);
    assert_eq!(rig.display.frames.len(), 4);
    assert_eq!(rig.app.scheduler().run_count(TaskId::FanOutput), 10);
    assert_eq!(rig.app.scheduler().run_count(TaskId::Display), 4);
    assert_eq!(rig.app.tick_count(), 1000);
}

#[test]
fn display_shows_tachometer_reading() {
    let mut rig = Rig::new();
    rig.hw.rpm = Some(1500);
    rig.run(1);
    assert_eq!(rig.display.frames[0].rpm, Some(1500));
}

#[test]
fn output_follows_speed_changes_within_one_period() {
    let mut rig = powered_rig(2);
    let cfg = SystemConfig::default();
    rig.click(ButtonId::SpeedUp);
    rig.run(100);
    assert_eq!(
        rig.hw.last_command().map(|c| c.drive),
        Some(FanDrive::Duty(throttle_duty(SpeedLevel::new(3), &cfg)))
    );
}

// ── Time ──────────────────────────────────────────────────────

#[test]
fn millisecond_counter_wraparound_is_harmless() {
    let mut rig = Rig::starting_at(SystemConfig::default(), u32::MAX - 50);
    rig.click(ButtonId::PowerToggle);
    assert_eq!(rig.app.power_state(), PowerState::On);
    rig.click(ButtonId::SpeedUp);
    assert_eq!(rig.app.speed().get(), 6);
    assert_eq!(rig.sink.inputs().len(), 2);
}
