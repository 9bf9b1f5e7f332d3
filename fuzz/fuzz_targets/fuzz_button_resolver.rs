//! Fuzz target: `ButtonBank::update`
//!
//! Each input byte is one control tick: the low three bits are the button
//! levels and the high five bits the milliseconds since the previous tick.
//! Asserts the resolver never panics and never emits more gestures for a
//! button than that button had rising edges.
//!
//! cargo fuzz run fuzz_button_resolver

#![no_main]

use fanctl::config::SystemConfig;
use fanctl::input::{ButtonBank, ButtonId, ButtonLevels};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut bank = ButtonBank::new(&SystemConfig::default());
    let mut now = u32::MAX - 1_000;
    let mut prev = ButtonLevels::released();
    let mut rising = [0usize; ButtonId::COUNT];
    let mut fired = [0usize; ButtonId::COUNT];

    for &byte in data {
        let levels = ButtonLevels::new(byte & 0b001 != 0, byte & 0b010 != 0, byte & 0b100 != 0);
        now = now.wrapping_add(u32::from(byte >> 3) * 8);

        for id in ButtonId::ALL {
            if levels[id] && !prev[id] {
                rising[id.index()] += 1;
            }
        }
        prev = levels;

        for event in bank.update(levels, now) {
            fired[event.button.index()] += 1;
        }
    }

    for id in ButtonId::ALL {
        assert!(
            fired[id.index()] <= rising[id.index()],
            "{} fired {} times for {} presses",
            id.name(),
            fired[id.index()],
            rising[id.index()]
        );
    }
});
