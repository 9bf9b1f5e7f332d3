//! Button input pipeline: raw levels → classification → logical events.
//!
//! ```text
//!  ButtonLevels ──▶ GestureClassifier ──▶ ButtonTracker ──▶ LogicalEvent
//!   (3 × bool)       (edge / hold)        (debounce,        (Click | Hold,
//!                                          click/hold)        per button)
//! ```
//!
//! Per-button state lives in a fixed array indexed by [`ButtonId`] ordinal,
//! so one button's transient state can never drift out of step with another's.

pub mod gesture;
pub mod resolver;

use core::ops::{Index, IndexMut};

use heapless::Vec;

use crate::config::SystemConfig;
pub use gesture::Classification;
pub use resolver::{ButtonTracker, Gesture, ResolverTiming};

// ---------------------------------------------------------------------------
// Button identity
// ---------------------------------------------------------------------------

/// The three physical controls on the front panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ButtonId {
    SpeedUp = 0,
    SpeedDown = 1,
    PowerToggle = 2,
}

impl ButtonId {
    /// Total number of buttons — used to size per-button arrays.
    pub const COUNT: usize = 3;

    /// All buttons in ordinal order.
    pub const ALL: [Self; Self::COUNT] = [Self::SpeedUp, Self::SpeedDown, Self::PowerToggle];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::SpeedUp => "SpeedUp",
            Self::SpeedDown => "SpeedDown",
            Self::PowerToggle => "PowerToggle",
        }
    }
}

// ---------------------------------------------------------------------------
// Raw levels
// ---------------------------------------------------------------------------

/// One sample of every button line, `true` = pressed (polarity already applied).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonLevels([bool; ButtonId::COUNT]);

impl ButtonLevels {
    pub const fn new(speed_up: bool, speed_down: bool, power: bool) -> Self {
        Self([speed_up, speed_down, power])
    }

    /// No button pressed.
    pub const fn released() -> Self {
        Self([false; ButtonId::COUNT])
    }

    /// Only `id` pressed.
    pub fn only(id: ButtonId) -> Self {
        let mut levels = Self::released();
        levels[id] = true;
        levels
    }
}

impl Index<ButtonId> for ButtonLevels {
    type Output = bool;

    fn index(&self, id: ButtonId) -> &bool {
        &self.0[id.index()]
    }
}

impl IndexMut<ButtonId> for ButtonLevels {
    fn index_mut(&mut self, id: ButtonId) -> &mut bool {
        &mut self.0[id.index()]
    }
}

// ---------------------------------------------------------------------------
// Logical events
// ---------------------------------------------------------------------------

/// A resolved gesture tagged with the button that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogicalEvent {
    pub button: ButtonId,
    pub gesture: Gesture,
}

impl LogicalEvent {
    pub const fn click(button: ButtonId) -> Self {
        Self {
            button,
            gesture: Gesture::Click,
        }
    }

    pub const fn hold(button: ButtonId) -> Self {
        Self {
            button,
            gesture: Gesture::Hold,
        }
    }
}

/// Events resolved in one tick — never more than one per button.
pub type TickEvents = Vec<LogicalEvent, { ButtonId::COUNT }>;

// ---------------------------------------------------------------------------
// Button bank
// ---------------------------------------------------------------------------

/// Transient state for every button, indexed by [`ButtonId`].
pub struct ButtonBank {
    trackers: [ButtonTracker; ButtonId::COUNT],
    timing: ResolverTiming,
}

impl ButtonBank {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            trackers: [ButtonTracker::new(); ButtonId::COUNT],
            timing: ResolverTiming::from_config(config),
        }
    }

    /// Feed one sample of every line.  Returns the events resolved on this
    /// tick in button ordinal order.
    pub fn update(&mut self, levels: ButtonLevels, now_ms: u32) -> TickEvents {
        let mut events = TickEvents::new();
        for id in ButtonId::ALL {
            if let Some(gesture) = self.trackers[id.index()].update(levels[id], now_ms, &self.timing) {
                // Capacity equals the button count, so this cannot overflow.
                let _ = events.push(LogicalEvent { button: id, gesture });
            }
        }
        events
    }

    pub fn tracker(&self, id: ButtonId) -> &ButtonTracker {
        &self.trackers[id.index()]
    }
}
