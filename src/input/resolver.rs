//! Debounce and Click/Hold resolution for a single button.
//!
//! Consumes one [`Classification`] per control tick and emits at most one
//! [`Gesture`] per physical press.  All timing is "elapsed since mark" with
//! wrapping `u32` millisecond arithmetic, so a counter rollover mid-press is
//! harmless.
//!
//! ```text
//!            JustPressed            Held ≥ debounce          Held ≥ hold
//!   Idle ───────────────▶ Contact ─────────────────▶ Pressed ────────────▶ Spent
//!    ▲  ◀──────────────────  │                        │  ▲                   │
//!    │     JustReleased      │            JustReleased│  │JustPressed        │
//!    │     (bounce)                                   ▼  │ (chatter)         │
//!    └───────────────── Click ◀── open ≥ debounce ── Releasing               │
//!    └───────────────────────────────────── open ≥ debounce ◀────────────────┘
//! ```
//!
//! Every transition moves the mark to "now", so a flickering contact keeps
//! pushing the release window out until it settles.
//!
//! A release is judged by how long the contact has been closed, not by which
//! phase the previous sample reached, so a late tick cannot lose a press.

use super::gesture::{Classification, GestureClassifier};
use crate::config::SystemConfig;

/// Logical gesture resolved from a press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    /// Short press, fired once the contact has been stably open for the
    /// debounce window.
    Click,
    /// Long press, fired while the contact is still closed.
    Hold,
}

/// Timing parameters shared by every button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolverTiming {
    pub debounce_ms: u32,
    pub hold_ms: u32,
    pub repeat_hold: bool,
}

impl ResolverTiming {
    pub fn from_config(config: &SystemConfig) -> Self {
        Self {
            debounce_ms: config.debounce_ms,
            hold_ms: config.hold_ms,
            repeat_hold: config.repeat_hold,
        }
    }
}

impl Default for ResolverTiming {
    fn default() -> Self {
        Self::from_config(&SystemConfig::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PressPhase {
    /// Contact open, nothing pending.
    Idle,
    /// Contact closed but not yet stable for the debounce window.
    Contact,
    /// Confirmed press, no gesture emitted yet.
    Pressed,
    /// Confirmed press released; Click pending until the line settles.
    Releasing,
    /// Gesture already emitted; waiting for the line to settle open.
    Spent,
}

/// Per-button transient state.
#[derive(Debug, Clone, Copy)]
pub struct ButtonTracker {
    classifier: GestureClassifier,
    phase: PressPhase,
    /// Timestamp of the last transition (ms, wrapping).
    mark_ms: u32,
}

impl Default for ButtonTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ButtonTracker {
    pub const fn new() -> Self {
        Self {
            classifier: GestureClassifier::new(),
            phase: PressPhase::Idle,
            mark_ms: 0,
        }
    }

    /// Feed one raw sample.  Returns the gesture resolved on this tick, if any.
    pub fn update(&mut self, pressed: bool, now_ms: u32, timing: &ResolverTiming) -> Option<Gesture> {
        let class = self.classifier.classify(pressed);
        self.resolve(class, now_ms, timing)
    }

    /// Whether the current press (if any) can no longer produce a gesture.
    pub fn is_processed(&self) -> bool {
        matches!(self.phase, PressPhase::Idle | PressPhase::Spent)
    }

    fn resolve(&mut self, class: Classification, now_ms: u32, t: &ResolverTiming) -> Option<Gesture> {
        use Classification::{Held, JustPressed, JustReleased, NotPressed};

        let elapsed = now_ms.wrapping_sub(self.mark_ms);

        match (self.phase, class) {
            (PressPhase::Idle, JustPressed) => {
                self.enter(PressPhase::Contact, now_ms);
                None
            }

            (PressPhase::Contact, Held) if elapsed >= t.debounce_ms => {
                // Confirmed; keep the contact mark so hold time counts from it.
                self.phase = PressPhase::Pressed;
                self.check_hold(elapsed, now_ms, t)
            }
            // A late tick can see the whole press as one closed sample.
            (PressPhase::Contact | PressPhase::Pressed, JustReleased) if elapsed >= t.hold_ms => {
                self.enter(PressPhase::Spent, now_ms);
                Some(Gesture::Hold)
            }
            (PressPhase::Contact | PressPhase::Pressed, JustReleased) if elapsed >= t.debounce_ms => {
                self.enter(PressPhase::Releasing, now_ms);
                None
            }
            (PressPhase::Contact, JustReleased) => {
                self.enter(PressPhase::Idle, now_ms);
                None
            }

            (PressPhase::Pressed, Held) => self.check_hold(elapsed, now_ms, t),
            (PressPhase::Pressed, JustReleased) => {
                self.enter(PressPhase::Releasing, now_ms);
                None
            }

            (PressPhase::Releasing, NotPressed) if elapsed >= t.debounce_ms => {
                self.enter(PressPhase::Idle, now_ms);
                Some(Gesture::Click)
            }
            (PressPhase::Releasing, JustPressed) => {
                self.enter(PressPhase::Pressed, now_ms);
                None
            }

            (PressPhase::Spent, Held) if t.repeat_hold && elapsed >= t.hold_ms => {
                self.mark_ms = now_ms;
                Some(Gesture::Hold)
            }
            (PressPhase::Spent, JustPressed | JustReleased) => {
                self.mark_ms = now_ms;
                None
            }
            (PressPhase::Spent, NotPressed) if elapsed >= t.debounce_ms => {
                self.enter(PressPhase::Idle, now_ms);
                None
            }

            _ => None,
        }
    }

    fn check_hold(&mut self, elapsed: u32, now_ms: u32, t: &ResolverTiming) -> Option<Gesture> {
        if elapsed >= t.hold_ms {
            self.enter(PressPhase::Spent, now_ms);
            Some(Gesture::Hold)
        } else {
            None
        }
    }

    fn enter(&mut self, phase: PressPhase, now_ms: u32) {
        self.phase = phase;
        self.mark_ms = now_ms;
    }
}
