//! Per-tick edge classification of a single button line.
//!
//! | prev        | curr        | classification |
//! |-------------|-------------|----------------|
//! | not pressed | not pressed | `NotPressed`   |
//! | not pressed | pressed     | `JustPressed`  |
//! | pressed     | pressed     | `Held`         |
//! | pressed     | not pressed | `JustReleased` |

/// What a button did between the previous sample and this one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    NotPressed,
    JustPressed,
    Held,
    JustReleased,
}

impl Classification {
    /// Classify a sample against the previous one.
    pub const fn from_levels(prev: bool, curr: bool) -> Self {
        match (prev, curr) {
            (false, false) => Self::NotPressed,
            (false, true) => Self::JustPressed,
            (true, true) => Self::Held,
            (true, false) => Self::JustReleased,
        }
    }

    /// Whether the contact is closed after this sample.
    pub const fn is_down(self) -> bool {
        matches!(self, Self::JustPressed | Self::Held)
    }
}

/// One-sample memory for a button line.
#[derive(Debug, Clone, Copy, Default)]
pub struct GestureClassifier {
    prev: bool,
}

impl GestureClassifier {
    pub const fn new() -> Self {
        Self { prev: false }
    }

    /// Classify `pressed` and remember it for the next tick.
    pub fn classify(&mut self, pressed: bool) -> Classification {
        let c = Classification::from_levels(self.prev, pressed);
        self.prev = pressed;
        c
    }
}
