//! Outbound application events.
//!
//! The [`FanController`](super::service::FanController) emits these through
//! the [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them.

use crate::fsm::PowerState;
use crate::fsm::context::SpeedLevel;
use crate::input::LogicalEvent;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// The controller has started (carries initial state).
    Started(PowerState),

    /// A button gesture was resolved and handed to the FSM.
    Input(LogicalEvent),

    /// The FSM transitioned between states.
    StateChanged { from: PowerState, to: PowerState },

    /// The fan speed level changed.
    SpeedChanged { from: SpeedLevel, to: SpeedLevel },

    /// The "hold power for turbo" prompt was shown (`true`) or dismissed.
    TurboPrompt(bool),
}
