//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the logger (UART / USB-CDC via `esp_idf_logger` in production).

use log::{debug, info};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started(state) => {
                info!("START | initial_state={:?}", state);
            }
            AppEvent::Input(ev) => {
                debug!("INPUT | {} {:?}", ev.button.name(), ev.gesture);
            }
            AppEvent::StateChanged { from, to } => {
                info!("STATE | {:?} -> {:?}", from, to);
            }
            AppEvent::SpeedChanged { from, to } => {
                info!("SPEED | {} -> {}", from.get(), to.get());
            }
            AppEvent::TurboPrompt(true) => {
                info!("TURBO | prompt shown");
            }
            AppEvent::TurboPrompt(false) => {
                info!("TURBO | prompt dismissed");
            }
        }
    }
}
