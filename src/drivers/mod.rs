//! embedded-hal drivers for the front-panel buttons and the fan output.

pub mod buttons;
pub mod fan;
