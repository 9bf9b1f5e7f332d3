//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter       | Implements       | Connects to                  |
//! |---------------|------------------|------------------------------|
//! | `hardware`    | ButtonInputPort  | GPIO button lines            |
//! |               | FanOutputPort    | LEDC PWM channel + relay     |
//! |               | TachometerPort   | tach input (or none)         |
//! | `log_display` | DisplayPort      | Serial log status line       |
//! | `log_sink`    | EventSink        | Serial log output            |
//! | `time`        | —                | ESP32 system timer           |

pub mod hardware;
pub mod log_display;
pub mod log_sink;
pub mod time;
