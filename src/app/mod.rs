//! Application core — pure domain logic, zero I/O.
//!
//! This module contains the business rules for the fan controller:
//! input → FSM orchestration, fan-command and display mapping, and the
//! gated refresh tasks.  All interaction with hardware happens through
//! **port traits** defined in [`ports`], keeping this layer fully testable
//! without real peripherals.

pub mod events;
pub mod output;
pub mod ports;
pub mod service;
