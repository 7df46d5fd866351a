//! Application core — pure domain logic, zero I/O.
//!
//! This module contains the business rules for the PeaPod controller:
//! host command interpretation, bank-wide lifecycle, and the host link
//! failsafe. All interaction with the outside world happens through the
//! [`Actuator`](crate::actuators::Actuator) capability and the **port
//! traits** defined in [`ports`], keeping this layer fully testable
//! without real peripherals.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
