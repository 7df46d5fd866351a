//! Actuator drivers and the [`Actuator`] capability they share.
//!
//! | Driver        | Output              | Target semantics            |
//! |---------------|---------------------|-----------------------------|
//! | [`Led`]       | PWM (`SetDutyCycle`)| duty = target × max duty    |
//! | [`OnOff`]     | GPIO (`OutputPin`)  | energised when target > 0   |
//! | [`SupplyPump`]| GPIO via `OnOff`    | same as `OnOff`, id `supply`|
//!
//! Every driver is generic over an `embedded-hal` 1.0 trait, so the same
//! code runs against ESP-IDF LEDC/GPIO drivers on target and against mock
//! pins on the host.

pub mod bank;
pub mod led;
pub mod onoff;
pub mod supply;

use core::fmt;

use serde::Serialize;

use crate::error::ActuatorError;

pub use bank::{ActuatorBank, ActuatorStatus, InitReport, MAX_ACTUATORS};
pub use led::{Led, LedColor};
pub use onoff::{OnOff, Polarity};
pub use supply::SupplyPump;

/// Stable identifier of an actuator, used by the host to address it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ActuatorId(&'static str);

impl ActuatorId {
    pub const fn new(id: &'static str) -> Self {
        Self(id)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for ActuatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActuatorKind {
    /// Continuously variable output.
    Pwm,
    /// Two-level output.
    OnOff,
}

/// Lifecycle of a single actuator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActuatorState {
    Uninitialized,
    Ready,
    /// A hardware write failed; `set` is refused until re-initialised.
    Faulted(ActuatorError),
}

/// A controllable physical output.
///
/// Targets are fractions in `0.0..=1.0`. Implementations must leave the
/// output and the stored target untouched when a request is rejected.
pub trait Actuator {
    fn id(&self) -> ActuatorId;

    fn kind(&self) -> ActuatorKind;

    /// Drive the output to its off level and mark the actuator ready.
    /// Idempotent; also clears a latched fault.
    fn initialize(&mut self) -> Result<(), ActuatorError>;

    /// Apply a new target.
    fn set(&mut self, target: f32) -> Result<(), ActuatorError>;

    /// Last successfully applied target.
    fn target(&self) -> f32;

    fn state(&self) -> ActuatorState;

    /// De-energise the output whatever the current state.
    fn shutdown(&mut self) -> Result<(), ActuatorError>;

    fn is_ready(&self) -> bool {
        self.state() == ActuatorState::Ready
    }
}

/// Reject targets outside `0.0..=1.0` (NaN included). `-0.0` comes back
/// as `0.0`.
pub(crate) fn check_target(target: f32) -> Result<f32, ActuatorError> {
    if (0.0..=1.0).contains(&target) {
        Ok(if target == 0.0 { 0.0 } else { target })
    } else {
        Err(ActuatorError::InvalidTarget)
    }
}

/// Gate shared by every driver's `set`.
pub(crate) fn check_ready(state: ActuatorState) -> Result<(), ActuatorError> {
    match state {
        ActuatorState::Ready => Ok(()),
        ActuatorState::Uninitialized => Err(ActuatorError::NotInitialized),
        ActuatorState::Faulted(_) => Err(ActuatorError::Faulted),
    }
}
