//! Outbound application events.
//!
//! The [`ActuatorService`](super::service::ActuatorService) emits these
//! through the [`EventSink`](super::ports::EventSink) port.  Adapters on
//! the other side decide what to do with them.

use crate::actuators::ActuatorId;
use crate::error::{ActuatorError, ErrorLevel};

/// Why every actuator was switched off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffReason {
    /// The host asked for it.
    Commanded,
    /// The host went silent for longer than the configured timeout.
    HostTimeout,
}

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The service has started; carries the number of registered actuators.
    Started { actuators: usize },

    /// A bank-wide initialisation finished.
    Initialized { level: ErrorLevel },

    /// A target was applied to one actuator.
    TargetApplied { id: ActuatorId, target: f32 },

    /// An actuator rejected a request or failed in hardware.
    ActuatorFault { id: ActuatorId, error: ActuatorError },

    /// Every actuator was shut off.
    AllOff { reason: OffReason, level: ErrorLevel },

    /// The host link timed out.
    HostTimeout { silent_ms: u32 },

    /// The host came back after a timeout.
    HostRestored,
}
