//! Inbound commands and their responses.
//!
//! These represent actions requested by the host over the serial link
//! that the [`ActuatorService`](super::service::ActuatorService)
//! interprets and acts upon.  Both directions are serde types; the wire
//! encoding lives in [`link::protocol`](crate::link::protocol).

use core::fmt::Write;

use heapless::{String, Vec};
use serde::{Deserialize, Serialize};

use crate::actuators::{ActuatorStatus, MAX_ACTUATORS};
use crate::error::ErrorLevel;

/// Longest actuator identifier the host may send.
pub const MAX_ID_LEN: usize = 16;

/// Longest error message carried in a response.
pub const MAX_MESSAGE_LEN: usize = 64;

pub type ActuatorName = String<MAX_ID_LEN>;

/// One entry of a batched update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetEntry {
    pub id: ActuatorName,
    pub target: f32,
}

/// Commands that the host can send into the application core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum Command {
    /// Liveness check; also keeps the host link alive.
    Ping,

    /// (Re-)initialise every actuator.
    #[serde(rename = "init")]
    Initialize,

    /// Apply a target to one actuator.
    Set { id: ActuatorName, target: f32 },

    /// Apply several targets in order.
    SetMany { targets: Vec<TargetEntry, MAX_ACTUATORS> },

    /// Shut every actuator off.
    #[serde(rename = "off")]
    AllOff,

    /// Report every actuator's target and state.
    Status,
}

/// Replies to [`Command`]s, one per command.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Response {
    Ok,
    Pong { version: &'static str },
    Error { level: ErrorLevel, message: String<MAX_MESSAGE_LEN> },
    Actuators { actuators: Vec<ActuatorStatus, MAX_ACTUATORS> },
}

impl Response {
    /// Build an error response from anything printable.
    /// Messages longer than [`MAX_MESSAGE_LEN`] are truncated.
    pub fn error(level: ErrorLevel, message: impl core::fmt::Display) -> Self {
        let mut text = String::new();
        let _ = write!(Truncating(&mut text), "{message}");
        Self::Error { level, message: text }
    }

    /// Severity carried by this response; `Nominal` for non-errors.
    pub fn level(&self) -> ErrorLevel {
        match self {
            Self::Error { level, .. } => *level,
            _ => ErrorLevel::Nominal,
        }
    }
}

/// Writer that keeps as much of the text as fits.
struct Truncating<'a>(&'a mut String<MAX_MESSAGE_LEN>);

impl Write for Truncating<'_> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        for c in s.chars() {
            if self.0.push(c).is_err() {
                break;
            }
        }
        Ok(())
    }
}
