//! Unified error types for the PeaPod firmware.
//!
//! Every actuator operation reports failure through [`ActuatorError`], and
//! every error maps onto a graded [`ErrorLevel`] so the control loop and
//! the host can tell a rejected command apart from a dead output stage.
//! All variants are `Copy` so they can be stored in actuator state and
//! passed through events without allocation.

use core::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Graded severity
// ---------------------------------------------------------------------------

/// Graded status attached to every actuator outcome.
///
/// Ordered from least to most severe, so `max` picks the worst of two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorLevel {
    /// Operation succeeded.
    #[default]
    Nominal,
    /// Informational; nothing went wrong.
    Info,
    /// Request rejected, but hardware is unaffected.
    Warning,
    /// An actuator is unusable until re-initialised.
    Error,
    /// The controller itself is misconfigured.
    Fatal,
}

impl ErrorLevel {
    /// The more severe of two levels.
    pub fn worst(self, other: Self) -> Self {
        self.max(other)
    }

    pub fn is_nominal(self) -> bool {
        self == Self::Nominal
    }

    /// True for `Error` and above.
    pub fn is_failure(self) -> bool {
        self >= Self::Error
    }

    /// Log level used when reporting an outcome of this severity.
    pub fn log_level(self) -> log::Level {
        match self {
            Self::Nominal | Self::Info => log::Level::Info,
            Self::Warning => log::Level::Warn,
            Self::Error | Self::Fatal => log::Level::Error,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Nominal => "nominal",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Fatal => "fatal",
        }
    }
}

impl fmt::Display for ErrorLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Actuator errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActuatorError {
    /// `set` was called before `initialize`.
    NotInitialized,
    /// Target is NaN, infinite, or outside `0.0..=1.0`.
    InvalidTarget,
    /// A previous hardware failure latched; re-initialise first.
    Faulted,
    /// PWM duty-cycle write failed.
    PwmWriteFailed,
    /// GPIO set failed.
    GpioWriteFailed,
    /// No actuator registered under the requested identifier.
    UnknownActuator,
    /// An actuator with the same identifier is already registered.
    DuplicateId,
    /// The actuator bank has no free slots.
    BankFull,
}

impl ActuatorError {
    pub fn level(self) -> ErrorLevel {
        match self {
            Self::InvalidTarget | Self::UnknownActuator => ErrorLevel::Warning,
            Self::NotInitialized
            | Self::Faulted
            | Self::PwmWriteFailed
            | Self::GpioWriteFailed
            | Self::DuplicateId => ErrorLevel::Error,
            Self::BankFull => ErrorLevel::Fatal,
        }
    }

    /// True if this error came from the output stage rather than the request.
    pub fn is_hardware(self) -> bool {
        matches!(self, Self::PwmWriteFailed | Self::GpioWriteFailed)
    }
}

impl fmt::Display for ActuatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotInitialized => write!(f, "actuator not initialized"),
            Self::InvalidTarget => write!(f, "target must be within 0.0..=1.0"),
            Self::Faulted => write!(f, "actuator faulted"),
            Self::PwmWriteFailed => write!(f, "PWM write failed"),
            Self::GpioWriteFailed => write!(f, "GPIO write failed"),
            Self::UnknownActuator => write!(f, "unknown actuator"),
            Self::DuplicateId => write!(f, "duplicate actuator id"),
            Self::BankFull => write!(f, "actuator bank full"),
        }
    }
}

impl From<ActuatorError> for Error {
    fn from(e: ActuatorError) -> Self {
        Self::Actuator(e)
    }
}

// ---------------------------------------------------------------------------
// Host command errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandError {
    /// Line was not valid UTF-8 JSON or did not match any command.
    Malformed,
    /// Line exceeded the decoder buffer.
    TooLong,
    /// Response did not fit the output buffer.
    EncodeFailed,
}

impl CommandError {
    pub fn level(self) -> ErrorLevel {
        match self {
            Self::Malformed | Self::TooLong => ErrorLevel::Warning,
            Self::EncodeFailed => ErrorLevel::Error,
        }
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed => write!(f, "malformed command"),
            Self::TooLong => write!(f, "command line too long"),
            Self::EncodeFailed => write!(f, "response encoding failed"),
        }
    }
}

impl From<CommandError> for Error {
    fn from(e: CommandError) -> Self {
        Self::Command(e)
    }
}

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// An actuator operation failed.
    Actuator(ActuatorError),
    /// A host command could not be decoded or answered.
    Command(CommandError),
    /// Configuration is invalid or could not be loaded.
    Config(&'static str),
    /// Peripheral initialisation failed.
    Init(&'static str),
}

impl Error {
    pub fn level(self) -> ErrorLevel {
        match self {
            Self::Actuator(e) => e.level(),
            Self::Command(e) => e.level(),
            Self::Config(_) | Self::Init(_) => ErrorLevel::Fatal,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Actuator(e) => write!(f, "actuator: {e}"),
            Self::Command(e) => write!(f, "command: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
        }
    }
}

impl core::error::Error for Error {}

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
