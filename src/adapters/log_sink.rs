//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the logger (UART / USB-CDC in production).

use log::{error, info, log, warn};

use crate::app::events::{AppEvent, OffReason};
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started { actuators } => {
                info!("START | actuators={}", actuators);
            }
            AppEvent::Initialized { level } => {
                log!(level.log_level(), "INIT | level={}", level);
            }
            AppEvent::TargetApplied { id, target } => {
                info!("SET | {}={:.3}", id, target);
            }
            AppEvent::ActuatorFault { id, error } => {
                log!(error.level().log_level(), "FAULT | {}: {} ({})", id, error, error.level());
            }
            AppEvent::AllOff { reason, level } => {
                let why = match reason {
                    OffReason::Commanded => "commanded",
                    OffReason::HostTimeout => "host timeout",
                };
                log!(level.log_level(), "OFF | reason={} level={}", why, level);
            }
            AppEvent::HostTimeout { silent_ms } => {
                error!("LINK | host silent for {} ms, outputs off", silent_ms);
            }
            AppEvent::HostRestored => {
                warn!("LINK | host restored");
            }
        }
    }
}
