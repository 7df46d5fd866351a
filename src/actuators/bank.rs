//! The actuator bank: every output on the board behind one dispatch
//! point, addressed by [`ActuatorId`].
//!
//! The bank owns its actuators as trait objects so LED channels and
//! on/off loads with different pin types can live side by side.
//! Capacity is fixed; registration order is preserved for status reports.

use heapless::Vec;
use log::{info, log, warn};
use serde::Serialize;

use super::{Actuator, ActuatorId, ActuatorKind, ActuatorState};
use crate::error::{ActuatorError, ErrorLevel};

/// Five LED channels, the supply pump, and room for two more loads.
pub const MAX_ACTUATORS: usize = 8;

/// Point-in-time view of one actuator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ActuatorStatus {
    pub id: ActuatorId,
    pub kind: ActuatorKind,
    pub target: f32,
    pub state: ActuatorState,
}

/// Outcome of [`ActuatorBank::initialize_all`].
#[derive(Debug, Clone, Default)]
pub struct InitReport {
    /// Worst level across all actuators; `Nominal` if every one came up.
    pub level: ErrorLevel,
    pub failures: Vec<(ActuatorId, ActuatorError), MAX_ACTUATORS>,
}

impl InitReport {
    pub fn is_nominal(&self) -> bool {
        self.level.is_nominal()
    }
}

pub struct ActuatorBank<'a> {
    actuators: Vec<Box<dyn Actuator + 'a>, MAX_ACTUATORS>,
}

impl<'a> ActuatorBank<'a> {
    pub fn new() -> Self {
        Self { actuators: Vec::new() }
    }

    pub fn register(&mut self, actuator: Box<dyn Actuator + 'a>) -> Result<(), ActuatorError> {
        let id = actuator.id();
        if self.get(id.as_str()).is_some() {
            warn!("Bank: duplicate actuator id '{}'", id);
            return Err(ActuatorError::DuplicateId);
        }
        self.actuators.push(actuator).map_err(|_| {
            warn!("Bank: no slot for '{}' (capacity {})", id, MAX_ACTUATORS);
            ActuatorError::BankFull
        })?;
        info!("Bank: registered '{}'", id);
        Ok(())
    }

    /// Initialise every actuator, continuing past failures.
    pub fn initialize_all(&mut self) -> InitReport {
        let mut report = InitReport::default();
        for actuator in &mut self.actuators {
            if let Err(e) = actuator.initialize() {
                log!(e.level().log_level(), "Bank: '{}' failed to initialize: {}", actuator.id(), e);
                report.level = report.level.worst(e.level());
                // Capacity matches the bank, so this cannot overflow.
                let _ = report.failures.push((actuator.id(), e));
            }
        }
        info!(
            "Bank: initialized {} actuator(s), {} failure(s), level={}",
            self.actuators.len(),
            report.failures.len(),
            report.level
        );
        report
    }

    pub fn set(&mut self, id: &str, target: f32) -> Result<(), ActuatorError> {
        let actuator = self.get_mut(id).ok_or(ActuatorError::UnknownActuator)?;
        actuator.set(target)
    }

    /// Shut every actuator off. Returns the worst level encountered.
    pub fn all_off(&mut self) -> ErrorLevel {
        let mut level = ErrorLevel::Nominal;
        for actuator in &mut self.actuators {
            if let Err(e) = actuator.shutdown() {
                log!(e.level().log_level(), "Bank: '{}' shutdown failed: {}", actuator.id(), e);
                level = level.worst(e.level());
            }
        }
        level
    }

    pub fn status(&self) -> Vec<ActuatorStatus, MAX_ACTUATORS> {
        self.actuators
            .iter()
            .map(|a| ActuatorStatus {
                id: a.id(),
                kind: a.kind(),
                target: a.target(),
                state: a.state(),
            })
            .collect()
    }

    pub fn get(&self, id: &str) -> Option<&(dyn Actuator + 'a)> {
        self.actuators
            .iter()
            .find(|a| a.id().as_str() == id)
            .map(|a| &**a)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut (dyn Actuator + 'a)> {
        self.actuators
            .iter_mut()
            .find(|a| a.id().as_str() == id)
            .map(|a| &mut **a)
    }

    pub fn ids(&self) -> impl Iterator<Item = ActuatorId> + '_ {
        self.actuators.iter().map(|a| a.id())
    }

    pub fn len(&self) -> usize {
        self.actuators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actuators.is_empty()
    }
}

impl Default for ActuatorBank<'_> {
    fn default() -> Self {
        Self::new()
    }
}
