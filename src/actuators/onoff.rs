//! Two-level actuator on a digital output (relay, MOSFET switch).
//!
//! Any target above zero energises the output; zero de-energises it.
//! The stored target is the quantised level, so `target()` only ever
//! reads back `0.0` or `1.0`.

use embedded_hal::digital::{OutputPin, PinState};
use log::{debug, error};
use serde::{Deserialize, Serialize};

use super::{check_ready, check_target, Actuator, ActuatorId, ActuatorKind, ActuatorState};
use crate::error::ActuatorError;

/// Electrical level that energises the load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    #[default]
    ActiveHigh,
    ActiveLow,
}

impl Polarity {
    fn pin_state(self, on: bool) -> PinState {
        match (self, on) {
            (Self::ActiveHigh, true) | (Self::ActiveLow, false) => PinState::High,
            (Self::ActiveHigh, false) | (Self::ActiveLow, true) => PinState::Low,
        }
    }
}

pub struct OnOff<P> {
    id: ActuatorId,
    pin: u8,
    output: P,
    polarity: Polarity,
    on: bool,
    state: ActuatorState,
}

impl<P: OutputPin> OnOff<P> {
    pub fn new(id: ActuatorId, pin: u8, output: P) -> Self {
        Self::with_polarity(id, pin, output, Polarity::ActiveHigh)
    }

    pub fn with_polarity(id: ActuatorId, pin: u8, output: P, polarity: Polarity) -> Self {
        Self {
            id,
            pin,
            output,
            polarity,
            on: false,
            state: ActuatorState::Uninitialized,
        }
    }

    pub fn pin(&self) -> u8 {
        self.pin
    }

    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    fn drive(&mut self, on: bool) -> Result<(), ActuatorError> {
        let level = self.polarity.pin_state(on);
        self.output.set_state(level).map_err(|e| {
            error!("{} (pin {}): GPIO write failed: {:?}", self.id, self.pin, e);
            ActuatorError::GpioWriteFailed
        })
    }

    fn latch(&mut self, err: ActuatorError) -> ActuatorError {
        self.state = ActuatorState::Faulted(err);
        err
    }
}

impl<P: OutputPin> Actuator for OnOff<P> {
    fn id(&self) -> ActuatorId {
        self.id
    }

    fn kind(&self) -> ActuatorKind {
        ActuatorKind::OnOff
    }

    fn initialize(&mut self) -> Result<(), ActuatorError> {
        self.drive(false).map_err(|e| self.latch(e))?;
        self.on = false;
        self.state = ActuatorState::Ready;
        debug!("{} ready on pin {} ({:?})", self.id, self.pin, self.polarity);
        Ok(())
    }

    fn set(&mut self, target: f32) -> Result<(), ActuatorError> {
        check_ready(self.state)?;
        let on = check_target(target)? > 0.0;
        self.drive(on).map_err(|e| self.latch(e))?;
        self.on = on;
        Ok(())
    }

    fn target(&self) -> f32 {
        if self.on { 1.0 } else { 0.0 }
    }

    fn state(&self) -> ActuatorState {
        self.state
    }

    fn shutdown(&mut self) -> Result<(), ActuatorError> {
        self.on = false;
        self.drive(false).map_err(|e| self.latch(e))
    }
}
