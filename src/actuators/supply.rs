//! Supply pump: moves nutrient solution from the reservoir into the
//! grow chamber. A plain on/off load behind a MOSFET switch.

use embedded_hal::digital::OutputPin;

use super::onoff::{OnOff, Polarity};
use super::{Actuator, ActuatorId, ActuatorKind, ActuatorState};
use crate::error::ActuatorError;

pub const SUPPLY_PUMP_ID: ActuatorId = ActuatorId::new("supply");

pub struct SupplyPump<P> {
    inner: OnOff<P>,
}

impl<P: OutputPin> SupplyPump<P> {
    pub fn new(pin: u8, output: P) -> Self {
        Self::with_polarity(pin, output, Polarity::ActiveHigh)
    }

    pub fn with_polarity(pin: u8, output: P, polarity: Polarity) -> Self {
        Self {
            inner: OnOff::with_polarity(SUPPLY_PUMP_ID, pin, output, polarity),
        }
    }

    pub fn pin(&self) -> u8 {
        self.inner.pin()
    }

    pub fn is_running(&self) -> bool {
        self.inner.is_on()
    }
}

impl<P: OutputPin> Actuator for SupplyPump<P> {
    fn id(&self) -> ActuatorId {
        self.inner.id()
    }

    fn kind(&self) -> ActuatorKind {
        self.inner.kind()
    }

    fn initialize(&mut self) -> Result<(), ActuatorError> {
        self.inner.initialize()
    }

    fn set(&mut self, target: f32) -> Result<(), ActuatorError> {
        self.inner.set(target)
    }

    fn target(&self) -> f32 {
        self.inner.target()
    }

    fn state(&self) -> ActuatorState {
        self.inner.state()
    }

    fn shutdown(&mut self) -> Result<(), ActuatorError> {
        self.inner.shutdown()
    }
}
