//! Grow light LED channel driver.
//!
//! One PWM output dims one colour string through its constant-current
//! driver. The duty written is `target × max_duty`, rounded to the
//! nearest step.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: `P` is an LEDC channel driver.
//! On host/test: `P` is any mock implementing `SetDutyCycle`.

use embedded_hal::pwm::SetDutyCycle;
use log::{debug, error};
use serde::{Deserialize, Serialize};

use super::{check_ready, check_target, Actuator, ActuatorId, ActuatorKind, ActuatorState};
use crate::error::ActuatorError;

/// Colour classification of an LED channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LedColor {
    Blue,
    CoolWhite,
    WarmWhite,
    Red,
    FarRed,
}

impl LedColor {
    pub const ALL: [LedColor; 5] = [
        Self::Blue,
        Self::CoolWhite,
        Self::WarmWhite,
        Self::Red,
        Self::FarRed,
    ];

    /// Identifier the host uses to address this channel.
    pub const fn actuator_id(self) -> ActuatorId {
        match self {
            Self::Blue => ActuatorId::new("led-blue"),
            Self::CoolWhite => ActuatorId::new("led-cool"),
            Self::WarmWhite => ActuatorId::new("led-warm"),
            Self::Red => ActuatorId::new("led-red"),
            Self::FarRed => ActuatorId::new("led-far"),
        }
    }
}

pub struct Led<P> {
    pin: u8,
    color: LedColor,
    channel: P,
    target: f32,
    state: ActuatorState,
}

impl<P: SetDutyCycle> Led<P> {
    /// `pin` is the GPIO the channel is routed to; it is recorded for
    /// status reporting, the channel itself already owns the pin.
    pub fn new(pin: u8, color: LedColor, channel: P) -> Self {
        Self {
            pin,
            color,
            channel,
            target: 0.0,
            state: ActuatorState::Uninitialized,
        }
    }

    pub fn pin(&self) -> u8 {
        self.pin
    }

    pub fn color(&self) -> LedColor {
        self.color
    }

    /// Duty currently requested from the channel for the stored target.
    pub fn duty(&self) -> u16 {
        Self::duty_for(self.target, self.channel.max_duty_cycle())
    }

    fn duty_for(target: f32, max: u16) -> u16 {
        let duty = (target * f32::from(max) + 0.5) as u16;
        duty.min(max)
    }

    fn write_duty(&mut self, duty: u16) -> Result<(), ActuatorError> {
        self.channel.set_duty_cycle(duty).map_err(|e| {
            error!("LED {} (pin {}): PWM write failed: {:?}", self.color.actuator_id(), self.pin, e);
            ActuatorError::PwmWriteFailed
        })
    }

    fn latch(&mut self, err: ActuatorError) -> ActuatorError {
        self.state = ActuatorState::Faulted(err);
        err
    }
}

impl<P: SetDutyCycle> Actuator for Led<P> {
    fn id(&self) -> ActuatorId {
        self.color.actuator_id()
    }

    fn kind(&self) -> ActuatorKind {
        ActuatorKind::Pwm
    }

    fn initialize(&mut self) -> Result<(), ActuatorError> {
        self.write_duty(0).map_err(|e| self.latch(e))?;
        self.target = 0.0;
        self.state = ActuatorState::Ready;
        debug!(
            "LED {} ready on pin {} (max duty {})",
            self.id(),
            self.pin,
            self.channel.max_duty_cycle()
        );
        Ok(())
    }

    fn set(&mut self, target: f32) -> Result<(), ActuatorError> {
        check_ready(self.state)?;
        let target = check_target(target)?;
        let duty = Self::duty_for(target, self.channel.max_duty_cycle());
        self.write_duty(duty).map_err(|e| self.latch(e))?;
        self.target = target;
        Ok(())
    }

    fn target(&self) -> f32 {
        self.target
    }

    fn state(&self) -> ActuatorState {
        self.state
    }

    fn shutdown(&mut self) -> Result<(), ActuatorError> {
        self.target = 0.0;
        self.write_duty(0).map_err(|e| self.latch(e))
    }
}
