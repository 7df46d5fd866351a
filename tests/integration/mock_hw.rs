//! Mock hardware for integration tests.
//!
//! Each mock output shares its write log with the test through an
//! `Rc<RefCell<_>>`, so the bank can own the output while the test
//! still inspects every duty cycle or pin level it received.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use embedded_hal::{digital, pwm};
use peapod::actuators::{ActuatorBank, Led, LedColor, SupplyPump};
use peapod::app::events::AppEvent;
use peapod::app::ports::EventSink;
use peapod::config::PeaPodConfig;

// ── Shared fault type ─────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockFault;

impl pwm::Error for MockFault {
    fn kind(&self) -> pwm::ErrorKind {
        pwm::ErrorKind::Other
    }
}

impl digital::Error for MockFault {
    fn kind(&self) -> digital::ErrorKind {
        digital::ErrorKind::Other
    }
}

// ── PWM channel ───────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct PwmLog {
    pub duties: Vec<u16>,
    pub fail: bool,
}

pub type PwmHandle = Rc<RefCell<PwmLog>>;

pub struct MockPwm {
    log: PwmHandle,
}

impl MockPwm {
    pub fn new() -> (Self, PwmHandle) {
        let log = PwmHandle::default();
        (Self { log: log.clone() }, log)
    }
}

impl pwm::ErrorType for MockPwm {
    type Error = MockFault;
}

impl pwm::SetDutyCycle for MockPwm {
    fn max_duty_cycle(&self) -> u16 {
        255
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        let mut log = self.log.borrow_mut();
        if log.fail {
            return Err(MockFault);
        }
        log.duties.push(duty);
        Ok(())
    }
}

// ── GPIO output ───────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct PinLog {
    /// Electrical levels written, `true` = high.
    pub levels: Vec<bool>,
    pub fail: bool,
}

pub type PinHandle = Rc<RefCell<PinLog>>;

pub struct MockPin {
    log: PinHandle,
}

impl MockPin {
    pub fn new() -> (Self, PinHandle) {
        let log = PinHandle::default();
        (Self { log: log.clone() }, log)
    }

    fn write(&mut self, high: bool) -> Result<(), MockFault> {
        let mut log = self.log.borrow_mut();
        if log.fail {
            return Err(MockFault);
        }
        log.levels.push(high);
        Ok(())
    }
}

impl digital::ErrorType for MockPin {
    type Error = MockFault;
}

impl digital::OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.write(false)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.write(true)
    }
}

// ── Board ─────────────────────────────────────────────────────

/// Handles to every output of a bank built by [`board`].
pub struct Board {
    pub leds: HashMap<LedColor, PwmHandle>,
    pub pump: PinHandle,
}

#[allow(dead_code)]
impl Board {
    pub fn led(&self, color: LedColor) -> &PwmHandle {
        &self.leds[&color]
    }

    pub fn last_duty(&self, color: LedColor) -> Option<u16> {
        self.led(color).borrow().duties.last().copied()
    }

    pub fn pump_level(&self) -> Option<bool> {
        self.pump.borrow().levels.last().copied()
    }
}

/// Build a bank wired the way `config` describes, backed by mocks.
pub fn board(config: &PeaPodConfig) -> (ActuatorBank<'static>, Board) {
    let mut bank = ActuatorBank::new();
    let mut leds = HashMap::new();
    for led in &config.leds {
        let (pwm, handle) = MockPwm::new();
        bank.register(Box::new(Led::new(led.pin, led.color, pwm))).unwrap();
        leds.insert(led.color, handle);
    }
    let (pin, pump) = MockPin::new();
    bank.register(Box::new(SupplyPump::with_polarity(
        config.supply_pump.pin,
        pin,
        config.supply_pump.polarity,
    )))
    .unwrap();
    (bank, Board { leds, pump })
}

// ── Event sink ────────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&mut self) -> Vec<AppEvent> {
        std::mem::take(&mut self.events)
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
