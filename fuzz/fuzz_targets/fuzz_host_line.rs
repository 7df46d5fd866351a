//! Fuzz target: `ActuatorService::handle_line`
//!
//! Feeds each fuzzer input as one host line into a fully populated
//! service. Whatever arrives, no output may ever hold a duty above its
//! maximum, and every actuator must stay addressable.
//!
//! cargo fuzz run fuzz_host_line

#![no_main]

use core::convert::Infallible;

use embedded_hal::digital::{self, OutputPin};
use embedded_hal::pwm::{self, SetDutyCycle};
use libfuzzer_sys::fuzz_target;
use peapod::actuators::{ActuatorBank, Led, LedColor, SupplyPump};
use peapod::app::events::AppEvent;
use peapod::app::ports::EventSink;
use peapod::app::service::ActuatorService;
use peapod::config::PeaPodConfig;
use peapod::link::protocol::encode_response;

struct Channel;

impl pwm::ErrorType for Channel {
    type Error = Infallible;
}

impl SetDutyCycle for Channel {
    fn max_duty_cycle(&self) -> u16 {
        255
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Infallible> {
        assert!(duty <= 255, "duty {duty} above max");
        Ok(())
    }
}

struct Pin;

impl digital::ErrorType for Pin {
    type Error = Infallible;
}

impl OutputPin for Pin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        Ok(())
    }
}

struct Discard;

impl EventSink for Discard {
    fn emit(&mut self, _event: &AppEvent) {}
}

fuzz_target!(|data: &[u8]| {
    let config = PeaPodConfig::default();
    let mut bank = ActuatorBank::new();
    for color in LedColor::ALL {
        bank.register(Box::new(Led::new(0, color, Channel))).unwrap();
    }
    bank.register(Box::new(SupplyPump::new(1, Pin))).unwrap();

    let mut service = ActuatorService::new(bank, config, 0);
    let mut sink = Discard;
    service.start(&mut sink);

    let response = service.handle_line(data, 1, &mut sink);
    encode_response(&response).expect("every response encodes");
    assert_eq!(service.bank().len(), 6);
});
