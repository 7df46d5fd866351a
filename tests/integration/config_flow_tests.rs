//! Integration tests for the NVS config → bank wiring path used at boot.

use crate::mock_hw::{board, RecordingSink};

use peapod::adapters::nvs::NvsAdapter;
use peapod::actuators::LedColor;
use peapod::app::ports::ConfigPort;
use peapod::app::service::ActuatorService;
use peapod::config::PeaPodConfig;
use peapod::error::ErrorLevel;

#[test]
fn board_without_far_red_boots_with_five_actuators() {
    let nvs = NvsAdapter::new().unwrap();
    let mut config = PeaPodConfig::default();
    config.leds.retain(|l| l.color != LedColor::FarRed);
    config.host_timeout_ms = 0;
    nvs.save(&config).unwrap();

    let loaded = nvs.load().unwrap();
    let (bank, _hw) = board(&loaded);
    let ids: Vec<&str> = bank.ids().map(|id| id.as_str()).collect();
    assert_eq!(ids, ["led-blue", "led-cool", "led-warm", "led-red", "supply"]);

    let mut service = ActuatorService::new(bank, loaded, 0);
    let mut sink = RecordingSink::new();
    assert_eq!(service.start(&mut sink), ErrorLevel::Nominal);

    // A zero host timeout never trips.
    service.tick(u32::MAX, &mut sink);
    assert!(!service.host_link_lost());
}

#[test]
fn rewired_pins_follow_config() {
    let nvs = NvsAdapter::new().unwrap();
    let mut config = PeaPodConfig::default();
    config.supply_pump.pin = 21;
    nvs.save(&config).unwrap();

    let loaded = nvs.load().unwrap();
    assert_eq!(loaded.supply_pump.pin, 21);
    assert_eq!(loaded.led_for(LedColor::Blue), config.led_for(LedColor::Blue));
}

#[test]
fn conflicting_pins_are_refused() {
    let nvs = NvsAdapter::new().unwrap();
    let mut config = PeaPodConfig::default();
    config.supply_pump.pin = config.leds[0].pin;

    assert!(nvs.save(&config).is_err());
    assert_eq!(nvs.load().unwrap(), PeaPodConfig::default());
}
