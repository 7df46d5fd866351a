//! Integration tests for the host line → ActuatorService → actuators pipeline.
//!
//! These run on the host and drive the service exactly as the control
//! loop does, checking what reaches the mock PWM channels and pump pin.

use crate::mock_hw::{board, Board, RecordingSink};

use peapod::actuators::{Actuator, ActuatorId, ActuatorState, LedColor, Polarity};
use peapod::app::commands::{Command, Response};
use peapod::app::events::{AppEvent, OffReason};
use peapod::app::service::{ActuatorService, VERSION};
use peapod::config::PeaPodConfig;
use peapod::error::{ActuatorError, ErrorLevel};
use peapod::link::channels::{Inbound, LineMsg};
use peapod::link::protocol::encode_response;

fn started(config: PeaPodConfig) -> (ActuatorService<'static>, Board, RecordingSink) {
    let (bank, hw) = board(&config);
    let mut service = ActuatorService::new(bank, config, 0);
    let mut sink = RecordingSink::new();
    assert_eq!(service.start(&mut sink), ErrorLevel::Nominal);
    sink.take();
    (service, hw, sink)
}

fn make_service() -> (ActuatorService<'static>, Board, RecordingSink) {
    started(PeaPodConfig::default())
}

fn set(id: &str, target: f32) -> Command {
    Command::Set {
        id: id.try_into().unwrap(),
        target,
    }
}

// ── Startup ───────────────────────────────────────────────────

#[test]
fn start_initializes_every_output_to_off() {
    let config = PeaPodConfig::default();
    let (bank, hw) = board(&config);
    let mut service = ActuatorService::new(bank, config, 0);
    let mut sink = RecordingSink::new();

    assert_eq!(service.start(&mut sink), ErrorLevel::Nominal);
    assert_eq!(
        sink.events,
        vec![
            AppEvent::Started { actuators: 6 },
            AppEvent::Initialized {
                level: ErrorLevel::Nominal
            },
        ]
    );
    for color in LedColor::ALL {
        assert_eq!(hw.last_duty(color), Some(0), "{color:?} should start dark");
    }
    assert_eq!(hw.pump_level(), Some(false));
    assert!(service.bank().status().iter().all(|s| s.state == ActuatorState::Ready));
}

#[test]
fn start_reports_failed_channel_and_keeps_the_rest() {
    let config = PeaPodConfig::default();
    let (bank, hw) = board(&config);
    hw.led(LedColor::FarRed).borrow_mut().fail = true;
    let mut service = ActuatorService::new(bank, config, 0);
    let mut sink = RecordingSink::new();

    assert_eq!(service.start(&mut sink), ErrorLevel::Error);
    assert!(sink.events.contains(&AppEvent::ActuatorFault {
        id: LedColor::FarRed.actuator_id(),
        error: ActuatorError::PwmWriteFailed,
    }));

    let mut sink = RecordingSink::new();
    assert_eq!(service.handle(set("led-blue", 1.0), 10, &mut sink), Response::Ok);
    assert_eq!(hw.last_duty(LedColor::Blue), Some(255));
}

#[test]
fn service_keeps_the_config_it_was_built_with() {
    let mut config = PeaPodConfig::default();
    config.control_loop_interval_ms = 20;
    config.host_timeout_ms = 5_000;
    let (service, _hw, _sink) = started(config.clone());

    assert_eq!(service.config(), &config);
}

#[test]
fn active_low_pump_idles_high() {
    let mut config = PeaPodConfig::default();
    config.supply_pump.polarity = Polarity::ActiveLow;
    let (mut service, hw, mut sink) = started(config);

    assert_eq!(hw.pump_level(), Some(true));
    assert_eq!(service.handle(set("supply", 1.0), 0, &mut sink), Response::Ok);
    assert_eq!(hw.pump_level(), Some(false));
}

// ── Set ───────────────────────────────────────────────────────

#[test]
fn set_line_dims_led_and_emits_event() {
    let (mut service, hw, mut sink) = make_service();

    let response = service.handle_line(br#"{"cmd":"set","id":"led-red","target":0.5}"#, 0, &mut sink);

    assert_eq!(response, Response::Ok);
    assert_eq!(hw.last_duty(LedColor::Red), Some(128));
    assert_eq!(
        sink.events,
        vec![AppEvent::TargetApplied {
            id: ActuatorId::new("led-red"),
            target: 0.5
        }]
    );
}

#[test]
fn invalid_target_is_a_warning_and_leaves_output() {
    let (mut service, hw, mut sink) = make_service();
    service.handle(set("led-warm", 0.25), 0, &mut sink);
    let writes = hw.led(LedColor::WarmWhite).borrow().duties.len();

    for bad in [1.5, -0.1, f32::NAN] {
        let response = service.handle(set("led-warm", bad), 0, &mut sink);
        assert_eq!(response.level(), ErrorLevel::Warning, "target {bad}");
    }

    assert_eq!(hw.led(LedColor::WarmWhite).borrow().duties.len(), writes);
    assert_eq!(service.bank().get("led-warm").unwrap().target(), 0.25);
}

#[test]
fn unknown_actuator_is_a_warning_without_event() {
    let (mut service, _hw, mut sink) = make_service();

    let response = service.handle(set("led-uv", 1.0), 0, &mut sink);

    match response {
        Response::Error { level, message } => {
            assert_eq!(level, ErrorLevel::Warning);
            assert_eq!(message.as_str(), "unknown actuator");
        }
        other => panic!("unexpected {other:?}"),
    }
    assert!(sink.events.is_empty());
}

#[test]
fn set_many_applies_every_valid_entry() {
    let (mut service, hw, mut sink) = make_service();
    let line = br#"{"cmd":"set_many","targets":[
        {"id":"led-blue","target":0.25},
        {"id":"nope","target":1.0},
        {"id":"supply","target":1.0}]}"#;
    let response = service.handle_line(line, 0, &mut sink);

    assert_eq!(response.level(), ErrorLevel::Warning);
    assert_eq!(hw.last_duty(LedColor::Blue), Some(64));
    assert_eq!(hw.pump_level(), Some(true));
    assert_eq!(sink.events.len(), 2);
}

// ── Faults ────────────────────────────────────────────────────

#[test]
fn hardware_fault_latches_until_reinitialized() {
    let (mut service, hw, mut sink) = make_service();
    hw.led(LedColor::Red).borrow_mut().fail = true;

    let response = service.handle(set("led-red", 0.5), 0, &mut sink);
    assert_eq!(response.level(), ErrorLevel::Error);
    assert_eq!(
        sink.take(),
        vec![AppEvent::ActuatorFault {
            id: ActuatorId::new("led-red"),
            error: ActuatorError::PwmWriteFailed
        }]
    );
    assert_eq!(
        service.bank().get("led-red").unwrap().state(),
        ActuatorState::Faulted(ActuatorError::PwmWriteFailed)
    );

    // Hardware recovers, but the fault stays latched.
    hw.led(LedColor::Red).borrow_mut().fail = false;
    let response = service.handle(set("led-red", 0.5), 0, &mut sink);
    assert!(matches!(response, Response::Error { level: ErrorLevel::Error, .. }));
    assert_eq!(
        sink.take(),
        vec![AppEvent::ActuatorFault {
            id: ActuatorId::new("led-red"),
            error: ActuatorError::Faulted
        }]
    );

    assert_eq!(service.handle(Command::Initialize, 0, &mut sink), Response::Ok);
    assert_eq!(service.handle(set("led-red", 0.5), 0, &mut sink), Response::Ok);
    assert_eq!(hw.last_duty(LedColor::Red), Some(128));
}

#[test]
fn pump_gpio_failure_is_reported() {
    let (mut service, hw, mut sink) = make_service();
    hw.pump.borrow_mut().fail = true;

    let response = service.handle(set("supply", 1.0), 0, &mut sink);

    assert_eq!(response.level(), ErrorLevel::Error);
    assert!(sink.events.contains(&AppEvent::ActuatorFault {
        id: ActuatorId::new("supply"),
        error: ActuatorError::GpioWriteFailed
    }));
}

// ── Off / status / ping ───────────────────────────────────────

#[test]
fn off_command_darkens_everything() {
    let (mut service, hw, mut sink) = make_service();
    service.handle(set("led-cool", 1.0), 0, &mut sink);
    service.handle(set("supply", 1.0), 0, &mut sink);
    sink.take();

    let response = service.handle_line(br#"{"cmd":"off"}"#, 0, &mut sink);

    assert_eq!(response, Response::Ok);
    assert_eq!(hw.last_duty(LedColor::CoolWhite), Some(0));
    assert_eq!(hw.pump_level(), Some(false));
    assert_eq!(
        sink.events,
        vec![AppEvent::AllOff {
            reason: OffReason::Commanded,
            level: ErrorLevel::Nominal
        }]
    );
}

#[test]
fn status_lists_actuators_in_registration_order() {
    let (mut service, _hw, mut sink) = make_service();
    service.handle(set("led-far", 0.75), 0, &mut sink);

    let Response::Actuators { actuators } = service.handle(Command::Status, 0, &mut sink) else {
        panic!("status must list actuators");
    };

    let ids: Vec<&str> = actuators.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, ["led-blue", "led-cool", "led-warm", "led-red", "led-far", "supply"]);
    assert_eq!(actuators[4].target, 0.75);
}

#[test]
fn negative_zero_target_reports_as_zero() {
    let (mut service, hw, mut sink) = make_service();
    service.handle(set("led-blue", 0.5), 0, &mut sink);

    let response = service.handle_line(br#"{"cmd":"set","id":"led-blue","target":-0.0}"#, 0, &mut sink);
    assert_eq!(response, Response::Ok);
    assert_eq!(hw.last_duty(LedColor::Blue), Some(0));

    let status = service.handle(Command::Status, 0, &mut sink);
    let json = String::from_utf8(encode_response(&status).unwrap()).unwrap();
    assert!(json.contains(r#""target":0.0"#), "{json}");
    assert!(!json.contains("-0.0"), "{json}");
}

#[test]
fn ping_reports_version() {
    let (mut service, _hw, mut sink) = make_service();
    assert_eq!(
        service.handle_line(br#"{"cmd":"ping"}"#, 0, &mut sink),
        Response::Pong { version: VERSION }
    );
}

#[test]
fn malformed_line_is_rejected_with_warning() {
    let (mut service, _hw, mut sink) = make_service();

    let response = service.handle_line(b"turn the lights on", 0, &mut sink);

    assert_eq!(response.level(), ErrorLevel::Warning);
    assert!(sink.events.is_empty());
}

#[test]
fn overlong_line_gets_an_answer() {
    let (mut service, _hw, mut sink) = make_service();

    match service.handle_inbound(&Inbound::Overflow, 0, &mut sink) {
        Response::Error { level, message } => {
            assert_eq!(level, ErrorLevel::Warning);
            assert_eq!(message.as_str(), "command line too long");
        }
        other => panic!("unexpected {other:?}"),
    }

    let line = LineMsg::from_slice(br#"{"cmd":"status"}"#).unwrap();
    assert!(matches!(
        service.handle_inbound(&Inbound::Line(line), 0, &mut sink),
        Response::Actuators { .. }
    ));
}

// ── Host link failsafe ────────────────────────────────────────

#[test]
fn host_silence_switches_everything_off_once() {
    let mut config = PeaPodConfig::default();
    config.host_timeout_ms = 1_000;
    let (mut service, hw, mut sink) = started(config);
    service.handle(set("supply", 1.0), 0, &mut sink);
    service.handle(set("led-blue", 1.0), 0, &mut sink);
    sink.take();

    service.tick(999, &mut sink);
    assert!(sink.events.is_empty());
    assert_eq!(hw.pump_level(), Some(true));

    service.tick(1_000, &mut sink);
    assert_eq!(
        sink.take(),
        vec![
            AppEvent::HostTimeout { silent_ms: 1_000 },
            AppEvent::AllOff {
                reason: OffReason::HostTimeout,
                level: ErrorLevel::Nominal
            },
        ]
    );
    assert_eq!(hw.pump_level(), Some(false));
    assert_eq!(hw.last_duty(LedColor::Blue), Some(0));
    assert!(service.host_link_lost());

    service.tick(5_000, &mut sink);
    assert!(sink.events.is_empty());
}

#[test]
fn host_traffic_after_timeout_restores_link_but_not_outputs() {
    let mut config = PeaPodConfig::default();
    config.host_timeout_ms = 1_000;
    let (mut service, hw, mut sink) = started(config);
    service.handle(set("supply", 1.0), 0, &mut sink);
    service.tick(2_000, &mut sink);
    sink.take();

    let response = service.handle_line(br#"{"cmd":"ping"}"#, 2_500, &mut sink);

    assert!(matches!(response, Response::Pong { .. }));
    assert_eq!(sink.events, vec![AppEvent::HostRestored]);
    assert!(!service.host_link_lost());
    assert_eq!(hw.pump_level(), Some(false));
}

#[test]
fn garbage_still_counts_as_host_traffic() {
    let mut config = PeaPodConfig::default();
    config.host_timeout_ms = 1_000;
    let (mut service, _hw, mut sink) = started(config);

    service.handle_line(b"{", 900, &mut sink);
    service.tick(1_500, &mut sink);

    assert!(!service.host_link_lost());
    assert!(sink.events.is_empty());
}

#[test]
fn host_timeout_darkens_a_faulted_led() {
    let mut config = PeaPodConfig::default();
    config.host_timeout_ms = 1_000;
    let (mut service, hw, mut sink) = started(config);
    service.handle(set("led-red", 1.0), 0, &mut sink);
    assert_eq!(hw.last_duty(LedColor::Red), Some(255));

    hw.led(LedColor::Red).borrow_mut().fail = true;
    let response = service.handle(set("led-red", 0.5), 0, &mut sink);
    assert_eq!(response.level(), ErrorLevel::Error);
    hw.led(LedColor::Red).borrow_mut().fail = false;
    sink.take();

    service.tick(1_000, &mut sink);

    assert_eq!(hw.last_duty(LedColor::Red), Some(0));
    assert_eq!(
        sink.take(),
        vec![
            AppEvent::HostTimeout { silent_ms: 1_000 },
            AppEvent::AllOff {
                reason: OffReason::HostTimeout,
                level: ErrorLevel::Nominal
            },
        ]
    );
    assert_eq!(
        service.bank().get("led-red").unwrap().state(),
        ActuatorState::Faulted(ActuatorError::PwmWriteFailed)
    );
}
