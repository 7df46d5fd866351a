//! PeaPod actuator firmware — main entry point.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                   Adapters (outer ring)                  │
//! │                                                          │
//! │  hardware (LEDC + GPIO)   LogEventSink   NvsAdapter      │
//! │  link::reader (UART thread)              Watchdog        │
//! │                                                          │
//! │  ─────────────── Port Trait Boundary ───────────────     │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────┐      │
//! │  │        ActuatorService (pure logic)            │      │
//! │  │  ActuatorBank · HostLinkSupervisor             │      │
//! │  └────────────────────────────────────────────────┘      │
//! └──────────────────────────────────────────────────────────┘
//! ```

use std::io::Write;
use std::time::{Duration, Instant};

use anyhow::Result;
use log::{error, info, warn};

use peapod::adapters::hardware;
use peapod::adapters::log_sink::LogEventSink;
use peapod::adapters::nvs::NvsAdapter;
use peapod::adapters::watchdog::Watchdog;
use peapod::app::ports::ConfigPort;
use peapod::app::service::{ActuatorService, VERSION};
use peapod::config::PeaPodConfig;
use peapod::link::channels::CMD_CHANNEL;
use peapod::link::protocol::encode_response;
use peapod::link::reader;

const WATCHDOG_TIMEOUT_MS: u32 = 10_000;
const READER_STACK_SIZE: usize = 6 * 1024;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  PeaPod actuators v{}             ║", VERSION);
    info!("╚══════════════════════════════════════╝");

    let boot = Instant::now();
    // Wraps after ~49 days; every consumer uses wrapping arithmetic.
    let now_ms = || boot.elapsed().as_millis() as u32;

    // ── 2. Load config from NVS (or defaults) ─────────────────
    let config = match NvsAdapter::new().and_then(|nvs| nvs.load()) {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!("NVS config unavailable ({}), using defaults", e);
            PeaPodConfig::default()
        }
    };

    // ── 3. Hardware + service ─────────────────────────────────
    let bank = hardware::build_bank(&config)?;
    let mut sink = LogEventSink::new();
    let mut service = ActuatorService::new(bank, config, now_ms());
    let level = service.start(&mut sink);
    if level.is_failure() {
        error!("Startup finished with level {}; faulted actuators reject commands", level);
    }

    // ── 4. Host link reader ───────────────────────────────────
    hardware::install_console_driver()?;
    std::thread::Builder::new()
        .name("link-rx".into())
        .stack_size(READER_STACK_SIZE)
        .spawn(|| reader::run(std::io::stdin()))?;

    let watchdog = Watchdog::new(WATCHDOG_TIMEOUT_MS);
    let interval = Duration::from_millis(u64::from(service.config().control_loop_interval_ms));
    let mut stdout = std::io::stdout();

    info!("System ready. Entering control loop.");

    // ── 5. Control loop ───────────────────────────────────────
    loop {
        while let Ok(msg) = CMD_CHANNEL.try_receive() {
            let response = service.handle_inbound(&msg, now_ms(), &mut sink);
            match encode_response(&response) {
                Ok(bytes) => {
                    if let Err(e) = stdout.write_all(&bytes).and_then(|()| stdout.flush()) {
                        warn!("Link: response write failed: {}", e);
                    }
                }
                Err(e) => error!("Link: {}", e),
            }
        }

        service.tick(now_ms(), &mut sink);
        watchdog.feed();
        std::thread::sleep(interval);
    }
}
