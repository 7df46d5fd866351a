//! Application service — the hexagonal core.
//!
//! [`ActuatorService`] owns the actuator bank and the host link
//! supervisor. It turns host commands into actuator operations and
//! reports everything it does through an [`EventSink`].
//!
//! ```text
//!  Command ──▶ ┌────────────────────────┐ ──▶ EventSink
//!              │    ActuatorService     │
//!  Response ◀──│  bank · link failsafe  │
//!              └────────────────────────┘
//! ```

use log::{info, log, warn};

use crate::actuators::ActuatorBank;
use crate::config::PeaPodConfig;
use crate::error::{ActuatorError, CommandError, ErrorLevel};
use crate::failsafe::{FeedOutcome, HostLinkSupervisor};
use crate::link::channels::Inbound;
use crate::link::protocol::decode_command;

use super::commands::{Command, Response, TargetEntry};
use super::events::{AppEvent, OffReason};
use super::ports::EventSink;

/// Firmware version reported to the host.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct ActuatorService<'a> {
    bank: ActuatorBank<'a>,
    link: HostLinkSupervisor,
    config: PeaPodConfig,
}

impl<'a> ActuatorService<'a> {
    /// Construct the service around an already-populated bank.
    ///
    /// Does **not** touch any actuator — call [`start`](Self::start) next.
    pub fn new(bank: ActuatorBank<'a>, config: PeaPodConfig, now_ms: u32) -> Self {
        let link = HostLinkSupervisor::new(config.host_timeout_ms, now_ms);
        Self { bank, link, config }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Initialise every actuator. Returns the worst level encountered.
    pub fn start(&mut self, sink: &mut impl EventSink) -> ErrorLevel {
        sink.emit(&AppEvent::Started {
            actuators: self.bank.len(),
        });
        info!("ActuatorService v{} starting with {} actuator(s)", VERSION, self.bank.len());
        self.initialize_all(sink)
    }

    fn initialize_all(&mut self, sink: &mut impl EventSink) -> ErrorLevel {
        let report = self.bank.initialize_all();
        for &(id, error) in &report.failures {
            sink.emit(&AppEvent::ActuatorFault { id, error });
        }
        sink.emit(&AppEvent::Initialized {
            level: report.level,
        });
        report.level
    }

    // ── Command handling ──────────────────────────────────────

    /// Handle one message from the link reader.
    pub fn handle_inbound(&mut self, msg: &Inbound, now_ms: u32, sink: &mut impl EventSink) -> Response {
        match msg {
            Inbound::Line(line) => self.handle_line(line, now_ms, sink),
            Inbound::Overflow => {
                self.note_host(now_ms, sink);
                let e = CommandError::TooLong;
                Response::error(e.level(), e)
            }
        }
    }

    /// Decode and handle one line from the host.
    pub fn handle_line(&mut self, line: &[u8], now_ms: u32, sink: &mut impl EventSink) -> Response {
        match decode_command(line) {
            Ok(command) => self.handle(command, now_ms, sink),
            Err(e) => {
                // Garbage still proves the host is alive.
                self.note_host(now_ms, sink);
                warn!("Link: rejected line ({} bytes): {}", line.len(), e);
                Response::error(e.level(), e)
            }
        }
    }

    pub fn handle(&mut self, command: Command, now_ms: u32, sink: &mut impl EventSink) -> Response {
        self.note_host(now_ms, sink);

        match command {
            Command::Ping => Response::Pong { version: VERSION },
            Command::Initialize => {
                let level = self.initialize_all(sink);
                if level.is_nominal() {
                    Response::Ok
                } else {
                    Response::error(level, "one or more actuators failed to initialize")
                }
            }
            Command::Set { id, target } => match self.apply(&id, target, sink) {
                Ok(()) => Response::Ok,
                Err(e) => Response::error(e.level(), e),
            },
            Command::SetMany { targets } => self.apply_many(&targets, sink),
            Command::AllOff => {
                self.all_off(OffReason::Commanded, sink);
                Response::Ok
            }
            Command::Status => Response::Actuators {
                actuators: self.bank.status(),
            },
        }
    }

    fn apply(&mut self, id: &str, target: f32, sink: &mut impl EventSink) -> Result<(), ActuatorError> {
        let result = self.bank.set(id, target);
        // Unknown ids have no static identity to report; the response covers them.
        if let Some(actuator) = self.bank.get(id) {
            let id = actuator.id();
            match result {
                Ok(()) => sink.emit(&AppEvent::TargetApplied {
                    id,
                    target: actuator.target(),
                }),
                Err(error) => {
                    log!(error.level().log_level(), "{}: set({}) failed: {}", id, target, error);
                    sink.emit(&AppEvent::ActuatorFault { id, error });
                }
            }
        } else {
            warn!("Set: unknown actuator '{}'", id);
        }
        result
    }

    /// Apply every entry; a failure does not stop later entries.
    fn apply_many(&mut self, targets: &[TargetEntry], sink: &mut impl EventSink) -> Response {
        let mut worst: Option<ActuatorError> = None;
        for entry in targets {
            if let Err(e) = self.apply(&entry.id, entry.target, sink) {
                if worst.is_none_or(|w| e.level() > w.level()) {
                    worst = Some(e);
                }
            }
        }
        match worst {
            None => Response::Ok,
            Some(e) => Response::error(e.level(), e),
        }
    }

    fn all_off(&mut self, reason: OffReason, sink: &mut impl EventSink) {
        let level = self.bank.all_off();
        sink.emit(&AppEvent::AllOff { reason, level });
    }

    fn note_host(&mut self, now_ms: u32, sink: &mut impl EventSink) {
        if self.link.feed(now_ms) == FeedOutcome::Restored {
            sink.emit(&AppEvent::HostRestored);
        }
    }

    // ── Per-tick supervision ──────────────────────────────────

    /// Run the host link failsafe. Call once per control loop iteration.
    pub fn tick(&mut self, now_ms: u32, sink: &mut impl EventSink) {
        if self.link.evaluate(now_ms) {
            sink.emit(&AppEvent::HostTimeout {
                silent_ms: self.link.silent_ms(now_ms),
            });
            self.all_off(OffReason::HostTimeout, sink);
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn bank(&self) -> &ActuatorBank<'a> {
        &self.bank
    }

    pub fn config(&self) -> &PeaPodConfig {
        &self.config
    }

    pub fn host_link_lost(&self) -> bool {
        self.link.is_tripped()
    }
}
