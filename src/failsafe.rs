//! Host link supervisor.
//!
//! The microcontroller only ever does what the host tells it. If the host
//! crashes with the supply pump running, nothing would ever stop it, so
//! the supervisor watches for host silence and trips once the configured
//! timeout elapses.
//!
//! ## Lifecycle
//!
//! 1. Every received command calls [`feed`](HostLinkSupervisor::feed).
//! 2. Each control tick calls [`evaluate`](HostLinkSupervisor::evaluate).
//!    It returns `true` exactly once per loss of link, at which point the
//!    service shuts every actuator off.
//! 3. The next `feed` re-arms the supervisor. Actuators stay off until
//!    the host sets them again.

use log::{error, info};

/// Outcome of a [`HostLinkSupervisor::feed`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedOutcome {
    /// The link was healthy.
    Alive,
    /// The link had tripped and is now restored.
    Restored,
}

pub struct HostLinkSupervisor {
    timeout_ms: u32,
    last_seen_ms: u32,
    tripped: bool,
}

impl HostLinkSupervisor {
    /// `timeout_ms == 0` disables the supervisor. `now_ms` is the start of
    /// the first grace window.
    pub fn new(timeout_ms: u32, now_ms: u32) -> Self {
        Self {
            timeout_ms,
            last_seen_ms: now_ms,
            tripped: false,
        }
    }

    /// Record host activity.
    pub fn feed(&mut self, now_ms: u32) -> FeedOutcome {
        self.last_seen_ms = now_ms;
        if self.tripped {
            self.tripped = false;
            info!("LINK: host restored");
            FeedOutcome::Restored
        } else {
            FeedOutcome::Alive
        }
    }

    /// Returns `true` when the link has just timed out.
    pub fn evaluate(&mut self, now_ms: u32) -> bool {
        if self.timeout_ms == 0 || self.tripped {
            return false;
        }
        let silent = self.silent_ms(now_ms);
        if silent >= self.timeout_ms {
            error!("LINK: host silent for {} ms (timeout {} ms)", silent, self.timeout_ms);
            self.tripped = true;
            return true;
        }
        false
    }

    /// Milliseconds since the last command, rollover-safe.
    pub fn silent_ms(&self, now_ms: u32) -> u32 {
        now_ms.wrapping_sub(self.last_seen_ms)
    }

    pub fn is_tripped(&self) -> bool {
        self.tripped
    }

    pub fn is_enabled(&self) -> bool {
        self.timeout_ms != 0
    }
}
