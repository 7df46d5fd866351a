//! Serial link inter-task channel.
//!
//! Uses an `embassy-sync` bounded channel to bridge the blocking UART
//! reader thread with the control loop. Both sides share the static
//! channel without heap allocation.
//!
//! ```text
//! ┌──────────────┐  Inbound  ┌──────────────┐
//! │ Reader thread│──────────▶│ Control loop │
//! └──────────────┘           └──────────────┘
//! ```

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use heapless::Vec;

use super::codec::MAX_LINE_LEN;

/// One complete line from the host, terminator stripped.
pub type LineMsg = Vec<u8, MAX_LINE_LEN>;

/// What the reader hands to the control loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    /// A complete line.
    Line(LineMsg),
    /// A line exceeded [`MAX_LINE_LEN`] and was discarded.
    Overflow,
}

/// Channel depth for inbound lines.
pub const CMD_DEPTH: usize = 8;

/// Inbound line channel: reader thread → control loop.
pub static CMD_CHANNEL: Channel<CriticalSectionRawMutex, Inbound, CMD_DEPTH> = Channel::new();
