//! Blocking serial reader.
//!
//! Runs in a dedicated thread on target, reading the console UART byte
//! stream, framing it with [`LineDecoder`] and forwarding complete lines
//! to [`CMD_CHANNEL`]. The control loop never blocks on the UART.
//!
//! An empty source is polled again after [`ReaderOptions::idle_backoff`],
//! so a console that reports `WouldBlock` never spins the reader's core.

use std::io::{ErrorKind, Read};
use std::time::Duration;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::Channel;
use log::{debug, info, warn};

use super::channels::{Inbound, LineMsg, CMD_CHANNEL, CMD_DEPTH};
use super::codec::{LineDecoder, LineEvent, MAX_LINE_LEN};

const READ_BUF_SIZE: usize = 64;
const IDLE_BACKOFF: Duration = Duration::from_millis(10);

/// How [`run_with`] treats a source with nothing to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaderOptions {
    /// Sleep before polling again after `WouldBlock`, `Interrupted` or a
    /// zero-byte read that does not end the stream.
    pub idle_backoff: Duration,
    /// Treat a zero-byte read as end of input. The device console never
    /// ends, so this is off on target.
    pub stop_at_eof: bool,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            idle_backoff: IDLE_BACKOFF,
            stop_at_eof: !cfg!(target_os = "espidf"),
        }
    }
}

/// Counters kept by the reader, reported when it exits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReaderStats {
    pub lines: u32,
    pub dropped: u32,
    pub overflows: u32,
}

/// Push one message into `channel`, dropping it if the channel is full.
/// Returns `false` when dropped.
fn forward<M: RawMutex>(
    channel: &Channel<M, Inbound, CMD_DEPTH>,
    msg: Inbound,
    stats: &mut ReaderStats,
) -> bool {
    if channel.try_send(msg).is_err() {
        warn!("Link: command channel full, dropping message");
        stats.dropped += 1;
        return false;
    }
    true
}

/// Feed a chunk of raw bytes through `decoder` into `channel`.
pub fn feed_bytes<M: RawMutex>(
    decoder: &mut LineDecoder,
    channel: &Channel<M, Inbound, CMD_DEPTH>,
    data: &[u8],
    stats: &mut ReaderStats,
) {
    for &byte in data {
        match decoder.feed(byte) {
            Some(LineEvent::Line(line)) => {
                let mut msg = LineMsg::new();
                // Decoder lines never exceed MAX_LINE_LEN, which is the message capacity.
                let _ = msg.extend_from_slice(line);
                if forward(channel, Inbound::Line(msg), stats) {
                    stats.lines += 1;
                }
            }
            Some(LineEvent::Overflow) => {
                warn!("Link: line exceeds {} bytes, discarding", MAX_LINE_LEN);
                stats.overflows += 1;
                forward(channel, Inbound::Overflow, stats);
            }
            None => {}
        }
    }
}

/// Read `reader` until it ends or fails, forwarding lines to the
/// global [`CMD_CHANNEL`].
pub fn run<R: Read>(reader: R) -> ReaderStats {
    run_with(reader, &CMD_CHANNEL, ReaderOptions::default())
}

/// [`run`] against an explicit channel.
pub fn run_into<R: Read, M: RawMutex>(
    reader: R,
    channel: &Channel<M, Inbound, CMD_DEPTH>,
) -> ReaderStats {
    run_with(reader, channel, ReaderOptions::default())
}

pub fn run_with<R: Read, M: RawMutex>(
    mut reader: R,
    channel: &Channel<M, Inbound, CMD_DEPTH>,
    options: ReaderOptions,
) -> ReaderStats {
    let mut decoder = LineDecoder::new();
    let mut stats = ReaderStats::default();
    let mut buf = [0u8; READ_BUF_SIZE];

    info!("Link: reader started");
    loop {
        match reader.read(&mut buf) {
            Ok(0) if options.stop_at_eof => break,
            Ok(0) => std::thread::sleep(options.idle_backoff),
            Ok(n) => feed_bytes(&mut decoder, channel, &buf[..n], &mut stats),
            Err(e) if matches!(e.kind(), ErrorKind::Interrupted | ErrorKind::WouldBlock) => {
                debug!("Link: no input ({})", e);
                std::thread::sleep(options.idle_backoff);
            }
            Err(e) => {
                warn!("Link: read failed: {}", e);
                break;
            }
        }
    }
    info!(
        "Link: reader stopped (lines={} dropped={} overflows={})",
        stats.lines, stats.dropped, stats.overflows
    );
    stats
}
