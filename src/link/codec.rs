//! Newline-delimited frame codec.
//!
//! Wire format:
//! ```text
//! ┌──────────────────────────────┬────┐
//! │ UTF-8 JSON payload (≤ 256 B) │ \n │
//! └──────────────────────────────┴────┘
//! ```
//!
//! The decoder accumulates incoming bytes one at a time and yields
//! complete lines. A trailing `\r` is stripped and blank lines are
//! skipped, so terminals sending `\r\n` work unchanged. A line that
//! outgrows the buffer is reported once and then discarded up to the
//! next newline.

/// Maximum line payload size, excluding the terminator.
pub const MAX_LINE_LEN: usize = 256;

/// What a fed byte completed.
#[derive(Debug, PartialEq, Eq)]
pub enum LineEvent<'a> {
    /// A complete line, terminator stripped.
    Line(&'a [u8]),
    /// The current line exceeded [`MAX_LINE_LEN`] and is being dropped.
    Overflow,
}

/// Streaming line decoder.
pub struct LineDecoder {
    buf: [u8; MAX_LINE_LEN],
    len: usize,
    discarding: bool,
    /// A `\r` seen while the buffer was full, held until the next byte.
    held_cr: bool,
}

impl LineDecoder {
    pub fn new() -> Self {
        Self {
            buf: [0; MAX_LINE_LEN],
            len: 0,
            discarding: false,
            held_cr: false,
        }
    }

    /// Feed one byte into the decoder.
    ///
    /// The returned line borrows the decoder and is valid until the next
    /// call to `feed`.
    pub fn feed(&mut self, byte: u8) -> Option<LineEvent<'_>> {
        if byte == b'\n' {
            let len = self.len;
            let discarding = self.discarding;
            let held_cr = self.held_cr;
            self.len = 0;
            self.discarding = false;
            self.held_cr = false;
            if discarding {
                return None;
            }
            let mut line = &self.buf[..len];
            if let (false, [head @ .., b'\r']) = (held_cr, line) {
                line = head;
            }
            if line.is_empty() {
                return None;
            }
            return Some(LineEvent::Line(line));
        }

        if self.discarding {
            return None;
        }
        if self.len == MAX_LINE_LEN {
            // A full payload may still be followed by `\r\n`.
            if byte == b'\r' && !self.held_cr {
                self.held_cr = true;
                return None;
            }
            self.len = 0;
            self.held_cr = false;
            self.discarding = true;
            return Some(LineEvent::Overflow);
        }
        self.buf[self.len] = byte;
        self.len += 1;
        None
    }

    /// Number of bytes buffered for the current line.
    pub fn pending(&self) -> usize {
        self.len
    }

    /// Reset decoder state (e.g. after a UART error).
    pub fn reset(&mut self) {
        self.len = 0;
        self.discarding = false;
        self.held_cr = false;
    }
}

impl Default for LineDecoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode a payload into a newline-terminated line.
///
/// Writes `[payload]\n` into `out_buf`. Returns the total number of bytes
/// written, or `None` if the payload contains a newline or does not fit.
pub fn encode_line(payload: &[u8], out_buf: &mut [u8]) -> Option<usize> {
    let total = payload.len() + 1;
    if total > out_buf.len() || payload.contains(&b'\n') {
        return None;
    }
    out_buf[..payload.len()].copy_from_slice(payload);
    out_buf[payload.len()] = b'\n';
    Some(total)
}
