//! JSON-lines encoding of host commands and responses.
//!
//! ```text
//! host → {"cmd":"set","id":"led-red","target":0.5}
//! mcu  ← {"status":"ok"}
//! host → {"cmd":"status"}
//! mcu  ← {"status":"actuators","actuators":[{"id":"led-red","kind":"pwm",...}]}
//! ```

use super::codec::encode_line;
use crate::app::commands::{Command, Response};
use crate::error::CommandError;

/// Decode one line (terminator already stripped) into a [`Command`].
pub fn decode_command(line: &[u8]) -> Result<Command, CommandError> {
    serde_json::from_slice(line).map_err(|_| CommandError::Malformed)
}

/// Encode a [`Response`] as a newline-terminated JSON line.
pub fn encode_response(response: &Response) -> Result<Vec<u8>, CommandError> {
    let json = serde_json::to_vec(response).map_err(|_| CommandError::EncodeFailed)?;
    let mut out = vec![0u8; json.len() + 1];
    encode_line(&json, &mut out).ok_or(CommandError::EncodeFailed)?;
    Ok(out)
}
