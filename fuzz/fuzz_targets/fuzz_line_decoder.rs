//! Fuzz target: `LineDecoder::feed` → `decode_command`
//!
//! Streams arbitrary bytes through the newline framer and decodes every
//! line it yields. Neither stage may panic, and no line may exceed the
//! decoder buffer or carry its terminator.
//!
//! cargo fuzz run fuzz_line_decoder

#![no_main]

use libfuzzer_sys::fuzz_target;
use peapod::link::codec::{LineDecoder, LineEvent, MAX_LINE_LEN};
use peapod::link::protocol::decode_command;

fuzz_target!(|data: &[u8]| {
    let mut decoder = LineDecoder::new();

    for &byte in data {
        if let Some(LineEvent::Line(line)) = decoder.feed(byte) {
            assert!(!line.is_empty(), "decoder must not yield empty lines");
            assert!(line.len() <= MAX_LINE_LEN, "line exceeds MAX_LINE_LEN");
            assert!(!line.contains(&b'\n'));
            let _ = decode_command(line);
        }
    }

    // After a reset the decoder must accept bytes cleanly again.
    decoder.reset();
    assert_eq!(decoder.pending(), 0);
});
