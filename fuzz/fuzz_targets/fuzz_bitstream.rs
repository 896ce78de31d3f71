#![no_main]

use libfuzzer_sys::fuzz_target;
use message_components::core::bitstream::{BitBuffer, BitStream};

fuzz_target!(|data: &[u8]| {
    // First byte drives the field widths, the rest is the stream body
    let Some((&widths, body)) = data.split_first() else {
        return;
    };
    let mut stream = BitStream::from_bytes(body);
    let mut width = usize::from(widths % 33);
    while stream.bits_remaining() > 0 {
        if stream.read_bits(width).is_err() {
            break;
        }
        width = (width * 7 + 3) % 33;
    }
    stream.rewind();
    let _ = stream.read_string();
});
