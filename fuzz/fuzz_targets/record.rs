#![no_main]

use bytes::Bytes;
use libfuzzer_sys::fuzz_target;

use bts_decoder::decode_record;
use bts_wire::ByteOrder;

// Fuzz target: decode_record over raw frame bytes.
//
// Catches bugs in:
// - Payload length validation against pdu_len
// - Slicing past the end of short frames
fuzz_target!(|data: &[u8]| {
    let frame = Bytes::copy_from_slice(data);
    let _ = decode_record(&frame, ByteOrder::Little);
    let _ = decode_record(&frame, ByteOrder::Big);
});
