#![no_main]

use libfuzzer_sys::fuzz_target;

use bts_wire::{ByteOrder, TraceHeader};

// Fuzz target: TraceHeader::read_from over raw bytes, both byte orders.
//
// Catches bugs in:
// - Out-of-bounds reads around the 48-byte boundary
// - Magic/version validation ordering
// - Byte-order handling of every field
fuzz_target!(|data: &[u8]| {
    let _ = TraceHeader::read_from(data, ByteOrder::Little);
    let _ = TraceHeader::read_from(data, ByteOrder::Big);
});
