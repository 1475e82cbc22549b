#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use bts_wire::action::Action;
use bts_wire::header::HEADER_SIZE;
use bts_wire::{ByteOrder, Device, TraceHeader};

// Fuzz target: write_to → read_from must reproduce every field for any
// header value, in both byte orders.
#[derive(Arbitrary, Debug)]
struct Input {
    sequence: u32,
    time: u64,
    sector: u64,
    bytes: u32,
    action: u32,
    pid: u32,
    device: u32,
    cpu: u32,
    error: u16,
    pdu_len: u16,
    big_endian: bool,
}

fuzz_target!(|input: Input| {
    let order = if input.big_endian {
        ByteOrder::Big
    } else {
        ByteOrder::Little
    };
    let header = TraceHeader {
        sequence: input.sequence,
        time: input.time,
        sector: input.sector,
        bytes: input.bytes,
        action: Action::from_raw(input.action),
        pid: input.pid,
        device: Device::from_raw(input.device),
        cpu: input.cpu,
        error: input.error,
        pdu_len: input.pdu_len,
    };

    let mut buf = [0u8; HEADER_SIZE];
    header.write_to(&mut buf, order).unwrap();
    let parsed = TraceHeader::read_from(&buf, order).unwrap();
    assert_eq!(parsed, header);
});
