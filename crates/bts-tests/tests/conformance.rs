//! Conformance vector: a byte-exact little-endian frame assembled by
//! hand, pinned against both the decoder and the encoder so the wire
//! layout can never drift silently.

use bts_decoder::decode_record;
use bts_encoder::RecordEncoder;
use bts_wire::action::{Action, ActionCode, Categories};
use bts_wire::header::HEADER_SIZE;
use bts_wire::{ByteOrder, Device, TraceHeader, TraceRecord};
use bytes::Bytes;

/// A queue/get-rq event: sequence=1, time=1000ns, sector=0, bytes=4096,
/// pid=42, device=0x0800, cpu=0, error=0, no payload.
#[rustfmt::skip]
const VECTOR: [u8; HEADER_SIZE] = [
    0x07, 0x74, 0x61, 0x65,                         // magic: 0x65617407
    0x01, 0x00, 0x00, 0x00,                         // sequence: 1
    0xE8, 0x03, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // time: 1000
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // sector: 0
    0x00, 0x10, 0x00, 0x00,                         // bytes: 4096
    0x04, 0x00, 0x10, 0x00,                         // action: QUEUE | get-rq
    0x2A, 0x00, 0x00, 0x00,                         // pid: 42
    0x00, 0x08, 0x00, 0x00,                         // device: 0x0800
    0x00, 0x00, 0x00, 0x00,                         // cpu: 0
    0x00, 0x00,                                     // error: 0
    0x00, 0x00,                                     // pdu_len: 0
];

fn vector_record() -> TraceRecord {
    TraceRecord::new(
        TraceHeader {
            sequence: 1,
            time: 1000,
            sector: 0,
            bytes: 4096,
            action: Action::new(Categories::QUEUE, ActionCode::GetRq),
            pid: 42,
            device: Device::from_raw(0x0800),
            cpu: 0,
            error: 0,
            pdu_len: 0,
        },
        Bytes::new(),
    )
}

#[test]
fn vector_decodes_to_expected_record() {
    let record = decode_record(&Bytes::from_static(&VECTOR), ByteOrder::Little).unwrap();
    assert_eq!(record, vector_record());
    assert!(record.payload.is_empty());
}

#[test]
fn vector_action_decomposes() {
    let record = decode_record(&Bytes::from_static(&VECTOR), ByteOrder::Little).unwrap();
    let action = record.header.action;
    assert_eq!(action.categories(), Categories::QUEUE);
    assert_eq!(action.code(), Some(ActionCode::GetRq));
    assert!(!action.is_cgroup_tagged());
    assert_eq!(action.notify(), None);
}

#[test]
fn encoder_reproduces_vector_bytes() {
    let bytes = RecordEncoder::new(ByteOrder::Little)
        .encode(&vector_record())
        .unwrap();
    assert_eq!(&bytes[..], &VECTOR[..]);
}

#[test]
fn summary_line_is_stable() {
    let record = decode_record(&Bytes::from_static(&VECTOR), ByteOrder::Little).unwrap();
    insta::assert_snapshot!(
        record.to_string(),
        @"seq=1 t=1000ns dev=0,2048 cpu=0 pid=42 queue get-rq sector=0 bytes=4096"
    );
}
