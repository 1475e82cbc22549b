//! Fault taxonomy tests: truncation, oversize guarding, and magic
//! rejection, including the caller-driven resynchronisation boundary.

use bts_decoder::{DecodeError, FrameConfig, FrameError, FrameReader, decode_record};
use bts_tests::fixtures::{decode_all, encode_stream, sample_record, sample_records};
use bts_wire::header::{HEADER_SIZE, PDU_LEN_OFFSET};
use bts_wire::{ByteOrder, WireError};

// ── Truncation ────────────────────────────────────────────────────────────────

#[test]
fn truncation_at_every_length_of_final_frame() {
    let complete = sample_records(2);
    let last = sample_record(2, b"final pdu");
    let mut records = complete.clone();
    records.push(last.clone());

    let bytes = encode_stream(&records, ByteOrder::Little);
    let last_frame_len = HEADER_SIZE + usize::from(last.header.pdu_len);
    let prefix_len = bytes.len() - last_frame_len;

    // Every strictly-partial length of the final frame must fault, with
    // exactly the complete prefix decoded and nothing spurious.
    for kept in 1..last_frame_len {
        let truncated = &bytes[..prefix_len + kept];
        let result = decode_all(truncated, FrameConfig::default());
        match result {
            Err(DecodeError::Frame(FrameError::Truncated { buffered })) => {
                assert_eq!(buffered, kept, "kept {kept} bytes");
            }
            other => panic!("kept {kept} bytes: expected Truncated, got {other:?}"),
        }
    }
}

#[test]
fn truncation_inside_first_header() {
    let bytes = encode_stream(&sample_records(1), ByteOrder::Little);
    let result = decode_all(&bytes[..10], FrameConfig::default());
    assert!(matches!(
        result,
        Err(DecodeError::Frame(FrameError::Truncated { buffered: 10 }))
    ));
}

#[test]
fn clean_boundary_is_not_truncation() {
    let bytes = encode_stream(&sample_records(3), ByteOrder::Little);
    assert_eq!(decode_all(&bytes, FrameConfig::default()).unwrap().len(), 3);
}

// ── Oversize guard ────────────────────────────────────────────────────────────

#[test]
fn oversize_detected_before_payload_arrives() {
    let record = sample_record(0, &vec![0u8; 1000]);
    let bytes = encode_stream(std::slice::from_ref(&record), ByteOrder::Little);

    let mut reader = FrameReader::new(FrameConfig {
        byte_order: ByteOrder::Little,
        max_frame_len: 512,
    });
    // Only the header is pushed; the fault must fire without the payload.
    reader.push(&bytes[..HEADER_SIZE]);
    assert!(matches!(
        reader.next_frame(),
        Err(FrameError::Oversized { declared, max: 512 }) if declared == HEADER_SIZE + 1000
    ));
}

#[test]
fn frame_exactly_at_ceiling_is_accepted() {
    let record = sample_record(0, &vec![1u8; 100]);
    let bytes = encode_stream(std::slice::from_ref(&record), ByteOrder::Little);
    let config = FrameConfig {
        byte_order: ByteOrder::Little,
        max_frame_len: HEADER_SIZE + 100,
    };
    assert_eq!(decode_all(&bytes, config).unwrap().len(), 1);
}

#[test]
fn ceiling_one_byte_below_frame_rejects() {
    let record = sample_record(0, &vec![1u8; 100]);
    let bytes = encode_stream(std::slice::from_ref(&record), ByteOrder::Little);
    let config = FrameConfig {
        byte_order: ByteOrder::Little,
        max_frame_len: HEADER_SIZE + 99,
    };
    assert!(matches!(
        decode_all(&bytes, config),
        Err(DecodeError::Frame(FrameError::Oversized { .. }))
    ));
}

// ── Magic rejection ───────────────────────────────────────────────────────────

#[test]
fn flipping_any_magic_bit_rejects_the_frame() {
    let pristine = encode_stream(&sample_records(1), ByteOrder::Little);

    // The magic word occupies bytes 0..4. Flipping any single bit must
    // produce a wire fault (BadMagic for tag bits, UnsupportedVersion for
    // version-byte bits) and emit no record.
    for bit in 0..32 {
        let mut bytes = pristine.clone();
        bytes[bit / 8] ^= 1 << (bit % 8);
        let result = decode_all(&bytes, FrameConfig::default());
        assert!(
            matches!(result, Err(DecodeError::Wire(_))),
            "flipped magic bit {bit}, got {result:?}"
        );
    }
}

#[test]
fn corrupt_frame_does_not_poison_caller_driven_resync() {
    // Framing only needs pdu_len, so a corrupt magic still frames
    // correctly; the decode fault is per-frame. A caller that chooses to
    // continue decoding subsequent frames gets them intact — the decoder
    // itself never resynchronises, the boundary belongs to the caller.
    let records = sample_records(3);
    let mut bytes = encode_stream(&records, ByteOrder::Little);
    bytes[1] ^= 0x01; // corrupt frame 0's magic tag

    let config = FrameConfig::default();
    let mut reader = FrameReader::new(config);
    reader.push(&bytes);

    let first = reader.next_frame().unwrap().unwrap();
    assert!(matches!(
        decode_record(&first, ByteOrder::Little),
        Err(DecodeError::Wire(WireError::BadMagic { .. }))
    ));

    let second = reader.next_frame().unwrap().unwrap();
    assert_eq!(
        decode_record(&second, ByteOrder::Little).unwrap(),
        records[1]
    );
    let third = reader.next_frame().unwrap().unwrap();
    assert_eq!(decode_record(&third, ByteOrder::Little).unwrap(), records[2]);
    assert!(reader.finish().is_ok());
}

// ── Length integrity ──────────────────────────────────────────────────────────

#[test]
fn pdu_len_tampering_shifts_framing_not_decoding() {
    // Growing a frame's declared pdu_len swallows the start of the next
    // frame into this frame's payload; the stream then ends mid-frame.
    // The decoder must report a fault, never a mis-framed record.
    let records = sample_records(2);
    let mut bytes = encode_stream(&records, ByteOrder::Little);
    let grown = u16::from_le_bytes([bytes[PDU_LEN_OFFSET], bytes[PDU_LEN_OFFSET + 1]]) + 4;
    bytes[PDU_LEN_OFFSET..PDU_LEN_OFFSET + 2].copy_from_slice(&grown.to_le_bytes());

    let result = decode_all(&bytes, FrameConfig::default());
    assert!(result.is_err());
}
