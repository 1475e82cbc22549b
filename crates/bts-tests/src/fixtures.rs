//! Shared fixtures for the integration tests and benches: record
//! builders, stream assembly, and synchronous whole-stream / chunked
//! decode helpers.

use bytes::Bytes;

use bts_decoder::{DecodeError, FrameConfig, FrameReader, decode_record};
use bts_encoder::{RecordEncoder, StreamWriter};
use bts_wire::action::{Action, ActionCode, Categories, Notify};
use bts_wire::{ByteOrder, Device, TraceHeader, TraceRecord};

/// A record with fields derived from `sequence` so different records are
/// distinguishable in assertions.
pub fn sample_record(sequence: u32, pdu: &[u8]) -> TraceRecord {
    let action = match sequence % 4 {
        0 => Action::new(Categories::READ.with(Categories::QUEUE), ActionCode::Queue),
        1 => Action::new(Categories::WRITE.with(Categories::ISSUE), ActionCode::Issue),
        2 => Action::new(
            Categories::WRITE.with(Categories::COMPLETE),
            ActionCode::Complete,
        ),
        _ => Action::new_notify(Notify::Message),
    };
    TraceRecord::new(
        TraceHeader {
            sequence,
            time: u64::from(sequence) * 1_000,
            sector: u64::from(sequence) * 8,
            bytes: 4096,
            action,
            pid: 42,
            device: Device::from_raw((8 << 20) | (sequence & 0xf)),
            cpu: sequence % 4,
            error: 0,
            pdu_len: pdu.len() as u16,
        },
        Bytes::copy_from_slice(pdu),
    )
}

/// A varied stream: empty payloads, small payloads, and one larger PDU.
pub fn sample_records(count: u32) -> Vec<TraceRecord> {
    (0..count)
        .map(|i| match i % 3 {
            0 => sample_record(i, b""),
            1 => sample_record(i, b"short pdu"),
            _ => sample_record(i, &vec![0xA5u8; 200]),
        })
        .collect()
}

/// Encode records back-to-back into one contiguous byte stream.
pub fn encode_stream(records: &[TraceRecord], order: ByteOrder) -> Vec<u8> {
    let mut writer = StreamWriter::new(RecordEncoder::new(order));
    for record in records {
        writer.push(record).expect("fixture records are well-formed");
    }
    writer.into_bytes()
}

/// Decode a complete byte stream: push everything, drain all frames, then
/// run the end-of-stream check.
pub fn decode_all(bytes: &[u8], config: FrameConfig) -> Result<Vec<TraceRecord>, DecodeError> {
    decode_chunked(std::iter::once(bytes), config)
}

/// Decode a stream delivered as a sequence of chunks, draining completed
/// frames after every push — the access pattern a socket produces.
pub fn decode_chunked<'a>(
    chunks: impl IntoIterator<Item = &'a [u8]>,
    config: FrameConfig,
) -> Result<Vec<TraceRecord>, DecodeError> {
    let byte_order = config.byte_order;
    let mut reader = FrameReader::new(config);
    let mut records = Vec::new();

    for chunk in chunks {
        reader.push(chunk);
        while let Some(frame) = reader.next_frame()? {
            records.push(decode_record(&frame, byte_order)?);
        }
    }

    reader.finish()?;
    Ok(records)
}
