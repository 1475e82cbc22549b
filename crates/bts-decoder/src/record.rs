use bytes::Bytes;

use bts_wire::header::HEADER_SIZE;
use bts_wire::{ByteOrder, TraceHeader, TraceRecord};

use crate::error::DecodeError;

/// Decode one complete frame into a [`TraceRecord`].
///
/// The input must be exactly one frame — `HEADER_SIZE + pdu_len` bytes —
/// as produced by [`FrameReader`](crate::FrameReader). Decoding is pure
/// and deterministic: the same bytes always yield the same record or the
/// same fault, and the input is not retained beyond the call (the payload
/// is a cheap sub-slice of the shared frame buffer, not a copy).
///
/// # Errors
///
/// - [`DecodeError::Wire`] for a bad magic tag, an unsupported version,
///   or a frame shorter than a header.
/// - [`DecodeError::LengthMismatch`] if the frame carries more or fewer
///   payload bytes than the header declares.
pub fn decode_record(frame: &Bytes, order: ByteOrder) -> Result<TraceRecord, DecodeError> {
    let header = TraceHeader::read_from(frame, order)?;

    let actual = frame.len() - HEADER_SIZE;
    if actual != usize::from(header.pdu_len) {
        return Err(DecodeError::LengthMismatch {
            declared: header.pdu_len,
            actual,
        });
    }

    Ok(TraceRecord::new(header, frame.slice(HEADER_SIZE..)))
}
