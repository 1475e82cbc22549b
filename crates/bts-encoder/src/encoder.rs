use std::io::Write;

use bts_wire::header::HEADER_SIZE;
use bts_wire::{ByteOrder, TraceRecord};

use crate::error::EncodeError;

/// Serialises [`TraceRecord`]s back into wire frames.
///
/// The inverse of the decoder: for any well-formed record,
/// `decode(encode(record)) == record` field for field. Used by the test
/// and fuzz harnesses to fabricate byte-exact streams, and by the CLI to
/// write captured traces back out.
#[derive(Clone, Copy, Debug)]
pub struct RecordEncoder {
    byte_order: ByteOrder,
}

impl RecordEncoder {
    #[must_use]
    pub fn new(byte_order: ByteOrder) -> Self {
        Self { byte_order }
    }

    #[must_use]
    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// Encode one record as a standalone frame.
    ///
    /// # Errors
    ///
    /// [`EncodeError::PayloadMismatch`] when the payload length disagrees
    /// with the header's `pdu_len`.
    pub fn encode(&self, record: &TraceRecord) -> Result<Vec<u8>, EncodeError> {
        if record.payload.len() != usize::from(record.header.pdu_len) {
            return Err(EncodeError::PayloadMismatch {
                declared: record.header.pdu_len,
                actual: record.payload.len(),
            });
        }

        let mut buf = vec![0u8; HEADER_SIZE + record.payload.len()];
        record.header.write_to(&mut buf, self.byte_order)?;
        buf[HEADER_SIZE..].copy_from_slice(&record.payload);
        Ok(buf)
    }

    /// Encode one record into the provided writer.
    ///
    /// # Returns
    ///
    /// Total number of bytes written (`HEADER_SIZE + pdu_len`).
    ///
    /// # Errors
    ///
    /// [`EncodeError::PayloadMismatch`] or any I/O error from the writer.
    pub fn write_record(
        &self,
        record: &TraceRecord,
        w: &mut impl Write,
    ) -> Result<usize, EncodeError> {
        let frame = self.encode(record)?;
        w.write_all(&frame)?;
        Ok(frame.len())
    }
}

/// Accumulates back-to-back frames into a single contiguous stream.
///
/// Frames appear in push order, which is the order a decoder will yield
/// them back.
pub struct StreamWriter {
    encoder: RecordEncoder,
    buf: Vec<u8>,
}

impl StreamWriter {
    #[must_use]
    pub fn new(encoder: RecordEncoder) -> Self {
        Self {
            encoder,
            buf: Vec::new(),
        }
    }

    /// Append one record's frame to the stream.
    ///
    /// # Errors
    ///
    /// [`EncodeError::PayloadMismatch`] for an inconsistent record.
    pub fn push(&mut self, record: &TraceRecord) -> Result<&mut Self, EncodeError> {
        self.encoder.write_record(record, &mut self.buf)?;
        Ok(self)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bts_wire::action::{Action, ActionCode, Categories};
    use bts_wire::{Device, TraceHeader};
    use bytes::Bytes;

    fn record(pdu: &[u8]) -> TraceRecord {
        TraceRecord::new(
            TraceHeader {
                sequence: 11,
                time: 42,
                sector: 100,
                bytes: 8192,
                action: Action::new(Categories::READ.with(Categories::COMPLETE), ActionCode::Complete),
                pid: 7,
                device: Device::from_raw((8 << 20) | 16),
                cpu: 1,
                error: 0,
                pdu_len: pdu.len() as u16,
            },
            Bytes::copy_from_slice(pdu),
        )
    }

    #[test]
    fn frame_length_is_header_plus_pdu() {
        let frame = RecordEncoder::new(ByteOrder::Little)
            .encode(&record(b"12345"))
            .unwrap();
        assert_eq!(frame.len(), HEADER_SIZE + 5);
        assert_eq!(&frame[HEADER_SIZE..], b"12345");
    }

    #[test]
    fn rejects_inconsistent_record() {
        let mut bad = record(b"1234");
        bad.header.pdu_len = 2;
        let result = RecordEncoder::new(ByteOrder::Little).encode(&bad);
        assert!(matches!(
            result,
            Err(EncodeError::PayloadMismatch { declared: 2, actual: 4 })
        ));
    }

    #[test]
    fn stream_writer_concatenates_in_order() {
        let encoder = RecordEncoder::new(ByteOrder::Little);
        let mut writer = StreamWriter::new(encoder);
        writer.push(&record(b"")).unwrap();
        writer.push(&record(b"abc")).unwrap();
        assert_eq!(writer.len(), 2 * HEADER_SIZE + 3);

        let bytes = writer.into_bytes();
        let one = encoder.encode(&record(b"")).unwrap();
        assert_eq!(&bytes[..HEADER_SIZE], &one[..]);
    }
}
