use bytes::{Bytes, BytesMut};

use bts_wire::ByteOrder;
use bts_wire::header::{HEADER_SIZE, PDU_LEN_OFFSET};

use crate::error::FrameError;

/// Default frame-size ceiling: a full header plus the largest payload a
/// 16-bit `pdu_len` can declare. Configure something smaller when the
/// producer is known to emit only small PDUs.
pub const DEFAULT_MAX_FRAME_LEN: usize = HEADER_SIZE + u16::MAX as usize;

/// Framing parameters, fixed for the lifetime of a stream.
#[derive(Clone, Copy, Debug)]
pub struct FrameConfig {
    /// Byte order of every multi-byte field in the stream.
    pub byte_order: ByteOrder,

    /// Upper bound on `HEADER_SIZE + pdu_len`. Required and explicit —
    /// it is the only thing standing between a corrupt header and
    /// unbounded buffering.
    pub max_frame_len: usize,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            byte_order: ByteOrder::default(),
            max_frame_len: DEFAULT_MAX_FRAME_LEN,
        }
    }
}

/// Push-based stream framer.
///
/// Converts an arbitrary sequence of byte chunks — split anywhere,
/// including inside the fixed header — into complete `header + payload`
/// frames of exactly `HEADER_SIZE + pdu_len` bytes. Chunks are appended
/// with [`push`](Self::push) and complete frames drained with
/// [`next_frame`](Self::next_frame); a push never blocks and never yields
/// a partial frame.
///
/// The buffer invariant: zero or more complete-but-undelivered frames,
/// followed by at most one partial frame. Delivered frames are split off
/// the front of the buffer without copying, and the declared length of the
/// partial frame at the head is cached so header bytes are scanned once.
///
/// # Example
///
/// ```rust
/// use bts_decoder::{FrameConfig, FrameReader};
///
/// let mut reader = FrameReader::new(FrameConfig::default());
/// reader.push(&[]); // empty pushes are fine
/// assert!(reader.next_frame().unwrap().is_none()); // nothing buffered yet
/// assert!(reader.finish().is_ok()); // clean end of stream
/// ```
pub struct FrameReader {
    buf: BytesMut,
    /// Declared total length of the frame at the head of the buffer,
    /// cached once 48 header bytes are present so the header window is
    /// not re-read on every push.
    pending_len: Option<usize>,
    config: FrameConfig,
}

impl FrameReader {
    #[must_use]
    pub fn new(config: FrameConfig) -> Self {
        Self {
            buf: BytesMut::with_capacity(4096),
            pending_len: None,
            config,
        }
    }

    /// Append a chunk of stream bytes. May be empty, may contain many
    /// frames, may end mid-header or mid-payload.
    pub fn push(&mut self, chunk: &[u8]) {
        self.buf.extend_from_slice(chunk);
    }

    /// Drain the next complete frame, if one is buffered.
    ///
    /// Returns `Ok(None)` when more bytes are needed — call
    /// [`push`](Self::push) again and retry. Call in a loop after each
    /// push: a single chunk can complete several frames.
    ///
    /// # Errors
    ///
    /// [`FrameError::Oversized`] as soon as a buffered header declares a
    /// frame beyond `max_frame_len`, before any payload accumulates.
    pub fn next_frame(&mut self) -> Result<Option<Bytes>, FrameError> {
        let frame_len = match self.pending_len {
            Some(len) => len,
            None => {
                if self.buf.len() < HEADER_SIZE {
                    return Ok(None);
                }
                let pdu_len = self.config.byte_order.read_u16([
                    self.buf[PDU_LEN_OFFSET],
                    self.buf[PDU_LEN_OFFSET + 1],
                ]);
                let len = HEADER_SIZE + usize::from(pdu_len);
                if len > self.config.max_frame_len {
                    return Err(FrameError::Oversized {
                        declared: len,
                        max: self.config.max_frame_len,
                    });
                }
                self.pending_len = Some(len);
                len
            }
        };

        if self.buf.len() < frame_len {
            return Ok(None);
        }

        self.pending_len = None;
        Ok(Some(self.buf.split_to(frame_len).freeze()))
    }

    /// End-of-stream check. Call exactly once, after the peer has signalled
    /// the end of the byte stream and [`next_frame`](Self::next_frame) has
    /// been drained.
    ///
    /// # Errors
    ///
    /// [`FrameError::Truncated`] if between 1 and `frame_len - 1` bytes of
    /// a partial frame remain buffered — a mid-frame close is a fault, not
    /// a silent drop.
    pub fn finish(&self) -> Result<(), FrameError> {
        if self.buf.is_empty() {
            Ok(())
        } else {
            Err(FrameError::Truncated {
                buffered: self.buf.len(),
            })
        }
    }

    /// Bytes currently buffered and not yet delivered as frames.
    #[must_use]
    pub fn buffered(&self) -> usize {
        self.buf.len()
    }

    #[must_use]
    pub fn config(&self) -> FrameConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bts_wire::header::VERSION;

    /// Build raw frame bytes: a minimal valid header plus `pdu` payload.
    fn frame_bytes(sequence: u32, pdu: &[u8]) -> Vec<u8> {
        let mut buf = vec![0u8; HEADER_SIZE];
        buf[0..4].copy_from_slice(&(0x6561_7400u32 | u32::from(VERSION)).to_le_bytes());
        buf[4..8].copy_from_slice(&sequence.to_le_bytes());
        buf[46..48].copy_from_slice(&(pdu.len() as u16).to_le_bytes());
        buf.extend_from_slice(pdu);
        buf
    }

    fn drain(reader: &mut FrameReader) -> Vec<Bytes> {
        let mut frames = Vec::new();
        while let Some(frame) = reader.next_frame().unwrap() {
            frames.push(frame);
        }
        frames
    }

    #[test]
    fn whole_frame_in_one_push() {
        let bytes = frame_bytes(1, b"abc");
        let mut reader = FrameReader::new(FrameConfig::default());
        reader.push(&bytes);
        let frames = drain(&mut reader);
        assert_eq!(frames.len(), 1);
        assert_eq!(&frames[0][..], &bytes[..]);
        assert!(reader.finish().is_ok());
    }

    #[test]
    fn multiple_frames_in_one_push() {
        let mut stream = frame_bytes(1, b"");
        stream.extend_from_slice(&frame_bytes(2, b"xy"));
        stream.extend_from_slice(&frame_bytes(3, b"z"));

        let mut reader = FrameReader::new(FrameConfig::default());
        reader.push(&stream);
        let frames = drain(&mut reader);
        assert_eq!(frames.len(), 3);
        assert_eq!(frames[0].len(), HEADER_SIZE);
        assert_eq!(frames[1].len(), HEADER_SIZE + 2);
        assert_eq!(frames[2].len(), HEADER_SIZE + 1);
    }

    #[test]
    fn split_inside_header() {
        let bytes = frame_bytes(9, b"payload");
        let mut reader = FrameReader::new(FrameConfig::default());

        // Feed the header seven bytes at a time
        for chunk in bytes.chunks(7) {
            reader.push(chunk);
        }
        let frames = drain(&mut reader);
        assert_eq!(frames.len(), 1);
        assert_eq!(&frames[0][..], &bytes[..]);
    }

    #[test]
    fn single_byte_pushes() {
        let bytes = frame_bytes(4, b"ab");
        let mut reader = FrameReader::new(FrameConfig::default());
        let mut frames = Vec::new();
        for &b in &bytes {
            reader.push(&[b]);
            frames.extend(drain(&mut reader));
        }
        assert_eq!(frames.len(), 1);
        assert_eq!(&frames[0][..], &bytes[..]);
    }

    #[test]
    fn empty_push_is_a_no_op() {
        let mut reader = FrameReader::new(FrameConfig::default());
        reader.push(&[]);
        assert!(reader.next_frame().unwrap().is_none());
        assert_eq!(reader.buffered(), 0);
    }

    #[test]
    fn incomplete_header_yields_nothing() {
        let bytes = frame_bytes(1, b"");
        let mut reader = FrameReader::new(FrameConfig::default());
        reader.push(&bytes[..HEADER_SIZE - 1]);
        assert!(reader.next_frame().unwrap().is_none());
        assert!(matches!(
            reader.finish(),
            Err(FrameError::Truncated { buffered }) if buffered == HEADER_SIZE - 1
        ));
    }

    #[test]
    fn incomplete_payload_yields_nothing() {
        let bytes = frame_bytes(1, b"0123456789");
        let mut reader = FrameReader::new(FrameConfig::default());
        reader.push(&bytes[..HEADER_SIZE + 4]);
        assert!(reader.next_frame().unwrap().is_none());
        assert!(matches!(reader.finish(), Err(FrameError::Truncated { .. })));

        // The rest arrives: the frame completes and the stream ends clean
        reader.push(&bytes[HEADER_SIZE + 4..]);
        let frames = drain(&mut reader);
        assert_eq!(frames.len(), 1);
        assert!(reader.finish().is_ok());
    }

    #[test]
    fn clean_close_between_frames() {
        let mut reader = FrameReader::new(FrameConfig::default());
        reader.push(&frame_bytes(1, b"aa"));
        drain(&mut reader);
        assert!(reader.finish().is_ok());
    }

    #[test]
    fn oversized_frame_detected_from_header_alone() {
        let bytes = frame_bytes(1, &[0u8; 300]);
        let mut reader = FrameReader::new(FrameConfig {
            byte_order: ByteOrder::Little,
            max_frame_len: 256,
        });
        // Push only the header — the fault must fire before any payload
        reader.push(&bytes[..HEADER_SIZE]);
        assert!(matches!(
            reader.next_frame(),
            Err(FrameError::Oversized { declared, max: 256 }) if declared == HEADER_SIZE + 300
        ));
    }

    #[test]
    fn frame_at_exact_ceiling_passes() {
        let bytes = frame_bytes(1, &[7u8; 10]);
        let mut reader = FrameReader::new(FrameConfig {
            byte_order: ByteOrder::Little,
            max_frame_len: HEADER_SIZE + 10,
        });
        reader.push(&bytes);
        assert_eq!(drain(&mut reader).len(), 1);
    }

    #[test]
    fn big_endian_pdu_len() {
        let mut bytes = vec![0u8; HEADER_SIZE];
        bytes[0..4].copy_from_slice(&(0x6561_7407u32).to_be_bytes());
        bytes[46..48].copy_from_slice(&3u16.to_be_bytes());
        bytes.extend_from_slice(b"abc");

        let mut reader = FrameReader::new(FrameConfig {
            byte_order: ByteOrder::Big,
            max_frame_len: DEFAULT_MAX_FRAME_LEN,
        });
        reader.push(&bytes);
        let frames = drain(&mut reader);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].len(), HEADER_SIZE + 3);
    }
}
