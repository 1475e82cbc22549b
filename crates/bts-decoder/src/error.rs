use bts_wire::WireError;

/// Errors raised by the framing layer.
///
/// Both variants are protocol-level faults scoped to a single stream: the
/// caller abandons that stream's reader and any partial state, and nothing
/// else. Neither is ever process-fatal.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The stream ended while a partial frame was still buffered. Raised
    /// by [`FrameReader::finish`](crate::FrameReader::finish) when the
    /// peer closes mid-frame; a close on an exact frame boundary is clean.
    #[error("stream truncated: {buffered} bytes of a partial frame remain buffered")]
    Truncated { buffered: usize },

    /// A header declared a frame larger than the configured ceiling.
    /// Raised from the declared length alone, before any of the payload
    /// is buffered — a corrupt or hostile header must not grow memory.
    #[error("declared frame of {declared} bytes exceeds the {max}-byte ceiling")]
    Oversized { declared: usize, max: usize },
}

/// Errors raised while decoding frames into records.
///
/// ```text
///   DecodeError
///   ├── Frame(FrameError)      ← truncation / oversize from the framing layer
///   ├── Wire(WireError)        ← bad magic, unsupported version, short frame
///   ├── LengthMismatch         ← frame length disagrees with header pdu_len
///   └── Io(std::io::Error)     ← from the underlying reader (streaming only)
/// ```
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// A framing fault from the stream buffer.
    #[error(transparent)]
    Frame(#[from] FrameError),

    /// A header-level fault: bad magic tag, unsupported version, or a
    /// frame too short to hold a header.
    #[error(transparent)]
    Wire(#[from] WireError),

    /// The frame's byte count disagrees with the header's declared
    /// payload length. The frame reader guarantees this never happens for
    /// frames it produced; it guards direct callers handing in slices.
    #[error("payload length mismatch: header declares {declared} bytes, frame carries {actual}")]
    LengthMismatch { declared: u16, actual: usize },

    /// An I/O error from the underlying reader (streaming decoder).
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl DecodeError {
    /// Whether this fault is a protocol violation (as opposed to plain
    /// I/O trouble). Protocol violations warrant abandoning the
    /// connection without resynchronisation.
    pub fn is_protocol_violation(&self) -> bool {
        !matches!(self, Self::Io(_))
    }
}
