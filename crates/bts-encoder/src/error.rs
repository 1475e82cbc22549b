use bts_wire::WireError;

#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    /// The record's payload length does not match its header's `pdu_len`.
    /// A record violating this was never well-formed; refusing to encode
    /// it keeps the wire invariant intact.
    #[error("payload is {actual} bytes but header declares pdu_len={declared}")]
    PayloadMismatch { declared: u16, actual: usize },

    /// A header serialisation fault.
    #[error(transparent)]
    Wire(#[from] WireError),

    /// I/O error from the underlying writer.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
