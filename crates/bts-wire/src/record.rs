use std::fmt;

use bytes::Bytes;

use crate::header::TraceHeader;

/// A fully decoded trace event: the parsed header plus the verbatim
/// payload bytes that followed it on the wire.
///
/// Records are immutable once constructed and are handed to consumers by
/// value; the framing layer keeps no reference to them. The payload is an
/// opaque PDU — for NOTIFY message events it carries text, for driver-data
/// events it is binary, and it is empty whenever `header.pdu_len` is 0.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraceRecord {
    pub header: TraceHeader,
    pub payload: Bytes,
}

impl TraceRecord {
    pub fn new(header: TraceHeader, payload: Bytes) -> Self {
        Self { header, payload }
    }

    /// The payload as text, when it is valid UTF-8 (NOTIFY messages,
    /// process names). `None` for binary or non-UTF-8 payloads.
    pub fn payload_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.payload).ok()
    }
}

/// One-line human-readable summary, used by the CLI dumps.
impl fmt::Display for TraceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let h = &self.header;
        write!(
            f,
            "seq={} t={}ns dev={} cpu={} pid={} ",
            h.sequence, h.time, h.device, h.cpu, h.pid
        )?;
        if let Some(notify) = h.action.notify() {
            write!(f, "notify/{notify}")?;
        } else {
            match h.action.code() {
                Some(code) => write!(f, "{} {code}", h.action.categories())?,
                None => write!(f, "{} code={:#06x}", h.action.categories(), h.action.raw() & 0xffff)?,
            }
        }
        write!(f, " sector={} bytes={}", h.sector, h.bytes)?;
        if h.error != 0 {
            write!(f, " error={}", h.error)?;
        }
        if h.pdu_len != 0 {
            write!(f, " pdu={}B", h.pdu_len)?;
        }
        Ok(())
    }
}
