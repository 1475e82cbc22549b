use crate::action::Action;
use crate::device::Device;
use crate::error::WireError;
use crate::order::ByteOrder;

/// Magic tag carried in the top three bytes of the header's first word.
///
/// The tag is ASCII "eat" shifted left one byte; the low byte of the word
/// holds the format version. A header's first word is valid when
/// `(word & 0xffff_ff00) == TRACE_MAGIC` and `(word & 0xff) == VERSION`.
pub const TRACE_MAGIC: u32 = 0x6561_7400;

/// The only trace format version this decoder accepts. No negotiation:
/// the version byte must match exactly.
pub const VERSION: u8 = 0x07;

/// Fixed header size in bytes. A frame on the wire is exactly
/// `HEADER_SIZE + pdu_len` bytes.
pub const HEADER_SIZE: usize = 48;

/// Byte offset of the `pdu_len` field within the header. The frame reader
/// peeks this field to learn the full frame length before the payload has
/// arrived.
pub const PDU_LEN_OFFSET: usize = 46;

/// Trace event header — the first 48 bytes of every frame.
///
/// Decoded via the explicit offset table below with fixed-width integer
/// reads. The layout is tightly packed with no inter-field padding, so it
/// never depends on host struct layout or alignment.
///
/// ```text
/// ┌────────┬─────────┬───────────────────────────────────────┐
/// │ Offset │ Size    │ Field                                 │
/// ├────────┼─────────┼───────────────────────────────────────┤
/// │ 0      │ 4 bytes │ magic: tag 0x656174 << 8 | version    │
/// │ 4      │ 4 bytes │ sequence: source-assigned event number│
/// │ 8      │ 8 bytes │ time: nanoseconds, device clock       │
/// │ 16     │ 8 bytes │ sector: disk offset                   │
/// │ 24     │ 4 bytes │ bytes: transfer length                │
/// │ 28     │ 4 bytes │ action: categories << 16 | code       │
/// │ 32     │ 4 bytes │ pid: originating process              │
/// │ 36     │ 4 bytes │ device: encoded major/minor (dev_t)   │
/// │ 40     │ 4 bytes │ cpu: originating CPU index            │
/// │ 44     │ 2 bytes │ error: completion error, 0 = success  │
/// │ 46     │ 2 bytes │ pdu_len: payload bytes after header   │
/// └────────┴─────────┴───────────────────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraceHeader {
    /// Source-assigned event number. Monotonically increasing per source,
    /// not required strictly increasing across devices.
    pub sequence: u32,

    /// Event time in nanoseconds, relative to the device clock.
    pub time: u64,

    /// Disk sector offset.
    pub sector: u64,

    /// Transfer length in bytes.
    pub bytes: u32,

    /// What happened: category flags in the high half, action code in the
    /// low half. See [`Action`].
    pub action: Action,

    /// Originating process id.
    pub pid: u32,

    /// Encoded major/minor device identifier.
    pub device: Device,

    /// CPU the event originated on.
    pub cpu: u32,

    /// Completion error code, 0 = success.
    pub error: u16,

    /// Number of payload bytes following this header on the wire.
    pub pdu_len: u16,
}

fn read_u16(buf: &[u8], offset: usize, order: ByteOrder) -> u16 {
    order.read_u16([buf[offset], buf[offset + 1]])
}

fn read_u32(buf: &[u8], offset: usize, order: ByteOrder) -> u32 {
    order.read_u32([buf[offset], buf[offset + 1], buf[offset + 2], buf[offset + 3]])
}

fn read_u64(buf: &[u8], offset: usize, order: ByteOrder) -> u64 {
    order.read_u64([
        buf[offset],
        buf[offset + 1],
        buf[offset + 2],
        buf[offset + 3],
        buf[offset + 4],
        buf[offset + 5],
        buf[offset + 6],
        buf[offset + 7],
    ])
}

impl TraceHeader {
    /// Parse a header from the first 48 bytes of the provided buffer.
    ///
    /// # Errors
    ///
    /// - [`WireError::UnexpectedEof`] if the buffer is shorter than
    ///   [`HEADER_SIZE`].
    /// - [`WireError::BadMagic`] if the magic tag doesn't match.
    /// - [`WireError::UnsupportedVersion`] if the version byte is not 0x07.
    pub fn read_from(buf: &[u8], order: ByteOrder) -> Result<Self, WireError> {
        if buf.len() < HEADER_SIZE {
            return Err(WireError::UnexpectedEof { offset: buf.len() });
        }

        // Validate magic before touching any other field
        let magic = read_u32(buf, 0, order);
        if magic & 0xffff_ff00 != TRACE_MAGIC {
            return Err(WireError::BadMagic { found: magic });
        }
        let version = (magic & 0xff) as u8;
        if version != VERSION {
            return Err(WireError::UnsupportedVersion { found: version });
        }

        Ok(Self {
            sequence: read_u32(buf, 4, order),
            time: read_u64(buf, 8, order),
            sector: read_u64(buf, 16, order),
            bytes: read_u32(buf, 24, order),
            action: Action::from_raw(read_u32(buf, 28, order)),
            pid: read_u32(buf, 32, order),
            device: Device::from_raw(read_u32(buf, 36, order)),
            cpu: read_u32(buf, 40, order),
            error: read_u16(buf, 44, order),
            pdu_len: read_u16(buf, PDU_LEN_OFFSET, order),
        })
    }

    /// Write the 48-byte header into the provided buffer.
    ///
    /// The magic word is always written as `TRACE_MAGIC | VERSION`.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::UnexpectedEof`] if `buf` is shorter than
    /// [`HEADER_SIZE`].
    pub fn write_to(&self, buf: &mut [u8], order: ByteOrder) -> Result<(), WireError> {
        if buf.len() < HEADER_SIZE {
            return Err(WireError::UnexpectedEof { offset: buf.len() });
        }

        buf[0..4].copy_from_slice(&order.write_u32(TRACE_MAGIC | u32::from(VERSION)));
        buf[4..8].copy_from_slice(&order.write_u32(self.sequence));
        buf[8..16].copy_from_slice(&order.write_u64(self.time));
        buf[16..24].copy_from_slice(&order.write_u64(self.sector));
        buf[24..28].copy_from_slice(&order.write_u32(self.bytes));
        buf[28..32].copy_from_slice(&order.write_u32(self.action.raw()));
        buf[32..36].copy_from_slice(&order.write_u32(self.pid));
        buf[36..40].copy_from_slice(&order.write_u32(self.device.raw()));
        buf[40..44].copy_from_slice(&order.write_u32(self.cpu));
        buf[44..46].copy_from_slice(&order.write_u16(self.error));
        buf[46..48].copy_from_slice(&order.write_u16(self.pdu_len));

        Ok(())
    }
}
