use tokio::io::{AsyncRead, AsyncReadExt};

use bts_wire::TraceRecord;

use crate::error::DecodeError;
use crate::frame_reader::{FrameConfig, FrameReader};
use crate::record::decode_record;

/// Size of the scratch buffer each read fills. Reused across reads so a
/// long-lived connection allocates once.
const READ_CHUNK: usize = 8 * 1024;

/// Internal state machine.
///
/// ```text
///   Running → Done     (clean EOF on a frame boundary)
///   Running → Failed   (any fault; the stream is abandoned)
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum StreamState {
    Running,
    Done,
    Failed,
}

/// Asynchronous record stream over any byte source.
///
/// Reads chunks from the underlying `AsyncRead`, feeds them through a
/// [`FrameReader`], and yields one decoded [`TraceRecord`] per frame.
/// Reading from the source is the only suspension point; framing and
/// decoding are synchronous computations over already-buffered bytes.
/// Backpressure falls out of the pull model — nothing is read until the
/// caller awaits the next record.
///
/// End-of-stream handling distinguishes the two close cases the framing
/// contract cares about: a peer close on an exact frame boundary ends the
/// stream cleanly (`None`), a close mid-frame yields
/// [`FrameError::Truncated`](crate::FrameError::Truncated) first.
///
/// # Example
///
/// ```rust,no_run
/// use bts_decoder::{FrameConfig, StreamingDecoder};
/// use tokio::io::AsyncRead;
///
/// async fn dump(source: impl AsyncRead + Unpin) {
///     let mut records = StreamingDecoder::new(source, FrameConfig::default());
///     while let Some(record) = records.next().await.transpose().unwrap() {
///         println!("{record}");
///     }
/// }
/// ```
pub struct StreamingDecoder<R> {
    reader: R,
    frames: FrameReader,
    chunk: Vec<u8>,
    state: StreamState,
    records: u64,
}

impl<R: AsyncRead + Unpin> StreamingDecoder<R> {
    #[must_use]
    pub fn new(reader: R, config: FrameConfig) -> Self {
        Self {
            reader,
            frames: FrameReader::new(config),
            chunk: vec![0u8; READ_CHUNK],
            state: StreamState::Running,
            records: 0,
        }
    }

    /// Yield the next record.
    ///
    /// `Some(Ok(record))` per decoded frame, `None` once the stream has
    /// ended cleanly (or after a fault has already been reported —
    /// a failed stream stays failed).
    ///
    /// # Errors
    ///
    /// Any [`DecodeError`]; after an error the decoder is done and all
    /// subsequent calls return `None`. Faults never cross connections —
    /// each stream owns its own decoder.
    pub async fn next(&mut self) -> Option<Result<TraceRecord, DecodeError>> {
        if self.state != StreamState::Running {
            return None;
        }
        match self.advance().await {
            Ok(Some(record)) => {
                self.records += 1;
                Some(Ok(record))
            }
            Ok(None) => {
                self.state = StreamState::Done;
                None
            }
            Err(e) => {
                self.state = StreamState::Failed;
                Some(Err(e))
            }
        }
    }

    async fn advance(&mut self) -> Result<Option<TraceRecord>, DecodeError> {
        loop {
            if let Some(frame) = self.frames.next_frame()? {
                let record = decode_record(&frame, self.frames.config().byte_order)?;
                return Ok(Some(record));
            }

            let n = self.reader.read(&mut self.chunk).await?;
            if n == 0 {
                // Peer closed. Clean only on an exact frame boundary.
                self.frames.finish()?;
                return Ok(None);
            }
            self.frames.push(&self.chunk[..n]);
        }
    }

    /// Number of records decoded so far on this stream.
    #[must_use]
    pub fn records_decoded(&self) -> u64 {
        self.records
    }
}
