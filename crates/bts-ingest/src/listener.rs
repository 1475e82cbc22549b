use std::net::SocketAddr;

use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;

use bts_decoder::{DecodeError, FrameConfig, StreamingDecoder};
use bts_wire::TraceRecord;

use crate::error::IngestError;

/// Lifecycle events emitted to the consumer channel.
///
/// Every connection produces `Connected`, zero or more `Record`s in wire
/// order, then exactly one `Closed`. Events from different connections
/// interleave; events from one connection never reorder.
#[derive(Debug)]
pub enum IngestEvent {
    /// A peer connected.
    Connected { peer: SocketAddr },

    /// One decoded record from a peer's stream.
    Record {
        peer: SocketAddr,
        record: TraceRecord,
    },

    /// The connection ended. `fault` is `None` for a clean close on a
    /// frame boundary, or carries the decode fault that abandoned the
    /// connection. `records` is the count delivered before the end.
    Closed {
        peer: SocketAddr,
        records: u64,
        fault: Option<DecodeError>,
    },
}

/// Accept loop: admit connections one at a time and give each its own
/// decoding task.
///
/// Each task owns its connection's [`StreamingDecoder`] — and therefore
/// its stream buffer — outright; tasks share nothing mutable, so no
/// locking exists anywhere on the decode path. A fault abandons only the
/// faulting connection; the listener and every sibling task keep going.
///
/// Backpressure: records are pushed into a bounded channel, so a slow
/// consumer suspends the sending connection task at the channel, which in
/// turn stops reading from that socket and lets transport flow control
/// take over.
///
/// Runs until the listener socket fails or every [`IngestEvent`] receiver
/// is dropped.
///
/// # Errors
///
/// [`IngestError::Io`] if `accept` fails on the listener socket.
pub async fn serve(
    listener: TcpListener,
    config: FrameConfig,
    events: mpsc::Sender<IngestEvent>,
) -> Result<(), IngestError> {
    loop {
        let (stream, peer) = listener.accept().await?;
        if events.is_closed() {
            return Ok(());
        }
        let tx = events.clone();
        tokio::spawn(async move {
            handle_connection(stream, peer, config, tx).await;
        });
    }
}

/// One connection's lifetime: decode records until clean EOF or a fault,
/// reporting everything through the event channel. A dropped receiver
/// just ends the task quietly.
async fn handle_connection(
    stream: TcpStream,
    peer: SocketAddr,
    config: FrameConfig,
    tx: mpsc::Sender<IngestEvent>,
) {
    if tx.send(IngestEvent::Connected { peer }).await.is_err() {
        return;
    }

    let mut decoder = StreamingDecoder::new(stream, config);
    let fault = loop {
        match decoder.next().await {
            Some(Ok(record)) => {
                if tx.send(IngestEvent::Record { peer, record }).await.is_err() {
                    return;
                }
            }
            Some(Err(e)) => break Some(e),
            None => break None,
        }
    };

    let _ = tx
        .send(IngestEvent::Closed {
            peer,
            records: decoder.records_decoded(),
            fault,
        })
        .await;
}
