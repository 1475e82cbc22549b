use anyhow::Context;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use bts_decoder::FrameConfig;
use bts_ingest::IngestEvent;

use crate::ServeArgs;

/// Listen for TCP trace streams and print decoded records as they
/// arrive. Connection lifecycle lines are prefixed with `#` so record
/// output can be filtered out of the stream.
pub async fn run(args: &ServeArgs, config: FrameConfig) -> anyhow::Result<()> {
    let listener = TcpListener::bind((args.bind.as_str(), args.port))
        .await
        .with_context(|| format!("failed to bind {}:{}", args.bind, args.port))?;
    println!("# listening on {}", listener.local_addr()?);

    let (tx, mut rx) = mpsc::channel(1024);
    let server = tokio::spawn(bts_ingest::serve(listener, config, tx));

    while let Some(event) = rx.recv().await {
        match event {
            IngestEvent::Connected { peer } => println!("# {peer} connected"),
            IngestEvent::Record { record, .. } => println!("{record}"),
            IngestEvent::Closed {
                peer,
                records,
                fault: None,
            } => println!("# {peer} closed after {records} records"),
            IngestEvent::Closed {
                peer,
                records,
                fault: Some(fault),
            } => eprintln!("# {peer} abandoned after {records} records: {fault}"),
        }
    }

    server.await.context("listener task panicked")??;
    Ok(())
}
