use std::process::Stdio;

use anyhow::{Context, bail};
use tokio::process::Command;

use bts_decoder::{FrameConfig, StreamingDecoder};

use crate::ForkArgs;

/// Spawn `blktrace -d <dev> ... -o -` and decode its stdout until the
/// child exits.
pub async fn run(args: &ForkArgs, config: FrameConfig) -> anyhow::Result<()> {
    let mut trace_args = Vec::new();
    for dev in &args.device {
        trace_args.push("-d".to_string());
        trace_args.push(dev.clone());
    }
    trace_args.push("-o".to_string());
    trace_args.push("-".to_string());

    let mut child = Command::new("blktrace")
        .args(&trace_args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .spawn()
        .context("failed to spawn blktrace (is it installed?)")?;

    let stdout = child
        .stdout
        .take()
        .context("blktrace child has no stdout handle")?;

    let mut decoder = StreamingDecoder::new(stdout, config);
    while let Some(result) = decoder.next().await {
        let record = result.context("decoding blktrace output failed")?;
        println!("{record}");
    }

    let status = child.wait().await.context("waiting for blktrace failed")?;
    if !status.success() {
        bail!(
            "blktrace exited with {status} after {} records",
            decoder.records_decoded()
        );
    }
    Ok(())
}
