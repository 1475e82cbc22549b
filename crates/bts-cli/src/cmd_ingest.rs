use std::fs::File;
use std::io::{self, Read};

use anyhow::Context;

use bts_decoder::{FrameConfig, FrameReader, decode_record};

use crate::IngestArgs;

const STDIN_PATH: &str = "-";

/// Decode a raw trace stream from a file or stdin, printing one summary
/// line per record. A truncated or corrupt stream is an error after all
/// complete records have been printed.
pub fn run(args: &IngestArgs, config: FrameConfig) -> anyhow::Result<()> {
    if args.input == STDIN_PATH {
        let stdin = io::stdin();
        ingest(stdin.lock(), config)
    } else {
        let file = File::open(&args.input)
            .with_context(|| format!("failed to open input file {}", args.input))?;
        ingest(file, config)
    }
}

fn ingest(mut input: impl Read, config: FrameConfig) -> anyhow::Result<()> {
    let byte_order = config.byte_order;
    let mut reader = FrameReader::new(config);
    let mut chunk = [0u8; 8 * 1024];
    let mut records = 0u64;

    loop {
        let n = input.read(&mut chunk).context("read from input failed")?;
        if n == 0 {
            break;
        }
        reader.push(&chunk[..n]);
        while let Some(frame) = reader.next_frame()? {
            let record = decode_record(&frame, byte_order)?;
            println!("{record}");
            records += 1;
        }
    }

    reader
        .finish()
        .with_context(|| format!("stream ended mid-frame after {records} records"))?;
    Ok(())
}
