use anyhow::Context;

use bts_decoder::{FrameConfig, FrameReader, decode_record};

use crate::InspectArgs;
use crate::hexdump::hexdump;

/// Indexed per-record dump of a captured trace file, with an optional
/// payload hex dump.
pub fn run(args: &InspectArgs, config: FrameConfig) -> anyhow::Result<()> {
    let bytes = std::fs::read(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;

    let byte_order = config.byte_order;
    let mut reader = FrameReader::new(config);
    reader.push(&bytes);

    let limit = args.limit.unwrap_or(usize::MAX);
    let mut index = 0usize;
    while index < limit {
        let Some(frame) = reader.next_frame()? else {
            break;
        };
        let record = decode_record(&frame, byte_order)?;
        println!("[{index}] {record}");
        if args.payload && !record.payload.is_empty() {
            print!("{}", hexdump(&record.payload));
        }
        index += 1;
    }

    if args.limit.is_none() {
        reader
            .finish()
            .with_context(|| format!("file ends mid-frame after {index} records"))?;
    }
    Ok(())
}
