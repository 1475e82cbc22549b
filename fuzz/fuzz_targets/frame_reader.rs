#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use bts_decoder::{FrameConfig, FrameReader};
use bts_wire::ByteOrder;

// Fuzz target: FrameReader fed arbitrary bytes in arbitrary chunkings.
//
// Catches bugs in:
// - Partial-header / partial-payload state tracking across pushes
// - The cached pending frame length
// - Oversize detection with a small ceiling
// - The buffered-bytes accounting finish() relies on
#[derive(Arbitrary, Debug)]
struct Input<'a> {
    stream: &'a [u8],
    chunk_sizes: Vec<u8>,
    big_endian: bool,
}

fuzz_target!(|input: Input<'_>| {
    let config = FrameConfig {
        byte_order: if input.big_endian {
            ByteOrder::Big
        } else {
            ByteOrder::Little
        },
        max_frame_len: 4096,
    };
    let mut reader = FrameReader::new(config);

    let mut offset = 0;
    let mut delivered = 0usize;
    for &size in &input.chunk_sizes {
        if offset >= input.stream.len() {
            break;
        }
        let end = (offset + size as usize).min(input.stream.len());
        reader.push(&input.stream[offset..end]);
        offset = end;

        loop {
            match reader.next_frame() {
                Ok(Some(frame)) => {
                    assert!(frame.len() <= 4096);
                    delivered += frame.len();
                }
                Ok(None) => break,
                Err(_) => return, // oversize: stream abandoned
            }
        }
    }

    // Delivered plus still-buffered bytes must equal everything pushed
    assert_eq!(delivered + reader.buffered(), offset);
    let _ = reader.finish();
});
