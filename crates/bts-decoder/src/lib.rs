#![warn(clippy::pedantic)]

pub mod error;
pub mod frame_reader;
pub mod record;
pub mod streaming;

pub use error::{DecodeError, FrameError};
pub use frame_reader::{DEFAULT_MAX_FRAME_LEN, FrameConfig, FrameReader};
pub use record::decode_record;
pub use streaming::StreamingDecoder;
