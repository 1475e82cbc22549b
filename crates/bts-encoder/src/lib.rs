#![warn(clippy::pedantic)]

pub mod encoder;
pub mod error;

pub use encoder::{RecordEncoder, StreamWriter};
pub use error::EncodeError;
