#![warn(clippy::pedantic)]

pub mod error;
pub mod listener;

pub use error::IngestError;
pub use listener::{IngestEvent, serve};
