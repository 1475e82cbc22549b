#![warn(clippy::pedantic)]

pub mod action;
pub mod device;
pub mod error;
pub mod header;
pub mod order;
pub mod record;

pub use action::{Action, ActionCode, Categories, Notify};
pub use device::Device;
pub use error::WireError;
pub use header::{HEADER_SIZE, TraceHeader};
pub use order::ByteOrder;
pub use record::TraceRecord;
