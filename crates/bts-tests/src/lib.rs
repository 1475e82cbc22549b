#![warn(clippy::pedantic)]

pub mod fixtures;
