//! # Trace Module
//!
//! Everything that ends up in a channel file goes through here.
//!
//! This module handles:
//! - One append-only [`ChannelSink`] per channel, serializing its own writes
//! - Event timestamps from a [`TimeSource`]
//! - Normalizing host values into the fixed payload formats

pub mod clock;
pub mod payload;
pub mod sink;

#[cfg(test)]
pub mod mocks;

pub use clock::{SystemClock, TimeSource};
pub use sink::{ChannelSink, SinkSet, LINE_SEPARATOR};
