//! Byte-to-line framing and text decoding for the `ptee` pipeline.
//!
//! This crate is the stateless half of spec component A (the line framer):
//! it knows how to turn a run of decoded bytes into complete/partial lines
//! and how to measure their display width, but it owns no I/O and no
//! timers. Those live in the binary, which is the only place the
//! partial-line timeout can actually fire against a blocking read.

pub mod encoding;
pub mod framer;
pub mod width;

pub use encoding::{Encoding, UnknownEncoding};
pub use framer::{FrameEvent, LineAccumulator};
pub use width::{display_width, truncate_to_width};
