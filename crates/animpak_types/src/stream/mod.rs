//! Streaming frame decoding.
//!
//! A frame is decoded straight from storage: the run-length stream is fetched
//! in fixed-size chunks, each chunk's complete 3-byte records are expanded
//! into the caller's [`FrameBuffer`], and the 0 to 2 bytes of a record cut by
//! the chunk boundary are carried into the next read. Memory use is one frame
//! plus one chunk regardless of animation length.

mod chunk;
mod frame;
mod streamer;


pub use chunk::ChunkBuffer;
pub use frame::FrameBuffer;
pub use streamer::{FrameStats, FrameStreamer};
