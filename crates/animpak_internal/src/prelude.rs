//! Prelude module for `animpak_internal`.
//!
//! This module provides a convenient way to import commonly used types and traits.
//!
//! # Examples
//!
//! ```rust
//! use animpak_internal::prelude::*;
//!
//! let mut pack = PackBuilder::new();
//! pack.add(AnimationBuilder::new("meter").unwrap().with_frame(&[color::GREEN; 96 * 64])).unwrap();
//!
//! let mut store = ByteStore::new(MemoryMedium::from_bytes(pack.to_region(0).unwrap()));
//! let catalog = Catalog::open(&mut store, 0).unwrap();
//! let entry = catalog.require("meter").unwrap();
//!
//! let config = StreamConfig::default();
//! let mut streamer = FrameStreamer::new(config).unwrap();
//! let mut frame = FrameBuffer::for_config(&config);
//! streamer.decode_frame(&mut store, entry, 0, &mut frame).unwrap();
//! assert!(frame.pixels().iter().all(|&p| p == color::GREEN));
//! ```

// Re-export everything from animpak_types::prelude
#[doc(inline)]
pub use animpak_types::prelude::*;

// Storage
#[doc(inline)]
pub use animpak_vfs::{ByteStore, FileMedium, Medium, MemoryMedium, StoreError};

// Playback
#[doc(inline)]
pub use animpak_player::{
	AnimationDisplay, CancelToken, Canceller, DisplayConfig, FrameSink, MemorySink, NoopPacer, Pacer, PlayError,
	PlayOutcome, Player, PlayerState, SinkError, SleepPacer,
};
