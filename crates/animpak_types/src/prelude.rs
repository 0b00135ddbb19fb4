//! Prelude module for `animpak_types`.
//!
//! # Examples
//!
//! ```
//! use animpak_types::prelude::*;
//!
//! let config = StreamConfig::default();
//! let frame = FrameBuffer::for_config(&config);
//! assert_eq!(frame.len(), 96 * 64);
//! ```

#[doc(inline)]
pub use crate::{
	// Configuration
	config::StreamConfig,

	// Errors
	error::{FormatError, PackError},

	// Container types
	pack::{AnimHeader, AnimationBuilder, Catalog, FrameTableEntry, PackBuilder, PackHeader, TableEntry},

	// Streaming
	stream::{FrameBuffer, FrameStats, FrameStreamer},
};

#[doc(inline)]
pub use crate::color;

#[doc(inline)]
pub use crate::rle;
