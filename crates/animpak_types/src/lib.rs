//! Container formats and streaming decode for the `animpak-rs` project.
//!
//! # Overview
//!
//! - [`pack`]: the `PACK` container, its `ANIM` sub-containers and the [`Catalog`]
//! - [`rle`]: the 3-byte run-length pixel codec
//! - [`stream`]: the chunked [`FrameStreamer`] that decodes one frame at a time
//!   with bounded memory
//! - [`color`]: RGB565 helpers
//!
//! # Examples
//!
//! ```no_run
//! use animpak_types::prelude::*;
//! use animpak_vfs::{ByteStore, FileMedium};
//!
//! let mut store = ByteStore::new(FileMedium::open("flash.bin")?);
//! let catalog = Catalog::open(&mut store, 0)?;
//! for name in catalog.list_names() {
//! 	println!("{name}");
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod color;
pub mod config;
pub mod constants;
pub mod error;
pub mod pack;
pub mod rle;
pub mod stream;

/// `use animpak_types::prelude::*;` to import commonly used items.
pub mod prelude;

pub use config::StreamConfig;
pub use error::{FormatError, PackError, Section};
pub use pack::{AnimHeader, AnimationBuilder, Catalog, FrameTableEntry, PackBuilder, PackHeader, TableEntry};
pub use stream::{FrameBuffer, FrameStats, FrameStreamer};
