//! `PACK` animation container support.
//!
//! A container holds up to 70 named animations. It starts at a base offset
//! inside a storage region; all integers are little-endian.
//!
//! # File Structure
//!
//! ```text
//! Offset  Size      Field        Description
//! ------  --------  -----------  -------------------------------------------
//! +0x00   4         magic        "PACK"
//! +0x04   2         count        Number of table entries (at most 70)
//! +0x06   40*count  table        Table entries, in file order
//! ```
//!
//! Each table entry is a NUL-padded 32-byte name, a `u32` absolute offset of
//! the animation's sub-container and a `u32` length.
//!
//! An `ANIM` sub-container is laid out as:
//!
//! ```text
//! Offset  Size  Field            Description
//! ------  ----  ---------------  ------------------------------------------
//! +0x00   4     magic            "ANIM"
//! +0x04   2     frame_count      Number of frames
//! +0x06   4     frame_table_off  Frame table offset, relative to the sub-container
//! +0x0A   4     frame_data_size  Total run-length bytes (informational)
//! +0x0E   4     audio_data_size  Audio payload bytes (informational)
//! ```
//!
//! The frame table holds one 8-byte entry per frame (`u32` offset relative to
//! the frame data base, `u32` size). The frame data base directly follows the
//! table: `entry.offset + frame_table_off + frame_count * 8`. See
//! [`rle`](crate::rle) for the frame stream encoding.
//!
//! # Examples
//!
//! ```
//! use animpak_types::pack::{AnimationBuilder, Catalog, PackBuilder};
//! use animpak_vfs::{ByteStore, MemoryMedium};
//!
//! let mut pack = PackBuilder::new();
//! pack.add(AnimationBuilder::new("meter")?.with_frame(&[0u16; 4]))?;
//!
//! let mut store = ByteStore::new(MemoryMedium::from_bytes(pack.to_region(16)?));
//! let catalog = Catalog::open(&mut store, 16)?;
//! assert_eq!(catalog.list_names(), vec!["meter".to_string()]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod anim;
mod builder;
mod catalog;
mod header;


pub use anim::{AnimHeader, FrameTableEntry};
pub use builder::{AnimationBuilder, PackBuilder};
pub use catalog::Catalog;
pub use header::{PackHeader, TableEntry};
