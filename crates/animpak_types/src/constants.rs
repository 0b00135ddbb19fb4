//! Container format constants.
//!
//! Field widths and record sizes are fixed by the wire format; all integers
//! are little-endian except the two color bytes of a run-length record.

/// Magic literal of the top-level container
pub const PACK_MAGIC: [u8; 4] = *b"PACK";

/// Magic literal of a per-animation sub-container
pub const ANIM_MAGIC: [u8; 4] = *b"ANIM";

/// Container header size: magic(4) + count(2)
pub const PACK_HEADER_SIZE: usize = 6;

/// Size of the NUL-padded name field of a table entry
pub const NAME_SIZE: usize = 32;

/// Table entry size: name(32) + offset(4) + length(4)
pub const TABLE_ENTRY_SIZE: usize = NAME_SIZE + 4 + 4;

/// Largest animation count accepted; anything above is treated as corruption
pub const MAX_ANIMATIONS: u16 = 70;

/// Sub-header size: magic(4) + frame_count(2) + frame_table_offset(4)
/// + frame_data_size(4) + audio_data_size(4)
pub const ANIM_HEADER_SIZE: usize = 18;

/// Prefix of the sub-header read by the frame count probe: magic(4) + frame_count(2)
pub const ANIM_PROBE_SIZE: usize = 6;

/// Frame table entry size: offset(4) + size(4)
pub const FRAME_TABLE_ENTRY_SIZE: usize = 8;

/// Run-length record size: run(1) + color_hi(1) + color_lo(1)
pub const RLE_RECORD_SIZE: usize = 3;

/// Longest run a single record can express
pub const MAX_RUN: usize = u8::MAX as usize;

/// Default frame width in pixels
pub const DEFAULT_FRAME_WIDTH: u16 = 96;

/// Default frame height in pixels
pub const DEFAULT_FRAME_HEIGHT: u16 = 64;

/// Default size of a single streaming read, in bytes
pub const DEFAULT_READ_CHUNK: usize = 256;

/// Default sanity threshold for a sub-container's frame count
pub const DEFAULT_MAX_FRAME_COUNT: u16 = 10_000;

/// Largest streaming read a decoder accepts, in bytes
pub const MAX_READ_CHUNK: usize = 64 * 1024;

/// Largest frame a decoder accepts, in pixels (a 2 MiB frame buffer)
pub const MAX_FRAME_PIXELS: usize = 1024 * 1024;
