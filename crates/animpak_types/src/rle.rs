//! Run-length pixel codec.
//!
//! A frame's pixels are stored in raster order as back-to-back 3-byte records:
//!
//! ```text
//! Offset  Size  Field      Description
//! ------  ----  ---------  ------------------------------------------
//! +0x00   1     run        Number of pixels (0 is legal and emits nothing)
//! +0x01   1     color_hi   High byte of the RGB565 color
//! +0x02   1     color_lo   Low byte of the RGB565 color
//! ```
//!
//! Unlike the rest of the container, the color is stored big-endian.

use crate::constants::{MAX_RUN, RLE_RECORD_SIZE};

/// One decoded run-length record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Run {
	/// Number of pixels
	pub length: u8,
	/// RGB565 color
	pub color: u16,
}

impl Run {
	/// Decodes a record
	pub fn from_bytes(record: [u8; RLE_RECORD_SIZE]) -> Self {
		Self {
			length: record[0],
			color: u16::from_be_bytes([record[1], record[2]]),
		}
	}

	/// Encodes the record
	pub fn to_bytes(self) -> [u8; RLE_RECORD_SIZE] {
		let [hi, lo] = self.color.to_be_bytes();
		[self.length, hi, lo]
	}
}

/// Iterates over the complete records of `stream`, ignoring a trailing partial record
pub fn runs(stream: &[u8]) -> impl Iterator<Item = Run> + '_ {
	stream.chunks_exact(RLE_RECORD_SIZE).map(|r| Run::from_bytes([r[0], r[1], r[2]]))
}

/// Decodes the complete records of `records` into `out`, starting at pixel `cursor`
///
/// Returns the new pixel cursor. Decoding stops as soon as `out` is full;
/// remaining records are left unconsumed.
pub fn decode_into(records: &[u8], out: &mut [u16], mut cursor: usize) -> usize {
	for run in runs(records) {
		if cursor >= out.len() {
			break;
		}
		let end = (cursor + usize::from(run.length)).min(out.len());
		out[cursor..end].fill(run.color);
		cursor = end;
	}
	cursor
}

/// Decodes a whole in-memory stream into a frame of `pixel_count` pixels
///
/// A short stream leaves the remainder black.
pub fn decode(stream: &[u8], pixel_count: usize) -> Vec<u16> {
	let mut out = vec![0u16; pixel_count];
	decode_into(stream, &mut out, 0);
	out
}

/// Encodes pixels as a run-length stream, splitting runs longer than 255
pub fn encode(pixels: &[u16]) -> Vec<u8> {
	let mut stream = Vec::new();
	let mut rest = pixels;

	while let Some(&color) = rest.first() {
		let run = rest.iter().take(MAX_RUN).take_while(|&&p| p == color).count();
		stream.extend_from_slice(
			&Run {
				length: run as u8,
				color,
			}
			.to_bytes(),
		);
		rest = &rest[run..];
	}

	stream
}
