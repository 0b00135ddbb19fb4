//! End-to-end tests for `animpak-rs` over file-backed flash images

mod display;
mod flash_image;

use animpak_rs::prelude::*;

pub const WIDTH: u16 = 8;
pub const HEIGHT: u16 = 4;

/// Frames where frame `i` lights the first `i + 1` columns of every row
pub fn column_frames(count: usize) -> Vec<Vec<u16>> {
	(0..count)
		.map(|i| {
			(0..usize::from(WIDTH) * usize::from(HEIGHT))
				.map(|p| if p % usize::from(WIDTH) <= i { color::GREEN } else { color::BLACK })
				.collect()
		})
		.collect()
}

/// Container with "meter" (column frames) and "solid" (one red frame)
pub fn build_pack() -> PackBuilder {
	let mut meter = AnimationBuilder::new("meter").unwrap();
	for frame in column_frames(usize::from(WIDTH)) {
		meter.add_frame(&frame);
	}
	let solid = AnimationBuilder::new("solid").unwrap().with_frame(&[color::RED; 32]).with_audio(vec![0x55; 100]);

	let mut pack = PackBuilder::new();
	pack.add(meter).unwrap();
	pack.add(solid).unwrap();
	pack
}

pub fn stream_config(read_chunk: usize) -> StreamConfig {
	StreamConfig::new(WIDTH, HEIGHT, read_chunk)
}
