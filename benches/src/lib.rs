//! Benchmark helper utilities for animpak-rs
//!
//! Generates synthetic containers so the suite runs without real flash images.
//! Two frame flavors bracket the decoder's cost:
//! - **flat**: few long runs, the stream is tiny and decode is fill-bound
//! - **noisy**: a fresh color almost every pixel, one 3-byte record per pixel

use animpak_types::{AnimationBuilder, FormatError, PackBuilder, color};
use rand::{Rng, SeedableRng, rngs::SmallRng};

/// Fixed seed so every run decodes the same bytes
pub const SEED: u64 = 0x00A1_1A4A;

/// Frame flavor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
	/// Horizontal bands of solid color
	Flat,
	/// Random colors from the full RGB565 range
	Noisy,
}

/// Generates `count` frames of `width * height` pixels
pub fn generate_frames(width: u16, height: u16, count: usize, pattern: Pattern) -> Vec<Vec<u16>> {
	let pixels = usize::from(width) * usize::from(height);
	let mut rng = SmallRng::seed_from_u64(SEED);

	(0..count)
		.map(|i| match pattern {
			Pattern::Flat => {
				let bands = [color::BLACK, color::GREEN, color::RED, color::BLUE];
				(0..pixels).map(|p| bands[(p / usize::from(width.max(1)) / 8 + i) % bands.len()]).collect()
			}
			Pattern::Noisy => (0..pixels).map(|_| rng.random::<u16>()).collect(),
		})
		.collect()
}

/// Builds a region holding one animation called `"bench"`
pub fn generate_pack(width: u16, height: u16, frames: usize, pattern: Pattern) -> Result<Vec<u8>, FormatError> {
	let mut animation = AnimationBuilder::new("bench")?;
	for frame in generate_frames(width, height, frames, pattern) {
		animation.add_frame(&frame);
	}

	let mut pack = PackBuilder::new();
	pack.add(animation)?;
	pack.to_region(0)
}

/// Builds a region with `entries` small animations, for catalog benchmarks
///
/// Fails above the 70-entry limit.
pub fn generate_catalog(entries: usize) -> Result<Vec<u8>, FormatError> {
	let mut pack = PackBuilder::new();
	for i in 0..entries {
		pack.add(AnimationBuilder::new(format!("anim_{i:02}"))?.with_frame(&[color::BLACK; 4]))?;
	}
	pack.to_region(0)
}

/// Common benchmark sizes
pub mod sizes {
	/// The 96x64 panel the format was designed for
	pub const PANEL: (u16, u16) = (96, 64);
	/// A larger 320x240 panel
	pub const QVGA: (u16, u16) = (320, 240);
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_generate_pack() {
		let data = generate_pack(4, 4, 3, Pattern::Noisy).unwrap();
		assert_eq!(&data[0..4], b"PACK");
		assert_eq!(&data[4..6], &[1, 0]);
	}

	#[test]
	fn test_generate_frames_is_deterministic() {
		assert_eq!(generate_frames(8, 8, 2, Pattern::Noisy), generate_frames(8, 8, 2, Pattern::Noisy));
		assert_eq!(generate_frames(8, 8, 1, Pattern::Flat)[0].len(), 64);
	}

	#[test]
	fn test_generate_catalog() {
		let data = generate_catalog(70).unwrap();
		assert_eq!(u16::from_le_bytes([data[4], data[5]]), 70);
		assert!(generate_catalog(71).is_err());
	}
}
