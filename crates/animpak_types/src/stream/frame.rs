//! Reusable decoded-frame buffer.

use std::fmt::Display;

use crate::{color, config::StreamConfig};

/// A fixed-size frame of RGB565 pixels in raster order
///
/// Allocated once and overwritten by every decode; never resized.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FrameBuffer {
	width: u16,
	height: u16,
	pixels: Vec<u16>,
}

impl FrameBuffer {
	/// Creates a black frame
	pub fn new(width: u16, height: u16) -> Self {
		Self {
			width,
			height,
			pixels: vec![color::BLACK; usize::from(width) * usize::from(height)],
		}
	}

	/// Creates a black frame sized for `config`
	pub fn for_config(config: &StreamConfig) -> Self {
		Self::new(config.width, config.height)
	}

	/// Frame width in pixels
	pub fn width(&self) -> u16 {
		self.width
	}

	/// Frame height in pixels
	pub fn height(&self) -> u16 {
		self.height
	}

	/// Number of pixels
	pub fn len(&self) -> usize {
		self.pixels.len()
	}

	/// Returns `true` for a zero-sized frame
	pub fn is_empty(&self) -> bool {
		self.pixels.is_empty()
	}

	/// Pixels in raster order
	pub fn pixels(&self) -> &[u16] {
		&self.pixels
	}

	/// Mutable pixels in raster order
	pub fn pixels_mut(&mut self) -> &mut [u16] {
		&mut self.pixels
	}

	/// Sets every pixel to black
	pub fn clear(&mut self) {
		self.pixels.fill(color::BLACK);
	}

	/// Returns row `y`, or `None` past the bottom edge
	pub fn row(&self, y: u16) -> Option<&[u16]> {
		if y >= self.height {
			return None;
		}
		let start = usize::from(y) * usize::from(self.width);
		Some(&self.pixels[start..start + usize::from(self.width)])
	}

	/// Iterates over rows from top to bottom
	pub fn rows(&self) -> std::slice::ChunksExact<'_, u16> {
		self.pixels.chunks_exact(usize::from(self.width.max(1)))
	}

	/// Expands the frame to packed 8-bit RGB
	pub fn to_rgb888(&self) -> Vec<u8> {
		self.pixels.iter().flat_map(|&p| color::to_rgb888(p)).collect()
	}
}

impl Display for FrameBuffer {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "Frame {}x{} ({} pixels)", self.width, self.height, self.pixels.len())
	}
}
