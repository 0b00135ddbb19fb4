//! Frame destinations.

use animpak_types::{FrameBuffer, color};

/// Error type sinks report failures with
pub type SinkError = Box<dyn std::error::Error + Send + Sync>;

/// Something decoded frames can be drawn on, typically a display panel
pub trait FrameSink {
	/// Draws a `width` x `height` block of RGB565 pixels at (`x`, `y`)
	fn draw_bitmap(&mut self, x: u16, y: u16, width: u16, height: u16, pixels: &[u16]) -> Result<(), SinkError>;

	/// Blanks the whole surface
	fn clear(&mut self) -> Result<(), SinkError>;

	/// Draws a full frame at the origin
	fn draw_frame(&mut self, frame: &FrameBuffer) -> Result<(), SinkError> {
		self.draw_bitmap(0, 0, frame.width(), frame.height(), frame.pixels())
	}
}

impl<S: FrameSink + ?Sized> FrameSink for &mut S {
	fn draw_bitmap(&mut self, x: u16, y: u16, width: u16, height: u16, pixels: &[u16]) -> Result<(), SinkError> {
		(**self).draw_bitmap(x, y, width, height, pixels)
	}

	fn clear(&mut self) -> Result<(), SinkError> {
		(**self).clear()
	}

	fn draw_frame(&mut self, frame: &FrameBuffer) -> Result<(), SinkError> {
		(**self).draw_frame(frame)
	}
}

/// In-memory surface that keeps a copy of every drawn frame
///
/// Useful headless and in tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemorySink {
	width: u16,
	height: u16,
	surface: Vec<u16>,
	frames: Vec<Vec<u16>>,
	clears: usize,
	keep_history: bool,
}

impl MemorySink {
	/// Creates a black surface
	pub fn new(width: u16, height: u16) -> Self {
		Self {
			width,
			height,
			surface: vec![color::BLACK; usize::from(width) * usize::from(height)],
			frames: Vec::new(),
			clears: 0,
			keep_history: true,
		}
	}

	/// Keeps only the current surface, not every frame drawn
	pub fn without_history(mut self) -> Self {
		self.keep_history = false;
		self
	}

	/// Current surface contents
	pub fn surface(&self) -> &[u16] {
		&self.surface
	}

	/// Surfaces after each draw, oldest first
	pub fn frames(&self) -> &[Vec<u16>] {
		&self.frames
	}

	/// Number of times the surface was cleared
	pub fn clears(&self) -> usize {
		self.clears
	}
}

impl FrameSink for MemorySink {
	fn draw_bitmap(&mut self, x: u16, y: u16, width: u16, height: u16, pixels: &[u16]) -> Result<(), SinkError> {
		let expected = usize::from(width) * usize::from(height);
		if expected != pixels.len() {
			return Err(format!("bitmap {}x{} needs {} pixels, got {}", width, height, expected, pixels.len()).into());
		}
		if x.saturating_add(width) > self.width || y.saturating_add(height) > self.height {
			return Err(format!(
				"bitmap {}x{} at ({}, {}) exceeds {}x{} surface",
				width, height, x, y, self.width, self.height
			)
			.into());
		}

		let stride = usize::from(self.width);
		for (row, line) in pixels.chunks_exact(usize::from(width).max(1)).enumerate() {
			let start = (usize::from(y) + row) * stride + usize::from(x);
			self.surface[start..start + line.len()].copy_from_slice(line);
		}
		if self.keep_history {
			self.frames.push(self.surface.clone());
		}
		Ok(())
	}

	fn clear(&mut self) -> Result<(), SinkError> {
		self.surface.fill(color::BLACK);
		self.clears += 1;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_draw_bitmap_region() {
		let mut sink = MemorySink::new(3, 2);
		sink.draw_bitmap(1, 0, 2, 2, &[1, 2, 3, 4]).unwrap();
		assert_eq!(sink.surface(), &[0, 1, 2, 0, 3, 4]);
		assert_eq!(sink.frames().len(), 1);

		sink.clear().unwrap();
		assert_eq!(sink.surface(), &[0; 6]);
		assert_eq!(sink.clears(), 1);
	}

	#[test]
	fn test_draw_bitmap_rejects_overflow() {
		let mut sink = MemorySink::new(2, 2);
		assert!(sink.draw_bitmap(1, 1, 2, 2, &[0; 4]).is_err());
		assert!(sink.draw_bitmap(0, 0, 2, 2, &[0; 3]).is_err());
		assert!(sink.frames().is_empty());
	}
}
