//! Streaming decode configuration.

use serde::{Deserialize, Serialize};

use crate::{
	constants::{
		DEFAULT_FRAME_HEIGHT, DEFAULT_FRAME_WIDTH, DEFAULT_MAX_FRAME_COUNT, DEFAULT_READ_CHUNK,
		MAX_FRAME_PIXELS, MAX_READ_CHUNK,
	},
	error::{FormatError, PackError},
};

/// Frame geometry and memory limits for a [`FrameStreamer`](crate::FrameStreamer).
///
/// Peak decode memory is one frame buffer (`width * height` colors) plus one
/// read chunk and two carry bytes, independent of animation length.
///
/// # Presets
///
/// - `default()`: 96x64 frames, 256-byte reads
/// - `low_memory()`: 96x64 frames, 32-byte reads
///
/// # Examples
///
/// ```
/// use animpak_types::StreamConfig;
///
/// let config = StreamConfig::default();
/// assert_eq!(config.frame_pixels(), 96 * 64);
///
/// let config = StreamConfig::new(2, 2, 5);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
	/// Frame width in pixels
	pub width: u16,
	/// Frame height in pixels
	pub height: u16,
	/// Bytes fetched from storage per streaming read
	pub read_chunk: usize,
	/// Largest frame count accepted in a sub-container
	pub max_frame_count: u16,
}

impl Default for StreamConfig {
	fn default() -> Self {
		Self {
			width: DEFAULT_FRAME_WIDTH,
			height: DEFAULT_FRAME_HEIGHT,
			read_chunk: DEFAULT_READ_CHUNK,
			max_frame_count: DEFAULT_MAX_FRAME_COUNT,
		}
	}
}

impl StreamConfig {
	/// Creates a configuration with custom geometry and read size
	pub fn new(width: u16, height: u16, read_chunk: usize) -> Self {
		Self {
			width,
			height,
			read_chunk,
			..Self::default()
		}
	}

	/// Default geometry with small reads for tight RAM budgets
	pub fn low_memory() -> Self {
		Self {
			read_chunk: 32,
			..Self::default()
		}
	}

	/// Sets the frame count threshold
	pub fn with_max_frame_count(mut self, max_frame_count: u16) -> Self {
		self.max_frame_count = max_frame_count;
		self
	}

	/// Pixels per frame
	pub fn frame_pixels(&self) -> usize {
		usize::from(self.width) * usize::from(self.height)
	}

	/// Checks that the configuration can drive a decoder
	///
	/// # Errors
	///
	/// - [`FormatError::FrameTooLarge`] when a frame exceeds [`MAX_FRAME_PIXELS`]
	/// - [`PackError::Config`] for a zero dimension, a zero frame count
	///   threshold, or a read chunk outside `1..=MAX_READ_CHUNK`
	pub fn validate(&self) -> Result<(), PackError> {
		if self.width == 0 || self.height == 0 {
			return Err(PackError::Config(format!(
				"frame size {}x{} must be non-zero",
				self.width, self.height
			)));
		}
		let pixels = self.frame_pixels();
		if pixels > MAX_FRAME_PIXELS {
			return Err(FormatError::FrameTooLarge {
				pixels,
				max: MAX_FRAME_PIXELS,
			}
			.into());
		}
		if self.read_chunk == 0 || self.read_chunk > MAX_READ_CHUNK {
			return Err(PackError::Config(format!(
				"read_chunk {} must be between 1 and {}",
				self.read_chunk, MAX_READ_CHUNK
			)));
		}
		if self.max_frame_count == 0 {
			return Err(PackError::Config("max_frame_count must be greater than zero".to_string()));
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_presets() {
		assert_eq!(StreamConfig::default().read_chunk, 256);
		assert_eq!(StreamConfig::low_memory().read_chunk, 32);
		assert_eq!(StreamConfig::default().max_frame_count, 10_000);
	}

	#[test]
	fn test_validate() {
		assert!(StreamConfig::new(0, 64, 256).validate().is_err());
		assert!(StreamConfig::new(96, 64, 0).validate().is_err());
		assert!(StreamConfig::default().with_max_frame_count(0).validate().is_err());
		assert!(StreamConfig::new(1, 1, 1).validate().is_ok());
	}

	#[test]
	fn test_validate_read_chunk_limit() {
		assert!(StreamConfig::new(96, 64, MAX_READ_CHUNK).validate().is_ok());
		assert!(matches!(
			StreamConfig::new(96, 64, MAX_READ_CHUNK + 1).validate(),
			Err(PackError::Config(_))
		));
		assert!(StreamConfig::new(2, 2, usize::MAX).validate().is_err());
	}

	#[test]
	fn test_validate_frame_size_limit() {
		assert!(StreamConfig::new(1024, 1024, 256).validate().is_ok());
		assert!(matches!(
			StreamConfig::new(1025, 1024, 256).validate(),
			Err(PackError::Format(FormatError::FrameTooLarge {
				pixels: 1_049_600,
				max: MAX_FRAME_PIXELS,
			}))
		));
		assert!(StreamConfig::new(u16::MAX, u16::MAX, 256).validate().is_err());
	}

	#[test]
	fn test_oversized_read_chunk_from_json() {
		let config: StreamConfig =
			serde_json::from_str(r#"{ "read_chunk": 18446744073709551615 }"#).unwrap();
		assert!(config.validate().is_err());
	}

	#[test]
	fn test_deserialize_fills_defaults() {
		let config: StreamConfig = serde_json::from_str(r#"{ "read_chunk": 64 }"#).unwrap();
		assert_eq!(config.read_chunk, 64);
		assert_eq!(config.width, 96);
		assert_eq!(config.height, 64);
	}
}
