//! Display configuration.

use std::time::Duration;

use animpak_types::{PackError, StreamConfig};
use animpak_vfs::DEFAULT_WRITE_CHUNK;
use serde::{Deserialize, Serialize};

/// Default delay between two frames, about 30 frames per second
pub const DEFAULT_FRAME_DELAY_MS: u64 = 33;

/// Settings for an [`AnimationDisplay`](crate::AnimationDisplay)
///
/// Every field has a default, so partial sources (a TOML file, environment
/// variables) deserialize into a complete configuration.
///
/// # Examples
///
/// ```
/// use animpak_player::DisplayConfig;
///
/// let config = DisplayConfig::default();
/// assert_eq!(config.partition_label, "animations");
/// assert_eq!(config.startup_animation.as_deref(), Some("meter"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
	/// Label of the storage region holding the container
	pub partition_label: String,
	/// Offset of the `PACK` header inside the region
	pub base_offset: u32,
	/// Largest single write transaction
	pub write_chunk: usize,
	/// Delay between two frames, in milliseconds
	pub frame_delay_ms: u64,
	/// Animation played once by [`start`](crate::AnimationDisplay::start)
	pub startup_animation: Option<String>,
	/// Frame geometry and decode limits
	pub stream: StreamConfig,
}

impl Default for DisplayConfig {
	fn default() -> Self {
		Self {
			partition_label: "animations".to_string(),
			base_offset: 0,
			write_chunk: DEFAULT_WRITE_CHUNK,
			frame_delay_ms: DEFAULT_FRAME_DELAY_MS,
			startup_animation: Some("meter".to_string()),
			stream: StreamConfig::default(),
		}
	}
}

impl DisplayConfig {
	/// Delay between two frames
	pub fn frame_delay(&self) -> Duration {
		Duration::from_millis(self.frame_delay_ms)
	}

	/// Checks that the configuration can drive a display
	pub fn validate(&self) -> Result<(), PackError> {
		if self.write_chunk == 0 {
			return Err(PackError::Config("write_chunk must be greater than zero".to_string()));
		}
		self.stream.validate()
	}
}
