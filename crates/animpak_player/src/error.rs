//! Error types for playback.

use animpak_types::PackError;
use thiserror::Error;

use crate::sink::SinkError;

/// Errors reported by [`Player`](crate::Player) and [`AnimationDisplay`](crate::AnimationDisplay)
#[derive(Debug, Error)]
pub enum PlayError {
	/// Catalog, container or storage failure
	#[error(transparent)]
	Pack(#[from] PackError),

	/// `play` was called without a successfully loaded animation
	#[error("No animation loaded")]
	NotLoaded,

	/// A frame failed to decode; the pass was aborted before displaying it
	#[error("Failed to decode frame {frame}: {source}")]
	Decode {
		/// Index of the failing frame
		frame: usize,
		/// Underlying decode error
		#[source]
		source: PackError,
	},

	/// The sink rejected a frame
	#[error("Failed to present frame {frame}: {source}")]
	Sink {
		/// Index of the rejected frame
		frame: usize,
		/// Error reported by the sink
		#[source]
		source: SinkError,
	},

	/// Playback is suppressed while the display is in power save mode
	#[error("Display is in power save mode")]
	PowerSave,
}

impl PlayError {
	/// Returns `true` when the requested animation does not exist
	pub fn is_not_found(&self) -> bool {
		matches!(self, Self::Pack(PackError::NotFound { .. }))
	}
}

/// How a playback call ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayOutcome {
	/// Every frame of a single pass was delivered
	Completed,
	/// Playback stopped at a frame boundary because it was superseded
	Cancelled,
}
