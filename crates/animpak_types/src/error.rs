//! Error types for container parsing and frame decoding.

use std::fmt::Display;

use animpak_vfs::StoreError;
use thiserror::Error;

/// Container section a format error was detected in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
	/// Top-level `PACK` container
	Pack,
	/// Per-animation `ANIM` sub-container
	Anim,
}

impl Display for Section {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Section::Pack => write!(f, "PACK"),
			Section::Anim => write!(f, "ANIM"),
		}
	}
}

/// Structural problems in the container bytes
///
/// Always fatal to the operation that detected them; nothing is partially applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
	/// Magic literal does not match
	#[error("Invalid {section} magic: expected {expected:02X?}, got {actual:02X?}")]
	BadMagic {
		/// Section being parsed
		section: Section,
		/// Expected magic bytes
		expected: [u8; 4],
		/// Magic bytes found
		actual: [u8; 4],
	},

	/// Animation count above the supported maximum
	#[error("Too many animations: {count} (max {max})")]
	TooManyEntries {
		/// Declared count
		count: u16,
		/// Supported maximum
		max: u16,
	},

	/// Frame count above the configured sanity threshold
	#[error("Too many frames: {count} (max {max})")]
	TooManyFrames {
		/// Declared count
		count: u16,
		/// Configured maximum
		max: u16,
	},

	/// Sub-container declares zero frames
	#[error("Animation has no frames")]
	EmptyAnimation,

	/// Not enough data to parse a record
	#[error("Insufficient data: expected {expected} bytes, got {actual} bytes")]
	InsufficientData {
		/// Expected number of bytes
		expected: usize,
		/// Actual number of bytes
		actual: usize,
	},

	/// Animation name does not fit the fixed-size name field
	#[error("Animation name is {len} bytes long (max {max})")]
	NameTooLong {
		/// Length of the rejected name
		len: usize,
		/// Size of the name field
		max: usize,
	},

	/// Frame geometry above the supported maximum
	#[error("Frame too large: {pixels} pixels (max {max})")]
	FrameTooLarge {
		/// Pixels per frame of the rejected geometry
		pixels: usize,
		/// Supported maximum
		max: usize,
	},

	/// Container would not be addressable with 32-bit offsets
	#[error("Container too large: {size} bytes")]
	ContainerTooLarge {
		/// Size the container would have
		size: u64,
	},
}

impl FormatError {
	/// Creates an insufficient data error
	pub fn insufficient_data(expected: usize, actual: usize) -> Self {
		Self::InsufficientData {
			expected,
			actual,
		}
	}
}

/// Errors reported by catalog and streaming operations
#[derive(Debug, Error)]
pub enum PackError {
	/// Malformed container or sub-container
	#[error(transparent)]
	Format(#[from] FormatError),

	/// Storage access failed (out of bounds or medium failure)
	#[error(transparent)]
	Store(#[from] StoreError),

	/// No animation with the requested name
	#[error("Animation not found: {name:?}")]
	NotFound {
		/// Requested name
		name: String,
	},

	/// Frame index beyond the animation's frame count
	#[error("Frame index {index} out of range (frame count {count})")]
	IndexOutOfRange {
		/// Requested frame index
		index: usize,
		/// Frame count of the animation
		count: u16,
	},

	/// Output buffer does not match the configured frame size
	#[error("Frame buffer holds {actual} pixels, expected {expected}")]
	BufferSize {
		/// Pixels per configured frame
		expected: usize,
		/// Pixels in the supplied buffer
		actual: usize,
	},

	/// Rejected configuration value
	#[error("Invalid configuration: {0}")]
	Config(String),
}

impl PackError {
	/// Returns `true` when a storage range check failed
	pub fn is_out_of_bounds(&self) -> bool {
		matches!(self, Self::Store(err) if err.is_out_of_bounds())
	}

	/// Returns `true` when the storage medium failed
	pub fn is_io(&self) -> bool {
		matches!(self, Self::Store(err) if err.is_io())
	}

	/// Returns the format error, if this is one
	pub fn as_format(&self) -> Option<&FormatError> {
		match self {
			Self::Format(err) => Some(err),
			_ => None,
		}
	}
}
