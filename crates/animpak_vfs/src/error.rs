//! Error types for storage access.

use thiserror::Error;

/// Errors that can occur when reading or writing a [`ByteStore`](crate::ByteStore)
#[derive(Debug, Error)]
pub enum StoreError {
	/// The requested range does not fit inside the region
	#[error("Access out of bounds: offset 0x{offset:08X} + {len} bytes exceeds region size {size}")]
	OutOfBounds {
		/// Start of the requested range
		offset: u32,
		/// Length of the requested range
		len: usize,
		/// Size of the region
		size: u32,
	},

	/// The underlying medium reported a failure
	#[error("Medium failure at 0x{offset:08X} ({len} bytes): {source}")]
	Medium {
		/// Start of the failed transaction
		offset: u32,
		/// Length of the failed transaction
		len: usize,
		/// Error reported by the medium
		#[source]
		source: std::io::Error,
	},
}

impl StoreError {
	/// Returns `true` for [`StoreError::OutOfBounds`]
	pub fn is_out_of_bounds(&self) -> bool {
		matches!(self, Self::OutOfBounds { .. })
	}

	/// Returns `true` for [`StoreError::Medium`]
	pub fn is_io(&self) -> bool {
		matches!(self, Self::Medium { .. })
	}
}
