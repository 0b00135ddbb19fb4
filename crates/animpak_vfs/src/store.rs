//! Bounds-checked access to a [`Medium`].

use log::{debug, error, info};

use crate::{StoreError, medium::Medium};

/// Default maximum size of a single write transaction, in bytes
pub const DEFAULT_WRITE_CHUNK: usize = 256;

/// Bounds-checked reader/writer over a fixed-size region
///
/// Every call validates `offset + len <= size` before the medium is touched,
/// so an out-of-range request never partially executes. There is no caching:
/// each call is a fresh access to the medium.
#[derive(Debug)]
pub struct ByteStore<M> {
	medium: M,
	write_chunk: usize,
}

impl<M: Medium> ByteStore<M> {
	/// Creates a store with the default write transaction size
	pub fn new(medium: M) -> Self {
		Self::with_write_chunk(medium, DEFAULT_WRITE_CHUNK)
	}

	/// Creates a store whose writes are split into transactions of at most
	/// `write_chunk` bytes (a value of zero is treated as one)
	pub fn with_write_chunk(medium: M, write_chunk: usize) -> Self {
		info!(
			"{}: opened region of {} bytes (write chunk {})",
			medium.label(),
			medium.size(),
			write_chunk.max(1)
		);
		Self {
			medium,
			write_chunk: write_chunk.max(1),
		}
	}

	/// Size of the region in bytes
	pub fn size(&self) -> u32 {
		self.medium.size()
	}

	/// Label of the underlying region
	pub fn label(&self) -> &str {
		self.medium.label()
	}

	/// Maximum size of a single write transaction
	pub fn write_chunk(&self) -> usize {
		self.write_chunk
	}

	/// Returns a reference to the underlying medium
	pub fn medium(&self) -> &M {
		&self.medium
	}

	/// Returns a mutable reference to the underlying medium
	pub fn medium_mut(&mut self) -> &mut M {
		&mut self.medium
	}

	/// Consumes the store and returns the medium
	pub fn into_inner(self) -> M {
		self.medium
	}

	/// Checks that `[offset, offset + len)` lies inside the region
	pub fn check_range(&self, offset: u32, len: usize) -> Result<(), StoreError> {
		let size = self.size();
		let end = u64::from(offset) + len as u64;
		if end > u64::from(size) {
			error!(
				"{}: access out of bounds at 0x{:08X} ({} bytes, region size {})",
				self.label(),
				offset,
				len,
				size
			);
			return Err(StoreError::OutOfBounds {
				offset,
				len,
				size,
			});
		}
		Ok(())
	}

	/// Reads `len` bytes starting at `offset`
	pub fn read(&mut self, offset: u32, len: usize) -> Result<Vec<u8>, StoreError> {
		self.check_range(offset, len)?;
		let mut buf = vec![0u8; len];
		self.read_unchecked(offset, &mut buf)?;
		Ok(buf)
	}

	/// Fills `buf` with the bytes starting at `offset`
	pub fn read_into(&mut self, offset: u32, buf: &mut [u8]) -> Result<(), StoreError> {
		self.check_range(offset, buf.len())?;
		self.read_unchecked(offset, buf)
	}

	/// Reads a fixed number of bytes starting at `offset`
	pub fn read_array<const N: usize>(&mut self, offset: u32) -> Result<[u8; N], StoreError> {
		let mut buf = [0u8; N];
		self.read_into(offset, &mut buf)?;
		Ok(buf)
	}

	/// Writes `data` starting at `offset`
	///
	/// The write is split into transactions of at most [`write_chunk`](Self::write_chunk)
	/// bytes, issued in order. The first failing transaction aborts the write
	/// without retry; transactions before it have already been applied. The
	/// caller is responsible for erasing the target range first.
	pub fn write(&mut self, offset: u32, data: &[u8]) -> Result<(), StoreError> {
		self.check_range(offset, data.len())?;

		let mut addr = offset;
		for chunk in data.chunks(self.write_chunk) {
			if let Err(source) = self.medium.write(addr, chunk) {
				error!(
					"{}: write failed at 0x{:08X} ({} bytes): {}",
					self.medium.label(),
					addr,
					chunk.len(),
					source
				);
				return Err(StoreError::Medium {
					offset: addr,
					len: chunk.len(),
					source,
				});
			}
			addr += chunk.len() as u32;
		}

		debug!("{}: wrote {} bytes at 0x{:08X}", self.medium.label(), data.len(), offset);
		Ok(())
	}

	fn read_unchecked(&mut self, offset: u32, buf: &mut [u8]) -> Result<(), StoreError> {
		if buf.is_empty() {
			return Ok(());
		}
		self.medium.read(offset, buf).map_err(|source| {
			error!(
				"{}: read failed at 0x{:08X} ({} bytes): {}",
				self.medium.label(),
				offset,
				buf.len(),
				source
			);
			StoreError::Medium {
				offset,
				len: buf.len(),
				source,
			}
		})
	}
}

#[cfg(test)]
mod tests {
	use std::io;

	use super::*;
	use crate::MemoryMedium;

	/// Records every transaction and fails the ones it is told to
	#[derive(Default)]
	struct RecordingMedium {
		data: Vec<u8>,
		reads: usize,
		writes: Vec<(u32, usize)>,
		fail_write_at: Option<usize>,
		fail_reads: bool,
	}

	impl RecordingMedium {
		fn new(size: usize) -> Self {
			Self {
				data: vec![0; size],
				..Self::default()
			}
		}
	}

	impl Medium for RecordingMedium {
		fn size(&self) -> u32 {
			self.data.len() as u32
		}

		fn read(&mut self, offset: u32, buf: &mut [u8]) -> io::Result<()> {
			self.reads += 1;
			if self.fail_reads {
				return Err(io::Error::other("bus fault"));
			}
			let start = offset as usize;
			buf.copy_from_slice(&self.data[start..start + buf.len()]);
			Ok(())
		}

		fn write(&mut self, offset: u32, data: &[u8]) -> io::Result<()> {
			if self.fail_write_at == Some(self.writes.len()) {
				return Err(io::Error::other("program failed"));
			}
			self.writes.push((offset, data.len()));
			let start = offset as usize;
			self.data[start..start + data.len()].copy_from_slice(data);
			Ok(())
		}
	}

	#[test]
	fn test_read_within_bounds() {
		let mut store = ByteStore::new(MemoryMedium::from_bytes(b"0123456789".to_vec()));
		assert_eq!(store.read(2, 3).unwrap(), b"234");
		assert_eq!(store.read(10, 0).unwrap(), b"");
		assert_eq!(store.read_array::<2>(8).unwrap(), *b"89");
	}

	#[test_log::test]
	fn test_out_of_bounds_never_touches_medium() {
		let mut store = ByteStore::new(RecordingMedium::new(16));

		let err = store.read(12, 5).unwrap_err();
		assert!(err.is_out_of_bounds());

		let err = store.write(15, &[1, 2]).unwrap_err();
		assert!(matches!(
			err,
			StoreError::OutOfBounds {
				offset: 15,
				len: 2,
				size: 16
			}
		));

		assert_eq!(store.medium().reads, 0);
		assert!(store.medium().writes.is_empty());
	}

	#[test]
	fn test_offset_overflow_is_out_of_bounds() {
		let mut store = ByteStore::new(RecordingMedium::new(16));
		let err = store.read(u32::MAX, 2).unwrap_err();
		assert!(err.is_out_of_bounds());
	}

	#[test]
	fn test_write_is_chunked_in_order() {
		let mut store = ByteStore::with_write_chunk(RecordingMedium::new(64), 16);
		let data: Vec<u8> = (0..40).collect();
		store.write(4, &data).unwrap();

		assert_eq!(store.medium().writes, vec![(4, 16), (20, 16), (36, 8)]);
		assert_eq!(store.read(4, 40).unwrap(), data);
	}

	#[test_log::test]
	fn test_write_stops_at_first_failed_chunk() {
		let mut medium = RecordingMedium::new(64);
		medium.fail_write_at = Some(1);
		let mut store = ByteStore::with_write_chunk(medium, 8);

		let err = store.write(0, &[0xAB; 24]).unwrap_err();
		assert!(matches!(
			err,
			StoreError::Medium {
				offset: 8,
				len: 8,
				..
			}
		));
		// first chunk applied, nothing after the failure
		assert_eq!(store.medium().writes, vec![(0, 8)]);
		assert_eq!(store.medium().data[8..24], [0u8; 16]);
	}

	#[test]
	fn test_read_failure_is_io() {
		let mut medium = RecordingMedium::new(8);
		medium.fail_reads = true;
		let mut store = ByteStore::new(medium);

		let err = store.read(0, 4).unwrap_err();
		assert!(err.is_io());
		assert!(!err.is_out_of_bounds());
	}

	#[test]
	fn test_zero_write_chunk_is_clamped() {
		let store = ByteStore::with_write_chunk(MemoryMedium::new(4), 0);
		assert_eq!(store.write_chunk(), 1);
	}
}
