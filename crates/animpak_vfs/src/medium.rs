//! Storage media a [`ByteStore`](crate::ByteStore) can sit on.
//!
//! A [`Medium`] is the storage driver boundary: it exposes a fixed-size
//! region and performs raw transactions inside it. Media do not need to
//! bounds-check, the store does that before calling them.

use std::{
	fs,
	io::{self, Read, Seek, SeekFrom, Write},
	path::Path,
};

/// Raw access to a fixed-size, linearly addressable region
pub trait Medium {
	/// Size of the region in bytes
	fn size(&self) -> u32;

	/// Human-readable name of the region, e.g. a partition label
	fn label(&self) -> &str {
		"region"
	}

	/// Fills `buf` with the bytes starting at `offset`
	fn read(&mut self, offset: u32, buf: &mut [u8]) -> io::Result<()>;

	/// Stores `data` starting at `offset` in a single transaction
	///
	/// Like a flash driver, the medium does not erase first.
	fn write(&mut self, offset: u32, data: &[u8]) -> io::Result<()>;
}

impl<M: Medium + ?Sized> Medium for &mut M {
	fn size(&self) -> u32 {
		(**self).size()
	}

	fn label(&self) -> &str {
		(**self).label()
	}

	fn read(&mut self, offset: u32, buf: &mut [u8]) -> io::Result<()> {
		(**self).read(offset, buf)
	}

	fn write(&mut self, offset: u32, data: &[u8]) -> io::Result<()> {
		(**self).write(offset, data)
	}
}

impl<M: Medium + ?Sized> Medium for Box<M> {
	fn size(&self) -> u32 {
		(**self).size()
	}

	fn label(&self) -> &str {
		(**self).label()
	}

	fn read(&mut self, offset: u32, buf: &mut [u8]) -> io::Result<()> {
		(**self).read(offset, buf)
	}

	fn write(&mut self, offset: u32, data: &[u8]) -> io::Result<()> {
		(**self).write(offset, data)
	}
}

/// In-memory region
///
/// A fresh region is filled with `0xFF`, the erased state of NOR flash.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MemoryMedium {
	label: String,
	data: Vec<u8>,
}

impl MemoryMedium {
	/// Creates an erased region of `size` bytes
	pub fn new(size: u32) -> Self {
		Self {
			label: "memory".to_string(),
			data: vec![0xFF; size as usize],
		}
	}

	/// Wraps existing bytes as a region
	///
	/// # Panics
	///
	/// Panics if `data` is longer than `u32::MAX` bytes.
	pub fn from_bytes(data: impl Into<Vec<u8>>) -> Self {
		let data = data.into();
		assert!(u32::try_from(data.len()).is_ok(), "region larger than 4 GiB");
		Self {
			label: "memory".to_string(),
			data,
		}
	}

	/// Sets the region label
	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = label.into();
		self
	}

	/// Returns the region contents
	pub fn as_bytes(&self) -> &[u8] {
		&self.data
	}

	/// Consumes the medium and returns its contents
	pub fn into_bytes(self) -> Vec<u8> {
		self.data
	}
}

impl Medium for MemoryMedium {
	fn size(&self) -> u32 {
		self.data.len() as u32
	}

	fn label(&self) -> &str {
		&self.label
	}

	fn read(&mut self, offset: u32, buf: &mut [u8]) -> io::Result<()> {
		let start = offset as usize;
		let src = self
			.data
			.get(start..start + buf.len())
			.ok_or_else(|| io::Error::from(io::ErrorKind::UnexpectedEof))?;
		buf.copy_from_slice(src);
		Ok(())
	}

	fn write(&mut self, offset: u32, data: &[u8]) -> io::Result<()> {
		let start = offset as usize;
		let dst = self
			.data
			.get_mut(start..start + data.len())
			.ok_or_else(|| io::Error::from(io::ErrorKind::WriteZero))?;
		dst.copy_from_slice(data);
		Ok(())
	}
}

/// Region `[start, start + size)` of any seekable stream
///
/// Useful for flash images on disk or for a `Cursor` in tests.
#[derive(Debug)]
pub struct IoMedium<F> {
	label: String,
	inner: F,
	start: u64,
	size: u32,
}

/// Region backed by a file on disk
pub type FileMedium = IoMedium<fs::File>;

impl<F: Read + Write + Seek> IoMedium<F> {
	/// Exposes `size` bytes of `inner` starting at byte `start`
	pub fn new(inner: F, start: u64, size: u32) -> Self {
		Self {
			label: "stream".to_string(),
			inner,
			start,
			size,
		}
	}

	/// Sets the region label
	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = label.into();
		self
	}

	/// Returns the wrapped stream
	pub fn into_inner(self) -> F {
		self.inner
	}
}

impl IoMedium<fs::File> {
	/// Opens a whole file read-only; writes will fail at the medium
	pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
		let file = fs::File::open(path.as_ref())?;
		Self::from_file(file, path.as_ref())
	}

	/// Opens a whole file for reading and writing
	pub fn open_rw(path: impl AsRef<Path>) -> io::Result<Self> {
		let file = fs::OpenOptions::new().read(true).write(true).open(path.as_ref())?;
		Self::from_file(file, path.as_ref())
	}

	fn from_file(file: fs::File, path: &Path) -> io::Result<Self> {
		let len = file.metadata()?.len();
		let size = u32::try_from(len).map_err(|_| {
			io::Error::new(
				io::ErrorKind::InvalidInput,
				format!("{} is too large for a 32-bit region ({len} bytes)", path.display()),
			)
		})?;
		let label = path.file_name().map(|n| n.to_string_lossy().into_owned());
		Ok(Self::new(file, 0, size).with_label(label.unwrap_or_else(|| "file".to_string())))
	}
}

impl<F: Read + Write + Seek> Medium for IoMedium<F> {
	fn size(&self) -> u32 {
		self.size
	}

	fn label(&self) -> &str {
		&self.label
	}

	fn read(&mut self, offset: u32, buf: &mut [u8]) -> io::Result<()> {
		self.inner.seek(SeekFrom::Start(self.start + u64::from(offset)))?;
		self.inner.read_exact(buf)
	}

	fn write(&mut self, offset: u32, data: &[u8]) -> io::Result<()> {
		self.inner.seek(SeekFrom::Start(self.start + u64::from(offset)))?;
		self.inner.write_all(data)?;
		self.inner.flush()
	}
}
