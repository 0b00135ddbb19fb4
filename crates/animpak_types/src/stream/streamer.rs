//! Chunked frame decoder.

use animpak_vfs::{ByteStore, Medium, StoreError};
use log::{debug, warn};

use crate::{
	config::StreamConfig,
	constants::{ANIM_HEADER_SIZE, ANIM_PROBE_SIZE, FRAME_TABLE_ENTRY_SIZE},
	error::{FormatError, PackError},
	pack::{AnimHeader, FrameTableEntry, TableEntry},
	rle,
};

use super::{chunk::ChunkBuffer, frame::FrameBuffer};

/// Summary of one decoded frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameStats {
	/// Run-length stream size declared by the frame table
	pub stream_len: u32,
	/// Bytes actually fetched from the store
	pub bytes_read: u64,
	/// Pixels produced by the stream; the rest of the frame stays black
	pub pixels: usize,
}

impl FrameStats {
	/// Returns `true` when the stream filled the whole frame
	pub fn is_complete(&self, frame_pixels: usize) -> bool {
		self.pixels >= frame_pixels
	}
}

/// Decodes frames straight from a [`ByteStore`] one read chunk at a time
///
/// The only memory held is the scratch chunk; the caller owns the frame
/// buffer and reuses it across calls.
///
/// # Examples
///
/// ```no_run
/// use animpak_types::{Catalog, FrameBuffer, FrameStreamer, StreamConfig};
/// use animpak_vfs::{ByteStore, FileMedium};
///
/// let mut store = ByteStore::new(FileMedium::open("flash.bin")?);
/// let catalog = Catalog::open(&mut store, 0)?;
/// let config = StreamConfig::default();
/// let mut streamer = FrameStreamer::new(config)?;
/// let mut frame = FrameBuffer::for_config(&config);
///
/// let entry = catalog.require("meter")?;
/// for index in 0..streamer.frame_count(&mut store, entry) {
/// 	streamer.decode_frame(&mut store, entry, usize::from(index), &mut frame)?;
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct FrameStreamer {
	config: StreamConfig,
	scratch: ChunkBuffer,
}

impl FrameStreamer {
	/// Creates a decoder for frames of the configured geometry
	pub fn new(config: StreamConfig) -> Result<Self, PackError> {
		config.validate()?;
		Ok(Self {
			config,
			scratch: ChunkBuffer::new(config.read_chunk),
		})
	}

	/// Active configuration
	pub fn config(&self) -> &StreamConfig {
		&self.config
	}

	/// Reads only the frame count of the sub-container at `entry`
	///
	/// Returns 0 when the read fails, the magic is wrong, or the count is above
	/// the configured maximum.
	pub fn frame_count<M: Medium>(&self, store: &mut ByteStore<M>, entry: &TableEntry) -> u16 {
		let prefix = match store.read_array::<ANIM_PROBE_SIZE>(entry.offset) {
			Ok(prefix) => prefix,
			Err(err) => {
				warn!("'{}': frame count probe failed: {}", entry.name(), err);
				return 0;
			}
		};

		match AnimHeader::probe_frame_count(&prefix) {
			Some(count) if count > self.config.max_frame_count => {
				warn!(
					"'{}': frame count {} above limit {}",
					entry.name(),
					count,
					self.config.max_frame_count
				);
				0
			}
			Some(count) => count,
			None => {
				warn!("'{}': no ANIM header at 0x{:08X}", entry.name(), entry.offset);
				0
			}
		}
	}

	/// Reads and validates the full sub-container header
	///
	/// # Errors
	///
	/// - [`FormatError::BadMagic`] when the magic is not `"ANIM"`
	/// - [`FormatError::TooManyFrames`] when the count is above the configured maximum
	/// - [`PackError::Store`] when the read fails
	pub fn anim_header<M: Medium>(
		&self,
		store: &mut ByteStore<M>,
		entry: &TableEntry,
	) -> Result<AnimHeader, PackError> {
		let bytes = store.read_array::<ANIM_HEADER_SIZE>(entry.offset)?;
		let header = AnimHeader::from_bytes(&bytes)?;
		if header.frame_count > self.config.max_frame_count {
			return Err(FormatError::TooManyFrames {
				count: header.frame_count,
				max: self.config.max_frame_count,
			}
			.into());
		}
		Ok(header)
	}

	/// Decodes frame `index` of the animation at `entry` into `frame`
	///
	/// The frame is zeroed before decoding. A stream that ends early leaves the
	/// remaining pixels black and still succeeds; trailing records past the end
	/// of the frame are ignored. On any error the frame is left all black and
	/// must not be displayed.
	///
	/// # Errors
	///
	/// - [`PackError::BufferSize`] when `frame` does not match the configured geometry
	/// - [`PackError::IndexOutOfRange`] when `index >= frame_count`
	/// - [`PackError::Format`] for a malformed sub-container
	/// - [`PackError::Store`] when a read is out of bounds or the medium fails
	pub fn decode_frame<M: Medium>(
		&mut self,
		store: &mut ByteStore<M>,
		entry: &TableEntry,
		index: usize,
		frame: &mut FrameBuffer,
	) -> Result<FrameStats, PackError> {
		let expected = self.config.frame_pixels();
		if frame.len() != expected {
			return Err(PackError::BufferSize {
				expected,
				actual: frame.len(),
			});
		}

		frame.clear();
		let result = self.stream_frame(store, entry, index, frame);
		if result.is_err() {
			frame.clear();
		}
		result
	}

	fn stream_frame<M: Medium>(
		&mut self,
		store: &mut ByteStore<M>,
		entry: &TableEntry,
		index: usize,
		frame: &mut FrameBuffer,
	) -> Result<FrameStats, PackError> {
		let header = self.anim_header(store, entry)?;
		let frame_index = match u16::try_from(index) {
			Ok(frame_index) if frame_index < header.frame_count => frame_index,
			_ => {
				return Err(PackError::IndexOutOfRange {
					index,
					count: header.frame_count,
				});
			}
		};

		let table_addr = address(
			store,
			header.frame_entry_addr(entry.offset, frame_index),
			FRAME_TABLE_ENTRY_SIZE,
		)?;
		let frame_entry = FrameTableEntry::from_bytes(&store.read_array::<FRAME_TABLE_ENTRY_SIZE>(table_addr)?)?;
		let stream_start = header.frame_data_base(entry.offset) + u64::from(frame_entry.offset);
		let stream_len = u64::from(frame_entry.size);

		self.scratch.reset();
		let pixels = frame.pixels_mut();
		let mut cursor = 0;
		let mut consumed = 0u64;

		while consumed < stream_len && cursor < pixels.len() {
			let remaining = usize::try_from(stream_len - consumed).unwrap_or(usize::MAX);
			let len = remaining.min(self.scratch.chunk_size());
			let addr = address(store, stream_start + consumed, len)?;
			store.read_into(addr, self.scratch.spare(remaining))?;
			consumed += len as u64;

			cursor = rle::decode_into(self.scratch.commit(len), pixels, cursor);
			self.scratch.compact();
		}

		if cursor < pixels.len() {
			warn!(
				"'{}' frame {}: stream ended after {} of {} pixels",
				entry.name(),
				index,
				cursor,
				pixels.len()
			);
		}
		debug!(
			"'{}' frame {}: {} of {} stream bytes read",
			entry.name(),
			index,
			consumed,
			stream_len
		);

		Ok(FrameStats {
			stream_len: frame_entry.size,
			bytes_read: consumed,
			pixels: cursor,
		})
	}
}

/// Narrows a computed address to the store's 32-bit space
///
/// Addresses past `u32::MAX` can only come from corrupt offsets and are
/// reported as out of bounds without touching the medium.
fn address<M: Medium>(store: &ByteStore<M>, addr: u64, len: usize) -> Result<u32, StoreError> {
	u32::try_from(addr).map_err(|_| StoreError::OutOfBounds {
		offset: u32::MAX,
		len,
		size: store.size(),
	})
}
