//! Container assembly.

use log::debug;

use crate::{
	constants::{
		ANIM_HEADER_SIZE, DEFAULT_MAX_FRAME_COUNT, FRAME_TABLE_ENTRY_SIZE, MAX_ANIMATIONS, NAME_SIZE,
		PACK_HEADER_SIZE, TABLE_ENTRY_SIZE,
	},
	error::FormatError,
	rle,
};

use super::{
	anim::{AnimHeader, FrameTableEntry},
	header::{PackHeader, TableEntry},
};

/// Assembles one `ANIM` sub-container
///
/// Frames are stored in the order they are added. The frame table directly
/// follows the header, then the run-length streams, then the audio payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationBuilder {
	name: String,
	frames: Vec<Vec<u8>>,
	audio: Vec<u8>,
}

impl AnimationBuilder {
	/// Starts an animation called `name`
	pub fn new(name: impl Into<String>) -> Result<Self, FormatError> {
		let name = name.into();
		if name.len() > NAME_SIZE {
			return Err(FormatError::NameTooLong {
				len: name.len(),
				max: NAME_SIZE,
			});
		}
		Ok(Self {
			name,
			frames: Vec::new(),
			audio: Vec::new(),
		})
	}

	/// Animation name
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Run-length encodes and appends a frame of RGB565 pixels
	pub fn add_frame(&mut self, pixels: &[u16]) -> &mut Self {
		self.frames.push(rle::encode(pixels));
		self
	}

	/// Appends an already encoded run-length stream as is
	pub fn add_encoded_frame(&mut self, stream: impl Into<Vec<u8>>) -> &mut Self {
		self.frames.push(stream.into());
		self
	}

	/// Builder form of [`add_frame`](Self::add_frame)
	pub fn with_frame(mut self, pixels: &[u16]) -> Self {
		self.add_frame(pixels);
		self
	}

	/// Attaches an opaque audio payload stored after the frame data
	pub fn with_audio(mut self, audio: impl Into<Vec<u8>>) -> Self {
		self.audio = audio.into();
		self
	}

	/// Number of frames added so far
	pub fn frame_count(&self) -> usize {
		self.frames.len()
	}

	/// Serializes the sub-container
	pub fn to_bytes(&self) -> Result<Vec<u8>, FormatError> {
		let frame_count = u16::try_from(self.frames.len())
			.ok()
			.filter(|&count| count <= DEFAULT_MAX_FRAME_COUNT)
			.ok_or(FormatError::TooManyFrames {
				count: u16::try_from(self.frames.len()).unwrap_or(u16::MAX),
				max: DEFAULT_MAX_FRAME_COUNT,
			})?;

		let frame_data_size: usize = self.frames.iter().map(Vec::len).sum();
		let total = ANIM_HEADER_SIZE
			+ self.frames.len() * FRAME_TABLE_ENTRY_SIZE
			+ frame_data_size
			+ self.audio.len();
		let too_large = || FormatError::ContainerTooLarge {
			size: total as u64,
		};

		let header = AnimHeader {
			frame_count,
			frame_table_offset: ANIM_HEADER_SIZE as u32,
			frame_data_size: u32::try_from(frame_data_size).map_err(|_| too_large())?,
			audio_data_size: u32::try_from(self.audio.len()).map_err(|_| too_large())?,
		};
		u32::try_from(total).map_err(|_| too_large())?;

		let mut buffer = Vec::with_capacity(total);
		buffer.extend_from_slice(&header.to_bytes());

		let mut offset = 0u32;
		for stream in &self.frames {
			let entry = FrameTableEntry {
				offset,
				size: stream.len() as u32,
			};
			buffer.extend_from_slice(&entry.to_bytes());
			offset += entry.size;
		}
		for stream in &self.frames {
			buffer.extend_from_slice(stream);
		}
		buffer.extend_from_slice(&self.audio);

		debug!("Built '{}': {}", self.name, header);
		Ok(buffer)
	}
}

/// Assembles a complete `PACK` container
///
/// # Examples
///
/// ```
/// use animpak_types::{AnimationBuilder, PackBuilder, color};
///
/// let mut pack = PackBuilder::new();
/// pack.add(AnimationBuilder::new("blink")?.with_frame(&[color::GREEN; 4]))?;
/// let bytes = pack.to_bytes(0)?;
/// assert_eq!(&bytes[..4], b"PACK");
/// # Ok::<(), animpak_types::FormatError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackBuilder {
	animations: Vec<(String, Vec<u8>)>,
}

impl PackBuilder {
	/// Creates an empty container
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of animations added so far
	pub fn len(&self) -> usize {
		self.animations.len()
	}

	/// Returns `true` when no animation was added
	pub fn is_empty(&self) -> bool {
		self.animations.is_empty()
	}

	/// Serializes and appends an animation
	pub fn add(&mut self, animation: AnimationBuilder) -> Result<&mut Self, FormatError> {
		let bytes = animation.to_bytes()?;
		self.add_raw(animation.name, bytes)
	}

	/// Appends arbitrary sub-container bytes under `name`
	pub fn add_raw(
		&mut self,
		name: impl Into<String>,
		bytes: impl Into<Vec<u8>>,
	) -> Result<&mut Self, FormatError> {
		let name = name.into();
		if self.animations.len() >= usize::from(MAX_ANIMATIONS) {
			return Err(FormatError::TooManyEntries {
				count: self.animations.len() as u16 + 1,
				max: MAX_ANIMATIONS,
			});
		}
		if name.len() > NAME_SIZE {
			return Err(FormatError::NameTooLong {
				len: name.len(),
				max: NAME_SIZE,
			});
		}
		self.animations.push((name, bytes.into()));
		Ok(self)
	}

	/// Serializes the container as it will appear at `base_offset`
	///
	/// Table offsets are absolute, so the same animations produce different
	/// bytes for different base offsets.
	pub fn to_bytes(&self, base_offset: u32) -> Result<Vec<u8>, FormatError> {
		let table_end = PACK_HEADER_SIZE + self.animations.len() * TABLE_ENTRY_SIZE;
		let payload: usize = self.animations.iter().map(|(_, bytes)| bytes.len()).sum();
		let end = u64::from(base_offset) + (table_end + payload) as u64;
		if end > u64::from(u32::MAX) {
			return Err(FormatError::ContainerTooLarge {
				size: end,
			});
		}

		let mut buffer = Vec::with_capacity(table_end + payload);
		buffer.extend_from_slice(&PackHeader::new(self.animations.len() as u16).to_bytes());

		let mut offset = base_offset + table_end as u32;
		for (name, bytes) in &self.animations {
			let entry = TableEntry::new(name, offset, bytes.len() as u32)?;
			buffer.extend_from_slice(&entry.to_bytes());
			offset += bytes.len() as u32;
		}
		for (_, bytes) in &self.animations {
			buffer.extend_from_slice(bytes);
		}

		Ok(buffer)
	}

	/// Serializes a whole region: `base_offset` bytes of erased flash (`0xFF`)
	/// followed by the container
	pub fn to_region(&self, base_offset: u32) -> Result<Vec<u8>, FormatError> {
		let container = self.to_bytes(base_offset)?;
		let mut region = vec![0xFF; base_offset as usize];
		region.extend_from_slice(&container);
		Ok(region)
	}
}
