//! Per-animation `ANIM` sub-container records.

use std::fmt::Formatter;

use crate::{
	constants::{ANIM_HEADER_SIZE, ANIM_MAGIC, ANIM_PROBE_SIZE, FRAME_TABLE_ENTRY_SIZE},
	error::{FormatError, Section},
};

/// Sub-container header found at a table entry's offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimHeader {
	/// Number of frames
	pub frame_count: u16,
	/// Offset of the frame table, relative to the sub-container start
	pub frame_table_offset: u32,
	/// Total size of all run-length streams (informational)
	pub frame_data_size: u32,
	/// Size of the audio payload after the frame data (informational, unused)
	pub audio_data_size: u32,
}

impl AnimHeader {
	/// Size of the header in bytes
	pub const SIZE: usize = ANIM_HEADER_SIZE;

	/// Reads the frame count from the 6-byte header prefix
	///
	/// Returns `None` when the prefix is short or the magic is wrong. Nothing
	/// else in the sub-container is validated.
	pub fn probe_frame_count(prefix: &[u8]) -> Option<u16> {
		if prefix.len() < ANIM_PROBE_SIZE || prefix[..4] != ANIM_MAGIC {
			return None;
		}
		Some(u16::from_le_bytes([prefix[4], prefix[5]]))
	}

	/// Parses a header, validating the magic
	pub fn from_bytes(data: &[u8]) -> Result<Self, FormatError> {
		if data.len() < Self::SIZE {
			return Err(FormatError::insufficient_data(Self::SIZE, data.len()));
		}

		let magic: [u8; 4] = [data[0], data[1], data[2], data[3]];
		if magic != ANIM_MAGIC {
			return Err(FormatError::BadMagic {
				section: Section::Anim,
				expected: ANIM_MAGIC,
				actual: magic,
			});
		}

		let read_u32 = |at: usize| u32::from_le_bytes([data[at], data[at + 1], data[at + 2], data[at + 3]]);

		Ok(Self {
			frame_count: u16::from_le_bytes([data[4], data[5]]),
			frame_table_offset: read_u32(6),
			frame_data_size: read_u32(10),
			audio_data_size: read_u32(14),
		})
	}

	/// Serializes the header
	pub fn to_bytes(self) -> [u8; ANIM_HEADER_SIZE] {
		let mut buffer = [0u8; ANIM_HEADER_SIZE];
		buffer[0..4].copy_from_slice(&ANIM_MAGIC);
		buffer[4..6].copy_from_slice(&self.frame_count.to_le_bytes());
		buffer[6..10].copy_from_slice(&self.frame_table_offset.to_le_bytes());
		buffer[10..14].copy_from_slice(&self.frame_data_size.to_le_bytes());
		buffer[14..18].copy_from_slice(&self.audio_data_size.to_le_bytes());
		buffer
	}

	/// Absolute address of the frame table entry for `frame_index`
	///
	/// Computed in 64 bits so corrupt offsets cannot wrap around.
	pub fn frame_entry_addr(&self, anim_offset: u32, frame_index: u16) -> u64 {
		u64::from(anim_offset)
			+ u64::from(self.frame_table_offset)
			+ u64::from(frame_index) * FRAME_TABLE_ENTRY_SIZE as u64
	}

	/// Absolute address where the frame data region starts
	pub fn frame_data_base(&self, anim_offset: u32) -> u64 {
		u64::from(anim_offset)
			+ u64::from(self.frame_table_offset)
			+ u64::from(self.frame_count) * FRAME_TABLE_ENTRY_SIZE as u64
	}
}

impl std::fmt::Display for AnimHeader {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"ANIM {{ frames: {}, table_offset: {}, frame_data: {} bytes, audio: {} bytes }}",
			self.frame_count, self.frame_table_offset, self.frame_data_size, self.audio_data_size
		)
	}
}

impl TryFrom<&[u8]> for AnimHeader {
	type Error = FormatError;

	fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
		Self::from_bytes(value)
	}
}

/// Location of one frame's run-length stream
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameTableEntry {
	/// Offset relative to the frame data base
	pub offset: u32,
	/// Length of the run-length stream in bytes
	pub size: u32,
}

impl FrameTableEntry {
	/// Size of an entry in bytes
	pub const SIZE: usize = FRAME_TABLE_ENTRY_SIZE;

	/// Parses an entry
	pub fn from_bytes(data: &[u8]) -> Result<Self, FormatError> {
		if data.len() < Self::SIZE {
			return Err(FormatError::insufficient_data(Self::SIZE, data.len()));
		}
		Ok(Self {
			offset: u32::from_le_bytes([data[0], data[1], data[2], data[3]]),
			size: u32::from_le_bytes([data[4], data[5], data[6], data[7]]),
		})
	}

	/// Serializes the entry
	pub fn to_bytes(self) -> [u8; FRAME_TABLE_ENTRY_SIZE] {
		let mut buffer = [0u8; FRAME_TABLE_ENTRY_SIZE];
		buffer[0..4].copy_from_slice(&self.offset.to_le_bytes());
		buffer[4..8].copy_from_slice(&self.size.to_le_bytes());
		buffer
	}
}

impl TryFrom<&[u8]> for FrameTableEntry {
	type Error = FormatError;

	fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
		Self::from_bytes(value)
	}
}
