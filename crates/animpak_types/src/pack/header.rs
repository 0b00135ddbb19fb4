//! Top-level `PACK` container records.

use std::fmt::Formatter;

use crate::{
	constants::{MAX_ANIMATIONS, NAME_SIZE, PACK_HEADER_SIZE, PACK_MAGIC, TABLE_ENTRY_SIZE},
	error::{FormatError, Section},
};

/// Container header found at the base offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PackHeader {
	/// Number of table entries that follow
	pub count: u16,
}

impl PackHeader {
	/// Size of the header in bytes
	pub const SIZE: usize = PACK_HEADER_SIZE;

	/// Creates a header announcing `count` entries
	pub fn new(count: u16) -> Self {
		Self {
			count,
		}
	}

	/// Parses and validates a header
	///
	/// Fails with [`FormatError::BadMagic`] when the magic is not `"PACK"` and
	/// with [`FormatError::TooManyEntries`] when the count exceeds
	/// [`MAX_ANIMATIONS`].
	pub fn from_bytes(data: &[u8]) -> Result<Self, FormatError> {
		if data.len() < Self::SIZE {
			return Err(FormatError::insufficient_data(Self::SIZE, data.len()));
		}

		let magic: [u8; 4] = [data[0], data[1], data[2], data[3]];
		if magic != PACK_MAGIC {
			return Err(FormatError::BadMagic {
				section: Section::Pack,
				expected: PACK_MAGIC,
				actual: magic,
			});
		}

		let count = u16::from_le_bytes([data[4], data[5]]);
		if count > MAX_ANIMATIONS {
			return Err(FormatError::TooManyEntries {
				count,
				max: MAX_ANIMATIONS,
			});
		}

		Ok(Self {
			count,
		})
	}

	/// Serializes the header
	pub fn to_bytes(self) -> [u8; PACK_HEADER_SIZE] {
		let mut buffer = [0u8; PACK_HEADER_SIZE];
		buffer[0..4].copy_from_slice(&PACK_MAGIC);
		buffer[4..6].copy_from_slice(&self.count.to_le_bytes());
		buffer
	}
}

impl std::fmt::Display for PackHeader {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "PACK {{ count: {} }}", self.count)
	}
}

impl TryFrom<&[u8]> for PackHeader {
	type Error = FormatError;

	fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
		Self::from_bytes(value)
	}
}

/// Animation table entry
///
/// Names are not necessarily unique; lookups return the first match in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableEntry {
	/// NUL-padded name
	pub raw_name: [u8; NAME_SIZE],

	/// Absolute store offset of the animation's sub-container
	pub offset: u32,

	/// Length of the sub-container (informational, never used to bound decoding)
	pub length: u32,
}

impl TableEntry {
	/// Size of an entry in bytes
	pub const SIZE: usize = TABLE_ENTRY_SIZE;

	/// Creates an entry, rejecting names longer than the name field
	pub fn new(name: &str, offset: u32, length: u32) -> Result<Self, FormatError> {
		let bytes = name.as_bytes();
		if bytes.len() > NAME_SIZE {
			return Err(FormatError::NameTooLong {
				len: bytes.len(),
				max: NAME_SIZE,
			});
		}

		let mut raw_name = [0u8; NAME_SIZE];
		raw_name[..bytes.len()].copy_from_slice(bytes);
		Ok(Self {
			raw_name,
			offset,
			length,
		})
	}

	/// Name bytes up to the first NUL (all 32 bytes when unterminated)
	pub fn name_bytes(&self) -> &[u8] {
		c_str(&self.raw_name)
	}

	/// Name as a string, replacing invalid UTF-8
	pub fn name(&self) -> String {
		String::from_utf8_lossy(self.name_bytes()).into_owned()
	}

	/// Compares against `name` with C string semantics over at most 32 bytes
	///
	/// Both sides end at their first NUL; a longer query matches when its
	/// first 32 bytes equal an unterminated stored name.
	pub fn matches(&self, name: &str) -> bool {
		let query = c_str(name.as_bytes());
		let query = &query[..query.len().min(NAME_SIZE)];
		self.name_bytes() == query
	}

	/// Parses an entry
	pub fn from_bytes(data: &[u8]) -> Result<Self, FormatError> {
		if data.len() < Self::SIZE {
			return Err(FormatError::insufficient_data(Self::SIZE, data.len()));
		}

		let mut raw_name = [0u8; NAME_SIZE];
		raw_name.copy_from_slice(&data[..NAME_SIZE]);
		let offset = u32::from_le_bytes([data[32], data[33], data[34], data[35]]);
		let length = u32::from_le_bytes([data[36], data[37], data[38], data[39]]);

		Ok(Self {
			raw_name,
			offset,
			length,
		})
	}

	/// Serializes the entry
	pub fn to_bytes(self) -> [u8; TABLE_ENTRY_SIZE] {
		let mut buffer = [0u8; TABLE_ENTRY_SIZE];
		buffer[..NAME_SIZE].copy_from_slice(&self.raw_name);
		buffer[32..36].copy_from_slice(&self.offset.to_le_bytes());
		buffer[36..40].copy_from_slice(&self.length.to_le_bytes());
		buffer
	}
}

impl std::fmt::Display for TableEntry {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"Entry {{ name: '{}', offset: 0x{:08X}, length: {} }}",
			self.name(),
			self.offset,
			self.length
		)
	}
}

impl TryFrom<&[u8]> for TableEntry {
	type Error = FormatError;

	fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
		Self::from_bytes(value)
	}
}

impl From<TableEntry> for [u8; TABLE_ENTRY_SIZE] {
	fn from(entry: TableEntry) -> Self {
		entry.to_bytes()
	}
}

fn c_str(bytes: &[u8]) -> &[u8] {
	let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
	&bytes[..end]
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_header_roundtrip() {
		let bytes = PackHeader::new(3).to_bytes();
		assert_eq!(&bytes, b"PACK\x03\x00");
		assert_eq!(PackHeader::from_bytes(&bytes).unwrap().count, 3);
	}

	#[test]
	fn test_header_rejects_bad_magic() {
		let err = PackHeader::from_bytes(b"KCAP\x01\x00").unwrap_err();
		assert_eq!(
			err,
			FormatError::BadMagic {
				section: Section::Pack,
				expected: *b"PACK",
				actual: *b"KCAP",
			}
		);
	}

	#[test]
	fn test_header_count_limit() {
		assert_eq!(PackHeader::from_bytes(b"PACK\x46\x00").unwrap().count, 70);
		assert_eq!(
			PackHeader::from_bytes(b"PACK\x47\x00").unwrap_err(),
			FormatError::TooManyEntries {
				count: 71,
				max: 70
			}
		);
	}

	#[test]
	fn test_header_too_short() {
		assert!(matches!(
			PackHeader::from_bytes(b"PACK"),
			Err(FormatError::InsufficientData {
				expected: 6,
				actual: 4
			})
		));
	}

	#[test]
	fn test_entry_layout() {
		let entry = TableEntry::new("meter", 0x1234, 99).unwrap();
		let bytes = entry.to_bytes();
		assert_eq!(&bytes[..5], b"meter");
		assert!(bytes[5..32].iter().all(|&b| b == 0));
		assert_eq!(&bytes[32..36], &[0x34, 0x12, 0x00, 0x00]);
		assert_eq!(&bytes[36..40], &[99, 0, 0, 0]);
		assert_eq!(TableEntry::from_bytes(&bytes).unwrap(), entry);
	}

	#[test]
	fn test_entry_name_too_long() {
		let name = "x".repeat(33);
		assert!(matches!(
			TableEntry::new(&name, 0, 0),
			Err(FormatError::NameTooLong {
				len: 33,
				max: 32
			})
		));
		assert!(TableEntry::new(&"x".repeat(32), 0, 0).is_ok());
	}

	#[test]
	fn test_matches_is_exact_and_case_sensitive() {
		let entry = TableEntry::new("wave", 0, 0).unwrap();
		assert!(entry.matches("wave"));
		assert!(!entry.matches("Wave"));
		assert!(!entry.matches("wav"));
		assert!(!entry.matches("waves"));
		assert!(entry.matches("wave\0junk"));
	}

	#[test]
	fn test_matches_compares_at_most_32_bytes() {
		let full = "a".repeat(32);
		let entry = TableEntry::new(&full, 0, 0).unwrap();
		assert_eq!(entry.name_bytes().len(), 32);
		assert!(entry.matches(&full));
		assert!(entry.matches(&format!("{full}tail")));
		assert!(!entry.matches(&"a".repeat(31)));
	}
}
