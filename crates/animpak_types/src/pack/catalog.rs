//! In-memory animation table.

use animpak_vfs::{ByteStore, Medium};
use log::{debug, error, info};

use crate::{
	constants::{PACK_HEADER_SIZE, TABLE_ENTRY_SIZE},
	error::PackError,
};

use super::header::{PackHeader, TableEntry};

/// Animation table of a `PACK` container
///
/// Entries keep file order, duplicates included. The table is only ever
/// replaced as a whole: [`reload`](Self::reload) clears it before reading, so
/// a failed reload leaves an empty catalog rather than a stale one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
	base_offset: u32,
	entries: Vec<TableEntry>,
}

impl Catalog {
	/// Creates an empty catalog for a container at `base_offset`
	pub fn empty(base_offset: u32) -> Self {
		Self {
			base_offset,
			entries: Vec::new(),
		}
	}

	/// Loads the container header and table found at `base_offset`
	///
	/// # Errors
	///
	/// - [`FormatError::BadMagic`](crate::FormatError::BadMagic) when the first
	///   four bytes are not `"PACK"`
	/// - [`FormatError::TooManyEntries`](crate::FormatError::TooManyEntries)
	///   when the count exceeds 70
	/// - [`PackError::Store`] when any read fails
	pub fn open<M: Medium>(store: &mut ByteStore<M>, base_offset: u32) -> Result<Self, PackError> {
		let mut catalog = Self::empty(base_offset);
		catalog.reload(store)?;
		Ok(catalog)
	}

	/// Re-reads the whole table from the stored base offset
	///
	/// The current table is discarded first; on error the catalog is empty.
	pub fn reload<M: Medium>(&mut self, store: &mut ByteStore<M>) -> Result<(), PackError> {
		self.entries.clear();
		match Self::load_entries(store, self.base_offset) {
			Ok(entries) => {
				info!(
					"{}: loaded {} animation entries at 0x{:08X}",
					store.label(),
					entries.len(),
					self.base_offset
				);
				self.entries = entries;
				Ok(())
			}
			Err(err) => {
				error!("{}: failed to load animation table: {}", store.label(), err);
				Err(err)
			}
		}
	}

	fn load_entries<M: Medium>(
		store: &mut ByteStore<M>,
		base_offset: u32,
	) -> Result<Vec<TableEntry>, PackError> {
		let header_bytes = store.read_array::<PACK_HEADER_SIZE>(base_offset)?;
		debug!("PACK header bytes: {:02X?}", header_bytes);
		let header = PackHeader::from_bytes(&header_bytes)?;

		let mut entries = Vec::with_capacity(usize::from(header.count));
		let mut offset = u64::from(base_offset) + PACK_HEADER_SIZE as u64;
		for _ in 0..header.count {
			// the store rejects the read if the table runs off the region
			let addr = u32::try_from(offset).unwrap_or(u32::MAX);
			let bytes = store.read_array::<TABLE_ENTRY_SIZE>(addr)?;
			let entry = TableEntry::from_bytes(&bytes)?;
			debug!("  {}", entry);
			entries.push(entry);
			offset += TABLE_ENTRY_SIZE as u64;
		}

		Ok(entries)
	}

	/// Offset of the container within the store
	pub fn base_offset(&self) -> u32 {
		self.base_offset
	}

	/// Returns all entries in file order
	pub fn entries(&self) -> &[TableEntry] {
		&self.entries
	}

	/// Returns the entry at `index` in file order
	pub fn get(&self, index: usize) -> Option<&TableEntry> {
		self.entries.get(index)
	}

	/// Number of entries
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Returns `true` when the catalog holds no entries
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Finds the first entry whose name matches exactly (case-sensitive, up to 32 bytes)
	pub fn find(&self, name: &str) -> Option<&TableEntry> {
		self.entries.iter().find(|entry| entry.matches(name))
	}

	/// Like [`find`](Self::find), but reports a missing name as [`PackError::NotFound`]
	pub fn require(&self, name: &str) -> Result<&TableEntry, PackError> {
		self.find(name).ok_or_else(|| PackError::NotFound {
			name: name.to_string(),
		})
	}

	/// Returns `true` when an entry with this name exists
	pub fn contains(&self, name: &str) -> bool {
		self.find(name).is_some()
	}

	/// Entry names in file order
	pub fn list_names(&self) -> Vec<String> {
		self.entries.iter().map(TableEntry::name).collect()
	}

	/// Iterates over entries in file order
	pub fn iter(&self) -> std::slice::Iter<'_, TableEntry> {
		self.entries.iter()
	}
}

impl<'a> IntoIterator for &'a Catalog {
	type Item = &'a TableEntry;
	type IntoIter = std::slice::Iter<'a, TableEntry>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}
