//! Scratch buffer with carry-over between streaming reads.

use crate::constants::{MAX_READ_CHUNK, RLE_RECORD_SIZE};

/// One read chunk plus room for the bytes of a record split across reads
///
/// Records are 3 bytes, so a chunk boundary can leave up to 2 bytes of an
/// incomplete record behind. Those carry bytes are moved to the front and the
/// next read lands right after them.
#[derive(Debug, Clone)]
pub struct ChunkBuffer {
	buf: Vec<u8>,
	chunk: usize,
	carry: usize,
	filled: usize,
}

impl ChunkBuffer {
	/// Allocates a buffer for reads of at most `chunk` bytes
	///
	/// The chunk is clamped to `1..=MAX_READ_CHUNK`.
	pub fn new(chunk: usize) -> Self {
		let chunk = chunk.clamp(1, MAX_READ_CHUNK);
		Self {
			buf: vec![0; chunk + RLE_RECORD_SIZE - 1],
			chunk,
			carry: 0,
			filled: 0,
		}
	}

	/// Maximum bytes per read
	pub fn chunk_size(&self) -> usize {
		self.chunk
	}

	/// Bytes carried over from the previous read
	pub fn carried(&self) -> usize {
		self.carry
	}

	/// Drops any carried bytes
	pub fn reset(&mut self) {
		self.carry = 0;
		self.filled = 0;
	}

	/// Space for the next read, after the carried bytes
	///
	/// At most one chunk long, and no longer than `remaining`.
	pub fn spare(&mut self, remaining: usize) -> &mut [u8] {
		let len = remaining.min(self.chunk);
		&mut self.buf[self.carry..self.carry + len]
	}

	/// Accounts for `len` freshly read bytes and returns every complete record
	/// now in the buffer
	pub fn commit(&mut self, len: usize) -> &[u8] {
		self.filled = self.carry + len;
		&self.buf[..self.parse_len()]
	}

	/// Moves the undecoded tail (0 to 2 bytes) to the front as the next carry
	pub fn compact(&mut self) {
		let parse_len = self.parse_len();
		self.buf.copy_within(parse_len..self.filled, 0);
		self.carry = self.filled - parse_len;
		self.filled = self.carry;
	}

	fn parse_len(&self) -> usize {
		self.filled - self.filled % RLE_RECORD_SIZE
	}
}
