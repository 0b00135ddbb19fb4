//! Bounds-checked byte storage for `animpak-rs`.
//!
//! Animation containers live in a raw, linearly-addressable region such as a
//! flash partition. This crate puts a [`ByteStore`] in front of that region:
//! every access is validated against the region size before the underlying
//! [`Medium`] is touched, and writes are split into transactions no larger
//! than the medium accepts.
//!
//! # Examples
//!
//! ```
//! use animpak_vfs::{ByteStore, MemoryMedium};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut store = ByteStore::new(MemoryMedium::new(1024));
//! store.write(16, b"PACK")?;
//! assert_eq!(store.read(16, 4)?, b"PACK");
//! assert!(store.read(1022, 4).is_err());
//! # Ok(())
//! # }
//! ```

mod error;
mod medium;
mod store;

pub use error::StoreError;
pub use medium::{FileMedium, IoMedium, Medium, MemoryMedium};
pub use store::{ByteStore, DEFAULT_WRITE_CHUNK};
