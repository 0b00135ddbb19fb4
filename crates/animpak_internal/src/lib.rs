//! This module is separated into its own crate to enable simple dynamic linking for `animpak`, and should not be used directly.

/// `use animpak::prelude::*;` to import commonly used items.
pub mod prelude;

// Re-export member crates for convenience
pub use animpak_player;
pub use animpak_types;
pub use animpak_vfs;

// Re-export commonly used types at crate root
pub use animpak_player::{AnimationDisplay, DisplayConfig, PlayError, PlayOutcome, Player};
pub use animpak_types::{Catalog, FrameBuffer, FrameStreamer, PackError, StreamConfig};
pub use animpak_vfs::{ByteStore, FileMedium, MemoryMedium, StoreError};
