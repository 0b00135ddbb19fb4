#![allow(clippy::single_component_path_imports)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! `animpak-rs` streams bitmap animations out of `PACK` containers stored in
//! flash-like regions, decoding one run-length frame at a time with memory
//! bounded by a single frame and one read chunk.
//!
//! - [`animpak_vfs`]: bounds-checked byte storage over pluggable media
//! - [`animpak_types`]: the container formats, catalog and streaming decoder
//! - [`animpak_player`]: playback state machine and the display component
//!
pub use animpak_internal::*;

#[cfg(all(feature = "dynamic_linking", not(target_family = "wasm")))]
#[allow(unused_imports)]
use animpak_dylib;
