//! Animation playback for the `animpak-rs` project.
//!
//! - [`Player`]: the `Idle -> Loaded -> Playing` state machine that streams
//!   one frame at a time from storage to a [`FrameSink`]
//! - [`AnimationDisplay`]: a lock-protected component owning the store, the
//!   catalog and a player, with power save and a startup animation
//! - [`Canceller`] / [`CancelToken`]: stop a running pass between frames

mod cancel;
mod config;
mod display;
mod error;
mod pacer;
mod player;
mod sink;


pub use cancel::{CancelToken, Canceller, Waiting};
pub use config::{DEFAULT_FRAME_DELAY_MS, DisplayConfig};
pub use display::AnimationDisplay;
pub use error::{PlayError, PlayOutcome};
pub use pacer::{NoopPacer, Pacer, SleepPacer};
pub use player::{Player, PlayerState};
pub use sink::{FrameSink, MemorySink, SinkError};
