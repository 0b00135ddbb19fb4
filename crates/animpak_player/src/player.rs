//! Frame-by-frame playback state machine.

use std::{fmt::Display, time::Duration};

use animpak_types::{Catalog, FormatError, FrameBuffer, FrameStreamer, PackError, StreamConfig, TableEntry};
use animpak_vfs::{ByteStore, Medium};
use log::{debug, info, warn};

use crate::{
	cancel::CancelToken,
	error::{PlayError, PlayOutcome},
	pacer::Pacer,
	sink::FrameSink,
};

/// Where the [`Player`] is in its life cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlayerState {
	/// No animation selected
	#[default]
	Idle,
	/// An animation was resolved and can be played
	Loaded,
	/// A pass is running
	Playing,
}

impl Display for PlayerState {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			PlayerState::Idle => write!(f, "idle"),
			PlayerState::Loaded => write!(f, "loaded"),
			PlayerState::Playing => write!(f, "playing"),
		}
	}
}

/// Streams an animation's frames to a [`FrameSink`]
///
/// Owns the one frame buffer every decode writes into, so playing an
/// animation never allocates per frame.
#[derive(Debug)]
pub struct Player {
	streamer: FrameStreamer,
	frame: FrameBuffer,
	frame_delay: Duration,
	state: PlayerState,
	entry: Option<TableEntry>,
}

impl Player {
	/// Creates an idle player
	pub fn new(config: StreamConfig, frame_delay: Duration) -> Result<Self, PackError> {
		Ok(Self {
			streamer: FrameStreamer::new(config)?,
			frame: FrameBuffer::for_config(&config),
			frame_delay,
			state: PlayerState::Idle,
			entry: None,
		})
	}

	/// Current state
	pub fn state(&self) -> PlayerState {
		self.state
	}

	/// The loaded animation, if any
	pub fn entry(&self) -> Option<&TableEntry> {
		self.entry.as_ref()
	}

	/// Last decoded frame
	pub fn frame(&self) -> &FrameBuffer {
		&self.frame
	}

	/// Delay between two frames
	pub fn frame_delay(&self) -> Duration {
		self.frame_delay
	}

	/// Changes the delay between two frames
	pub fn set_frame_delay(&mut self, frame_delay: Duration) {
		self.frame_delay = frame_delay;
	}

	/// Streaming decoder used for playback
	pub fn streamer(&self) -> &FrameStreamer {
		&self.streamer
	}

	/// Resolves `name` in `catalog` and selects it for playback
	///
	/// A failed lookup unloads any previous selection.
	pub fn load(&mut self, catalog: &Catalog, name: &str) -> Result<&TableEntry, PlayError> {
		match catalog.require(name) {
			Ok(entry) => {
				debug!("Loaded animation {}", entry);
				self.state = PlayerState::Loaded;
				Ok(&*self.entry.insert(*entry))
			}
			Err(err) => {
				warn!("Cannot load animation: {}", err);
				self.unload();
				Err(err.into())
			}
		}
	}

	/// Drops the current selection
	pub fn unload(&mut self) {
		self.state = PlayerState::Idle;
		self.entry = None;
	}

	/// Decodes frame `index` of the loaded animation into the player's buffer
	pub fn decode<M: Medium>(&mut self, store: &mut ByteStore<M>, index: usize) -> Result<&FrameBuffer, PlayError> {
		let entry = self.entry.ok_or(PlayError::NotLoaded)?;
		self.decode_entry(store, &entry, index)
	}

	/// Decodes frame `index` of any animation into the player's buffer
	pub fn decode_entry<M: Medium>(
		&mut self,
		store: &mut ByteStore<M>,
		entry: &TableEntry,
		index: usize,
	) -> Result<&FrameBuffer, PlayError> {
		self.streamer
			.decode_frame(store, entry, index, &mut self.frame)
			.map_err(|source| PlayError::Decode {
				frame: index,
				source,
			})?;
		Ok(&self.frame)
	}

	/// Plays the loaded animation
	///
	/// A single pass delivers frames `0..frame_count` in order with the frame
	/// delay after each one. With `looping` set, passes repeat until `cancel`
	/// fires. Cancellation is observed between frames, never mid-frame.
	///
	/// A frame that fails to decode is never delivered: the call stops and
	/// reports [`PlayError::Decode`], in loop mode too.
	///
	/// # Errors
	///
	/// - [`PlayError::NotLoaded`] when no animation is loaded
	/// - [`PlayError::Pack`] when the sub-container header is invalid or declares no frames
	/// - [`PlayError::Decode`] / [`PlayError::Sink`] for the first failing frame
	pub fn play<M, S, P>(
		&mut self,
		store: &mut ByteStore<M>,
		sink: &mut S,
		pacer: &mut P,
		looping: bool,
		cancel: &CancelToken,
	) -> Result<PlayOutcome, PlayError>
	where
		M: Medium,
		S: FrameSink + ?Sized,
		P: Pacer + ?Sized,
	{
		let entry = match (self.state, self.entry) {
			(PlayerState::Loaded | PlayerState::Playing, Some(entry)) => entry,
			_ => return Err(PlayError::NotLoaded),
		};

		let header = self.streamer.anim_header(store, &entry)?;
		if header.frame_count == 0 {
			return Err(PackError::from(FormatError::EmptyAnimation).into());
		}

		info!(
			"Playing '{}' ({} frames, {:?} per frame{})",
			entry.name(),
			header.frame_count,
			self.frame_delay,
			if looping { ", looping" } else { "" }
		);

		self.state = PlayerState::Playing;
		let result = self.run(store, sink, pacer, &entry, header.frame_count, looping, cancel);
		self.state = PlayerState::Loaded;

		match &result {
			Ok(PlayOutcome::Completed) => info!("'{}' finished", entry.name()),
			Ok(PlayOutcome::Cancelled) => warn!("'{}' cancelled", entry.name()),
			Err(err) => warn!("'{}' aborted: {}", entry.name(), err),
		}
		result
	}

	#[allow(clippy::too_many_arguments)]
	fn run<M, S, P>(
		&mut self,
		store: &mut ByteStore<M>,
		sink: &mut S,
		pacer: &mut P,
		entry: &TableEntry,
		frame_count: u16,
		looping: bool,
		cancel: &CancelToken,
	) -> Result<PlayOutcome, PlayError>
	where
		M: Medium,
		S: FrameSink + ?Sized,
		P: Pacer + ?Sized,
	{
		loop {
			for index in 0..usize::from(frame_count) {
				if cancel.is_cancelled() {
					return Ok(PlayOutcome::Cancelled);
				}

				self.decode_entry(store, entry, index)?;
				sink.draw_frame(&self.frame).map_err(|source| PlayError::Sink {
					frame: index,
					source,
				})?;

				if cancel.is_cancelled() {
					return Ok(PlayOutcome::Cancelled);
				}
				pacer.delay(self.frame_delay);
			}

			if !looping {
				return Ok(PlayOutcome::Completed);
			}
		}
	}
}
