//! Thread-safe display component owning storage, catalog and player.

use std::{
	sync::{
		Mutex, MutexGuard, PoisonError, RwLock,
		atomic::{AtomicBool, Ordering},
	},
	time::Duration,
};

use animpak_types::{Catalog, PackError, TableEntry};
use animpak_vfs::{ByteStore, Medium};
use log::{debug, error, info, warn};

use crate::{
	cancel::{CancelToken, Canceller},
	config::DisplayConfig,
	error::{PlayError, PlayOutcome},
	pacer::{Pacer, SleepPacer},
	player::{Player, PlayerState},
	sink::FrameSink,
};

struct DisplayState<M, S> {
	store: ByteStore<M>,
	sink: S,
	catalog: Catalog,
	catalog_loaded: bool,
	player: Player,
	pacer: Box<dyn Pacer + Send>,
}

/// Catalog entries and their frame counts, readable while a pass holds the lock
#[derive(Debug, Clone, Default)]
struct CatalogIndex {
	entries: Vec<(TableEntry, u16)>,
}

impl CatalogIndex {
	fn find(&self, name: &str) -> Option<&(TableEntry, u16)> {
		self.entries.iter().find(|(entry, _)| entry.matches(name))
	}
}

/// Animation player bound to one storage region and one screen
///
/// Calls that touch storage or the screen take one lock for their whole
/// duration, so they never interleave. Playback requests, mode changes and
/// [`stop`](Self::stop) first ask a running pass to stop; the playing thread
/// notices at its next frame boundary and releases the lock.
///
/// Status queries never stop playback. [`power_save`](Self::power_save),
/// [`list_names`](Self::list_names), [`has_animation`](Self::has_animation)
/// and [`frame_count`](Self::frame_count) answer from a catalog index
/// published on every catalog load, without waiting for the lock.
///
/// # Examples
///
/// ```no_run
/// use animpak_player::{AnimationDisplay, DisplayConfig, MemorySink};
/// use animpak_vfs::FileMedium;
///
/// let config = DisplayConfig::default();
/// let medium = FileMedium::open("flash.bin")?.with_label(config.partition_label.clone());
/// let display = AnimationDisplay::new(medium, MemorySink::new(96, 64), config)?;
/// display.start()?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct AnimationDisplay<M, S> {
	state: Mutex<DisplayState<M, S>>,
	index: RwLock<Option<CatalogIndex>>,
	power_save: AtomicBool,
	canceller: Canceller,
	config: DisplayConfig,
}

impl<M: Medium, S: FrameSink> AnimationDisplay<M, S> {
	/// Creates a display; the catalog is read lazily or by [`begin`](Self::begin)
	pub fn new(medium: M, sink: S, config: DisplayConfig) -> Result<Self, PlayError> {
		config.validate()?;
		let store = ByteStore::with_write_chunk(medium, config.write_chunk);
		let player = Player::new(config.stream, config.frame_delay())?;

		Ok(Self {
			state: Mutex::new(DisplayState {
				store,
				sink,
				catalog: Catalog::empty(config.base_offset),
				catalog_loaded: false,
				player,
				pacer: Box::new(SleepPacer),
			}),
			index: RwLock::new(None),
			power_save: AtomicBool::new(false),
			canceller: Canceller::new(),
			config,
		})
	}

	/// Replaces the inter-frame pacer
	pub fn with_pacer(mut self, pacer: impl Pacer + Send + 'static) -> Self {
		self.state.get_mut().unwrap_or_else(PoisonError::into_inner).pacer = Box::new(pacer);
		self
	}

	/// Active configuration
	pub fn config(&self) -> &DisplayConfig {
		&self.config
	}

	/// Stops a running animation at its next frame boundary without waiting
	pub fn stop(&self) {
		self.canceller.cancel();
	}

	/// Takes the lock after asking a running pass to stop
	fn preempt(&self) -> MutexGuard<'_, DisplayState<M, S>> {
		let _waiting = self.canceller.announce();
		self.state.lock().unwrap_or_else(PoisonError::into_inner)
	}

	/// Takes the lock, waiting for a running pass to end on its own
	fn wait(&self) -> MutexGuard<'_, DisplayState<M, S>> {
		self.state.lock().unwrap_or_else(PoisonError::into_inner)
	}

	fn publish(&self, index: Option<CatalogIndex>) {
		*self.index.write().unwrap_or_else(PoisonError::into_inner) = index;
	}

	/// Loads the catalog unless already loaded, returning the animation count
	pub fn begin(&self) -> Result<usize, PlayError> {
		self.with_index(|index| index.entries.len())
	}

	/// Re-reads the catalog from storage
	///
	/// On failure the catalog is empty and the loaded animation is dropped.
	pub fn reload(&self) -> Result<usize, PlayError> {
		let mut state = self.preempt();
		state.catalog_loaded = false;
		self.ensure_catalog(&mut state)
	}

	fn ensure_catalog(&self, state: &mut DisplayState<M, S>) -> Result<usize, PlayError> {
		if state.catalog_loaded {
			return Ok(state.catalog.len());
		}

		let DisplayState {
			store,
			catalog,
			player,
			..
		} = &mut *state;
		if let Err(err) = catalog.reload(store) {
			self.publish(None);
			player.unload();
			return Err(err.into());
		}

		let entries = catalog.iter().map(|entry| (*entry, player.streamer().frame_count(store, entry))).collect();
		self.publish(Some(CatalogIndex {
			entries,
		}));
		debug!("{}: published catalog index", store.label());

		state.catalog_loaded = true;
		Ok(state.catalog.len())
	}

	/// Answers from the published index, loading the catalog first if needed
	fn with_index<R>(&self, f: impl FnOnce(&CatalogIndex) -> R) -> Result<R, PlayError> {
		{
			let index = self.index.read().unwrap_or_else(PoisonError::into_inner);
			if let Some(index) = index.as_ref() {
				return Ok(f(index));
			}
		}

		// nothing can be playing without a published index
		let mut state = self.wait();
		self.ensure_catalog(&mut state)?;
		let index = self.index.read().unwrap_or_else(PoisonError::into_inner);
		let empty = CatalogIndex::default();
		Ok(f(index.as_ref().unwrap_or(&empty)))
	}

	/// Animation names in container order
	///
	/// Empty when the catalog cannot be loaded.
	pub fn list_names(&self) -> Vec<String> {
		self.with_index(|index| index.entries.iter().map(|(entry, _)| entry.name()).collect())
			.unwrap_or_default()
	}

	/// Returns `true` when the container holds an animation called `name`
	pub fn has_animation(&self, name: &str) -> bool {
		self.with_index(|index| index.find(name).is_some()).unwrap_or(false)
	}

	/// Number of frames of animation `name`
	///
	/// Counts are read when the catalog is loaded. An animation whose header
	/// is missing, malformed or above the frame limit counts 0 frames.
	///
	/// # Errors
	///
	/// - [`PackError::NotFound`] (wrapped in [`PlayError::Pack`]) when the
	///   catalog has no animation called `name`
	/// - [`PlayError::Pack`] when the catalog cannot be loaded
	pub fn frame_count(&self, name: &str) -> Result<u16, PlayError> {
		self.with_index(|index| index.find(name).map(|&(_, count)| count))?.ok_or_else(|| {
			PackError::NotFound {
				name: name.to_string(),
			}
			.into()
		})
	}

	fn resolve(&self, state: &mut DisplayState<M, S>, name: &str) -> Result<TableEntry, PlayError> {
		self.ensure_catalog(state)?;
		Ok(*state.catalog.require(name)?)
	}

	/// Selects animation `name` for [`play_animation`](Self::play_animation)
	///
	/// Stops a running pass first.
	pub fn load_animation(&self, name: &str) -> Result<(), PlayError> {
		let mut state = self.preempt();
		self.load_locked(&mut state, name)
	}

	fn load_locked(&self, state: &mut DisplayState<M, S>, name: &str) -> Result<(), PlayError> {
		if let Err(err) = self.ensure_catalog(state) {
			state.player.unload();
			return Err(err);
		}
		let DisplayState {
			catalog,
			player,
			..
		} = &mut *state;
		player.load(catalog, name)?;
		Ok(())
	}

	/// Plays the loaded animation once, or until stopped when `looping`
	pub fn play_animation(&self, looping: bool) -> Result<PlayOutcome, PlayError> {
		let mut state = self.preempt();
		let token = self.canceller.token();
		self.play_locked(&mut state, looping, &token)
	}

	/// Loads and plays `name` with a frame delay for this call only
	///
	/// Later calls play at the configured delay again.
	pub fn play(&self, name: &str, looping: bool, frame_delay_ms: u64) -> Result<PlayOutcome, PlayError> {
		let mut state = self.preempt();
		let token = self.canceller.token();
		self.load_locked(&mut state, name)?;

		let configured = state.player.frame_delay();
		state.player.set_frame_delay(Duration::from_millis(frame_delay_ms));
		let result = self.play_locked(&mut state, looping, &token);
		state.player.set_frame_delay(configured);
		result
	}

	fn play_locked(
		&self,
		state: &mut DisplayState<M, S>,
		looping: bool,
		token: &CancelToken,
	) -> Result<PlayOutcome, PlayError> {
		if self.power_save.load(Ordering::Acquire) {
			warn!("Playback suppressed in power save mode");
			return Err(PlayError::PowerSave);
		}
		if state.player.state() == PlayerState::Idle {
			return Err(PlayError::NotLoaded);
		}

		let DisplayState {
			store,
			sink,
			player,
			pacer,
			..
		} = &mut *state;
		player.play(store, sink, pacer.as_mut(), looping, token)
	}

	/// Decodes one frame of animation `name` and returns a copy of its pixels
	///
	/// Waits for a running pass to end instead of stopping it.
	pub fn decode_frame(&self, name: &str, index: usize) -> Result<Vec<u16>, PlayError> {
		let mut state = self.wait();
		let entry = self.resolve(&mut state, name)?;
		let DisplayState {
			store,
			player,
			..
		} = &mut *state;
		Ok(player.decode_entry(store, &entry, index)?.pixels().to_vec())
	}

	/// Writes raw bytes into the region, bypassing the container format
	///
	/// The target range must already be erased. The catalog is marked stale
	/// and re-read on next use.
	pub fn write_raw(&self, offset: u32, data: &[u8]) -> Result<(), PlayError> {
		let mut state = self.preempt();
		state.catalog_loaded = false;
		self.publish(None);
		state.store.write(offset, data).map_err(|err| {
			error!("Raw write of {} bytes at 0x{:08X} failed: {}", data.len(), offset, err);
			PlayError::Pack(err.into())
		})
	}

	/// Enters or leaves power save mode
	///
	/// Entering stops playback and blanks the screen; while on, play requests
	/// fail with [`PlayError::PowerSave`].
	pub fn set_power_save(&self, on: bool) -> Result<(), PlayError> {
		let mut state = self.preempt();
		self.power_save.store(on, Ordering::Release);
		info!("Power save {}", if on { "on" } else { "off" });
		if on {
			state.sink.clear().map_err(|source| PlayError::Sink {
				frame: 0,
				source,
			})?;
		}
		Ok(())
	}

	/// Returns `true` in power save mode
	pub fn power_save(&self) -> bool {
		self.power_save.load(Ordering::Acquire)
	}

	/// Blanks the screen and plays the configured startup animation once
	///
	/// Returns `Ok(None)` when no startup animation is configured or the
	/// container does not have it.
	pub fn start(&self) -> Result<Option<PlayOutcome>, PlayError> {
		let mut state = self.preempt();
		let token = self.canceller.token();
		state.sink.clear().map_err(|source| PlayError::Sink {
			frame: 0,
			source,
		})?;

		let count = self.ensure_catalog(&mut state)?;
		info!("{}: {} animations available", self.config.partition_label, count);

		let Some(name) = self.config.startup_animation.as_deref() else {
			return Ok(None);
		};
		if !state.catalog.contains(name) {
			warn!("Startup animation '{}' not found", name);
			return Ok(None);
		}

		self.load_locked(&mut state, name)?;
		self.play_locked(&mut state, false, &token).map(Some)
	}

	/// Runs `f` with the sink while holding the lock
	///
	/// Waits for a running pass to end instead of stopping it.
	pub fn with_sink<R>(&self, f: impl FnOnce(&mut S) -> R) -> R {
		f(&mut self.wait().sink)
	}

	/// Consumes the display, returning the medium and the sink
	pub fn into_parts(self) -> (M, S) {
		let state = self.state.into_inner().unwrap_or_else(PoisonError::into_inner);
		(state.store.into_inner(), state.sink)
	}
}

impl<M, S> std::fmt::Debug for AnimationDisplay<M, S> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("AnimationDisplay")
			.field("config", &self.config)
			.field("generation", &self.canceller.generation())
			.field("power_save", &self.power_save.load(Ordering::Relaxed))
			.finish_non_exhaustive()
	}
}
