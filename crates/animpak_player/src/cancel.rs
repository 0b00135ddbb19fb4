//! Generation-counter cancellation.

use std::sync::{
	Arc,
	atomic::{AtomicU64, AtomicUsize, Ordering},
};

#[derive(Debug, Default)]
struct Shared {
	generation: AtomicU64,
	waiting: AtomicUsize,
}

/// Hands out [`CancelToken`]s and invalidates them
///
/// Every call to [`supersede`](Self::supersede) or [`cancel`](Self::cancel)
/// bumps a shared generation counter; tokens taken before the bump report
/// themselves cancelled from then on. Tokens also report cancelled while a
/// [`Waiting`] announcement is alive, so a request queued behind a running
/// pass stops it without invalidating the token it takes afterwards.
#[derive(Debug, Clone, Default)]
pub struct Canceller {
	shared: Arc<Shared>,
}

impl Canceller {
	/// Creates a canceller at generation zero
	pub fn new() -> Self {
		Self::default()
	}

	/// Current generation
	pub fn generation(&self) -> u64 {
		self.shared.generation.load(Ordering::Acquire)
	}

	/// Cancels every outstanding token
	pub fn cancel(&self) {
		self.shared.generation.fetch_add(1, Ordering::AcqRel);
	}

	/// Cancels every outstanding token and returns one for the new generation
	pub fn supersede(&self) -> CancelToken {
		let observed = self.shared.generation.fetch_add(1, Ordering::AcqRel) + 1;
		CancelToken {
			shared: Some(Arc::clone(&self.shared)),
			observed,
		}
	}

	/// Returns a token for the current generation without cancelling anything
	pub fn token(&self) -> CancelToken {
		CancelToken {
			shared: Some(Arc::clone(&self.shared)),
			observed: self.generation(),
		}
	}

	/// Announces a request that wants the running pass to stop
	///
	/// Every token reports cancelled until the returned guard is dropped.
	pub fn announce(&self) -> Waiting {
		self.shared.waiting.fetch_add(1, Ordering::AcqRel);
		Waiting {
			shared: Arc::clone(&self.shared),
		}
	}

	/// Number of announced requests still waiting
	pub fn waiting(&self) -> usize {
		self.shared.waiting.load(Ordering::Acquire)
	}
}

/// Pending request returned by [`Canceller::announce`]
#[derive(Debug)]
#[must_use = "the announcement ends as soon as the guard is dropped"]
pub struct Waiting {
	shared: Arc<Shared>,
}

impl Drop for Waiting {
	fn drop(&mut self) {
		self.shared.waiting.fetch_sub(1, Ordering::AcqRel);
	}
}

/// Checked by playback between frames
#[derive(Debug, Clone)]
pub struct CancelToken {
	shared: Option<Arc<Shared>>,
	observed: u64,
}

impl CancelToken {
	/// A token that is never cancelled
	pub fn never() -> Self {
		Self {
			shared: None,
			observed: 0,
		}
	}

	/// Returns `true` once the issuing [`Canceller`] moved on or while a
	/// request is waiting
	pub fn is_cancelled(&self) -> bool {
		self.shared.as_ref().is_some_and(|shared| {
			shared.generation.load(Ordering::Acquire) != self.observed
				|| shared.waiting.load(Ordering::Acquire) > 0
		})
	}
}
