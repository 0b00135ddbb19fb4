//! Inter-frame delays.

use std::{thread, time::Duration};

/// Waits between two frames
pub trait Pacer {
	/// Blocks for roughly `delay`
	fn delay(&mut self, delay: Duration);
}

impl<P: Pacer + ?Sized> Pacer for &mut P {
	fn delay(&mut self, delay: Duration) {
		(**self).delay(delay);
	}
}

impl<P: Pacer + ?Sized> Pacer for Box<P> {
	fn delay(&mut self, delay: Duration) {
		(**self).delay(delay);
	}
}

/// Sleeps the current thread
#[derive(Debug, Clone, Copy, Default)]
pub struct SleepPacer;

impl Pacer for SleepPacer {
	fn delay(&mut self, delay: Duration) {
		if !delay.is_zero() {
			thread::sleep(delay);
		}
	}
}

/// Does not wait at all (tools, tests)
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPacer;

impl Pacer for NoopPacer {
	fn delay(&mut self, _delay: Duration) {}
}
