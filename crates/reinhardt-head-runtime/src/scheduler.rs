//! Tick scheduling.
//!
//! Reconciliation is batched: any number of registry changes within one tick
//! produce at most one flush. The host provides the tick through a
//! [`TickScheduler`] and calls [`HeadManager::flush`](crate::HeadManager::flush)
//! when it fires, typically right before the next frame is painted.
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! use reinhardt_head_runtime::TickScheduler;
//!
//! let requested = Rc::new(Cell::new(0));
//! let counter = Rc::clone(&requested);
//! let scheduler = move || counter.set(counter.get() + 1);
//!
//! scheduler.request_flush();
//! assert_eq!(requested.get(), 1);
//! ```

use std::cell::Cell;
use std::rc::Rc;

/// Schedules one flush on the next tick.
pub trait TickScheduler {
	/// Asks for a flush on the next tick. Called at most once per pending
	/// flush.
	fn request_flush(&self);

	/// Withdraws a requested flush. Schedulers that cannot cancel may ignore
	/// this; a flush with nothing pending is a no-op.
	fn cancel_flush(&self) {}
}

impl<F: Fn()> TickScheduler for F {
	fn request_flush(&self) {
		self()
	}
}

/// A scheduler whose ticks are driven by hand.
///
/// Clones share state, so the host keeps one clone to see whether a flush is
/// due while the manager owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
	pending: Rc<Cell<bool>>,
	requests: Rc<Cell<usize>>,
}

impl ManualScheduler {
	/// Creates a scheduler with nothing pending.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns `true` if a flush was requested and not cancelled or taken.
	pub fn is_pending(&self) -> bool {
		self.pending.get()
	}

	/// Clears the pending flag, returning whether a flush was due.
	pub fn take(&self) -> bool {
		self.pending.replace(false)
	}

	/// Total number of flush requests.
	pub fn request_count(&self) -> usize {
		self.requests.get()
	}
}

impl TickScheduler for ManualScheduler {
	fn request_flush(&self) {
		self.pending.set(true);
		self.requests.set(self.requests.get() + 1);
	}

	fn cancel_flush(&self) {
		self.pending.set(false);
	}
}
