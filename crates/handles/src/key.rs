use std::sync::atomic::{AtomicU64, Ordering};

use crate::{HandleError, Result};

/// Monotonic key source for one sequence keyspace.
///
/// Keys start at [`KeyClock::ORIGIN`] and only ever grow, removals included. `u64::MAX` is never
/// handed out: once the clock reaches it every further call reports
/// [`HandleError::KeyspaceExhausted`] instead of wrapping back onto live keys.
#[derive(Debug)]
pub struct KeyClock {
	next: AtomicU64,
}

impl Default for KeyClock {
	fn default() -> Self {
		Self::new()
	}
}

impl KeyClock {
	/// First key handed out by a fresh clock.
	pub const ORIGIN: u64 = 0;

	/// Creates a clock starting at [`Self::ORIGIN`].
	pub const fn new() -> Self {
		Self::starting_at(Self::ORIGIN)
	}

	/// Creates a clock whose first key is `origin`.
	pub const fn starting_at(origin: u64) -> Self {
		Self { next: AtomicU64::new(origin) }
	}

	/// Returns the next key and advances the clock.
	pub fn next(&self) -> Result<u64> {
		self.next
			.fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| current.checked_add(1))
			.map_err(|_| HandleError::KeyspaceExhausted)
	}

	/// Returns the key the next call to [`Self::next`] would produce, without advancing.
	pub fn peek(&self) -> Option<u64> {
		let next = self.next.load(Ordering::Acquire);
		(next != u64::MAX).then_some(next)
	}
}
