use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::{KeyClock, Result};

/// Registry keyed by monotonic sequence keys.
///
/// Key generation is separate from insertion: callers reserve a key with [`Self::next_key`],
/// build the native object, then [`Self::insert`] it. A key is never handed out twice, so a key
/// that was removed keeps failing lookups forever.
#[derive(Debug)]
pub struct SequenceRegistry<K, T> {
	clock: KeyClock,
	entries: FxHashMap<K, T>,
}

impl<K, T> Default for SequenceRegistry<K, T> {
	fn default() -> Self {
		Self {
			clock: KeyClock::new(),
			entries: FxHashMap::default(),
		}
	}
}

impl<K, T> SequenceRegistry<K, T>
where
	K: Copy + Eq + Hash + From<u64>,
{
	/// Creates an empty registry whose first key is [`KeyClock::ORIGIN`].
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates an empty registry whose first key is `origin`.
	pub fn starting_at(origin: u64) -> Self {
		Self {
			clock: KeyClock::starting_at(origin),
			entries: FxHashMap::default(),
		}
	}

	/// Reserves the next key of this keyspace.
	pub fn next_key(&self) -> Result<K> {
		self.clock.next().map(K::from)
	}

	/// Inserts or replaces the entry for `key`, returning the previous value.
	pub fn insert(&mut self, key: K, value: T) -> Option<T> {
		self.entries.insert(key, value)
	}

	/// Looks up the entry for `key`.
	pub fn lookup(&self, key: K) -> Option<&T> {
		self.entries.get(&key)
	}

	/// Looks up the entry for `key` mutably.
	pub fn lookup_mut(&mut self, key: K) -> Option<&mut T> {
		self.entries.get_mut(&key)
	}

	/// Removes the entry for `key`. Absent keys are a no-op.
	pub fn remove(&mut self, key: K) -> Option<T> {
		self.entries.remove(&key)
	}

	/// Keeps only the entries for which `keep` returns `true`, returning the removed keys.
	pub fn retain(&mut self, mut keep: impl FnMut(K, &T) -> bool) -> Vec<K> {
		let mut removed = Vec::new();
		self.entries.retain(|key, value| {
			let kept = keep(*key, value);
			if !kept {
				removed.push(*key);
			}
			kept
		});
		removed
	}

	/// Iterates over all entries in unspecified order.
	pub fn iter(&self) -> impl Iterator<Item = (K, &T)> {
		self.entries.iter().map(|(key, value)| (*key, value))
	}

	/// Number of live entries.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Returns `true` if no entry is live.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}
