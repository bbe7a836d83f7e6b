use rustc_hash::FxHashMap;

/// Registry keyed by file path.
///
/// Insertion overwrites silently so re-registering the same path is idempotent.
#[derive(Debug, Clone)]
pub struct PathRegistry<T> {
	entries: FxHashMap<String, T>,
}

impl<T> Default for PathRegistry<T> {
	fn default() -> Self {
		Self {
			entries: FxHashMap::default(),
		}
	}
}

impl<T> PathRegistry<T> {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Inserts or replaces the entry for `path`, returning the previous value.
	pub fn insert(&mut self, path: impl Into<String>, value: T) -> Option<T> {
		self.entries.insert(path.into(), value)
	}

	/// Looks up the entry for `path`.
	pub fn lookup(&self, path: &str) -> Option<&T> {
		self.entries.get(path)
	}

	/// Returns `true` if `path` is registered.
	pub fn contains(&self, path: &str) -> bool {
		self.entries.contains_key(path)
	}

	/// Removes the entry for `path`. Absent paths are a no-op.
	pub fn remove(&mut self, path: &str) -> Option<T> {
		self.entries.remove(path)
	}

	/// Keeps only the entries for which `keep` returns `true`.
	pub fn retain(&mut self, mut keep: impl FnMut(&str, &T) -> bool) {
		self.entries.retain(|path, value| keep(path, value));
	}

	/// Iterates over all entries in unspecified order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
		self.entries.iter().map(|(path, value)| (path.as_str(), value))
	}

	/// Number of registered paths.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Returns `true` if nothing is registered.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}
