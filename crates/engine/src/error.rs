/// A convenient type alias for `Result` with `E` = [`EngineError`].
pub type Result<T, E = EngineError> = std::result::Result<T, E>;

/// Failures reported by the native engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum EngineError {
	/// An index exceeded the engine's own count for a collection.
	#[error("{collection} index {index} is out of range (count is {count})")]
	OutOfRange {
		/// Collection name, e.g. `"model"` or `"state"`.
		collection: &'static str,
		/// Requested index.
		index: usize,
		/// Number of elements in the collection.
		count: usize,
	},
	/// The engine does not support the requested operation on this object.
	#[error("unsupported: {0}")]
	Unsupported(String),
}

impl EngineError {
	/// Builds an [`EngineError::OutOfRange`] if `index` is not below `count`.
	pub fn check_index(collection: &'static str, index: usize, count: usize) -> Result<()> {
		if index < count {
			Ok(())
		} else {
			Err(Self::OutOfRange { collection, index, count })
		}
	}
}
