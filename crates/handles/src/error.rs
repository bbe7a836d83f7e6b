use crate::ArenaHandle;

/// A convenient type alias for `Result` with `E` = [`HandleError`].
pub type Result<T, E = HandleError> = std::result::Result<T, E>;

/// Failures raised by the registries themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum HandleError {
	/// A key clock or arena has no key left to hand out.
	#[error("keyspace exhausted")]
	KeyspaceExhausted,
	/// The slot was vacated (and possibly reused) after the handle was issued.
	#[error("stale handle {handle}: slot is at generation {current}")]
	Stale {
		/// The rejected handle.
		handle: ArenaHandle,
		/// Generation currently stored in the slot.
		current: u32,
	},
	/// The handle points past every slot the arena ever allocated.
	#[error("handle {0} does not name an arena slot")]
	Dangling(ArenaHandle),
}
