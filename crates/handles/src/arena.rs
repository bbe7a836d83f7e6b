use std::fmt;

use crate::{HandleError, Result};

/// Index plus generation naming one arena slot.
///
/// The pair packs into a single `u64` ([`Self::to_bits`]) so hosts can carry it as a plain number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArenaHandle {
	index: u32,
	generation: u32,
}

impl ArenaHandle {
	/// Slot index.
	pub const fn index(self) -> u32 {
		self.index
	}

	/// Generation the slot had when this handle was issued.
	pub const fn generation(self) -> u32 {
		self.generation
	}

	/// Packs the handle as `generation << 32 | index`.
	pub const fn to_bits(self) -> u64 {
		((self.generation as u64) << 32) | self.index as u64
	}

	/// Unpacks a handle produced by [`Self::to_bits`].
	pub const fn from_bits(bits: u64) -> Self {
		Self {
			index: bits as u32,
			generation: (bits >> 32) as u32,
		}
	}
}

impl fmt::Display for ArenaHandle {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}v{}", self.index, self.generation)
	}
}

#[derive(Debug)]
struct Slot<T> {
	generation: u32,
	value: Option<T>,
}

/// Slot storage with generation-checked handles.
///
/// Vacated slots are reused, but every removal bumps the slot generation, so a handle issued
/// before the removal is reported as [`HandleError::Stale`] instead of resolving to the new
/// occupant. A slot at the last generation is never reused.
#[derive(Debug)]
pub struct Arena<T> {
	slots: Vec<Slot<T>>,
	free: Vec<u32>,
	len: usize,
}

impl<T> Default for Arena<T> {
	fn default() -> Self {
		Self {
			slots: Vec::new(),
			free: Vec::new(),
			len: 0,
		}
	}
}

impl<T> Arena<T> {
	/// Creates an empty arena.
	pub fn new() -> Self {
		Self::default()
	}

	/// Stores `value` and returns its handle.
	///
	/// Fails with [`HandleError::KeyspaceExhausted`] once every `u32` index is occupied or retired.
	pub fn insert(&mut self, value: T) -> Result<ArenaHandle> {
		self.insert_with(|_| value)
	}

	/// Stores the value `make` builds for the handle it is about to live under.
	///
	/// `make` only runs once a slot is secured, so an exhausted arena never calls it.
	pub fn insert_with(&mut self, make: impl FnOnce(ArenaHandle) -> T) -> Result<ArenaHandle> {
		let handle = match self.free.pop() {
			Some(index) => ArenaHandle {
				index,
				generation: self.slots[index as usize].generation,
			},
			None => {
				let index = u32::try_from(self.slots.len()).map_err(|_| HandleError::KeyspaceExhausted)?;
				self.slots.push(Slot {
					generation: 0,
					value: None,
				});
				ArenaHandle { index, generation: 0 }
			}
		};

		self.slots[handle.index as usize].value = Some(make(handle));
		self.len += 1;
		Ok(handle)
	}

	/// Resolves `handle`, reporting why it no longer names a live value.
	pub fn lookup(&self, handle: ArenaHandle) -> Result<&T> {
		let slot = self.slots.get(handle.index as usize).ok_or(HandleError::Dangling(handle))?;
		match &slot.value {
			Some(value) if slot.generation == handle.generation => Ok(value),
			_ => Err(HandleError::Stale {
				handle,
				current: slot.generation,
			}),
		}
	}

	/// Resolves `handle` mutably.
	pub fn lookup_mut(&mut self, handle: ArenaHandle) -> Result<&mut T> {
		let slot = self.slots.get_mut(handle.index as usize).ok_or(HandleError::Dangling(handle))?;
		match &mut slot.value {
			Some(value) if slot.generation == handle.generation => Ok(value),
			_ => Err(HandleError::Stale {
				handle,
				current: slot.generation,
			}),
		}
	}

	/// Returns `true` if `handle` names a live value.
	pub fn contains(&self, handle: ArenaHandle) -> bool {
		self.lookup(handle).is_ok()
	}

	/// Removes the value named by `handle` and retires the handle.
	pub fn remove(&mut self, handle: ArenaHandle) -> Result<T> {
		let slot = self.slots.get_mut(handle.index as usize).ok_or(HandleError::Dangling(handle))?;
		let stale = HandleError::Stale {
			handle,
			current: slot.generation,
		};
		if slot.generation != handle.generation {
			return Err(stale);
		}
		let Some(value) = slot.value.take() else {
			return Err(stale);
		};

		// A slot whose generation cannot advance is retired for good.
		if let Some(next) = slot.generation.checked_add(1) {
			slot.generation = next;
			self.free.push(handle.index);
		}
		self.len -= 1;
		Ok(value)
	}

	/// Iterates over live values and their handles.
	pub fn iter(&self) -> impl Iterator<Item = (ArenaHandle, &T)> {
		self.slots.iter().enumerate().filter_map(|(index, slot)| {
			slot.value.as_ref().map(|value| {
				(
					ArenaHandle {
						index: index as u32,
						generation: slot.generation,
					},
					value,
				)
			})
		})
	}

	/// Number of live values.
	pub fn len(&self) -> usize {
		self.len
	}

	/// Returns `true` if no value is live.
	pub fn is_empty(&self) -> bool {
		self.len == 0
	}
}
