//! Opaque handle registries.
//!
//! Hosts never see native addresses. They hold one of three key shapes instead:
//! * a path key ([`PathRegistry`]), unique per managed file
//! * a sequence key ([`SequenceRegistry`]), handed out by a [`KeyClock`] and never reused
//! * an [`ArenaHandle`], an index plus generation so stale handles are rejected explicitly

#![warn(missing_docs)]

mod arena;
mod error;
mod key;
mod path;
mod sequence;

pub use arena::{Arena, ArenaHandle};
pub use error::{HandleError, Result};
pub use key::KeyClock;
pub use path::PathRegistry;
pub use sequence::SequenceRegistry;
