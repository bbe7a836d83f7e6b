//! Deterministic in-process engine.
//!
//! Files hold JSON in the shape described by [`format`]. Running an instance evaluates closed-form
//! exponentials at the requested output points instead of integrating anything.

use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::{DocumentRef, Engine, FileRef, NativeFile};

mod document;
mod file;
pub mod format;
mod instance;

pub use document::{MemoryDocument, MemoryModel, MemorySimulation, MemorySolver};
pub use file::MemoryFile;
pub use instance::{MemoryInstance, MemoryTask};

/// In-memory [`Engine`].
///
/// The file manager only keeps weak references, so a file is reclaimed as soon as the last
/// [`FileRef`] outside the engine is dropped.
#[derive(Debug, Default)]
pub struct MemoryEngine {
	files: Mutex<FxHashMap<String, Weak<MemoryFile>>>,
}

impl MemoryEngine {
	/// Creates an engine managing no files.
	pub fn new() -> Self {
		Self::default()
	}
}

impl Engine for MemoryEngine {
	fn version(&self) -> String {
		concat!("memory-", env!("CARGO_PKG_VERSION")).to_string()
	}

	fn create_file(&self, path: &str, retrieve_contents: bool) -> FileRef {
		let mut files = self.files.lock();
		if let Some(file) = files.get(path).and_then(Weak::upgrade) {
			return file;
		}

		let file = Arc::new(MemoryFile::new(path, retrieve_contents));
		files.retain(|_, weak| weak.strong_count() > 0);
		files.insert(path.to_string(), Arc::downgrade(&file));
		tracing::debug!(path, retrieve_contents, managed = files.len(), "engine.memory.create_file");
		file
	}

	fn file(&self, path: &str) -> Option<FileRef> {
		self.files.lock().get(path).and_then(Weak::upgrade).map(|file| file as FileRef)
	}

	fn files(&self) -> Vec<FileRef> {
		self.files
			.lock()
			.values()
			.filter_map(Weak::upgrade)
			.map(|file| file as FileRef)
			.collect()
	}

	fn unmanage(&self, file: &FileRef) {
		let mut files = self.files.lock();
		if files.get(file.path()).and_then(Weak::upgrade).is_some_and(|managed| {
			std::ptr::addr_eq(Arc::as_ptr(&managed), Arc::as_ptr(file))
		}) {
			files.remove(file.path());
			tracing::debug!(path = file.path(), "engine.memory.unmanage");
		}
	}

	fn create_document(&self, file: &FileRef) -> DocumentRef {
		Arc::new(MemoryDocument::from_file(file))
	}
}
