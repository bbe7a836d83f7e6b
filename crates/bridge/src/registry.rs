use simbridge_engine::{DocumentRef, FileRef, InstanceRef};
use simbridge_handles::{PathRegistry, SequenceRegistry};

use crate::{DocumentKey, DocumentState, Error, FileHandle, Handle, InstanceKey, Result};

/// Document entry: the native document plus its owner and offspring.
#[derive(Debug)]
pub(crate) struct DocumentEntry {
	pub document: DocumentRef,
	pub file: FileHandle,
	pub state: DocumentState,
	pub instances: Vec<InstanceKey>,
}

/// Instance entry: the native instance plus the document and file it came from.
#[derive(Debug)]
pub(crate) struct InstanceEntry {
	pub instance: InstanceRef,
	pub document: DocumentKey,
	pub file: FileHandle,
}

/// Every registry the bridge keeps, guarded together so owner sweeps are atomic.
#[derive(Debug, Default)]
pub(crate) struct Registry {
	pub files: PathRegistry<FileRef>,
	pub documents: SequenceRegistry<DocumentKey, DocumentEntry>,
	pub instances: SequenceRegistry<InstanceKey, InstanceEntry>,
}

impl Registry {
	pub fn file(&self, handle: &FileHandle) -> Result<&FileRef> {
		self.files
			.lookup(handle.as_str())
			.ok_or_else(|| Error::NotFound(Handle::File(handle.clone())))
	}

	pub fn document(&self, key: DocumentKey) -> Result<&DocumentEntry> {
		self.documents.lookup(key).ok_or(Error::NotFound(Handle::Document(key)))
	}

	pub fn document_mut(&mut self, key: DocumentKey) -> Result<&mut DocumentEntry> {
		self.documents.lookup_mut(key).ok_or(Error::NotFound(Handle::Document(key)))
	}

	pub fn instance(&self, key: InstanceKey) -> Result<&InstanceEntry> {
		self.instances.lookup(key).ok_or(Error::NotFound(Handle::Instance(key)))
	}

	/// Drops `path` and everything created from it. Returns the number of entries removed.
	pub fn sweep_file(&mut self, path: &str) -> usize {
		let file = usize::from(self.files.remove(path).is_some());
		let documents = self.documents.retain(|_, entry| entry.file.as_str() != path);
		let instances = self.instances.retain(|_, entry| entry.file.as_str() != path);
		file + documents.len() + instances.len()
	}
}
