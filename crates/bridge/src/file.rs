use bytes::Bytes;
use simbridge_engine::{FileRef, FileType, Issue};

use crate::{Bridge, Error, FileHandle, Handle, Result};

impl Bridge {
	/// Returns the handle for an already known `path`.
	///
	/// A path the engine manages but the bridge does not track yet starts being tracked here.
	pub fn resolve(&self, path: &str) -> Result<FileHandle> {
		let handle = FileHandle::from(path);
		if self.registry.read().files.contains(path) {
			return Ok(handle);
		}

		let file = self.engine.file(path).ok_or_else(|| Error::NotFound(Handle::File(handle.clone())))?;
		self.registry.write().files.insert(path, file);
		tracing::debug!(path, "bridge.file.adopt");
		Ok(handle)
	}

	/// Creates (or refreshes) the file for `path`.
	///
	/// Without `contents`, or with empty ones, the engine retrieves the file itself. Retrieval
	/// problems surface as issues on the file, not as an error.
	pub fn create(&self, path: &str, contents: Option<Bytes>) -> Result<FileHandle> {
		let contents = contents.filter(|contents| !contents.is_empty());
		let file = self.engine.create_file(path, contents.is_none());
		if let Some(contents) = contents {
			file.set_contents(contents.to_vec());
		}

		let issues = file.issues().len();
		self.registry.write().files.insert(path, file);
		tracing::debug!(path, issues, "bridge.file.create");
		Ok(FileHandle::from(path))
	}

	/// [`Self::resolve`] when no contents are supplied and the path is known, [`Self::create`]
	/// otherwise.
	pub fn resolve_or_create(&self, path: &str, contents: Option<Bytes>) -> Result<FileHandle> {
		match contents {
			None => self.resolve(path).or_else(|_| self.create(path, None)),
			Some(contents) => self.create(path, Some(contents)),
		}
	}

	/// Stops managing the file at `handle`, together with every document and instance created
	/// from it. A path nobody manages is left alone.
	pub fn unmanage(&self, handle: &FileHandle) -> Result<()> {
		let path = handle.as_str();
		let managed = self.engine.files().into_iter().find(|file| file.path() == path);

		let removed = self.registry.write().sweep_file(path);
		if managed.is_none() && removed == 0 {
			tracing::trace!(path, "bridge.file.unmanage.unknown");
			return Ok(());
		}
		if let Some(file) = &managed {
			self.engine.unmanage(file);
		}

		tracing::debug!(path, removed, "bridge.file.unmanage");
		Ok(())
	}

	pub(crate) fn file(&self, handle: &FileHandle) -> Result<FileRef> {
		self.registry.read().file(handle).cloned()
	}

	/// Raw contents.
	pub fn contents(&self, handle: &FileHandle) -> Result<Bytes> {
		Ok(Bytes::from(self.file(handle)?.contents()))
	}

	/// Issues recorded while creating or retrieving the file.
	pub fn issues(&self, handle: &FileHandle) -> Result<Vec<Issue>> {
		Ok(self.file(handle)?.issues())
	}

	/// Detected file type.
	pub fn file_type(&self, handle: &FileHandle) -> Result<FileType> {
		Ok(self.file(handle)?.file_type())
	}

	/// Contents of the archive's UI description, if it carries one.
	pub fn ui_json(&self, handle: &FileHandle) -> Result<Option<Bytes>> {
		let file = self.file(handle)?;
		Ok(file
			.child_file(&self.config.ui_json_file)
			.map(|child| Bytes::from(child.contents())))
	}
}
