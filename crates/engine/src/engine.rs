use crate::{DocumentRef, FileRef};

/// Entry point into a native engine.
///
/// The file-manager half tracks files by path and only weakly: a file nobody holds a
/// [`FileRef`] to may be reclaimed at any time.
pub trait Engine: Send + Sync {
	/// Engine version string.
	fn version(&self) -> String;

	/// Creates (or returns the already managed) file for `path`.
	///
	/// With `retrieve_contents` the engine loads the contents itself; otherwise the file starts
	/// empty and the caller is expected to push contents into it.
	fn create_file(&self, path: &str, retrieve_contents: bool) -> FileRef;

	/// Managed file for `path`, if it is still alive.
	fn file(&self, path: &str) -> Option<FileRef>;

	/// Every managed file that is still alive.
	fn files(&self) -> Vec<FileRef>;

	/// Stops managing `file`.
	fn unmanage(&self, file: &FileRef);

	/// Builds a SED document from `file`.
	fn create_document(&self, file: &FileRef) -> DocumentRef;
}
