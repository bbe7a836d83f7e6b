use std::fmt;
use std::sync::Arc;

use crate::Issue;

/// Shared reference to a native file.
pub type FileRef = Arc<dyn NativeFile>;

/// Kind of content a native file holds.
///
/// The discriminants are part of the host contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum FileType {
	/// Contents were not recognised.
	UnknownFile = 0,
	/// A CellML model.
	CellmlFile = 1,
	/// A SED-ML simulation experiment description.
	SedmlFile = 2,
	/// A COMBINE archive.
	CombineArchive = 3,
	/// Contents could not be retrieved.
	IrretrievableFile = 4,
}

impl FileType {
	/// Integer discriminant handed to hosts.
	pub const fn discriminant(self) -> i32 {
		self as i32
	}
}

/// A file owned by the native engine.
///
/// The engine's file manager tracks files weakly; whoever wants a file to stay alive must hold a
/// [`FileRef`].
pub trait NativeFile: Send + Sync + fmt::Debug {
	/// Path (or URL) the file was created for.
	fn path(&self) -> &str;

	/// Detected content type.
	fn file_type(&self) -> FileType;

	/// Raw contents.
	fn contents(&self) -> Vec<u8>;

	/// Replaces the contents and re-runs type detection.
	fn set_contents(&self, contents: Vec<u8>);

	/// Issues recorded while retrieving or recognising the contents.
	fn issues(&self) -> Vec<Issue>;

	/// Child file of an archive, by name.
	fn child_file(&self, name: &str) -> Option<FileRef>;
}
