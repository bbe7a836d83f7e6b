use std::sync::Arc;

use parking_lot::RwLock;

use super::format::{ArchiveSpec, FileSpec};
use crate::{FileRef, FileType, Issue, NativeFile};

const UNKNOWN_CONTENTS: &str = "The file is not a CellML file, a SED-ML file, or a COMBINE archive.";

#[derive(Debug, Default)]
struct FileState {
	contents: Vec<u8>,
	spec: Option<FileSpec>,
	file_type: Option<FileType>,
	issues: Vec<Issue>,
	children: Vec<Arc<MemoryFile>>,
}

/// In-memory [`NativeFile`].
#[derive(Debug)]
pub struct MemoryFile {
	path: String,
	state: RwLock<FileState>,
}

impl MemoryFile {
	/// Creates an empty file; `retrieve_contents` loads it from the local filesystem.
	pub(super) fn new(path: &str, retrieve_contents: bool) -> Self {
		let file = Self {
			path: path.to_string(),
			state: RwLock::new(FileState::default()),
		};

		if retrieve_contents {
			match std::fs::read(path) {
				Ok(contents) => file.set_contents(contents),
				Err(error) => {
					tracing::debug!(path, %error, "engine.memory.file.irretrievable");
					let mut state = file.state.write();
					state.file_type = Some(FileType::IrretrievableFile);
					state.issues = vec![Issue::error("The file could not be retrieved.")];
				}
			}
		}

		file
	}

	/// Parsed contents, if recognised.
	pub(super) fn spec(&self) -> Option<FileSpec> {
		self.state.read().spec.clone()
	}

	fn archive_children(path: &str, archive: &ArchiveSpec) -> Vec<Arc<MemoryFile>> {
		archive
			.files
			.iter()
			.map(|(name, value)| {
				let child = MemoryFile::new(&format!("{path}/{name}"), false);
				child.set_contents(serde_json::to_vec(value).unwrap_or_default());
				Arc::new(child)
			})
			.collect()
	}
}

impl NativeFile for MemoryFile {
	fn path(&self) -> &str {
		&self.path
	}

	fn file_type(&self) -> FileType {
		self.state.read().file_type.unwrap_or(FileType::UnknownFile)
	}

	fn contents(&self) -> Vec<u8> {
		self.state.read().contents.clone()
	}

	fn set_contents(&self, contents: Vec<u8>) {
		let spec = FileSpec::parse(&contents);
		let (file_type, issues) = match &spec {
			Some(FileSpec::Cellml(_)) => (FileType::CellmlFile, Vec::new()),
			Some(FileSpec::Sedml(_)) => (FileType::SedmlFile, Vec::new()),
			Some(FileSpec::Combine(archive)) if archive.files.contains_key(&archive.master) => (FileType::CombineArchive, Vec::new()),
			Some(FileSpec::Combine(archive)) => (
				FileType::CombineArchive,
				vec![Issue::error(format!("The master file '{}' is missing from the archive.", archive.master))],
			),
			// Files created without contents stay silent until contents arrive.
			None if contents.is_empty() => (FileType::UnknownFile, Vec::new()),
			None => (FileType::UnknownFile, vec![Issue::error(UNKNOWN_CONTENTS)]),
		};
		let children = match &spec {
			Some(FileSpec::Combine(archive)) => Self::archive_children(&self.path, archive),
			_ => Vec::new(),
		};

		tracing::trace!(path = %self.path, ?file_type, bytes = contents.len(), "engine.memory.file.set_contents");

		let mut state = self.state.write();
		state.contents = contents;
		state.spec = spec;
		state.file_type = Some(file_type);
		state.issues = issues;
		state.children = children;
	}

	fn issues(&self) -> Vec<Issue> {
		self.state.read().issues.clone()
	}

	fn child_file(&self, name: &str) -> Option<FileRef> {
		let suffix = format!("/{name}");
		self.state
			.read()
			.children
			.iter()
			.find(|child| child.path.ends_with(&suffix))
			.map(|child| child.clone() as FileRef)
	}
}
