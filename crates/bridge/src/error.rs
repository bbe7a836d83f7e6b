use std::fmt;

use simbridge_engine::EngineError;
use simbridge_handles::HandleError;

use crate::config::ConfigError;
use crate::{DocumentKey, FileHandle, InstanceKey, RunHandle};

/// A convenient type alias for `Result` with `E` = [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Any host-visible key, as carried by [`Error::NotFound`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Handle {
	/// Path key of a managed file.
	File(FileHandle),
	/// Sequence key of a document.
	Document(DocumentKey),
	/// Sequence key of an instance.
	Instance(InstanceKey),
	/// Arena handle of an asynchronous run.
	Run(RunHandle),
}

impl fmt::Display for Handle {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::File(path) => write!(f, "file '{path}'"),
			Self::Document(key) => write!(f, "document {key}"),
			Self::Instance(key) => write!(f, "instance {key}"),
			Self::Run(handle) => write!(f, "run {handle}"),
		}
	}
}

/// Failures surfaced to hosts.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
	/// The key does not name a live object.
	#[error("{0} is not managed by this bridge")]
	NotFound(Handle),
	/// An index exceeded the engine's count, forwarded verbatim.
	#[error("{collection} index {index} is out of range (count is {count})")]
	OutOfRange {
		/// Collection name.
		collection: &'static str,
		/// Requested index.
		index: usize,
		/// Number of elements.
		count: usize,
	},
	/// A variant-specific accessor was used on another variant.
	#[error("expected {expected}, found {found}")]
	TypeMismatch {
		/// Variant the accessor requires.
		expected: &'static str,
		/// Variant the object actually is.
		found: &'static str,
	},
	/// A keyspace handed out its last key.
	#[error("keyspace exhausted")]
	KeyspaceExhausted,
	/// A host value could not be converted to the expected argument type.
	#[error("argument {index}: {reason}")]
	InvalidArgument {
		/// Zero-based argument position.
		index: usize,
		/// What was wrong with it.
		reason: String,
	},
	/// [`crate::Bridge::call`] was given a name outside the export table.
	#[error("unknown export '{0}'")]
	UnknownExport(String),
	/// The run was cancelled before it completed.
	#[error("run {0} was cancelled")]
	RunCancelled(RunHandle),
	/// The run task terminated abnormally.
	#[error("run {handle} failed: {reason}")]
	RunFailed {
		/// The failed run.
		handle: RunHandle,
		/// Panic message or join failure.
		reason: String,
	},
	/// Any other engine failure.
	#[error(transparent)]
	Engine(EngineError),
	/// Configuration failure.
	#[error(transparent)]
	Config(#[from] ConfigError),
}

impl Error {
	pub(crate) fn invalid_argument(index: usize, reason: impl Into<String>) -> Self {
		Self::InvalidArgument {
			index,
			reason: reason.into(),
		}
	}
}

impl From<EngineError> for Error {
	fn from(error: EngineError) -> Self {
		match error {
			EngineError::OutOfRange { collection, index, count } => Self::OutOfRange { collection, index, count },
			other => Self::Engine(other),
		}
	}
}

impl From<HandleError> for Error {
	fn from(error: HandleError) -> Self {
		match error {
			HandleError::Stale { handle, .. } | HandleError::Dangling(handle) => Self::NotFound(Handle::Run(RunHandle::from(handle))),
			_ => Self::KeyspaceExhausted,
		}
	}
}
