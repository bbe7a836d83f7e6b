use std::fmt;

/// Severity of an [`Issue`].
///
/// The discriminants are part of the host contract and must never be reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum IssueKind {
	/// The object is unusable.
	Error = 0,
	/// The object is usable with caveats.
	Warning = 1,
	/// Purely informational.
	Information = 2,
}

impl IssueKind {
	/// Integer discriminant handed to hosts.
	pub const fn discriminant(self) -> i32 {
		self as i32
	}

	/// Human-readable name.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Error => "Error",
			Self::Warning => "Warning",
			Self::Information => "Information",
		}
	}
}

/// Diagnostic produced by native validation or execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
	kind: IssueKind,
	description: String,
}

impl Issue {
	/// Creates an issue.
	pub fn new(kind: IssueKind, description: impl Into<String>) -> Self {
		Self {
			kind,
			description: description.into(),
		}
	}

	/// Creates an [`IssueKind::Error`] issue.
	pub fn error(description: impl Into<String>) -> Self {
		Self::new(IssueKind::Error, description)
	}

	/// Creates an [`IssueKind::Warning`] issue.
	pub fn warning(description: impl Into<String>) -> Self {
		Self::new(IssueKind::Warning, description)
	}

	/// Creates an [`IssueKind::Information`] issue.
	pub fn information(description: impl Into<String>) -> Self {
		Self::new(IssueKind::Information, description)
	}

	/// Severity.
	pub fn kind(&self) -> IssueKind {
		self.kind
	}

	/// Severity as text.
	pub fn kind_as_text(&self) -> &'static str {
		self.kind.as_str()
	}

	/// Description.
	pub fn description(&self) -> &str {
		&self.description
	}
}

impl fmt::Display for Issue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}: {}", self.kind.as_str(), self.description)
	}
}
