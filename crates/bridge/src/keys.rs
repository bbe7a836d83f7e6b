use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! sequence_key {
	($(#[$meta:meta])* $name:ident) => {
		$(#[$meta])*
		#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
		#[serde(transparent)]
		pub struct $name(u64);

		impl $name {
			/// Raw key value handed to hosts.
			pub const fn get(self) -> u64 {
				self.0
			}
		}

		impl From<u64> for $name {
			fn from(raw: u64) -> Self {
				Self(raw)
			}
		}

		impl fmt::Display for $name {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				self.0.fmt(f)
			}
		}
	};
}

sequence_key! {
	/// Key of a document, unique for the lifetime of the bridge.
	DocumentKey
}

sequence_key! {
	/// Key of an instance, unique for the lifetime of the bridge.
	InstanceKey
}

/// Path key of a managed file.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileHandle(String);

impl FileHandle {
	/// Path this handle names.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl From<&str> for FileHandle {
	fn from(path: &str) -> Self {
		Self(path.to_string())
	}
}

impl From<String> for FileHandle {
	fn from(path: String) -> Self {
		Self(path)
	}
}

impl AsRef<str> for FileHandle {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for FileHandle {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}
