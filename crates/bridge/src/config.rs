//! Bridge configuration.
//!
//! Every field has a working default, so an empty TOML document is a valid configuration:
//!
//! ```toml
//! transfer = "shared"            # "boxed" | "copy" | "shared"
//! ui_json_file = "simulation.json"
//! strict_open = true
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::TransferStrategy;

/// Child file of an archive holding the host UI description.
pub const DEFAULT_UI_JSON_FILE: &str = "simulation.json";

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error parsing TOML syntax or an unknown key.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),

	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// A field holds a value outside its domain.
	#[error("invalid value for '{field}': {reason}")]
	InvalidValue {
		/// The offending key.
		field: &'static str,
		/// Why it was rejected.
		reason: String,
	},
}

/// Settings for a [`crate::Bridge`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BridgeConfig {
	/// How numeric series cross the boundary.
	pub transfer: TransferStrategy,
	/// Archive child file returned by `ui_json`.
	pub ui_json_file: String,
	/// Whether [`crate::Bridge::open`] enforces the supported SED-ML subset.
	pub strict_open: bool,
}

impl Default for BridgeConfig {
	fn default() -> Self {
		Self {
			transfer: TransferStrategy::default(),
			ui_json_file: DEFAULT_UI_JSON_FILE.to_string(),
			strict_open: true,
		}
	}
}

impl BridgeConfig {
	/// Parses a TOML document.
	pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
		let config: Self = toml::from_str(text)?;
		config.validate()?;
		Ok(config)
	}

	/// Reads and parses a TOML file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let path = path.as_ref();
		let text = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		tracing::debug!(path = %path.display(), "bridge.config.load");
		Self::from_toml(&text)
	}

	fn validate(&self) -> Result<(), ConfigError> {
		if self.ui_json_file.is_empty() || self.ui_json_file.contains('/') {
			return Err(ConfigError::InvalidValue {
				field: "ui_json_file",
				reason: format!("'{}' is not a plain file name", self.ui_json_file),
			});
		}
		Ok(())
	}
}
