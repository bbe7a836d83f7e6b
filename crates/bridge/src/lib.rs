//! Handle and lifecycle bridge between a managed host and a native simulation engine.
//!
//! Hosts never see native objects. A [`Bridge`] hands out opaque keys instead and keeps every
//! native object it created alive until the host explicitly releases it:
//! * files by path ([`FileHandle`]), retained even though the engine's file manager is weak
//! * documents and instances by never-reused sequence keys ([`DocumentKey`], [`InstanceKey`])
//! * asynchronous runs by generation-checked arena handles ([`RunHandle`])
//!
//! Results cross back as [`HostValue`]s; numeric series go through [`to_host_array`] using the
//! configured [`TransferStrategy`]. [`Bridge::call`] exposes the whole surface as a name-indexed
//! export table for hosts that dispatch by string.

#![warn(missing_docs)]

use std::fmt;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use simbridge_engine::Engine;
use simbridge_handles::Arena;

mod config;
mod dispatch;
mod document;
mod error;
mod exports;
mod file;
mod host;
mod instance;
mod keys;
mod registry;
mod run;
mod session;
mod simulation;
mod transfer;

pub use config::{BridgeConfig, ConfigError, DEFAULT_UI_JSON_FILE};
pub use dispatch::{category, classify, cvode, one_step, uniform_time_course};
pub use document::DocumentState;
pub use error::{Error, Handle, Result};
pub use exports::{EXPORTS, ExportDef, find_export};
pub use host::HostValue;
pub use keys::{DocumentKey, FileHandle, InstanceKey};
pub use run::{RunHandle, RunProgress};
pub use session::OpenedFile;
pub use simbridge_engine as engine;
pub use transfer::{Float64Buffer, TransferStrategy, to_host_array};

use crate::registry::Registry;
use crate::run::RunEntry;

/// Owner of every host-visible handle.
///
/// All registries sit behind one lock, so releasing a file removes its documents and instances
/// in a single step and no reader ever observes a half-removed owner.
pub struct Bridge {
	engine: Arc<dyn Engine>,
	config: BridgeConfig,
	registry: RwLock<Registry>,
	runs: Mutex<Arena<RunEntry>>,
}

impl Bridge {
	/// Creates a bridge over `engine` with the default configuration.
	pub fn new(engine: Arc<dyn Engine>) -> Self {
		Self::with_config(engine, BridgeConfig::default())
	}

	/// Creates a bridge over `engine`.
	pub fn with_config(engine: Arc<dyn Engine>, config: BridgeConfig) -> Self {
		tracing::debug!(engine = %engine.version(), transfer = config.transfer.as_str(), "bridge.new");
		Self {
			engine,
			config,
			registry: RwLock::new(Registry::default()),
			runs: Mutex::new(Arena::new()),
		}
	}

	/// Active configuration.
	pub fn config(&self) -> &BridgeConfig {
		&self.config
	}

	/// The engine this bridge drives.
	pub fn engine(&self) -> &Arc<dyn Engine> {
		&self.engine
	}

	/// Engine version string.
	pub fn version(&self) -> String {
		self.engine.version()
	}
}

impl fmt::Debug for Bridge {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let registry = self.registry.read();
		f.debug_struct("Bridge")
			.field("engine", &self.engine.version())
			.field("config", &self.config)
			.field("files", &registry.files.len())
			.field("documents", &registry.documents.len())
			.field("instances", &registry.instances.len())
			.field("runs", &self.runs.lock().len())
			.finish()
	}
}
