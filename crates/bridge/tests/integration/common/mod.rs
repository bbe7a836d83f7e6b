//! Common utilities for bridge integration tests.

use std::sync::Arc;

use bytes::Bytes;
use simbridge::engine::memory::MemoryEngine;
use simbridge::{Bridge, BridgeConfig, DocumentKey, FileHandle, InstanceKey};

/// One model with a decaying state, a constant and an algebraic variable, simulated over
/// `[0, 10]` in 10 steps with CVODE.
pub const TIME_COURSE: &str = r#"{"sedml": {
	"models": [{"source": "decay.cellml", "model": {
		"voi": {"name": "t", "unit": "second"},
		"states": [{"name": "x", "unit": "mM", "value": 4.0, "rate": -0.5}],
		"constants": [{"name": "k", "unit": "per_second", "value": 0.5}],
		"algebraic": [{"name": "half_x", "unit": "mM", "of_state": 0, "scale": 0.5}]
	}}],
	"simulations": [{"type": "uniform_time_course", "initial_time": 0, "output_start_time": 0,
		"output_end_time": 10, "number_of_steps": 10, "solver": {"type": "cvode", "maximum_step": 0}}],
	"tasks": [{"model": 0, "simulation": 0}]
}}"#;

/// One model simulated with a single step of `0.25`.
pub const ONE_STEP: &str = r#"{"sedml": {
	"models": [{"source": "step.cellml", "model": {
		"voi": {"name": "t", "unit": "second"},
		"states": [{"name": "x", "unit": "mM", "value": 1.0, "rate": 1.0}]
	}}],
	"simulations": [{"type": "one_step", "step": 0.25}],
	"tasks": [{"model": 0, "simulation": 0}]
}}"#;

/// A bridge over a fresh in-memory engine, with tracing enabled once per process.
pub fn bridge() -> Bridge {
	bridge_with(BridgeConfig::default())
}

/// Same as [`bridge`] with an explicit configuration.
pub fn bridge_with(config: BridgeConfig) -> Bridge {
	let _ = tracing_subscriber::fmt::try_init();
	Bridge::with_config(Arc::new(MemoryEngine::new()), config)
}

/// Creates `path` from `contents` and builds a document from it.
pub fn document(bridge: &Bridge, path: &str, contents: &str) -> (FileHandle, DocumentKey) {
	let file = bridge
		.create(path, Some(Bytes::copy_from_slice(contents.as_bytes())))
		.expect("failed to create file");
	let document = bridge.create_document(&file).expect("failed to create document");
	(file, document)
}

/// Creates `path` from `contents` and instantiates its document.
pub fn instance(bridge: &Bridge, path: &str, contents: &str) -> (FileHandle, DocumentKey, InstanceKey) {
	let (file, document) = self::document(bridge, path, contents);
	let instance = bridge.instantiate(document).expect("failed to instantiate");
	(file, document, instance)
}
