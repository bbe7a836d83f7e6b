//! Asynchronous runs.
//!
//! A run owns a strong reference to its instance for as long as the solve lasts, so releasing
//! the instance (or unmanaging its file) while a run is in flight never frees the native object
//! under the solver. Run handles are generation-checked: once a run has been awaited its handle
//! is retired and every later use reports [`Error::NotFound`].

use std::fmt;

use simbridge_handles::ArenaHandle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::{Bridge, Error, InstanceKey, Result};

mod spawn;
mod token;

use self::token::RunToken;

/// Host-visible handle of an asynchronous run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunHandle(ArenaHandle);

impl RunHandle {
	/// Packs the handle into one number for hosts.
	pub const fn to_bits(self) -> u64 {
		self.0.to_bits()
	}

	/// Unpacks a handle produced by [`Self::to_bits`].
	pub const fn from_bits(bits: u64) -> Self {
		Self(ArenaHandle::from_bits(bits))
	}
}

impl From<ArenaHandle> for RunHandle {
	fn from(handle: ArenaHandle) -> Self {
		Self(handle)
	}
}

impl fmt::Display for RunHandle {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		self.0.fmt(f)
	}
}

/// Snapshot of a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunProgress {
	/// Fraction of the solve completed, in `0.0..=1.0`.
	pub fraction: f64,
	/// Whether cancellation was requested.
	pub cancelled: bool,
	/// Whether the solve has returned.
	pub finished: bool,
}

#[derive(Debug)]
pub(crate) struct RunEntry {
	instance: InstanceKey,
	cancel: CancellationToken,
	progress: watch::Receiver<f64>,
	task: JoinHandle<f64>,
}

impl Bridge {
	/// Starts running `key` on the blocking pool.
	pub fn spawn_run(&self, key: InstanceKey) -> Result<RunHandle> {
		let instance = self.instance(key)?;
		let cancel = CancellationToken::new();
		let (token, progress) = RunToken::new(cancel.clone());

		let handle = RunHandle(self.runs.lock().insert_with(|_| RunEntry {
			instance: key,
			cancel,
			progress,
			task: spawn::spawn_blocking(move || instance.run_observed(&token)),
		})?);

		tracing::debug!(instance = %key, run = %handle, "bridge.run.spawn");
		Ok(handle)
	}

	/// Current progress of `handle`.
	pub fn run_progress(&self, handle: RunHandle) -> Result<RunProgress> {
		let runs = self.runs.lock();
		let entry = runs.lookup(handle.0)?;
		Ok(RunProgress {
			fraction: *entry.progress.borrow(),
			cancelled: entry.cancel.is_cancelled(),
			finished: entry.task.is_finished(),
		})
	}

	/// Instance `handle` is running.
	pub fn run_instance(&self, handle: RunHandle) -> Result<InstanceKey> {
		Ok(self.runs.lock().lookup(handle.0)?.instance)
	}

	/// Asks the solve behind `handle` to stop at its next checkpoint.
	pub fn cancel_run(&self, handle: RunHandle) -> Result<()> {
		self.runs.lock().lookup(handle.0)?.cancel.cancel();
		tracing::debug!(run = %handle, "bridge.run.cancel");
		Ok(())
	}

	/// Waits for `handle` to finish and retires it.
	///
	/// A run cancelled before it was awaited reports [`Error::RunCancelled`]; its instance keeps
	/// whatever partial results the engine produced.
	pub async fn wait_run(&self, handle: RunHandle) -> Result<f64> {
		let entry = self.runs.lock().remove(handle.0)?;
		let outcome = entry.task.await;

		tracing::debug!(run = %handle, instance = %entry.instance, "bridge.run.finished");
		match outcome {
			Ok(_) if entry.cancel.is_cancelled() => Err(Error::RunCancelled(handle)),
			Ok(status) => Ok(status),
			Err(error) => Err(Error::RunFailed {
				handle,
				reason: spawn::join_error_reason(error),
			}),
		}
	}

	/// Retires `handle` without waiting for it.
	///
	/// The solve still runs to completion and its results land on the instance.
	pub fn forget_run(&self, handle: RunHandle) -> Result<()> {
		let entry = self.runs.lock().remove(handle.0)?;
		tracing::debug!(run = %handle, instance = %entry.instance, "bridge.run.forget");
		Ok(())
	}

	/// Every run that has not been awaited or forgotten yet.
	pub fn runs(&self) -> Vec<(RunHandle, InstanceKey)> {
		self.runs
			.lock()
			.iter()
			.map(|(handle, entry)| (RunHandle(handle), entry.instance))
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;
	use std::time::Duration;

	use bytes::Bytes;
	use pretty_assertions::assert_eq;
	use simbridge_engine::memory::MemoryEngine;

	use super::*;
	use crate::Handle;

	const DOCUMENT: &[u8] = br#"{"sedml": {
		"models": [{"source": "m.cellml", "model": {"voi": {"name": "t", "unit": "s"},
			"states": [{"name": "x", "unit": "mM", "value": 1.0, "rate": 0.1}]}}],
		"simulations": [{"type": "uniform_time_course", "initial_time": 0, "output_start_time": 0,
			"output_end_time": 10, "number_of_steps": 100}],
		"tasks": [{"model": 0, "simulation": 0}]
	}}"#;

	fn instance() -> (Bridge, InstanceKey) {
		let bridge = Bridge::new(Arc::new(MemoryEngine::new()));
		let file = bridge.create("doc.sedml", Some(Bytes::from_static(DOCUMENT))).unwrap();
		let document = bridge.create_document(&file).unwrap();
		let instance = bridge.instantiate(document).unwrap();
		(bridge, instance)
	}

	#[tokio::test]
	async fn run_reports_full_progress_and_retires_its_handle() {
		let (bridge, instance) = instance();
		let handle = bridge.spawn_run(instance).unwrap();
		assert_eq!(bridge.run_instance(handle).unwrap(), instance);

		while !bridge.run_progress(handle).unwrap().finished {
			tokio::time::sleep(Duration::from_millis(1)).await;
		}
		let progress = bridge.run_progress(handle).unwrap();
		assert_eq!(progress.fraction, 1.0);
		assert!(!progress.cancelled);

		bridge.wait_run(handle).await.unwrap();
		assert_eq!(bridge.task_voi(instance, 0).unwrap().len(), 101);
		assert!(matches!(bridge.run_progress(handle), Err(Error::NotFound(Handle::Run(_)))));
		assert!(bridge.runs().is_empty());
	}

	#[tokio::test]
	async fn cancelled_run_reports_cancellation() {
		let (bridge, instance) = instance();
		let handle = bridge.spawn_run(instance).unwrap();
		bridge.cancel_run(handle).unwrap();
		assert!(bridge.run_progress(handle).unwrap().cancelled);

		assert!(matches!(bridge.wait_run(handle).await, Err(Error::RunCancelled(h)) if h == handle));
	}

	#[tokio::test]
	async fn run_survives_release_of_its_instance() {
		let (bridge, instance) = instance();
		let handle = bridge.spawn_run(instance).unwrap();
		bridge.release_instance(instance).unwrap();

		assert!(bridge.wait_run(handle).await.is_ok());
	}

	#[tokio::test]
	async fn forgotten_run_still_completes() {
		let (bridge, instance) = instance();
		let handle = bridge.spawn_run(instance).unwrap();
		bridge.forget_run(handle).unwrap();

		assert!(bridge.runs().is_empty());
		assert!(matches!(bridge.cancel_run(handle), Err(Error::NotFound(Handle::Run(_)))));
		assert!(matches!(bridge.forget_run(handle), Err(Error::NotFound(Handle::Run(_)))));

		tokio::time::timeout(Duration::from_secs(5), async {
			while bridge.task_voi(instance, 0).unwrap().len() < 101 {
				tokio::time::sleep(Duration::from_millis(1)).await;
			}
		})
		.await
		.unwrap();
	}

	#[tokio::test]
	async fn stale_handle_is_rejected_after_slot_reuse() {
		let (bridge, instance) = instance();
		let first = bridge.spawn_run(instance).unwrap();
		bridge.wait_run(first).await.unwrap();

		let second = bridge.spawn_run(instance).unwrap();
		assert_ne!(first, second);
		assert!(matches!(bridge.cancel_run(first), Err(Error::NotFound(_))));
		assert_eq!(RunHandle::from_bits(second.to_bits()), second);
		bridge.wait_run(second).await.unwrap();
	}
}
