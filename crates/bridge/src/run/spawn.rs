use std::any::Any;
use std::sync::OnceLock;

use tokio::task::{JoinError, JoinHandle};

fn runtime_handle() -> tokio::runtime::Handle {
	if let Ok(handle) = tokio::runtime::Handle::try_current() {
		return handle;
	}

	static GLOBAL_RT: OnceLock<tokio::runtime::Runtime> = OnceLock::new();
	let runtime = GLOBAL_RT.get_or_init(|| {
		tokio::runtime::Builder::new_multi_thread()
			.enable_all()
			.worker_threads(1)
			.thread_name("simbridge-run")
			.build()
			.expect("failed to build simbridge run runtime")
	});
	runtime.handle().clone()
}

/// Runs a solve on the blocking pool of the ambient runtime, or of a shared fallback runtime
/// when the caller is not inside one.
pub(crate) fn spawn_blocking<F, R>(f: F) -> JoinHandle<R>
where
	F: FnOnce() -> R + Send + 'static,
	R: Send + 'static,
{
	tracing::trace!("bridge.run.spawn_blocking");
	runtime_handle().spawn_blocking(f)
}

/// Describes why a run task did not produce a status.
pub(crate) fn join_error_reason(error: JoinError) -> String {
	if !error.is_panic() {
		return error.to_string();
	}
	panic_message(error.into_panic().as_ref())
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
	if let Some(message) = payload.downcast_ref::<&str>() {
		return (*message).to_string();
	}
	if let Some(message) = payload.downcast_ref::<String>() {
		return message.clone();
	}
	"run panicked".to_string()
}
