use simbridge_engine::RunObserver;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

/// Observer handed to the engine for one run: publishes progress and exposes cancellation.
#[derive(Debug)]
pub(crate) struct RunToken {
	cancel: CancellationToken,
	progress: watch::Sender<f64>,
}

impl RunToken {
	/// Creates a token and the receiver its progress is published to.
	pub fn new(cancel: CancellationToken) -> (Self, watch::Receiver<f64>) {
		let (progress, receiver) = watch::channel(0.0);
		(Self { cancel, progress }, receiver)
	}
}

impl RunObserver for RunToken {
	fn progress(&self, fraction: f64) {
		self.progress.send_replace(fraction.clamp(0.0, 1.0));
	}

	fn is_cancelled(&self) -> bool {
		self.cancel.is_cancelled()
	}
}
