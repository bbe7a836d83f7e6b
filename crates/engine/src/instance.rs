use std::fmt;
use std::sync::Arc;

use crate::{Issue, Result};

/// Shared reference to a runnable instance.
pub type InstanceRef = Arc<dyn NativeInstance>;

/// Shared reference to one task of an instance.
pub type TaskRef = Arc<dyn NativeTask>;

/// Time series produced by a task.
pub type Series = Arc<[f64]>;

/// Result categories a task reports besides the variable of integration.
///
/// The discriminants are a host contract and only ever grow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum VariableCategory {
	/// State variables.
	State = 0,
	/// Rates of the state variables.
	Rate = 1,
	/// Constants.
	Constant = 2,
	/// Computed constants.
	ComputedConstant = 3,
	/// Algebraic variables.
	Algebraic = 4,
}

impl VariableCategory {
	/// Every category, in discriminant order.
	pub const ALL: [Self; 5] = [Self::State, Self::Rate, Self::Constant, Self::ComputedConstant, Self::Algebraic];

	/// Integer discriminant handed to hosts.
	pub const fn discriminant(self) -> u8 {
		self as u8
	}

	/// Name used in logs and in out-of-range errors.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::State => "state",
			Self::Rate => "rate",
			Self::Constant => "constant",
			Self::ComputedConstant => "computed_constant",
			Self::Algebraic => "algebraic",
		}
	}
}

/// Callbacks a long-running solve reports through.
pub trait RunObserver: Send + Sync {
	/// Fraction of the solve completed, in `0.0..=1.0`.
	fn progress(&self, fraction: f64);

	/// Returns `true` once the caller asked the solve to stop.
	fn is_cancelled(&self) -> bool;
}

/// A runnable realisation of a SED document.
pub trait NativeInstance: Send + Sync + fmt::Debug {
	/// Issues recorded while instantiating and running.
	fn issues(&self) -> Vec<Issue>;

	/// Returns `true` if [`Self::issues`] is non-empty.
	fn has_issues(&self) -> bool {
		!self.issues().is_empty()
	}

	/// Number of tasks.
	fn task_count(&self) -> usize;

	/// Task at `index`.
	fn task(&self, index: usize) -> Result<TaskRef>;

	/// Runs every task to completion and returns the engine's status value.
	fn run(&self) -> f64;

	/// Same as [`Self::run`], reporting progress and honouring cancellation.
	///
	/// Engines without incremental reporting fall back to [`Self::run`].
	fn run_observed(&self, observer: &dyn RunObserver) -> f64 {
		let status = self.run();
		observer.progress(1.0);
		status
	}
}

/// Results of one task.
///
/// Series are empty until the owning instance has run.
pub trait NativeTask: Send + Sync + fmt::Debug {
	/// Name of the variable of integration.
	fn voi_name(&self) -> String;

	/// Unit of the variable of integration.
	fn voi_unit(&self) -> String;

	/// Values of the variable of integration.
	fn voi(&self) -> Series;

	/// Number of variables in `category`.
	fn count(&self, category: VariableCategory) -> usize;

	/// Name of variable `index` in `category`.
	fn name(&self, category: VariableCategory, index: usize) -> Result<String>;

	/// Unit of variable `index` in `category`.
	fn unit(&self, category: VariableCategory, index: usize) -> Result<String>;

	/// Values of variable `index` in `category`.
	fn values(&self, category: VariableCategory, index: usize) -> Result<Series>;
}
