use std::fmt;
use std::sync::Arc;

/// Behaviour shared by every solver.
pub trait NativeSolver: Send + Sync + fmt::Debug {
	/// Solver name, e.g. `"CVODE"`.
	fn name(&self) -> String;
}

/// The CVODE ODE solver.
pub trait CvodeSolver: NativeSolver {
	/// Maximum step size (0 means unbounded).
	fn maximum_step(&self) -> f64;

	/// Sets the maximum step size.
	fn set_maximum_step(&self, value: f64);
}

/// Solver reference tagged with the only solver the bridge exposes settings for.
#[derive(Debug, Clone)]
pub enum SolverRef {
	/// CVODE.
	Cvode(Arc<dyn CvodeSolver>),
	/// Any other solver.
	Other(Arc<dyn NativeSolver>),
}

impl SolverRef {
	/// Solver name.
	pub fn name(&self) -> String {
		match self {
			Self::Cvode(solver) => solver.name(),
			Self::Other(solver) => solver.name(),
		}
	}
}
