use std::fmt;
use std::sync::Arc;

use crate::SolverRef;

/// Closed set of simulation kinds.
///
/// The discriminants are a host contract: hosts branch on the integer, so existing values are
/// never reordered or reused and new kinds are appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SimulationKind {
	/// `SedAnalysis`.
	Analysis = 0,
	/// `SedSteadyState`.
	SteadyState = 1,
	/// `SedOneStep`.
	OneStep = 2,
	/// `SedUniformTimeCourse`.
	UniformTimeCourse = 3,
}

impl SimulationKind {
	/// Every kind, in discriminant order.
	pub const ALL: [Self; 4] = [Self::Analysis, Self::SteadyState, Self::OneStep, Self::UniformTimeCourse];

	/// Integer discriminant handed to hosts.
	pub const fn discriminant(self) -> u8 {
		self as u8
	}

	/// Inverse of [`Self::discriminant`].
	pub const fn from_discriminant(value: u8) -> Option<Self> {
		match value {
			0 => Some(Self::Analysis),
			1 => Some(Self::SteadyState),
			2 => Some(Self::OneStep),
			3 => Some(Self::UniformTimeCourse),
			_ => None,
		}
	}

	/// Name used in logs and error messages.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Analysis => "analysis",
			Self::SteadyState => "steady_state",
			Self::OneStep => "one_step",
			Self::UniformTimeCourse => "uniform_time_course",
		}
	}
}

impl fmt::Display for SimulationKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Behaviour shared by every simulation kind.
pub trait NativeSimulation: Send + Sync + fmt::Debug {
	/// ODE solver attached to the simulation, if any.
	fn ode_solver(&self) -> Option<SolverRef>;
}

/// A `SedOneStep` simulation.
pub trait OneStepSimulation: NativeSimulation {
	/// Step size.
	fn step(&self) -> f64;

	/// Sets the step size.
	fn set_step(&self, value: f64);
}

/// A `SedUniformTimeCourse` simulation.
pub trait UniformTimeCourseSimulation: NativeSimulation {
	/// Initial time.
	fn initial_time(&self) -> f64;

	/// Sets the initial time.
	fn set_initial_time(&self, value: f64);

	/// Output start time.
	fn output_start_time(&self) -> f64;

	/// Sets the output start time.
	fn set_output_start_time(&self, value: f64);

	/// Output end time.
	fn output_end_time(&self) -> f64;

	/// Sets the output end time.
	fn set_output_end_time(&self, value: f64);

	/// Number of output steps.
	fn number_of_steps(&self) -> i32;

	/// Sets the number of output steps.
	fn set_number_of_steps(&self, value: i32);
}

/// Simulation reference tagged with its kind.
///
/// Adapters pick the variant when they build the reference, so the kind travels with the object
/// and never has to be recovered by probing.
#[derive(Debug, Clone)]
pub enum SimulationRef {
	/// `SedAnalysis`.
	Analysis(Arc<dyn NativeSimulation>),
	/// `SedSteadyState`.
	SteadyState(Arc<dyn NativeSimulation>),
	/// `SedOneStep`.
	OneStep(Arc<dyn OneStepSimulation>),
	/// `SedUniformTimeCourse`.
	UniformTimeCourse(Arc<dyn UniformTimeCourseSimulation>),
}

impl SimulationRef {
	/// Kind of this simulation.
	pub fn kind(&self) -> SimulationKind {
		match self {
			Self::Analysis(_) => SimulationKind::Analysis,
			Self::SteadyState(_) => SimulationKind::SteadyState,
			Self::OneStep(_) => SimulationKind::OneStep,
			Self::UniformTimeCourse(_) => SimulationKind::UniformTimeCourse,
		}
	}

	/// ODE solver attached to the simulation, if any.
	pub fn ode_solver(&self) -> Option<SolverRef> {
		match self {
			Self::Analysis(sim) | Self::SteadyState(sim) => sim.ode_solver(),
			Self::OneStep(sim) => sim.ode_solver(),
			Self::UniformTimeCourse(sim) => sim.ode_solver(),
		}
	}
}
