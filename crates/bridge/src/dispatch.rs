//! Variant classification and checked narrowing.
//!
//! The engine tags every simulation with its kind when it is built, so classification is a
//! single match and narrowing to the wrong kind is reported as [`Error::TypeMismatch`] instead of
//! dereferencing a failed cast.

use std::sync::Arc;

use simbridge_engine::{CvodeSolver, OneStepSimulation, SimulationKind, SimulationRef, SolverRef, UniformTimeCourseSimulation, VariableCategory};

use crate::{Error, Result};

/// Stable discriminant of `simulation`.
pub fn classify(simulation: &SimulationRef) -> SimulationKind {
	simulation.kind()
}

fn mismatch(expected: SimulationKind, found: &SimulationRef) -> Error {
	Error::TypeMismatch {
		expected: expected.as_str(),
		found: found.kind().as_str(),
	}
}

/// Narrows to a one-step simulation.
pub fn one_step(simulation: &SimulationRef) -> Result<&Arc<dyn OneStepSimulation>> {
	match simulation {
		SimulationRef::OneStep(one_step) => Ok(one_step),
		other => Err(mismatch(SimulationKind::OneStep, other)),
	}
}

/// Narrows to a uniform time course.
pub fn uniform_time_course(simulation: &SimulationRef) -> Result<&Arc<dyn UniformTimeCourseSimulation>> {
	match simulation {
		SimulationRef::UniformTimeCourse(time_course) => Ok(time_course),
		other => Err(mismatch(SimulationKind::UniformTimeCourse, other)),
	}
}

/// Narrows the ODE solver of `simulation` to CVODE.
pub fn cvode(simulation: &SimulationRef) -> Result<Arc<dyn CvodeSolver>> {
	match simulation.ode_solver() {
		Some(SolverRef::Cvode(solver)) => Ok(solver),
		Some(SolverRef::Other(_)) => Err(Error::TypeMismatch {
			expected: "cvode",
			found: "other_solver",
		}),
		None => Err(Error::TypeMismatch {
			expected: "cvode",
			found: "no_solver",
		}),
	}
}

/// Task result category for a host discriminant.
pub fn category(discriminant: u8) -> Option<VariableCategory> {
	VariableCategory::ALL.get(usize::from(discriminant)).copied()
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn category_discriminants_round_trip() {
		for category in VariableCategory::ALL {
			assert_eq!(super::category(category.discriminant()), Some(category));
		}
		assert_eq!(super::category(5), None);
	}
}
