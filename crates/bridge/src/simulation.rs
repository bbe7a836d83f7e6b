use simbridge_engine::{SimulationKind, SimulationRef};

use crate::{Bridge, DocumentKey, Result, dispatch};

impl Bridge {
	/// Simulation at `index`.
	pub fn simulation(&self, key: DocumentKey, index: usize) -> Result<SimulationRef> {
		Ok(self.document(key)?.simulation(index)?)
	}

	/// Kind of the simulation at `index`.
	pub fn simulation_type(&self, key: DocumentKey, index: usize) -> Result<SimulationKind> {
		Ok(dispatch::classify(&self.simulation(key, index)?))
	}

	/// Step of a one-step simulation.
	pub fn one_step_step(&self, key: DocumentKey, index: usize) -> Result<f64> {
		let simulation = self.simulation(key, index)?;
		Ok(dispatch::one_step(&simulation)?.step())
	}

	/// Sets the step of a one-step simulation.
	pub fn set_one_step_step(&self, key: DocumentKey, index: usize, value: f64) -> Result<()> {
		let simulation = self.simulation(key, index)?;
		dispatch::one_step(&simulation)?.set_step(value);
		tracing::trace!(document = %key, simulation = index, value, "bridge.simulation.set_step");
		Ok(())
	}

	/// Initial time of a uniform time course.
	pub fn initial_time(&self, key: DocumentKey, index: usize) -> Result<f64> {
		let simulation = self.simulation(key, index)?;
		Ok(dispatch::uniform_time_course(&simulation)?.initial_time())
	}

	/// Sets the initial time of a uniform time course.
	pub fn set_initial_time(&self, key: DocumentKey, index: usize, value: f64) -> Result<()> {
		let simulation = self.simulation(key, index)?;
		dispatch::uniform_time_course(&simulation)?.set_initial_time(value);
		tracing::trace!(document = %key, simulation = index, value, "bridge.simulation.set_initial_time");
		Ok(())
	}

	/// Output start time of a uniform time course.
	pub fn output_start_time(&self, key: DocumentKey, index: usize) -> Result<f64> {
		let simulation = self.simulation(key, index)?;
		Ok(dispatch::uniform_time_course(&simulation)?.output_start_time())
	}

	/// Sets the output start time of a uniform time course.
	pub fn set_output_start_time(&self, key: DocumentKey, index: usize, value: f64) -> Result<()> {
		let simulation = self.simulation(key, index)?;
		dispatch::uniform_time_course(&simulation)?.set_output_start_time(value);
		tracing::trace!(document = %key, simulation = index, value, "bridge.simulation.set_output_start_time");
		Ok(())
	}

	/// Output end time of a uniform time course.
	pub fn output_end_time(&self, key: DocumentKey, index: usize) -> Result<f64> {
		let simulation = self.simulation(key, index)?;
		Ok(dispatch::uniform_time_course(&simulation)?.output_end_time())
	}

	/// Sets the output end time of a uniform time course.
	pub fn set_output_end_time(&self, key: DocumentKey, index: usize, value: f64) -> Result<()> {
		let simulation = self.simulation(key, index)?;
		dispatch::uniform_time_course(&simulation)?.set_output_end_time(value);
		tracing::trace!(document = %key, simulation = index, value, "bridge.simulation.set_output_end_time");
		Ok(())
	}

	/// Number of steps of a uniform time course.
	pub fn number_of_steps(&self, key: DocumentKey, index: usize) -> Result<i32> {
		let simulation = self.simulation(key, index)?;
		Ok(dispatch::uniform_time_course(&simulation)?.number_of_steps())
	}

	/// Sets the number of steps of a uniform time course.
	pub fn set_number_of_steps(&self, key: DocumentKey, index: usize, value: i32) -> Result<()> {
		let simulation = self.simulation(key, index)?;
		dispatch::uniform_time_course(&simulation)?.set_number_of_steps(value);
		tracing::trace!(document = %key, simulation = index, value, "bridge.simulation.set_number_of_steps");
		Ok(())
	}

	/// Maximum step of the simulation's CVODE solver.
	pub fn cvode_maximum_step(&self, key: DocumentKey, index: usize) -> Result<f64> {
		let simulation = self.simulation(key, index)?;
		Ok(dispatch::cvode(&simulation)?.maximum_step())
	}

	/// Sets the maximum step of the simulation's CVODE solver.
	pub fn set_cvode_maximum_step(&self, key: DocumentKey, index: usize, value: f64) -> Result<()> {
		let simulation = self.simulation(key, index)?;
		dispatch::cvode(&simulation)?.set_maximum_step(value);
		tracing::trace!(document = %key, simulation = index, value, "bridge.solver.set_maximum_step");
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;

	use bytes::Bytes;
	use pretty_assertions::assert_eq;
	use rstest::rstest;
	use simbridge_engine::memory::MemoryEngine;

	use super::*;
	use crate::Error;

	const SIMULATIONS: &[u8] = br#"{"sedml": {"simulations": [
		{"type": "analysis"},
		{"type": "steady_state"},
		{"type": "one_step", "step": 0.25, "solver": {"type": "forward_euler", "step": 0.01}},
		{"type": "uniform_time_course", "initial_time": 0, "output_start_time": 1, "output_end_time": 9,
			"number_of_steps": 8, "solver": {"type": "cvode", "maximum_step": 0.5}}
	]}}"#;

	fn document() -> (Bridge, DocumentKey) {
		let bridge = Bridge::new(Arc::new(MemoryEngine::new()));
		let file = bridge.create("sims.sedml", Some(Bytes::from_static(SIMULATIONS))).unwrap();
		let key = bridge.create_document(&file).unwrap();
		(bridge, key)
	}

	#[rstest]
	#[case(0, SimulationKind::Analysis)]
	#[case(1, SimulationKind::SteadyState)]
	#[case(2, SimulationKind::OneStep)]
	#[case(3, SimulationKind::UniformTimeCourse)]
	fn simulation_type_is_stable(#[case] index: usize, #[case] expected: SimulationKind) {
		let (bridge, key) = document();
		assert_eq!(bridge.simulation_type(key, index).unwrap(), expected);
		assert_eq!(bridge.simulation_type(key, index).unwrap(), expected);
	}

	#[test]
	fn uniform_time_course_setters_round_trip() {
		let (bridge, key) = document();
		assert_eq!(bridge.output_start_time(key, 3).unwrap(), 1.0);

		bridge.set_initial_time(key, 3, 1.0).unwrap();
		bridge.set_output_end_time(key, 3, 20.0).unwrap();
		bridge.set_number_of_steps(key, 3, 40).unwrap();
		assert_eq!(bridge.initial_time(key, 3).unwrap(), 1.0);
		assert_eq!(bridge.output_end_time(key, 3).unwrap(), 20.0);
		assert_eq!(bridge.number_of_steps(key, 3).unwrap(), 40);
	}

	#[test]
	fn wrong_variant_is_a_type_mismatch() {
		let (bridge, key) = document();
		assert!(matches!(
			bridge.one_step_step(key, 3),
			Err(Error::TypeMismatch {
				expected: "one_step",
				found: "uniform_time_course"
			})
		));
		assert!(matches!(
			bridge.set_number_of_steps(key, 0, 3),
			Err(Error::TypeMismatch {
				expected: "uniform_time_course",
				found: "analysis"
			})
		));
		assert_eq!(bridge.one_step_step(key, 2).unwrap(), 0.25);
	}

	#[test]
	fn one_step_setter_round_trips() {
		let (bridge, key) = document();
		bridge.set_one_step_step(key, 2, 0.75).unwrap();
		assert_eq!(bridge.one_step_step(key, 2).unwrap(), 0.75);
		assert!(matches!(
			bridge.set_one_step_step(key, 3, 1.0),
			Err(Error::TypeMismatch {
				expected: "one_step",
				found: "uniform_time_course"
			})
		));
	}

	#[test]
	fn cvode_settings_require_cvode() {
		let (bridge, key) = document();
		assert_eq!(bridge.cvode_maximum_step(key, 3).unwrap(), 0.5);
		bridge.set_cvode_maximum_step(key, 3, 0.1).unwrap();
		assert_eq!(bridge.cvode_maximum_step(key, 3).unwrap(), 0.1);

		assert!(matches!(
			bridge.cvode_maximum_step(key, 2),
			Err(Error::TypeMismatch { found: "other_solver", .. })
		));
		assert!(matches!(
			bridge.cvode_maximum_step(key, 0),
			Err(Error::TypeMismatch { found: "no_solver", .. })
		));
	}

	#[test]
	fn simulation_index_is_bounds_checked() {
		let (bridge, key) = document();
		assert!(matches!(bridge.simulation_type(key, 4), Err(Error::OutOfRange { count: 4, .. })));
	}
}
