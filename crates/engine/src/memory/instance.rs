use std::sync::Arc;
use std::time::Instant;

use parking_lot::RwLock;

use super::format::{ModelSpec, SimulationKindSpec};
use crate::{EngineError, Issue, NativeInstance, NativeTask, Result, RunObserver, Series, TaskRef, VariableCategory};

struct Unobserved;

impl RunObserver for Unobserved {
	fn progress(&self, _fraction: f64) {}

	fn is_cancelled(&self) -> bool {
		false
	}
}

/// In-memory [`NativeInstance`].
#[derive(Debug)]
pub struct MemoryInstance {
	issues: Vec<Issue>,
	tasks: Vec<Arc<MemoryTask>>,
}

impl MemoryInstance {
	/// Builds an instance from per-task snapshots of the model and its simulation settings.
	pub(super) fn new(mut issues: Vec<Issue>, tasks: Vec<(ModelSpec, SimulationKindSpec)>) -> Self {
		if tasks.is_empty() {
			issues.push(Issue::warning("The simulation experiment description does not contain any tasks to run."));
		}
		for (_, settings) in &tasks {
			if let SimulationKindSpec::UniformTimeCourse { number_of_steps, .. } = *settings
				&& number_of_steps <= 0
			{
				issues.push(Issue::error(format!(
					"The number of steps ({number_of_steps}) must be greater than zero."
				)));
			}
		}

		Self {
			issues,
			tasks: tasks
				.into_iter()
				.map(|(model, settings)| {
					Arc::new(MemoryTask {
						model,
						settings,
						results: RwLock::new(TaskResults::default()),
					})
				})
				.collect(),
		}
	}
}

impl NativeInstance for MemoryInstance {
	fn issues(&self) -> Vec<Issue> {
		self.issues.clone()
	}

	fn task_count(&self) -> usize {
		self.tasks.len()
	}

	fn task(&self, index: usize) -> Result<TaskRef> {
		EngineError::check_index("task", index, self.tasks.len())?;
		Ok(self.tasks[index].clone())
	}

	fn run(&self) -> f64 {
		self.run_observed(&Unobserved)
	}

	fn run_observed(&self, observer: &dyn RunObserver) -> f64 {
		let start = Instant::now();
		let plans: Vec<Vec<f64>> = self.tasks.iter().map(|task| task.output_points()).collect();
		let total = plans.iter().map(Vec::len).sum::<usize>().max(1);
		let mut done = 0;

		for (task, points) in self.tasks.iter().zip(plans) {
			let mut solved = Vec::with_capacity(points.len());
			for t in points {
				if observer.is_cancelled() {
					break;
				}
				solved.push(t);
				done += 1;
				observer.progress(done as f64 / total as f64);
			}
			*task.results.write() = task.evaluate(&solved);
		}

		let elapsed = start.elapsed().as_secs_f64() * 1000.0;
		tracing::debug!(tasks = self.tasks.len(), points = done, elapsed_ms = elapsed, "engine.memory.run");
		elapsed
	}
}

#[derive(Debug)]
struct TaskResults {
	voi: Series,
	values: [Vec<Series>; 5],
}

impl Default for TaskResults {
	fn default() -> Self {
		Self {
			voi: Series::from(Vec::new()),
			values: Default::default(),
		}
	}
}

/// In-memory [`NativeTask`].
///
/// States follow `x(t) = x0 * exp(rate * t)`, rates are `rate * x(t)` and algebraic variables
/// scale one state. Constants are flat.
#[derive(Debug)]
pub struct MemoryTask {
	model: ModelSpec,
	settings: SimulationKindSpec,
	results: RwLock<TaskResults>,
}

impl MemoryTask {
	fn output_points(&self) -> Vec<f64> {
		match self.settings {
			SimulationKindSpec::Analysis | SimulationKindSpec::SteadyState => vec![0.0],
			SimulationKindSpec::OneStep { step } => vec![0.0, step],
			SimulationKindSpec::UniformTimeCourse {
				output_start_time,
				output_end_time,
				number_of_steps,
				..
			} => {
				let Ok(steps) = usize::try_from(number_of_steps) else {
					return Vec::new();
				};
				if steps == 0 {
					return Vec::new();
				}
				let width = (output_end_time - output_start_time) / steps as f64;
				(0..=steps).map(|i| output_start_time + i as f64 * width).collect()
			}
		}
	}

	fn evaluate(&self, points: &[f64]) -> TaskResults {
		let spec = &self.model;
		let initial: Vec<f64> = spec.states.iter().map(|state| state.value).collect();
		let state_at = |index: usize, t: f64| initial[index] * (spec.states[index].rate * t).exp();
		let series = |f: &dyn Fn(f64) -> f64| -> Series { points.iter().map(|&t| f(t)).collect() };

		let states = (0..spec.states.len()).map(|i| series(&|t| state_at(i, t))).collect();
		let rates = (0..spec.states.len())
			.map(|i| series(&|t| spec.states[i].rate * state_at(i, t)))
			.collect();
		let constants = spec
			.constants
			.iter()
			.map(|c| series(&|_| c.value))
			.collect();
		let computed_constants = spec.computed_constants.iter().map(|c| series(&|_| c.value)).collect();
		let algebraic = spec
			.algebraic
			.iter()
			.map(|a| {
				if a.of_state < initial.len() {
					series(&|t| a.scale * state_at(a.of_state, t))
				} else {
					series(&|_| f64::NAN)
				}
			})
			.collect();

		TaskResults {
			voi: points.iter().copied().collect(),
			values: [states, rates, constants, computed_constants, algebraic],
		}
	}

	fn names_and_units(&self, category: VariableCategory) -> Vec<(&str, &str)> {
		let spec = &self.model;
		match category {
			VariableCategory::State | VariableCategory::Rate => {
				spec.states.iter().map(|s| (s.name.as_str(), s.unit.as_str())).collect()
			}
			VariableCategory::Constant => spec.constants.iter().map(|c| (c.name.as_str(), c.unit.as_str())).collect(),
			VariableCategory::ComputedConstant => {
				spec.computed_constants.iter().map(|c| (c.name.as_str(), c.unit.as_str())).collect()
			}
			VariableCategory::Algebraic => spec.algebraic.iter().map(|a| (a.name.as_str(), a.unit.as_str())).collect(),
		}
	}

	fn variable(&self, category: VariableCategory, index: usize) -> Result<(String, String)> {
		let variables = self.names_and_units(category);
		EngineError::check_index(category.as_str(), index, variables.len())?;
		let (name, unit) = variables[index];
		Ok(match category {
			VariableCategory::Rate => (format!("{name}'"), format!("{unit}/{}", self.model.voi.unit)),
			_ => (name.to_string(), unit.to_string()),
		})
	}
}

impl NativeTask for MemoryTask {
	fn voi_name(&self) -> String {
		self.model.voi.name.clone()
	}

	fn voi_unit(&self) -> String {
		self.model.voi.unit.clone()
	}

	fn voi(&self) -> Series {
		self.results.read().voi.clone()
	}

	fn count(&self, category: VariableCategory) -> usize {
		self.names_and_units(category).len()
	}

	fn name(&self, category: VariableCategory, index: usize) -> Result<String> {
		self.variable(category, index).map(|(name, _)| name)
	}

	fn unit(&self, category: VariableCategory, index: usize) -> Result<String> {
		self.variable(category, index).map(|(_, unit)| unit)
	}

	fn values(&self, category: VariableCategory, index: usize) -> Result<Series> {
		EngineError::check_index(category.as_str(), index, self.count(category))?;
		let results = self.results.read();
		Ok(results.values[category as usize]
			.get(index)
			.cloned()
			.unwrap_or_else(|| Series::from(Vec::new())))
	}
}
