use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use super::format::{
	ChangeSpec, DocumentSpec, FileSpec, ModelEntrySpec, ModelSpec, SimulationKindSpec, SimulationSpec, SolverSpec, TaskSpec,
};
use super::instance::MemoryInstance;
use crate::{
	CvodeSolver, EngineError, FileRef, InstanceRef, Issue, ModelChange, ModelRef, NativeDocument, NativeModel, NativeSimulation,
	NativeSolver, OneStepSimulation, Result, SimulationKind, SimulationRef, SolverRef, UniformTimeCourseSimulation,
};

const NOT_A_SIMULATION_SOURCE: &str =
	"A simulation experiment description cannot be created using a file that is not a CellML file, a SED-ML file, or a COMBINE archive.";

/// In-memory [`NativeDocument`].
#[derive(Debug)]
pub struct MemoryDocument {
	issues: Vec<Issue>,
	models: Vec<Arc<MemoryModel>>,
	simulations: Vec<Arc<MemorySimulation>>,
	tasks: Vec<TaskSpec>,
}

impl MemoryDocument {
	pub(super) fn from_file(file: &FileRef) -> Self {
		let spec = match FileSpec::parse(&file.contents()) {
			Some(FileSpec::Sedml(spec)) => Ok(spec),
			Some(FileSpec::Cellml(model)) => Ok(Self::default_for_model(file.path(), model)),
			Some(FileSpec::Combine(archive)) => match archive.files.get(&archive.master).cloned().map(serde_json::from_value::<FileSpec>) {
				Some(Ok(FileSpec::Sedml(spec))) => Ok(spec),
				Some(Ok(FileSpec::Cellml(model))) => Ok(Self::default_for_model(&archive.master, model)),
				_ => Err(Issue::error(format!("The master file '{}' is not a SED-ML file.", archive.master))),
			},
			None => Err(Issue::error(NOT_A_SIMULATION_SOURCE)),
		};

		match spec {
			Ok(spec) => Self::from_spec(spec),
			Err(issue) => Self {
				issues: vec![issue],
				models: Vec::new(),
				simulations: Vec::new(),
				tasks: Vec::new(),
			},
		}
	}

	/// Document a bare model gets: one uniform time course over `[0, 1000]`, solved with CVODE.
	fn default_for_model(source: &str, model: ModelSpec) -> DocumentSpec {
		DocumentSpec {
			models: vec![ModelEntrySpec {
				source: source.to_string(),
				model,
				changes: Vec::new(),
			}],
			simulations: vec![SimulationSpec {
				kind: SimulationKindSpec::UniformTimeCourse {
					initial_time: 0.0,
					output_start_time: 0.0,
					output_end_time: 1000.0,
					number_of_steps: 1000,
				},
				solver: Some(SolverSpec::Cvode { maximum_step: 0.0 }),
			}],
			tasks: vec![TaskSpec { model: 0, simulation: 0 }],
		}
	}

	fn from_spec(spec: DocumentSpec) -> Self {
		let mut issues = Vec::new();
		for (index, task) in spec.tasks.iter().enumerate() {
			if task.model >= spec.models.len() {
				issues.push(Issue::error(format!("Task {index} references model {}, which does not exist.", task.model)));
			}
			if task.simulation >= spec.simulations.len() {
				issues.push(Issue::error(format!(
					"Task {index} references simulation {}, which does not exist.",
					task.simulation
				)));
			}
		}

		Self {
			issues,
			models: spec.models.into_iter().map(|entry| Arc::new(MemoryModel::new(entry))).collect(),
			simulations: spec.simulations.into_iter().map(|sim| Arc::new(MemorySimulation::new(sim))).collect(),
			tasks: spec.tasks,
		}
	}

	fn to_spec(&self) -> DocumentSpec {
		DocumentSpec {
			models: self.models.iter().map(|model| model.to_spec()).collect(),
			simulations: self.simulations.iter().map(|sim| sim.to_spec()).collect(),
			tasks: self.tasks.clone(),
		}
	}
}

impl NativeDocument for MemoryDocument {
	fn issues(&self) -> Vec<Issue> {
		self.issues.clone()
	}

	fn model_count(&self) -> usize {
		self.models.len()
	}

	fn model(&self, index: usize) -> Result<ModelRef> {
		EngineError::check_index("model", index, self.models.len())?;
		Ok(self.models[index].clone())
	}

	fn simulation_count(&self) -> usize {
		self.simulations.len()
	}

	fn simulation(&self, index: usize) -> Result<SimulationRef> {
		EngineError::check_index("simulation", index, self.simulations.len())?;
		Ok(self.simulations[index].to_ref())
	}

	fn instantiate(&self) -> InstanceRef {
		let tasks = self
			.tasks
			.iter()
			.filter_map(|task| {
				let model = self.models.get(task.model)?;
				let simulation = self.simulations.get(task.simulation)?;
				Some((model.snapshot(), simulation.settings()))
			})
			.collect();

		Arc::new(MemoryInstance::new(self.issues.clone(), tasks))
	}

	fn serialise(&self) -> String {
		serde_json::to_string_pretty(&FileSpec::Sedml(self.to_spec())).unwrap_or_default()
	}
}

/// In-memory [`NativeModel`].
#[derive(Debug)]
pub struct MemoryModel {
	source: String,
	spec: ModelSpec,
	changes: Mutex<Vec<ModelChange>>,
}

impl MemoryModel {
	fn new(entry: ModelEntrySpec) -> Self {
		let changes = entry
			.changes
			.into_iter()
			.map(|ChangeSpec::Attribute { component, variable, new_value }| ModelChange::attribute(component, variable, new_value))
			.collect();

		Self {
			source: entry.source,
			spec: entry.model,
			changes: Mutex::new(changes),
		}
	}

	/// Model definition with every recorded change applied to it.
	pub(super) fn snapshot(&self) -> ModelSpec {
		let changes = self.changes.lock();
		let effective = |variable: &str, declared: f64| Self::effective_value(&self.spec.component, &changes, variable, declared);

		let mut spec = self.spec.clone();
		for state in &mut spec.states {
			state.value = effective(&state.name, state.value);
		}
		for constant in spec.constants.iter_mut().chain(&mut spec.computed_constants) {
			constant.value = effective(&constant.name, constant.value);
		}
		spec
	}

	/// Value of `variable` after applying the latest matching change.
	fn effective_value(component_name: &str, changes: &[ModelChange], variable: &str, declared: f64) -> f64 {
		changes
			.iter()
			.rev()
			.find_map(|change| match change {
				ModelChange::Attribute {
					component,
					variable: name,
					new_value,
				} if component == component_name && name == variable => new_value.trim().parse().ok(),
				_ => None,
			})
			.unwrap_or(declared)
	}

	fn to_spec(&self) -> ModelEntrySpec {
		ModelEntrySpec {
			source: self.source.clone(),
			model: self.spec.clone(),
			changes: self
				.changes
				.lock()
				.iter()
				.map(|change| match change {
					ModelChange::Attribute {
						component,
						variable,
						new_value,
					} => ChangeSpec::Attribute {
						component: component.clone(),
						variable: variable.clone(),
						new_value: new_value.clone(),
					},
				})
				.collect(),
		}
	}
}

impl NativeModel for MemoryModel {
	fn file_path(&self) -> String {
		self.source.clone()
	}

	fn add_change(&self, change: ModelChange) {
		self.changes.lock().push(change);
	}

	fn remove_all_changes(&self) {
		self.changes.lock().clear();
	}

	fn changes(&self) -> Vec<ModelChange> {
		self.changes.lock().clone()
	}
}

/// In-memory simulation implementing every simulation facet.
///
/// Only the facet matching its kind is ever exposed through [`SimulationRef`].
#[derive(Debug)]
pub struct MemorySimulation {
	settings: RwLock<SimulationKindSpec>,
	solver: Option<Arc<MemorySolver>>,
}

impl MemorySimulation {
	fn new(spec: SimulationSpec) -> Self {
		Self {
			settings: RwLock::new(spec.kind),
			solver: spec.solver.map(|solver| Arc::new(MemorySolver::new(solver))),
		}
	}

	pub(super) fn kind(&self) -> SimulationKind {
		match &*self.settings.read() {
			SimulationKindSpec::Analysis => SimulationKind::Analysis,
			SimulationKindSpec::SteadyState => SimulationKind::SteadyState,
			SimulationKindSpec::OneStep { .. } => SimulationKind::OneStep,
			SimulationKindSpec::UniformTimeCourse { .. } => SimulationKind::UniformTimeCourse,
		}
	}

	pub(super) fn settings(&self) -> SimulationKindSpec {
		self.settings.read().clone()
	}

	fn to_ref(self: &Arc<Self>) -> SimulationRef {
		match self.kind() {
			SimulationKind::Analysis => SimulationRef::Analysis(self.clone()),
			SimulationKind::SteadyState => SimulationRef::SteadyState(self.clone()),
			SimulationKind::OneStep => SimulationRef::OneStep(self.clone()),
			SimulationKind::UniformTimeCourse => SimulationRef::UniformTimeCourse(self.clone()),
		}
	}

	fn to_spec(&self) -> SimulationSpec {
		SimulationSpec {
			kind: self.settings(),
			solver: self.solver.as_ref().map(|solver| solver.spec.read().clone()),
		}
	}

	fn time_course(&self) -> Option<(f64, f64, f64, i32)> {
		match *self.settings.read() {
			SimulationKindSpec::UniformTimeCourse {
				initial_time,
				output_start_time,
				output_end_time,
				number_of_steps,
			} => Some((initial_time, output_start_time, output_end_time, number_of_steps)),
			_ => None,
		}
	}

	fn update_time_course(&self, update: impl FnOnce(&mut f64, &mut f64, &mut f64, &mut i32)) {
		if let SimulationKindSpec::UniformTimeCourse {
			initial_time,
			output_start_time,
			output_end_time,
			number_of_steps,
		} = &mut *self.settings.write()
		{
			update(initial_time, output_start_time, output_end_time, number_of_steps);
		}
	}
}

impl NativeSimulation for MemorySimulation {
	fn ode_solver(&self) -> Option<SolverRef> {
		self.solver.as_ref().map(|solver| solver.to_ref())
	}
}

impl OneStepSimulation for MemorySimulation {
	fn step(&self) -> f64 {
		match *self.settings.read() {
			SimulationKindSpec::OneStep { step } => step,
			_ => 0.0,
		}
	}

	fn set_step(&self, value: f64) {
		if let SimulationKindSpec::OneStep { step } = &mut *self.settings.write() {
			*step = value;
		}
	}
}

impl UniformTimeCourseSimulation for MemorySimulation {
	fn initial_time(&self) -> f64 {
		self.time_course().map_or(0.0, |(initial, ..)| initial)
	}

	fn set_initial_time(&self, value: f64) {
		self.update_time_course(|initial, _, _, _| *initial = value);
	}

	fn output_start_time(&self) -> f64 {
		self.time_course().map_or(0.0, |(_, start, ..)| start)
	}

	fn set_output_start_time(&self, value: f64) {
		self.update_time_course(|_, start, _, _| *start = value);
	}

	fn output_end_time(&self) -> f64 {
		self.time_course().map_or(0.0, |(_, _, end, _)| end)
	}

	fn set_output_end_time(&self, value: f64) {
		self.update_time_course(|_, _, end, _| *end = value);
	}

	fn number_of_steps(&self) -> i32 {
		self.time_course().map_or(0, |(.., steps)| steps)
	}

	fn set_number_of_steps(&self, value: i32) {
		self.update_time_course(|_, _, _, steps| *steps = value);
	}
}

/// In-memory solver.
#[derive(Debug)]
pub struct MemorySolver {
	spec: RwLock<SolverSpec>,
}

impl MemorySolver {
	fn new(spec: SolverSpec) -> Self {
		Self { spec: RwLock::new(spec) }
	}

	fn to_ref(self: &Arc<Self>) -> SolverRef {
		match *self.spec.read() {
			SolverSpec::Cvode { .. } => SolverRef::Cvode(self.clone()),
			SolverSpec::ForwardEuler { .. } => SolverRef::Other(self.clone()),
		}
	}
}

impl NativeSolver for MemorySolver {
	fn name(&self) -> String {
		match *self.spec.read() {
			SolverSpec::Cvode { .. } => "CVODE".to_string(),
			SolverSpec::ForwardEuler { .. } => "Forward Euler".to_string(),
		}
	}
}

impl CvodeSolver for MemorySolver {
	fn maximum_step(&self) -> f64 {
		match *self.spec.read() {
			SolverSpec::Cvode { maximum_step } => maximum_step,
			SolverSpec::ForwardEuler { .. } => 0.0,
		}
	}

	fn set_maximum_step(&self, value: f64) {
		if let SolverSpec::Cvode { maximum_step } = &mut *self.spec.write() {
			*maximum_step = value;
		}
	}
}
