//! JSON content format understood by the in-memory engine.
//!
//! A file is one externally tagged object:
//! * `{"cellml": <model>}`: a bare model
//! * `{"sedml": <document>}`: a simulation experiment description
//! * `{"combine": {"master": <name>, "files": {<name>: <file>, ...}}}`: an archive

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Top-level file contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileSpec {
	/// A bare model.
	Cellml(ModelSpec),
	/// A simulation experiment description.
	Sedml(DocumentSpec),
	/// An archive of named entries.
	Combine(ArchiveSpec),
}

impl FileSpec {
	/// Parses file contents.
	pub fn parse(contents: &[u8]) -> Option<Self> {
		serde_json::from_slice(contents).ok()
	}

	/// Serialises back to file contents.
	pub fn to_bytes(&self) -> Vec<u8> {
		serde_json::to_vec(self).unwrap_or_default()
	}
}

/// An archive: named entries plus the name of the master entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchiveSpec {
	/// Entry holding the simulation experiment description.
	pub master: String,
	/// Entries, as raw JSON values.
	pub files: BTreeMap<String, serde_json::Value>,
}

/// A simulation experiment description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentSpec {
	/// Models.
	#[serde(default)]
	pub models: Vec<ModelEntrySpec>,
	/// Simulations.
	#[serde(default)]
	pub simulations: Vec<SimulationSpec>,
	/// Tasks pairing one model with one simulation.
	#[serde(default)]
	pub tasks: Vec<TaskSpec>,
}

/// One model of a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelEntrySpec {
	/// Path of the model file.
	pub source: String,
	/// Model definition.
	pub model: ModelSpec,
	/// Changes applied before instantiation.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub changes: Vec<ChangeSpec>,
}

/// Model definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSpec {
	/// Component holding every variable.
	#[serde(default = "default_component")]
	pub component: String,
	/// Variable of integration.
	pub voi: NamedSpec,
	/// State variables: `x(t) = value * exp(rate * t)`.
	#[serde(default)]
	pub states: Vec<StateSpec>,
	/// Constants.
	#[serde(default)]
	pub constants: Vec<ValueSpec>,
	/// Computed constants.
	#[serde(default)]
	pub computed_constants: Vec<ValueSpec>,
	/// Algebraic variables: `y(t) = scale * x_of_state(t)`.
	#[serde(default)]
	pub algebraic: Vec<AlgebraicSpec>,
}

fn default_component() -> String {
	"main".to_string()
}

/// A name and a unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedSpec {
	/// Name.
	pub name: String,
	/// Unit.
	pub unit: String,
}

/// A state variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSpec {
	/// Name.
	pub name: String,
	/// Unit.
	pub unit: String,
	/// Initial value.
	pub value: f64,
	/// Exponential rate.
	#[serde(default)]
	pub rate: f64,
}

/// A constant or computed constant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueSpec {
	/// Name.
	pub name: String,
	/// Unit.
	pub unit: String,
	/// Value.
	pub value: f64,
}

/// An algebraic variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlgebraicSpec {
	/// Name.
	pub name: String,
	/// Unit.
	pub unit: String,
	/// Index of the state it is derived from.
	pub of_state: usize,
	/// Scale factor.
	pub scale: f64,
}

/// A model change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChangeSpec {
	/// Overrides one variable value.
	Attribute {
		/// Component.
		component: String,
		/// Variable.
		variable: String,
		/// New value, as text.
		new_value: String,
	},
}

/// A simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSpec {
	/// Kind-specific settings.
	#[serde(flatten)]
	pub kind: SimulationKindSpec,
	/// ODE solver.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub solver: Option<SolverSpec>,
}

/// Kind-specific simulation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SimulationKindSpec {
	/// `SedAnalysis`.
	Analysis,
	/// `SedSteadyState`.
	SteadyState,
	/// `SedOneStep`.
	OneStep {
		/// Step size.
		step: f64,
	},
	/// `SedUniformTimeCourse`.
	UniformTimeCourse {
		/// Initial time.
		initial_time: f64,
		/// Output start time.
		output_start_time: f64,
		/// Output end time.
		output_end_time: f64,
		/// Number of steps.
		number_of_steps: i32,
	},
}

/// An ODE solver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SolverSpec {
	/// CVODE.
	Cvode {
		/// Maximum step (0 means unbounded).
		#[serde(default)]
		maximum_step: f64,
	},
	/// Forward Euler.
	ForwardEuler {
		/// Fixed step.
		step: f64,
	},
}

/// A task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskSpec {
	/// Model index.
	pub model: usize,
	/// Simulation index.
	pub simulation: usize,
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn parses_one_step_document() {
		let json = br#"{"sedml": {
			"models": [{"source": "m.cellml", "model": {"voi": {"name": "t", "unit": "ms"}}}],
			"simulations": [{"type": "one_step", "step": 0.25, "solver": {"type": "cvode"}}],
			"tasks": [{"model": 0, "simulation": 0}]
		}}"#;

		let Some(FileSpec::Sedml(doc)) = FileSpec::parse(json) else {
			panic!("expected a SED-ML spec");
		};
		assert_eq!(doc.simulations[0].kind, SimulationKindSpec::OneStep { step: 0.25 });
		assert_eq!(doc.simulations[0].solver, Some(SolverSpec::Cvode { maximum_step: 0.0 }));
		assert_eq!(doc.models[0].model.component, "main");
	}

	#[test]
	fn rejects_foreign_contents() {
		assert_eq!(FileSpec::parse(b"<?xml version=\"1.0\"?>"), None);
		assert_eq!(FileSpec::parse(br#"{"svg": {}}"#), None);
	}
}
