use std::fmt;
use std::sync::Arc;

use crate::{InstanceRef, Issue, Result, SimulationRef};

/// Shared reference to a native SED document.
pub type DocumentRef = Arc<dyn NativeDocument>;

/// Shared reference to a model inside a SED document.
pub type ModelRef = Arc<dyn NativeModel>;

/// Change applied to a model before it is instantiated.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ModelChange {
	/// Overrides the value of one variable.
	Attribute {
		/// Component holding the variable.
		component: String,
		/// Variable name.
		variable: String,
		/// New value, as text.
		new_value: String,
	},
}

impl ModelChange {
	/// Creates a [`ModelChange::Attribute`].
	pub fn attribute(component: impl Into<String>, variable: impl Into<String>, new_value: impl Into<String>) -> Self {
		Self::Attribute {
			component: component.into(),
			variable: variable.into(),
			new_value: new_value.into(),
		}
	}
}

/// A model referenced by a SED document.
pub trait NativeModel: Send + Sync + fmt::Debug {
	/// Path of the file the model is loaded from.
	fn file_path(&self) -> String;

	/// Appends a change.
	fn add_change(&self, change: ModelChange);

	/// Drops every change.
	fn remove_all_changes(&self);

	/// Current changes, in insertion order.
	fn changes(&self) -> Vec<ModelChange>;
}

/// A SED-ML simulation experiment description built from a file.
///
/// Indexed accessors perform their own bounds checking and report
/// [`crate::EngineError::OutOfRange`].
pub trait NativeDocument: Send + Sync + fmt::Debug {
	/// Issues recorded while building the document.
	fn issues(&self) -> Vec<Issue>;

	/// Number of models.
	fn model_count(&self) -> usize;

	/// Model at `index`.
	fn model(&self, index: usize) -> Result<ModelRef>;

	/// Number of simulations.
	fn simulation_count(&self) -> usize;

	/// Simulation at `index`.
	fn simulation(&self, index: usize) -> Result<SimulationRef>;

	/// Builds a fresh runnable instance.
	fn instantiate(&self) -> InstanceRef;

	/// Canonical textual form of the document.
	fn serialise(&self) -> String;
}
