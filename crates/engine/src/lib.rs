//! Native simulation engine seam.
//!
//! The bridge never talks to a solver directly. Everything it needs from the native side is
//! expressed here as object-safe traits over shared references:
//! * [`Engine`]: file creation, the file manager, document construction
//! * [`NativeFile`], [`NativeDocument`], [`NativeModel`]: the SED-ML object model
//! * [`SimulationRef`]: simulations tagged with their [`SimulationKind`] at construction
//! * [`NativeInstance`], [`NativeTask`]: runnable instances and their time series
//!
//! The `memory` feature provides [`memory::MemoryEngine`], a deterministic in-process engine used
//! to exercise the bridge end to end.

#![warn(missing_docs)]

mod document;
mod engine;
mod error;
mod file;
mod instance;
mod issue;
mod simulation;
mod solver;

#[cfg(feature = "memory")]
pub mod memory;

pub use document::{DocumentRef, ModelChange, ModelRef, NativeDocument, NativeModel};
pub use engine::Engine;
pub use error::{EngineError, Result};
pub use file::{FileRef, FileType, NativeFile};
pub use instance::{InstanceRef, NativeInstance, NativeTask, RunObserver, Series, TaskRef, VariableCategory};
pub use issue::{Issue, IssueKind};
pub use simulation::{NativeSimulation, OneStepSimulation, SimulationKind, SimulationRef, UniformTimeCourseSimulation};
pub use solver::{CvodeSolver, NativeSolver, SolverRef};
