//! Name-indexed export table.
//!
//! Hosts that dispatch by string reach the bridge through [`Bridge::call`]. Every export converts
//! its positional [`HostValue`] arguments, forwards to the typed API and converts the result
//! back. Documents and instances are addressed by their numeric keys, files by path, and every
//! index is an `i32` that must not be negative. Setters return [`HostValue::Undefined`].

use std::fmt;

use bytes::Bytes;
use simbridge_engine::VariableCategory;

use crate::{Bridge, DocumentKey, Error, FileHandle, HostValue, InstanceKey, Result};

type ExportHandler = fn(&Bridge, Args<'_>) -> Result<HostValue>;

/// One entry of [`EXPORTS`].
pub struct ExportDef {
	/// Name hosts call the export by.
	pub name: &'static str,
	handler: ExportHandler,
}

impl ExportDef {
	/// Invokes the export on `bridge`.
	pub fn call(&self, bridge: &Bridge, args: &[HostValue]) -> Result<HostValue> {
		(self.handler)(bridge, Args(args))
	}
}

impl fmt::Debug for ExportDef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ExportDef").field("name", &self.name).finish_non_exhaustive()
	}
}

/// Looks up an export by name.
pub fn find_export(name: &str) -> Option<&'static ExportDef> {
	EXPORTS.iter().find(|export| export.name == name)
}

impl Bridge {
	/// Calls the export `name` with positional `args`.
	pub fn call(&self, name: &str, args: &[HostValue]) -> Result<HostValue> {
		let export = find_export(name).ok_or_else(|| Error::UnknownExport(name.to_string()))?;
		tracing::trace!(export = name, args = args.len(), "bridge.call");
		export.call(self, args)
	}
}

#[derive(Clone, Copy)]
struct Args<'a>(&'a [HostValue]);

impl<'a> Args<'a> {
	fn value(self, index: usize) -> Result<&'a HostValue> {
		self.0
			.get(index)
			.ok_or_else(|| Error::invalid_argument(index, "missing"))
	}

	fn convert<T>(self, index: usize, expected: &str, convert: impl FnOnce(&'a HostValue) -> Option<T>) -> Result<T> {
		let value = self.value(index)?;
		convert(value).ok_or_else(|| Error::invalid_argument(index, format!("expected {expected}, found {}", value.type_name())))
	}

	fn document(self, index: usize) -> Result<DocumentKey> {
		self.convert(index, "a document id", HostValue::to_size_t).map(DocumentKey::from)
	}

	fn instance(self, index: usize) -> Result<InstanceKey> {
		self.convert(index, "an instance id", HostValue::to_size_t).map(InstanceKey::from)
	}

	fn file(self, index: usize) -> Result<FileHandle> {
		self.string(index).map(FileHandle::from)
	}

	fn index(self, index: usize) -> Result<usize> {
		let value = self.integer(index)?;
		usize::try_from(value).map_err(|_| Error::invalid_argument(index, format!("index {value} is negative")))
	}

	fn integer(self, index: usize) -> Result<i32> {
		self.convert(index, "an integer", HostValue::to_i32)
	}

	fn number(self, index: usize) -> Result<f64> {
		self.convert(index, "a number", HostValue::to_f64)
	}

	fn string(self, index: usize) -> Result<&'a str> {
		self.convert(index, "a string", HostValue::as_str)
	}

	fn optional_bytes(self, index: usize) -> Result<Option<Bytes>> {
		match self.0.get(index) {
			None | Some(HostValue::Undefined) => Ok(None),
			Some(HostValue::Bytes(bytes)) => Ok(Some(bytes.clone())),
			Some(other) => Err(Error::invalid_argument(
				index,
				format!("expected a buffer or undefined, found {}", other.type_name()),
			)),
		}
	}
}

macro_rules! exports {
	(
		$($name:literal => $handler:expr,)*
		task variables {
			$($category:ident => $count:literal, $label:literal, $unit:literal, $values:literal;)*
		}
	) => {
		/// Every export, in host registration order.
		pub static EXPORTS: &[ExportDef] = &[
			$(ExportDef { name: $name, handler: $handler },)*
			$(
				ExportDef {
					name: $count,
					handler: |bridge, args| {
						Ok(bridge.task_variable_count(args.instance(0)?, args.index(1)?, VariableCategory::$category)?.into())
					},
				},
				ExportDef {
					name: $label,
					handler: |bridge, args| {
						Ok(bridge
							.task_variable_name(args.instance(0)?, args.index(1)?, VariableCategory::$category, args.index(2)?)?
							.into())
					},
				},
				ExportDef {
					name: $unit,
					handler: |bridge, args| {
						Ok(bridge
							.task_variable_unit(args.instance(0)?, args.index(1)?, VariableCategory::$category, args.index(2)?)?
							.into())
					},
				},
				ExportDef {
					name: $values,
					handler: |bridge, args| {
						bridge.task_variable_values_host(args.instance(0)?, args.index(1)?, VariableCategory::$category, args.index(2)?)
					},
				},
			)*
		];
	};
}

exports! {
	"version" => |bridge, _| Ok(bridge.version().into()),

	"fileManagerUnmanage" => |bridge, args| {
		bridge.unmanage(&args.file(0)?)?;
		Ok(HostValue::Undefined)
	},
	"fileContents" => |bridge, args| Ok(bridge.contents(&args.file(0)?)?.into()),
	"fileCreate" => |bridge, args| {
		bridge.create(args.string(0)?, args.optional_bytes(1)?)?;
		Ok(HostValue::Undefined)
	},
	"fileIssues" => |bridge, args| Ok(bridge.issues(&args.file(0)?)?.into()),
	"fileType" => |bridge, args| Ok(bridge.file_type(&args.file(0)?)?.discriminant().into()),
	"fileUiJson" => |bridge, args| Ok(bridge.ui_json(&args.file(0)?)?.into()),

	"sedDocumentCreate" => |bridge, args| Ok(bridge.create_document(&args.file(0)?)?.get().into()),
	"sedDocumentInstantiate" => |bridge, args| Ok(bridge.instantiate(args.document(0)?)?.get().into()),
	"sedDocumentIssues" => |bridge, args| Ok(bridge.document_issues(args.document(0)?)?.into()),
	"sedDocumentModelCount" => |bridge, args| Ok(bridge.model_count(args.document(0)?)?.into()),
	"sedDocumentSimulationCount" => |bridge, args| Ok(bridge.simulation_count(args.document(0)?)?.into()),
	"sedDocumentSimulationType" => |bridge, args| {
		let kind = bridge.simulation_type(args.document(0)?, args.index(1)?)?;
		Ok(i32::from(kind.discriminant()).into())
	},
	"sedDocumentSerialise" => |bridge, args| Ok(bridge.serialise(args.document(0)?)?.into()),

	"sedModelFilePath" => |bridge, args| Ok(bridge.model_file_path(args.document(0)?, args.index(1)?)?.into()),
	"sedModelAddChange" => |bridge, args| {
		bridge.add_change(args.document(0)?, args.index(1)?, args.string(2)?, args.string(3)?, args.string(4)?)?;
		Ok(HostValue::Undefined)
	},
	"sedModelRemoveAllChanges" => |bridge, args| {
		bridge.remove_all_changes(args.document(0)?, args.index(1)?)?;
		Ok(HostValue::Undefined)
	},

	"sedOneStepStep" => |bridge, args| Ok(bridge.one_step_step(args.document(0)?, args.index(1)?)?.into()),

	"sedUniformTimeCourseInitialTime" => |bridge, args| Ok(bridge.initial_time(args.document(0)?, args.index(1)?)?.into()),
	"sedUniformTimeCourseSetInitialTime" => |bridge, args| {
		bridge.set_initial_time(args.document(0)?, args.index(1)?, args.number(2)?)?;
		Ok(HostValue::Undefined)
	},
	"sedUniformTimeCourseOutputStartTime" => |bridge, args| {
		Ok(bridge.output_start_time(args.document(0)?, args.index(1)?)?.into())
	},
	"sedUniformTimeCourseSetOutputStartTime" => |bridge, args| {
		bridge.set_output_start_time(args.document(0)?, args.index(1)?, args.number(2)?)?;
		Ok(HostValue::Undefined)
	},
	"sedUniformTimeCourseOutputEndTime" => |bridge, args| Ok(bridge.output_end_time(args.document(0)?, args.index(1)?)?.into()),
	"sedUniformTimeCourseSetOutputEndTime" => |bridge, args| {
		bridge.set_output_end_time(args.document(0)?, args.index(1)?, args.number(2)?)?;
		Ok(HostValue::Undefined)
	},
	"sedUniformTimeCourseNumberOfSteps" => |bridge, args| Ok(bridge.number_of_steps(args.document(0)?, args.index(1)?)?.into()),
	"sedUniformTimeCourseSetNumberOfSteps" => |bridge, args| {
		bridge.set_number_of_steps(args.document(0)?, args.index(1)?, args.integer(2)?)?;
		Ok(HostValue::Undefined)
	},

	"solverCvodeMaximumStep" => |bridge, args| Ok(bridge.cvode_maximum_step(args.document(0)?, args.index(1)?)?.into()),
	"solverCvodeSetMaximumStep" => |bridge, args| {
		bridge.set_cvode_maximum_step(args.document(0)?, args.index(1)?, args.number(2)?)?;
		Ok(HostValue::Undefined)
	},

	"sedInstanceHasIssues" => |bridge, args| Ok(bridge.has_issues(args.instance(0)?)?.into()),
	"sedInstanceIssues" => |bridge, args| Ok(bridge.instance_issues(args.instance(0)?)?.into()),
	"sedInstanceRun" => |bridge, args| Ok(bridge.run(args.instance(0)?)?.into()),

	"sedInstanceTaskVoiName" => |bridge, args| Ok(bridge.task_voi_name(args.instance(0)?, args.index(1)?)?.into()),
	"sedInstanceTaskVoiUnit" => |bridge, args| Ok(bridge.task_voi_unit(args.instance(0)?, args.index(1)?)?.into()),
	"sedInstanceTaskVoi" => |bridge, args| bridge.task_voi_host(args.instance(0)?, args.index(1)?),

	task variables {
		State => "sedInstanceTaskStateCount", "sedInstanceTaskStateName", "sedInstanceTaskStateUnit", "sedInstanceTaskState";
		Rate => "sedInstanceTaskRateCount", "sedInstanceTaskRateName", "sedInstanceTaskRateUnit", "sedInstanceTaskRate";
		Constant => "sedInstanceTaskConstantCount", "sedInstanceTaskConstantName", "sedInstanceTaskConstantUnit", "sedInstanceTaskConstant";
		ComputedConstant => "sedInstanceTaskComputedConstantCount", "sedInstanceTaskComputedConstantName",
			"sedInstanceTaskComputedConstantUnit", "sedInstanceTaskComputedConstant";
		Algebraic => "sedInstanceTaskAlgebraicVariableCount", "sedInstanceTaskAlgebraicVariableName",
			"sedInstanceTaskAlgebraicVariableUnit", "sedInstanceTaskAlgebraicVariable";
	}
}
