use bytes::Bytes;
use simbridge_engine::{Issue, SimulationKind};

use crate::{Bridge, DocumentKey, FileHandle, InstanceKey, Result};

/// Outcome of [`Bridge::open`].
///
/// The pipeline stops at the first stage reporting issues, so `document` and `instance` are only
/// set when every earlier stage was clean.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenedFile {
	/// The file.
	pub file: FileHandle,
	/// Document built from the file.
	pub document: Option<DocumentKey>,
	/// Instance of the document.
	pub instance: Option<InstanceKey>,
	/// Issues of the last stage reached.
	pub issues: Vec<Issue>,
}

impl OpenedFile {
	/// Returns `true` if the file is ready to run.
	pub fn is_runnable(&self) -> bool {
		self.instance.is_some() && self.issues.is_empty()
	}
}

impl Bridge {
	/// Creates a file and walks it through document creation and instantiation.
	///
	/// With [`crate::BridgeConfig::strict_open`] the document must also fit the supported subset:
	/// one model, one uniform time course whose initial and output start times agree, a non-empty
	/// output range and a positive number of steps.
	pub fn open(&self, path: &str, contents: Option<Bytes>) -> Result<OpenedFile> {
		let file = self.create(path, contents)?;
		let mut opened = OpenedFile {
			issues: self.issues(&file)?,
			file,
			document: None,
			instance: None,
		};
		if !opened.issues.is_empty() {
			return Ok(self.opened(opened, "file"));
		}

		let document = self.create_document(&opened.file)?;
		opened.document = Some(document);
		opened.issues = self.document_issues(document)?;
		if !opened.issues.is_empty() {
			return Ok(self.opened(opened, "document"));
		}

		if self.config.strict_open {
			opened.issues = self.supported_subset_issues(document)?;
			if !opened.issues.is_empty() {
				return Ok(self.opened(opened, "subset"));
			}
		}

		let instance = self.instantiate(document)?;
		opened.instance = Some(instance);
		opened.issues = self.instance_issues(instance)?;
		Ok(self.opened(opened, "instance"))
	}

	fn opened(&self, opened: OpenedFile, stage: &'static str) -> OpenedFile {
		tracing::debug!(path = %opened.file, stage, issues = opened.issues.len(), "bridge.open");
		opened
	}

	fn supported_subset_issues(&self, document: DocumentKey) -> Result<Vec<Issue>> {
		if self.model_count(document)? != 1 {
			return Ok(vec![Issue::warning("Only SED-ML files with one model are currently supported.")]);
		}
		if self.simulation_count(document)? != 1 {
			return Ok(vec![Issue::warning("Only SED-ML files with one simulation are currently supported.")]);
		}
		if self.simulation_type(document, 0)? != SimulationKind::UniformTimeCourse {
			return Ok(vec![Issue::warning("Only uniform time course simulations are currently supported.")]);
		}

		let initial_time = self.initial_time(document, 0)?;
		let output_start_time = self.output_start_time(document, 0)?;
		let output_end_time = self.output_end_time(document, 0)?;
		let number_of_steps = self.number_of_steps(document, 0)?;

		let mut issues = Vec::new();
		if initial_time != output_start_time {
			issues.push(Issue::warning(format!(
				"Only uniform time course simulations with the same values for 'initialTime' ({initial_time}) and 'outputStartTime' ({output_start_time}) are currently supported."
			)));
		}
		if output_start_time == output_end_time {
			issues.push(Issue::error(format!(
				"The uniform time course simulation must have different values for 'outputStartTime' ({output_start_time}) and 'outputEndTime' ({output_end_time})."
			)));
		}
		if number_of_steps <= 0 {
			issues.push(Issue::error(format!(
				"The uniform time course simulation must have a positive value for 'numberOfSteps' ({number_of_steps})."
			)));
		}
		Ok(issues)
	}
}
