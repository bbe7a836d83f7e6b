use simbridge_engine::{DocumentRef, Issue, ModelChange, ModelRef};

use crate::registry::{DocumentEntry, InstanceEntry};
use crate::{Bridge, DocumentKey, Error, FileHandle, Handle, InstanceKey, Result};

/// Lifecycle state of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentState {
	/// Built from a file, never instantiated.
	Created,
	/// Instantiated at least once.
	Instantiated,
}

impl Bridge {
	/// Builds a document from the file at `handle`.
	pub fn create_document(&self, handle: &FileHandle) -> Result<DocumentKey> {
		let file = self.file(handle)?;
		let document = self.engine.create_document(&file);

		let mut registry = self.registry.write();
		// The file may have been unmanaged while the engine was building.
		registry.file(handle)?;
		let key = registry.documents.next_key()?;
		registry.documents.insert(
			key,
			DocumentEntry {
				document,
				file: handle.clone(),
				state: DocumentState::Created,
				instances: Vec::new(),
			},
		);
		drop(registry);

		tracing::debug!(path = %handle, document = %key, "bridge.document.create");
		Ok(key)
	}

	/// Instantiates `key` into a fresh, independently runnable instance.
	///
	/// Earlier instances of the same document stay valid.
	pub fn instantiate(&self, key: DocumentKey) -> Result<InstanceKey> {
		let document = self.document(key)?;
		let instance = document.instantiate();

		let mut registry = self.registry.write();
		let file = registry.document(key)?.file.clone();
		let instance_key = registry.instances.next_key()?;
		registry.instances.insert(
			instance_key,
			InstanceEntry {
				instance,
				document: key,
				file,
			},
		);
		let entry = registry.document_mut(key)?;
		entry.state = DocumentState::Instantiated;
		entry.instances.push(instance_key);
		drop(registry);

		tracing::debug!(document = %key, instance = %instance_key, "bridge.document.instantiate");
		Ok(instance_key)
	}

	pub(crate) fn document(&self, key: DocumentKey) -> Result<DocumentRef> {
		Ok(self.registry.read().document(key)?.document.clone())
	}

	/// Lifecycle state of `key`.
	pub fn document_state(&self, key: DocumentKey) -> Result<DocumentState> {
		Ok(self.registry.read().document(key)?.state)
	}

	/// Instances created from `key` that are still registered.
	pub fn document_instances(&self, key: DocumentKey) -> Result<Vec<InstanceKey>> {
		Ok(self.registry.read().document(key)?.instances.clone())
	}

	/// Issues recorded while building the document.
	pub fn document_issues(&self, key: DocumentKey) -> Result<Vec<Issue>> {
		Ok(self.document(key)?.issues())
	}

	/// Number of models.
	pub fn model_count(&self, key: DocumentKey) -> Result<usize> {
		Ok(self.document(key)?.model_count())
	}

	/// Number of simulations.
	pub fn simulation_count(&self, key: DocumentKey) -> Result<usize> {
		Ok(self.document(key)?.simulation_count())
	}

	/// Canonical text form of the document, including every mutation made through the bridge.
	pub fn serialise(&self, key: DocumentKey) -> Result<String> {
		Ok(self.document(key)?.serialise())
	}

	/// Model at `index`.
	pub fn model(&self, key: DocumentKey, index: usize) -> Result<ModelRef> {
		Ok(self.document(key)?.model(index)?)
	}

	/// Path of the file the model at `index` references.
	pub fn model_file_path(&self, key: DocumentKey, index: usize) -> Result<String> {
		Ok(self.model(key, index)?.file_path())
	}

	/// Records an attribute change on the model at `index`.
	pub fn add_change(&self, key: DocumentKey, index: usize, component: &str, variable: &str, new_value: &str) -> Result<()> {
		self.model(key, index)?.add_change(ModelChange::attribute(component, variable, new_value));
		tracing::trace!(document = %key, model = index, component, variable, new_value, "bridge.model.add_change");
		Ok(())
	}

	/// Drops every change recorded on the model at `index`.
	pub fn remove_all_changes(&self, key: DocumentKey, index: usize) -> Result<()> {
		self.model(key, index)?.remove_all_changes();
		Ok(())
	}

	/// Releases `key`. Its instances stay registered and runnable.
	pub fn release_document(&self, key: DocumentKey) -> Result<()> {
		self.registry
			.write()
			.documents
			.remove(key)
			.ok_or(Error::NotFound(Handle::Document(key)))?;
		tracing::debug!(document = %key, "bridge.document.release");
		Ok(())
	}

	/// Releases `key` together with every instance created from it. Returns the released
	/// instance keys.
	pub fn release_document_cascade(&self, key: DocumentKey) -> Result<Vec<InstanceKey>> {
		let mut registry = self.registry.write();
		let entry = registry
			.documents
			.remove(key)
			.ok_or(Error::NotFound(Handle::Document(key)))?;
		let released: Vec<InstanceKey> = entry
			.instances
			.into_iter()
			.filter(|instance| registry.instances.remove(*instance).is_some())
			.collect();
		drop(registry);

		tracing::debug!(document = %key, instances = released.len(), "bridge.document.release_cascade");
		Ok(released)
	}
}
