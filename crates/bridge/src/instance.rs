use simbridge_engine::{InstanceRef, Issue, Series, TaskRef, VariableCategory};

use crate::{Bridge, Error, Handle, HostValue, InstanceKey, Result, to_host_array};

impl Bridge {
	pub(crate) fn instance(&self, key: InstanceKey) -> Result<InstanceRef> {
		Ok(self.registry.read().instance(key)?.instance.clone())
	}

	fn task(&self, key: InstanceKey, task: usize) -> Result<TaskRef> {
		Ok(self.instance(key)?.task(task)?)
	}

	/// Issues recorded while creating and instantiating the document, and while running.
	pub fn instance_issues(&self, key: InstanceKey) -> Result<Vec<Issue>> {
		Ok(self.instance(key)?.issues())
	}

	/// Returns `true` if [`Self::instance_issues`] is non-empty.
	pub fn has_issues(&self, key: InstanceKey) -> Result<bool> {
		Ok(self.instance(key)?.has_issues())
	}

	/// Runs every task of `key` to completion on the calling thread.
	pub fn run(&self, key: InstanceKey) -> Result<f64> {
		let instance = self.instance(key)?;
		let status = instance.run();
		tracing::debug!(instance = %key, status, "bridge.instance.run");
		Ok(status)
	}

	/// Releases `key`. Runs already in flight keep their own reference and finish normally.
	pub fn release_instance(&self, key: InstanceKey) -> Result<()> {
		let mut registry = self.registry.write();
		let entry = registry.instances.remove(key).ok_or(Error::NotFound(Handle::Instance(key)))?;
		if let Ok(document) = registry.document_mut(entry.document) {
			document.instances.retain(|instance| *instance != key);
		}
		drop(registry);

		tracing::debug!(instance = %key, "bridge.instance.release");
		Ok(())
	}

	/// Number of tasks.
	pub fn task_count(&self, key: InstanceKey) -> Result<usize> {
		Ok(self.instance(key)?.task_count())
	}

	/// Name of the variable of integration of `task`.
	pub fn task_voi_name(&self, key: InstanceKey, task: usize) -> Result<String> {
		Ok(self.task(key, task)?.voi_name())
	}

	/// Unit of the variable of integration of `task`.
	pub fn task_voi_unit(&self, key: InstanceKey, task: usize) -> Result<String> {
		Ok(self.task(key, task)?.voi_unit())
	}

	/// Values of the variable of integration of `task`; empty before a run.
	pub fn task_voi(&self, key: InstanceKey, task: usize) -> Result<Series> {
		Ok(self.task(key, task)?.voi())
	}

	/// Number of variables of `task` in `category`.
	pub fn task_variable_count(&self, key: InstanceKey, task: usize, category: VariableCategory) -> Result<usize> {
		Ok(self.task(key, task)?.count(category))
	}

	/// Name of variable `index` of `task` in `category`.
	pub fn task_variable_name(&self, key: InstanceKey, task: usize, category: VariableCategory, index: usize) -> Result<String> {
		Ok(self.task(key, task)?.name(category, index)?)
	}

	/// Unit of variable `index` of `task` in `category`.
	pub fn task_variable_unit(&self, key: InstanceKey, task: usize, category: VariableCategory, index: usize) -> Result<String> {
		Ok(self.task(key, task)?.unit(category, index)?)
	}

	/// Values of variable `index` of `task` in `category`; empty before a run.
	pub fn task_variable_values(&self, key: InstanceKey, task: usize, category: VariableCategory, index: usize) -> Result<Series> {
		Ok(self.task(key, task)?.values(category, index)?)
	}

	/// [`Self::task_voi`] converted with the configured transfer strategy.
	pub fn task_voi_host(&self, key: InstanceKey, task: usize) -> Result<HostValue> {
		Ok(to_host_array(self.task_voi(key, task)?, self.config.transfer))
	}

	/// [`Self::task_variable_values`] converted with the configured transfer strategy.
	pub fn task_variable_values_host(
		&self,
		key: InstanceKey,
		task: usize,
		category: VariableCategory,
		index: usize,
	) -> Result<HostValue> {
		Ok(to_host_array(
			self.task_variable_values(key, task, category, index)?,
			self.config.transfer,
		))
	}
}
