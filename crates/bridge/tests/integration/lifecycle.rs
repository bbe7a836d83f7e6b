use bytes::Bytes;
use pretty_assertions::assert_eq;
use simbridge::engine::{FileType, Issue, IssueKind, SimulationKind};
use simbridge::{DocumentState, Error, Handle};

use crate::common::{self, ONE_STEP, TIME_COURSE};

#[test]
fn resolve_or_create_reuses_the_managed_file() {
	let bridge = common::bridge();
	let first = bridge
		.resolve_or_create("doc.sedml", Some(Bytes::from_static(TIME_COURSE.as_bytes())))
		.unwrap();
	let second = bridge.resolve_or_create("doc.sedml", None).unwrap();

	assert_eq!(first, second);
	assert_eq!(bridge.file_type(&second).unwrap(), FileType::SedmlFile);
	assert_eq!(bridge.contents(&second).unwrap(), Bytes::from_static(TIME_COURSE.as_bytes()));
	assert_eq!(bridge.engine().files().len(), 1);
}

#[test]
fn unmanage_invalidates_everything_owned_by_the_file() {
	let bridge = common::bridge();
	let (file, document, instance) = common::instance(&bridge, "doc.sedml", TIME_COURSE);
	let (other_file, other_document, other_instance) = common::instance(&bridge, "other.sedml", TIME_COURSE);

	bridge.unmanage(&file).unwrap();

	assert!(matches!(bridge.contents(&file), Err(Error::NotFound(Handle::File(_)))));
	assert!(matches!(bridge.model_count(document), Err(Error::NotFound(Handle::Document(_)))));
	assert!(matches!(bridge.run(instance), Err(Error::NotFound(Handle::Instance(_)))));
	bridge.unmanage(&file).unwrap();
	assert!(bridge.engine().file("doc.sedml").is_none());

	assert!(bridge.contents(&other_file).is_ok());
	assert_eq!(bridge.model_count(other_document).unwrap(), 1);
	assert!(bridge.run(other_instance).is_ok());
}

#[test]
fn keys_are_never_reused() {
	let bridge = common::bridge();
	let (file, first) = common::document(&bridge, "doc.sedml", TIME_COURSE);
	bridge.unmanage(&file).unwrap();

	let (_, second) = common::document(&bridge, "doc.sedml", TIME_COURSE);
	assert_ne!(first, second);
	assert!(matches!(bridge.document_issues(first), Err(Error::NotFound(_))));
}

#[test]
fn instance_issues_carry_the_document_issues() {
	let bridge = common::bridge();
	let broken = r#"{"sedml": {
		"models": [{"source": "m.cellml", "model": {"voi": {"name": "t", "unit": "s"}}}],
		"simulations": [{"type": "steady_state"}],
		"tasks": [{"model": 3, "simulation": 0}]
	}}"#;
	let (_, document, instance) = common::instance(&bridge, "broken.sedml", broken);

	let issues = bridge.document_issues(document).unwrap();
	assert_eq!(issues, vec![Issue::error("Task 0 references model 3, which does not exist.")]);
	assert!(bridge.has_issues(instance).unwrap());
	assert_eq!(
		bridge.instance_issues(instance).unwrap(),
		vec![
			Issue::error("Task 0 references model 3, which does not exist."),
			Issue::warning("The simulation experiment description does not contain any tasks to run."),
		]
	);
}

#[test]
fn clean_document_yields_a_clean_instance() {
	let bridge = common::bridge();
	let (_, document, instance) = common::instance(&bridge, "doc.sedml", TIME_COURSE);
	assert!(bridge.document_issues(document).unwrap().is_empty());
	assert!(!bridge.has_issues(instance).unwrap());
}

#[test]
fn document_without_tasks_warns_on_instantiation() {
	let bridge = common::bridge();
	let (_, _, instance) = common::instance(&bridge, "empty.sedml", r#"{"sedml": {}}"#);
	let issues = bridge.instance_issues(instance).unwrap();
	assert_eq!(issues.len(), 1);
	assert_eq!(issues[0].kind(), IssueKind::Warning);
}

#[test]
fn instances_of_one_document_are_independent() {
	let bridge = common::bridge();
	let (_, document, first) = common::instance(&bridge, "doc.sedml", TIME_COURSE);
	let second = bridge.instantiate(document).unwrap();
	assert_ne!(first, second);
	assert_eq!(bridge.document_state(document).unwrap(), DocumentState::Instantiated);

	bridge.run(first).unwrap();
	assert_eq!(bridge.task_voi(first, 0).unwrap().len(), 11);
	assert!(bridge.task_voi(second, 0).unwrap().is_empty());

	bridge.release_instance(first).unwrap();
	bridge.run(second).unwrap();
	assert_eq!(bridge.task_voi(second, 0).unwrap().len(), 11);
	assert_eq!(bridge.document_instances(document).unwrap(), vec![second]);
}

#[test]
fn simulation_type_is_stable() {
	let bridge = common::bridge();
	let (_, document) = common::document(&bridge, "doc.sedml", TIME_COURSE);
	for _ in 0..3 {
		assert_eq!(bridge.simulation_type(document, 0).unwrap(), SimulationKind::UniformTimeCourse);
	}
	assert!(matches!(
		bridge.simulation_type(document, 1),
		Err(Error::OutOfRange {
			collection: "simulation",
			index: 1,
			count: 1
		})
	));
}

#[test]
fn one_step_scenario() {
	let bridge = common::bridge();
	let (_, document, instance) = common::instance(&bridge, "step.sedml", ONE_STEP);

	assert_eq!(bridge.simulation_type(document, 0).unwrap().discriminant(), 2);
	assert_eq!(bridge.one_step_step(document, 0).unwrap(), 0.25);
	assert!(matches!(
		bridge.initial_time(document, 0),
		Err(Error::TypeMismatch {
			expected: "uniform_time_course",
			found: "one_step"
		})
	));
	assert!(matches!(
		bridge.cvode_maximum_step(document, 0),
		Err(Error::TypeMismatch {
			expected: "cvode",
			found: "no_solver"
		})
	));

	bridge.run(instance).unwrap();
	assert_eq!(&*bridge.task_voi(instance, 0).unwrap(), &[0.0, 0.25]);
}

#[test]
fn changes_survive_serialisation_and_affect_new_instances() {
	let bridge = common::bridge();
	let (_, document) = common::document(&bridge, "doc.sedml", TIME_COURSE);
	bridge.add_change(document, 0, "main", "k", "2.5").unwrap();

	assert!(bridge.serialise(document).unwrap().contains("\"new_value\": \"2.5\""));

	let instance = bridge.instantiate(document).unwrap();
	bridge.run(instance).unwrap();
	let k = bridge
		.task_variable_values(instance, 0, simbridge::engine::VariableCategory::Constant, 0)
		.unwrap();
	assert!(k.iter().all(|value| *value == 2.5));
}

#[test]
fn existing_instances_ignore_later_document_edits() {
	let bridge = common::bridge();
	let (_, document, before) = common::instance(&bridge, "doc.sedml", TIME_COURSE);

	bridge.add_change(document, 0, "main", "k", "42").unwrap();
	bridge.set_output_end_time(document, 0, 100.0).unwrap();
	let after = bridge.instantiate(document).unwrap();

	bridge.run(before).unwrap();
	bridge.run(after).unwrap();
	let k = |instance: simbridge::InstanceKey| {
		bridge
			.task_variable_values(instance, 0, simbridge::engine::VariableCategory::Constant, 0)
			.unwrap()
	};

	assert_eq!(bridge.task_voi(before, 0).unwrap().last(), Some(&10.0));
	assert!(k(before).iter().all(|value| *value == 0.5));
	assert_eq!(bridge.task_voi(after, 0).unwrap().last(), Some(&100.0));
	assert!(k(after).iter().all(|value| *value == 42.0));
}
