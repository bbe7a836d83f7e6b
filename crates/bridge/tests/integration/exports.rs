use bytes::Bytes;
use pretty_assertions::assert_eq;
use simbridge::{EXPORTS, Error, HostValue, find_export};

use crate::common::{self, ONE_STEP};

#[test]
fn one_step_scenario_through_exports() {
	let bridge = common::bridge();
	let path = HostValue::from("step.sedml");

	bridge
		.call("fileCreate", &[path.clone(), Bytes::from_static(ONE_STEP.as_bytes()).into()])
		.unwrap();
	assert_eq!(bridge.call("fileIssues", &[path.clone()]).unwrap(), HostValue::Array(Vec::new()));

	let document = bridge.call("sedDocumentCreate", &[path]).unwrap();
	assert_eq!(
		bridge.call("sedDocumentSimulationType", &[document.clone(), 0.into()]).unwrap(),
		HostValue::Number(2.0)
	);
	assert_eq!(
		bridge.call("sedOneStepStep", &[document.clone(), 0.into()]).unwrap(),
		HostValue::Number(0.25)
	);

	let instance = bridge.call("sedDocumentInstantiate", &[document.clone()]).unwrap();
	bridge.call("sedInstanceRun", &[instance.clone()]).unwrap();
	assert_eq!(
		bridge.call("sedInstanceTaskVoi", &[instance.clone(), 0.into()]).unwrap().len(),
		Some(2)
	);
	assert_eq!(
		bridge.call("sedInstanceTaskStateName", &[instance, 0.into(), 0.into()]).unwrap(),
		HostValue::from("x")
	);

	assert!(matches!(
		bridge.call("sedUniformTimeCourseInitialTime", &[document, 0.into()]),
		Err(Error::TypeMismatch { .. })
	));
}

#[test]
fn unmanage_through_exports_invalidates_ids() {
	let bridge = common::bridge();
	let path = HostValue::from("step.sedml");
	bridge
		.call("fileCreate", &[path.clone(), Bytes::from_static(ONE_STEP.as_bytes()).into()])
		.unwrap();
	let document = bridge.call("sedDocumentCreate", &[path.clone()]).unwrap();

	assert_eq!(bridge.call("fileManagerUnmanage", &[path]).unwrap(), HostValue::Undefined);
	assert!(matches!(
		bridge.call("sedDocumentModelCount", &[document]),
		Err(Error::NotFound(_))
	));
}

#[test]
fn unmanaging_an_unknown_path_is_a_no_op() {
	let bridge = common::bridge();
	assert_eq!(
		bridge.call("fileManagerUnmanage", &["never-created.sedml".into()]).unwrap(),
		HostValue::Undefined
	);
}

#[test]
fn algebraic_variables_use_the_addon_names() {
	let bridge = common::bridge();
	let (_, _, instance) = common::instance(&bridge, "doc.sedml", common::TIME_COURSE);
	let instance = HostValue::from(instance.get());
	bridge.call("sedInstanceRun", &[instance.clone()]).unwrap();

	assert_eq!(
		bridge.call("sedInstanceTaskAlgebraicVariableCount", &[instance.clone(), 0.into()]).unwrap(),
		HostValue::Number(1.0)
	);
	assert_eq!(
		bridge.call("sedInstanceTaskAlgebraicVariableUnit", &[instance.clone(), 0.into(), 0.into()]).unwrap(),
		HostValue::from("mM")
	);
	assert_eq!(
		bridge.call("sedInstanceTaskAlgebraicVariable", &[instance, 0.into(), 0.into()]).unwrap().len(),
		Some(11)
	);
}

#[test]
fn every_export_is_reachable_by_name() {
	for export in EXPORTS {
		assert!(std::ptr::eq(find_export(export.name).unwrap(), export), "{}", export.name);
	}
	assert!(find_export("fileDelete").is_none());
}

#[test]
fn version_names_the_engine() {
	let bridge = common::bridge();
	let version = bridge.call("version", &[]).unwrap();
	assert!(version.as_str().unwrap().starts_with("memory-"));
}
