use std::io::Write;

use bytes::Bytes;
use pretty_assertions::assert_eq;
use simbridge::engine::FileType;
use simbridge::{BridgeConfig, HostValue};

use crate::common::{self, TIME_COURSE};

fn archive(ui_name: &str) -> String {
	format!(
		r#"{{"combine": {{"master": "doc.sedml", "files": {{
			"doc.sedml": {sedml},
			"{ui_name}": {{"input": [{{"id": "k", "name": "Rate"}}]}}
		}}}}}}"#,
		sedml = TIME_COURSE
	)
}

#[test]
fn archive_exposes_its_ui_description() {
	let bridge = common::bridge();
	let file = bridge
		.create("model.omex", Some(Bytes::from(archive("simulation.json"))))
		.unwrap();

	assert_eq!(bridge.file_type(&file).unwrap(), FileType::CombineArchive);
	let ui = bridge.ui_json(&file).unwrap().expect("ui json");
	let ui: serde_json::Value = serde_json::from_slice(&ui).unwrap();
	assert_eq!(ui["input"][0]["id"], "k");

	let document = bridge.create_document(&file).unwrap();
	assert_eq!(bridge.model_file_path(document, 0).unwrap(), "decay.cellml");
}

#[test]
fn ui_description_name_is_configurable() {
	let bridge = common::bridge_with(BridgeConfig {
		ui_json_file: "ui.json".to_string(),
		..BridgeConfig::default()
	});
	bridge.create("model.omex", Some(Bytes::from(archive("ui.json")))).unwrap();

	assert!(matches!(bridge.call("fileUiJson", &["model.omex".into()]).unwrap(), HostValue::Bytes(_)));
}

#[test]
fn files_are_retrieved_from_disk_when_no_contents_are_given() {
	let mut tmp = tempfile::NamedTempFile::new().unwrap();
	tmp.write_all(TIME_COURSE.as_bytes()).unwrap();
	let path = tmp.path().to_str().unwrap();

	let bridge = common::bridge();
	let opened = bridge.open(path, None).unwrap();
	assert!(opened.is_runnable(), "{:?}", opened.issues);
	assert_eq!(bridge.file_type(&opened.file).unwrap(), FileType::SedmlFile);
}

#[test]
fn missing_files_surface_as_issues() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("absent.sedml");

	let bridge = common::bridge();
	let opened = bridge.open(path.to_str().unwrap(), None).unwrap();
	assert_eq!(bridge.file_type(&opened.file).unwrap(), FileType::IrretrievableFile);
	assert_eq!(opened.document, None);
	assert_eq!(opened.issues.len(), 1);
}
