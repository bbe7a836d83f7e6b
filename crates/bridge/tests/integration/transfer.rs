use pretty_assertions::assert_eq;
use rstest::rstest;
use simbridge::engine::VariableCategory;
use simbridge::{BridgeConfig, HostValue, TransferStrategy};

use crate::common::{self, TIME_COURSE};

#[rstest]
#[case(TransferStrategy::Boxed)]
#[case(TransferStrategy::Copy)]
#[case(TransferStrategy::Shared)]
fn host_arrays_carry_the_exact_series(#[case] transfer: TransferStrategy) {
	let bridge = common::bridge_with(BridgeConfig {
		transfer,
		..BridgeConfig::default()
	});
	let (_, _, instance) = common::instance(&bridge, "doc.sedml", TIME_COURSE);

	let before = bridge.task_voi_host(instance, 0).unwrap();
	assert_eq!(before.len(), Some(0));

	bridge.run(instance).unwrap();
	let series = bridge.task_variable_values(instance, 0, VariableCategory::State, 0).unwrap();
	let host = bridge
		.task_variable_values_host(instance, 0, VariableCategory::State, 0)
		.unwrap();

	assert_eq!(host.len(), Some(series.len()));
	let values: Vec<f64> = match &host {
		HostValue::Array(items) => items.iter().filter_map(HostValue::to_f64).collect(),
		HostValue::Float64Array(buffer) => buffer.to_vec(),
		other => panic!("unexpected host value {other:?}"),
	};
	assert_eq!(
		values.iter().map(|v| v.to_bits()).collect::<Vec<_>>(),
		series.iter().map(|v| v.to_bits()).collect::<Vec<_>>()
	);
}

#[test]
fn configuration_selects_the_strategy() {
	let config = BridgeConfig::from_toml("transfer = \"boxed\"").unwrap();
	let bridge = common::bridge_with(config);
	let (_, _, instance) = common::instance(&bridge, "doc.sedml", TIME_COURSE);
	bridge.run(instance).unwrap();

	assert!(matches!(bridge.task_voi_host(instance, 0).unwrap(), HostValue::Array(_)));
}
