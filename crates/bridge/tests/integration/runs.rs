use std::time::Duration;

use pretty_assertions::assert_eq;
use simbridge::engine::VariableCategory;
use simbridge::{Error, Handle};

use crate::common::{self, TIME_COURSE};

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn async_run_matches_a_synchronous_run() {
	let bridge = common::bridge();
	let (_, document, sync_instance) = common::instance(&bridge, "doc.sedml", TIME_COURSE);
	let async_instance = bridge.instantiate(document).unwrap();

	bridge.run(sync_instance).unwrap();
	let handle = bridge.spawn_run(async_instance).unwrap();
	assert_eq!(bridge.runs(), vec![(handle, async_instance)]);
	bridge.wait_run(handle).await.unwrap();

	for category in [VariableCategory::State, VariableCategory::Rate, VariableCategory::Algebraic] {
		assert_eq!(
			bridge.task_variable_values(sync_instance, 0, category, 0).unwrap(),
			bridge.task_variable_values(async_instance, 0, category, 0).unwrap(),
			"{category:?}"
		);
	}
}

#[tokio::test]
async fn progress_reaches_one() {
	let bridge = common::bridge();
	let (_, _, instance) = common::instance(&bridge, "doc.sedml", TIME_COURSE);
	let handle = bridge.spawn_run(instance).unwrap();

	tokio::time::timeout(Duration::from_secs(5), async {
		while !bridge.run_progress(handle).unwrap().finished {
			tokio::time::sleep(Duration::from_millis(1)).await;
		}
	})
	.await
	.expect("run did not finish");

	assert_eq!(bridge.run_progress(handle).unwrap().fraction, 1.0);
	bridge.wait_run(handle).await.unwrap();
}

#[tokio::test]
async fn unmanaging_the_file_does_not_break_an_inflight_run() {
	let bridge = common::bridge();
	let (file, _, instance) = common::instance(&bridge, "doc.sedml", TIME_COURSE);
	let handle = bridge.spawn_run(instance).unwrap();

	bridge.unmanage(&file).unwrap();
	assert!(bridge.wait_run(handle).await.is_ok());
	assert!(matches!(bridge.task_voi(instance, 0), Err(Error::NotFound(Handle::Instance(_)))));
}

#[tokio::test]
async fn awaited_handle_is_retired() {
	let bridge = common::bridge();
	let (_, _, instance) = common::instance(&bridge, "doc.sedml", TIME_COURSE);
	let handle = bridge.spawn_run(instance).unwrap();
	bridge.wait_run(handle).await.unwrap();

	assert!(matches!(bridge.wait_run(handle).await, Err(Error::NotFound(Handle::Run(_)))));
	assert!(matches!(bridge.run_instance(handle), Err(Error::NotFound(Handle::Run(_)))));
}

#[test]
fn runs_outside_a_runtime_use_the_fallback_pool() {
	let bridge = common::bridge();
	let (_, _, instance) = common::instance(&bridge, "doc.sedml", TIME_COURSE);
	let handle = bridge.spawn_run(instance).unwrap();

	let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
	runtime.block_on(bridge.wait_run(handle)).unwrap();
	assert_eq!(bridge.task_voi(instance, 0).unwrap().len(), 11);
}
