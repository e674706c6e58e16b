use rest_table_mvu::widget::view::{FETCH_BUTTON, QUERY_INPUT};
use rest_table_mvu::{Action, DomEvent, EventData, Lifecycle, WidgetConfig};
use serde_json::json;

use super::*;

fn transport_answering_by_query() -> MockTransport {
    let mut transport = MockTransport::new();
    transport.expect_send().returning(|request| {
        if request.target.contains("last_name%3DRubble") {
            resolves(json!({ "result": [
                { "first_name": "Barney", "last_name": "Rubble", "sys_id": "3" }
            ] }))
        } else {
            resolves(json!({ "result": [fred_flintstone()] }))
        }
    });
    transport
}

fn search_rubbles<Spawn: Spawner>(test: &mut WidgetTest<Spawn>) {
    test.renders.with_latest(|tree| {
        tree.find(QUERY_INPUT)
            .unwrap()
            .fire(DomEvent::Change, EventData::value("last_name=Rubble"));
    });
    test.driver.process_events();
    test.renders.with_latest(|tree| {
        tree.find(FETCH_BUTTON)
            .unwrap()
            .fire(DomEvent::Click, EventData::default());
    });
    test.driver.process_events();
}

#[test]
fn given_two_fetches_in_flight_when_the_older_resolves_last_should_keep_the_newer() {
    let spawner = DeferredSpawner::default();
    let mut test = build_widget_test_with(
        WidgetConfig::default(),
        transport_answering_by_query(),
        spawner.clone(),
    );
    test.driver.process_events();
    search_rubbles(&mut test);
    assert_eq!(spawner.pending(), 2);

    // Newer first, then the stale mount fetch.
    spawner.run(1);
    spawner.run(0);
    test.driver.process_events();

    let list = test.driver.state().list;
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].display_name(), "Rubble, Barney");
}

#[test]
fn given_two_fetches_in_flight_when_the_older_resolves_first_should_drop_it() {
    let spawner = DeferredSpawner::default();
    let mut test = build_widget_test_with(
        WidgetConfig::default(),
        transport_answering_by_query(),
        spawner.clone(),
    );
    test.driver.process_events();
    search_rubbles(&mut test);

    spawner.run(0);
    test.driver.process_events();
    assert!(test.driver.state().list.is_empty());
    assert!(test.driver.state().loading);

    spawner.run(0);
    test.driver.process_events();
    assert_eq!(test.driver.state().list[0].display_name(), "Rubble, Barney");
    assert!(!test.driver.state().loading);
}

#[test]
fn given_a_fetch_in_flight_when_unmounted_should_discard_the_response() {
    let spawner = DeferredSpawner::default();
    let mut test = build_widget_test_with(
        WidgetConfig::default(),
        transport_answering_by_query(),
        spawner.clone(),
    );
    test.driver.process_events();
    assert_eq!(spawner.pending(), 1);

    test.driver.emit(Action::lifecycle(Lifecycle::Unmounted));
    test.driver.process_events();
    spawner.run(0);

    assert!(test.driver.is_unmounted());
    assert_eq!(test.driver.queued(), 0);
    assert!(test.driver.state().list.is_empty());
}
