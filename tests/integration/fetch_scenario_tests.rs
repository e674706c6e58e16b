use rest_table_mvu::widget::view::RESULTS;
use rest_table_mvu::{ListStyle, WidgetConfig};
use serde_json::json;

use super::*;

#[test]
fn given_no_processing_should_render_initial_state_only() {
    let test = build_widget_test(empty_transport());

    assert_eq!(test.renders.count(), 1);
    let state = test.driver.state();
    assert_eq!(state.name, "ServiceNow User");
    assert!(state.list.is_empty());
}

#[test]
fn given_a_mounted_widget_when_the_fetch_succeeds_should_render_one_row() {
    let mut transport = MockTransport::new();
    transport
        .expect_send()
        .withf(|request| request.target == DEFAULT_TARGET)
        .times(1)
        .returning(|_| resolves(json!({ "result": [fred_flintstone()] })));
    let mut test = build_widget_test(transport);

    test.driver.process_events();

    let state = test.driver.state();
    assert_eq!(state.list.len(), 1);
    assert_eq!(state.list[0].display_name(), "Flintstone, Fred");
    assert!(!state.loading);

    // 1. Initial render
    // 2. Loading indicator after FETCH_TABLE_STARTED
    // 3. Result list after FETCH_TABLE_SUCCEEDED
    assert_eq!(test.renders.count(), 3);
    test.renders.with_renders(|renders| {
        assert!(renders[1].find("loading").is_some());
        assert!(renders[2].find("loading").is_none());
    });
    test.renders.with_latest(|tree| {
        let rows = tree.find(RESULTS).unwrap().child_nodes();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].text_content(), "Flintstone, Fred");
    });
}

#[test]
fn given_a_success_payload_should_store_the_result_unchanged() {
    let result = json!([
        fred_flintstone(),
        { "first_name": "Wilma", "last_name": "Flintstone", "email": "wilma@bedrock.example",
          "sys_id": "2", "active": "true" },
        { "first_name": "Pebbles", "last_name": "Flintstone", "email": null, "sys_id": "3" },
    ]);
    let body = json!({ "result": result.clone() });
    let mut transport = MockTransport::new();
    transport
        .expect_send()
        .returning(move |_| resolves(body.clone()));
    let mut test = build_widget_test(transport);

    test.driver.process_events();

    let list = test.driver.state().list;
    assert_eq!(list.len(), 3);
    assert_eq!(serde_json::to_value(&list).unwrap(), result);
    test.renders.with_latest(|tree| {
        let rows = tree.find(RESULTS).unwrap().child_nodes();
        assert_eq!(rows[2].text_content(), "Flintstone, Pebbles");
    });
}

#[test]
fn given_an_empty_result_should_store_an_empty_list() {
    let mut test = build_widget_test(empty_transport());

    test.driver.process_events();

    assert!(test.driver.state().list.is_empty());
    test.renders.with_latest(|tree| {
        assert!(tree.find(RESULTS).unwrap().child_nodes().is_empty());
    });
}

#[test]
fn given_a_rejecting_transport_should_leave_the_list_unchanged() {
    let mut transport = MockTransport::new();
    transport
        .expect_send()
        .times(1)
        .returning(|_| rejects("connection refused"));
    let mut test = build_widget_test(transport);
    let before = test.driver.state();

    test.driver.process_events();

    let after = test.driver.state();
    assert_eq!(after.list, before.list);
    assert_eq!(after.name, before.name);
    assert_eq!(after.query, before.query);
    assert!(!after.loading);
}

#[test]
fn given_a_success_without_result_should_keep_the_previous_list() {
    let mut transport = MockTransport::new();
    let mut calls = 0;
    transport.expect_send().times(2).returning(move |_| {
        calls += 1;
        if calls == 1 {
            resolves(json!({ "result": [fred_flintstone()] }))
        } else {
            resolves(json!({ "error": { "message": "No Record found" } }))
        }
    });
    let mut test = build_widget_test(transport);
    test.driver.process_events();

    test.renders.with_latest(|tree| {
        tree.find(rest_table_mvu::widget::view::FETCH_BUTTON)
            .unwrap()
            .fire(rest_table_mvu::DomEvent::Click, Default::default());
    });
    test.driver.process_events();

    assert_eq!(test.driver.state().list.len(), 1);
    assert!(!test.driver.state().loading);
}

#[test]
fn given_table_style_should_render_name_columns() {
    let mut transport = MockTransport::new();
    transport
        .expect_send()
        .returning(|_| resolves(json!({ "result": [fred_flintstone()] })));
    let config = WidgetConfig {
        list_style: ListStyle::Table,
        ..WidgetConfig::default()
    };
    let mut test = build_widget_test_with(config, transport, rest_table_mvu::create_test_spawner());

    test.driver.process_events();

    test.renders.with_latest(|tree| {
        let table = tree.find(RESULTS).unwrap();
        assert_eq!(table.tag(), Some("table"));
        let headers = table.child_nodes()[0].child_nodes()[0].text_content();
        assert_eq!(headers, "First NameLast NameEmail");
        let row = table.child_nodes()[1].child_nodes()[0].text_content();
        assert_eq!(row, "FredFlintstone");
    });
}

#[test]
fn given_a_custom_table_should_request_it_on_mount() {
    let mut transport = MockTransport::new();
    transport
        .expect_send()
        .withf(|request| request.target == "api/now/table/incident?sysparm_limit=3&sysparm_query=active%3Dtrue")
        .times(1)
        .returning(|_| resolves(json!({ "result": [] })));
    let config = WidgetConfig {
        table_name: "incident".to_string(),
        limit: 3,
        default_query: "active=true".to_string(),
        ..WidgetConfig::default()
    };
    let mut test = build_widget_test_with(config, transport, rest_table_mvu::create_test_spawner());

    test.driver.process_events();

    assert_eq!(test.driver.state().query, "active=true");
}
