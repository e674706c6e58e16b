use rest_table_mvu::widget::view::{NAME_INPUT, QUERY_INPUT};
use rest_table_mvu::{Action, ActionType, DomEvent, EventData};

use super::*;

#[test]
fn given_any_name_when_set_name_dispatched_should_change_only_the_name() {
    for name in ["", "Barney", "Betty Rubble", "Bam-Bam ✨", "  padded  "] {
        let mut test = build_widget_test(empty_transport());
        test.driver.process_events();
        let before = test.driver.state();

        test.driver
            .emit(Action::new(ActionType::SetName).with("name", name));
        test.driver.process_events();

        let after = test.driver.state();
        assert_eq!(after.name, name);
        assert_eq!(after.query, before.query);
        assert_eq!(after.list, before.list);
        assert_eq!(after.loading, before.loading);
    }
}

#[test]
fn given_the_name_input_when_keyup_fired_should_rerender_the_greeting() {
    let mut test = build_widget_test(empty_transport());
    test.driver.process_events();
    let renders_before = test.renders.count();

    test.renders.with_latest(|tree| {
        let input = tree.find(NAME_INPUT).unwrap();
        assert!(input.fire(DomEvent::KeyUp, EventData::value("Barney")));
    });
    test.driver.process_events();

    assert_eq!(test.renders.count(), renders_before + 1);
    test.renders.with_latest(|tree| {
        assert_eq!(tree.find("greeting").unwrap().text_content(), "Hello Barney!");
        assert_eq!(tree.find(NAME_INPUT).unwrap().get_attr("value"), Some("Barney"));
    });
}

#[test]
fn given_the_query_input_when_changed_should_store_the_query() {
    let mut test = build_widget_test(empty_transport());
    test.driver.process_events();

    test.renders.with_latest(|tree| {
        tree.find(QUERY_INPUT)
            .unwrap()
            .fire(DomEvent::Change, EventData::value("last_name=Rubble"));
    });
    test.driver.process_events();

    assert_eq!(test.driver.state().query, "last_name=Rubble");
}

#[test]
fn given_an_unregistered_action_should_neither_change_state_nor_render() {
    let mut test = build_widget_test(empty_transport());
    test.driver.process_events();
    let state_before = test.driver.state();
    let renders_before = test.renders.count();

    test.driver
        .emit(Action::new(ActionType::Custom("NOT_A_THING".to_string())).with("name", "x"));
    test.driver.process_events();

    assert_eq!(test.driver.state(), state_before);
    assert_eq!(test.renders.count(), renders_before);
}

#[test]
fn given_set_name_without_a_name_should_be_ignored() {
    let mut test = build_widget_test(empty_transport());
    test.driver.process_events();
    let before = test.driver.state();

    test.driver.emit(Action::new(ActionType::SetName));
    test.driver.process_events();

    assert_eq!(test.driver.state(), before);
}
