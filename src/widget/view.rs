use crate::config::ListStyle;
use crate::view::{DomEvent, Node};
use crate::{Action, ActionType, Emitter};

use super::state::{Record, WidgetState};
use super::FetchDefaults;

pub const NAME_INPUT: &str = "name-input";
pub const QUERY_INPUT: &str = "query-input";
pub const FETCH_BUTTON: &str = "fetch-button";
pub const RESULTS: &str = "results";

pub(super) fn render(
    state: &WidgetState,
    emitter: &Emitter,
    defaults: &FetchDefaults,
    style: ListStyle,
) -> Node {
    let mut root = Node::element("div")
        .id("widget")
        .child(name_field(&state.name, emitter))
        .child(
            Node::element("div")
                .id("greeting")
                .child(Node::text(format!("Hello {}!", state.name))),
        )
        .child(query_field(&state.query, emitter, defaults));

    if state.loading {
        root = root.child(
            Node::element("p")
                .id("loading")
                .child(Node::text("Loading...")),
        );
    }

    root.child(match style {
        ListStyle::Compact => compact_list(&state.list),
        ListStyle::Table => result_table(&state.list),
    })
}

fn name_field(name: &str, emitter: &Emitter) -> Node {
    let emitter = emitter.clone();
    Node::element("div")
        .child(
            Node::element("label")
                .attr("for", NAME_INPUT)
                .child(Node::text("Name: ")),
        )
        .child(
            Node::element("input")
                .id(NAME_INPUT)
                .attr("type", "text")
                .attr("value", name)
                .on(DomEvent::KeyUp, move |data| {
                    emitter.emit(Action::new(ActionType::SetName).with("name", data.value));
                }),
        )
}

fn query_field(query: &str, emitter: &Emitter, defaults: &FetchDefaults) -> Node {
    let on_change = emitter.clone();
    let on_click = emitter.clone();
    let fetch = defaults.action(query);

    Node::element("div")
        .child(
            Node::element("label")
                .attr("for", QUERY_INPUT)
                .child(Node::text("Query: ")),
        )
        .child(
            Node::element("input")
                .id(QUERY_INPUT)
                .attr("type", "text")
                .attr("value", query)
                .on(DomEvent::Change, move |data| {
                    on_change.emit(Action::new(ActionType::SetQuery).with("query", data.value));
                }),
        )
        .child(
            Node::element("button")
                .id(FETCH_BUTTON)
                .on(DomEvent::Click, move |_| on_click.emit(fetch.clone()))
                .child(Node::text("Fetch")),
        )
}

fn compact_list(records: &[Record]) -> Node {
    Node::element("ul").id(RESULTS).children(
        records
            .iter()
            .map(|record| Node::element("li").child(Node::text(record.display_name()))),
    )
}

fn result_table(records: &[Record]) -> Node {
    let header = Node::element("tr").children(
        ["First Name", "Last Name", "Email"]
            .into_iter()
            .map(|title| Node::element("th").child(Node::text(title))),
    );
    let rows = records.iter().map(|record| {
        Node::element("tr").children(
            [record.first_name(), record.last_name(), record.email()]
                .into_iter()
                .map(|cell| Node::element("td").child(Node::text(cell))),
        )
    });

    Node::element("table")
        .id(RESULTS)
        .child(Node::element("thead").child(header))
        .child(Node::element("tbody").children(rows))
}
