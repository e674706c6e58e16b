//! The REST table widget: a name field, a query input, and a remote table
//! fetch rendered as a result list.

mod state;
pub mod view;

use std::sync::Arc;

use serde_json::Value;

pub use state::{Record, WidgetPatch, WidgetState};

use crate::config::{ListStyle, WidgetConfig};
use crate::fetch::{RemoteFetch, RequestDescriptor};
use crate::transport::Transport;
use crate::view::Node;
use crate::{Action, ActionType, ComponentLogic, Emitter, HandlerRegistry};

/// Path template for the Table API.
pub const TABLE_PATH: &str = "api/now/table/:table_name";

/// Descriptor for `FETCH_TABLE`: table name in the path, limit and encoded
/// query in the query string.
pub fn table_descriptor() -> RequestDescriptor {
    RequestDescriptor::get(
        TABLE_PATH,
        ActionType::FetchTableSucceeded,
        ActionType::FetchTableFailed,
    )
    .path_params(["table_name"])
    .query_params(["sysparm_limit", "sysparm_query"])
    .start_action(ActionType::FetchTableStarted)
}

/// Parameters used for the fetch on mount and by the fetch button.
#[derive(Clone, Debug, PartialEq)]
pub struct FetchDefaults {
    pub table_name: String,
    pub limit: u32,
    pub query: String,
}

impl FetchDefaults {
    /// `FETCH_TABLE` for this table with the given encoded query.
    pub fn action(&self, query: &str) -> Action {
        Action::new(ActionType::FetchTable)
            .with("table_name", self.table_name.as_str())
            .with("sysparm_limit", self.limit)
            .with("sysparm_query", query)
    }
}

pub struct TableWidget {
    defaults: FetchDefaults,
    initial_name: String,
    list_style: ListStyle,
    fetch: RemoteFetch,
}

impl TableWidget {
    pub fn new(config: &WidgetConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            defaults: FetchDefaults {
                table_name: config.table_name.clone(),
                limit: config.limit,
                query: config.default_query.clone(),
            },
            initial_name: config.initial_name.clone(),
            list_style: config.list_style,
            fetch: RemoteFetch::new(table_descriptor(), transport),
        }
    }

    /// State the widget mounts with; the list starts empty.
    pub fn initial_state(&self) -> WidgetState {
        WidgetState {
            name: self.initial_name.clone(),
            query: self.defaults.query.clone(),
            list: Vec::new(),
            loading: false,
        }
    }

    pub fn defaults(&self) -> &FetchDefaults {
        &self.defaults
    }
}

impl ComponentLogic<WidgetState, Node> for TableWidget {
    fn register(&self, registry: &mut HandlerRegistry<WidgetState>) {
        let mount_fetch = self.defaults.action(&self.defaults.query);
        let fetch = self.fetch.clone();

        registry
            .on(ActionType::MOUNTED, move |ctx| {
                ctx.dispatch(mount_fetch.clone());
            })
            .on(ActionType::UNMOUNTED, move |_ctx| {
                fetch.cancel_in_flight();
            })
            .on(ActionType::SetName, |ctx| {
                let Some(name) = ctx.action().str("name").map(str::to_owned) else {
                    tracing::debug!("SET_NAME without a name, ignoring");
                    return;
                };
                ctx.update(WidgetPatch::name(name));
            })
            .on(ActionType::SetQuery, |ctx| {
                let Some(query) = ctx.action().str("query").map(str::to_owned) else {
                    tracing::debug!("SET_QUERY without a query, ignoring");
                    return;
                };
                ctx.update(WidgetPatch::query(query));
            })
            .insert(ActionType::FetchTable, self.fetch.handler())
            .on(ActionType::FetchTableStarted, |ctx| {
                ctx.update(WidgetPatch::loading(true));
            })
            .on(ActionType::FetchTableSucceeded, |ctx| {
                let result = ctx.action().get("result").cloned().unwrap_or(Value::Null);
                match serde_json::from_value::<Vec<Record>>(result) {
                    Ok(list) => {
                        tracing::info!(rows = list.len(), "table fetched");
                        ctx.update(WidgetPatch::loaded(list));
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "success payload has no usable result");
                        ctx.update(WidgetPatch::loading(false));
                    }
                }
            })
            .on(ActionType::FetchTableFailed, |ctx| {
                let detail = Value::Object(ctx.action().payload.clone());
                tracing::error!(%detail, "table fetch failed");
                ctx.update(WidgetPatch::loading(false));
            });
    }

    fn view(&self, state: &WidgetState, emitter: &Emitter) -> Node {
        view::render(state, emitter, &self.defaults, self.list_style)
    }
}
