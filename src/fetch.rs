//! Declarative remote fetch: request descriptors and the effect that runs them.
//!
//! A [`RequestDescriptor`] is built once when handlers are registered. Each
//! time its action is dispatched, the descriptor is evaluated against the
//! action payload to produce an [`HttpRequest`]. A fetch invocation moves
//! through idle → in-flight → resolved, emitting exactly one of the success or
//! error actions unless a newer invocation superseded it first.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde_json::Value;

use crate::dispatcher::{self, Handler, HandlerContext};
use crate::error::FetchError;
use crate::store::State;
use crate::transport::{HttpRequest, Method, Transport};
use crate::{Action, ActionType, Effect, Payload};

/// Configuration record for one remote fetch.
#[derive(Clone, Debug, PartialEq)]
pub struct RequestDescriptor {
    pub method: Method,
    /// Path with `:name` segments, e.g. `api/now/table/:table_name`.
    pub path: String,
    pub path_params: Vec<String>,
    pub query_params: Vec<String>,
    pub start_action: Option<ActionType>,
    pub success_action: ActionType,
    pub error_action: ActionType,
}

impl RequestDescriptor {
    /// GET descriptor with no declared parameters and no start action.
    pub fn get(path: impl Into<String>, success: ActionType, error: ActionType) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            path_params: Vec::new(),
            query_params: Vec::new(),
            start_action: None,
            success_action: success,
            error_action: error,
        }
    }

    pub fn path_params<I, P>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        self.path_params = params.into_iter().map(Into::into).collect();
        self
    }

    pub fn query_params<I, P>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        self.query_params = params.into_iter().map(Into::into).collect();
        self
    }

    pub fn start_action(mut self, kind: ActionType) -> Self {
        self.start_action = Some(kind);
        self
    }

    /// Interpolate the path template and append declared query parameters.
    ///
    /// ```rust
    /// use rest_table_mvu::{ActionType, RequestDescriptor};
    /// use serde_json::json;
    ///
    /// let descriptor = RequestDescriptor::get(
    ///     "api/now/table/:table_name",
    ///     ActionType::FetchTableSucceeded,
    ///     ActionType::FetchTableFailed,
    /// )
    /// .path_params(["table_name"])
    /// .query_params(["sysparm_limit", "sysparm_query"]);
    ///
    /// let payload = json!({
    ///     "table_name": "sys_user",
    ///     "sysparm_limit": 10,
    ///     "sysparm_query": "first_name=Fred",
    /// });
    /// let target = descriptor.target(payload.as_object().unwrap()).unwrap();
    /// assert_eq!(
    ///     target,
    ///     "api/now/table/sys_user?sysparm_limit=10&sysparm_query=first_name%3DFred"
    /// );
    /// ```
    pub fn target(&self, payload: &Payload) -> Result<String, FetchError> {
        let mut segments = Vec::new();
        for segment in self.path.split('/') {
            match segment.strip_prefix(':') {
                Some(name) if self.declares_path_param(name) => {
                    let value = payload
                        .get(name)
                        .and_then(param_value)
                        .ok_or_else(|| FetchError::missing_path_param(name))?;
                    segments.push(urlencoding::encode(&value).into_owned());
                }
                _ => segments.push(segment.to_string()),
            }
        }
        let mut target = segments.join("/");

        let query: Vec<String> = self
            .query_params
            .iter()
            .filter_map(|name| {
                let value = payload.get(name).and_then(param_value)?;
                Some(format!(
                    "{}={}",
                    urlencoding::encode(name),
                    urlencoding::encode(&value)
                ))
            })
            .collect();
        if !query.is_empty() {
            target.push('?');
            target.push_str(&query.join("&"));
        }

        Ok(target)
    }

    pub fn request(&self, payload: &Payload) -> Result<HttpRequest, FetchError> {
        Ok(HttpRequest {
            method: self.method,
            target: self.target(payload)?,
        })
    }

    fn declares_path_param(&self, name: &str) -> bool {
        self.path_params.iter().any(|param| param == name)
    }
}

/// Text form of a parameter value. Null counts as absent.
fn param_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// A descriptor bound to a transport, with latest-wins bookkeeping.
///
/// Every invocation takes a new generation number. When a response arrives
/// for a generation that is no longer current, its terminal action is dropped.
/// Cloning shares the generation counter.
#[derive(Clone)]
pub struct RemoteFetch {
    descriptor: Arc<RequestDescriptor>,
    transport: Arc<dyn Transport>,
    generation: Arc<AtomicU64>,
}

impl RemoteFetch {
    pub fn new(descriptor: RequestDescriptor, transport: Arc<dyn Transport>) -> Self {
        Self {
            descriptor: Arc::new(descriptor),
            transport,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn descriptor(&self) -> &RequestDescriptor {
        &self.descriptor
    }

    /// Supersede whatever is in flight; its result will be discarded.
    pub fn cancel_in_flight(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    /// Enter the in-flight state for `payload`.
    ///
    /// Dispatches the start action re-entrantly, then schedules the request.
    pub fn start<S: State>(&self, ctx: &mut HandlerContext<'_, S>, payload: &Payload) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let descriptor = self.descriptor.clone();

        if let Some(start) = &descriptor.start_action {
            ctx.dispatch(Action::from_json(
                start.clone(),
                Value::Object(payload.clone()),
            ));
        }

        let request = match descriptor.request(payload) {
            Ok(request) => request,
            Err(err) => {
                tracing::error!(error = %err, "could not build request");
                ctx.spawn(Effect::just(Action {
                    kind: descriptor.error_action.clone(),
                    payload: err.to_payload(),
                }));
                return;
            }
        };

        tracing::info!(
            method = request.method.as_str(),
            target = %request.target,
            generation,
            "fetch started"
        );

        let transport = self.transport.clone();
        let current = self.generation.clone();
        ctx.spawn(Effect::future(move |emitter| async move {
            let outcome = transport.send(request).await;

            if current.load(Ordering::SeqCst) != generation {
                tracing::debug!(generation, "dropping superseded response");
                return;
            }

            let action = match outcome {
                Ok(body) => Action::from_json(descriptor.success_action.clone(), body),
                Err(err) => Action {
                    kind: descriptor.error_action.clone(),
                    payload: err.to_payload(),
                },
            };
            emitter.emit(action);
        }));
    }

    /// Handler that starts this fetch with the dispatched action's payload.
    pub fn handler<S: State>(&self) -> Handler<S> {
        let fetch = self.clone();
        dispatcher::handler(move |ctx| {
            let payload = ctx.action().payload.clone();
            fetch.start(ctx, &payload);
        })
    }
}
