//! A small state/action/effect runtime for Rust, and the REST table widget it hosts.
//!
//! The runtime keeps data flowing one way. The view emits named actions, and
//! the dispatcher routes each action to one handler. Handlers merge partial
//! updates into the state or schedule effects, and every state change
//! re-renders the view. Effects report back with follow-up actions that are
//! queued like any other.
//!
//! ## Example
//!
//! ```rust
//! use rest_table_mvu::{
//!     Action, ActionType, ComponentLogic, Emitter, HandlerRegistry, Renderer, State,
//!     WidgetRuntime,
//! };
//!
//! #[derive(Clone)]
//! struct Model { count: i32 }
//!
//! impl State for Model {
//!     type Patch = i32;
//!     fn merge(&self, count: i32) -> Self { Model { count } }
//! }
//!
//! struct Props { count: i32, on_accumulate_click: Box<dyn Fn()> }
//!
//! fn accumulate() -> ActionType { ActionType::Custom("ACCUMULATE".into()) }
//!
//! struct MyLogic;
//!
//! impl ComponentLogic<Model, Props> for MyLogic {
//!     fn register(&self, registry: &mut HandlerRegistry<Model>) {
//!         registry.on(accumulate(), |ctx| {
//!             let next = ctx.state().count + 1;
//!             ctx.update(next);
//!         });
//!     }
//!
//!     fn view(&self, model: &Model, emitter: &Emitter) -> Props {
//!         let emitter = emitter.clone();
//!         Props {
//!             count: model.count,
//!             on_accumulate_click: Box::new(move || emitter.emit(Action::new(accumulate()))),
//!         }
//!     }
//! }
//!
//! struct MyRenderer;
//! impl Renderer<Props> for MyRenderer {
//!     fn render(&mut self, _props: Props) {}
//! }
//!
//! use std::future::Future;
//! use std::pin::Pin;
//!
//! let spawner = |_fut: Pin<Box<dyn Future<Output = ()> + Send>>| {
//!     // Spawn the future on your chosen runtime, e.g. tokio::spawn(fut);
//! };
//!
//! let runtime = WidgetRuntime::new(Model { count: 0 }, MyLogic, MyRenderer, spawner);
//! // runtime.run().await;
//! # drop(runtime);
//! ```

mod action;
pub mod config;
mod dispatcher;
mod effect;
mod emitter;
pub mod error;
mod fetch;
mod logic;
mod renderer;
mod runtime;
mod store;
pub mod transport;
pub mod view;
pub mod widget;

// Public re-exports
pub use action::{Action, ActionType, Lifecycle, Payload};
pub use config::{ListStyle, WidgetConfig};
pub use dispatcher::{handler, Dispatcher, Handler, HandlerContext, HandlerRegistry};
pub use effect::{BoxFuture, Effect};
pub use emitter::Emitter;
pub use error::{FetchError, WidgetError};
pub use fetch::{RemoteFetch, RequestDescriptor};
pub use logic::ComponentLogic;
pub use renderer::{MarkupRenderer, Renderer};
pub use runtime::{Spawner, WidgetRuntime};
pub use store::{State, Store};
pub use transport::{Credentials, HttpRequest, Method, ReqwestTransport, Transport};
pub use view::{DomEvent, EventData, Node};
pub use widget::{Record, TableWidget, WidgetPatch, WidgetState};

// Test utilities (only available with 'testing' feature or during tests)
#[cfg(any(test, feature = "testing"))]
pub use renderer::TestRenderer;
#[cfg(any(test, feature = "testing"))]
pub use runtime::{create_test_spawner, TestWidgetDriver, TestWidgetRuntime};

/// Install a `tracing` subscriber filtered by `RUST_LOG` (default `info`).
///
/// Logs go to stderr so they do not interleave with rendered markup.
pub fn trace_init() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
    {
        tracing::trace!("Loading RestTableMvu...");
    }
}
