use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use mockall::mock;
use rest_table_mvu::{BoxFuture, FetchError, HttpRequest, Spawner};
use serde_json::{json, Value};
use spin::Mutex;

mock! {
    pub Transport {}

    impl rest_table_mvu::Transport for Transport {
        fn send(&self, request: HttpRequest) -> BoxFuture<Result<Value, FetchError>>;
    }
}

pub(crate) const DEFAULT_TARGET: &str =
    "api/now/table/sys_user?sysparm_limit=10&sysparm_query=first_name%3DFred";

pub(crate) fn fred_flintstone() -> Value {
    json!({ "first_name": "Fred", "last_name": "Flintstone", "sys_id": "1" })
}

pub(crate) fn resolves(body: Value) -> BoxFuture<Result<Value, FetchError>> {
    Box::pin(async move { Ok(body) })
}

pub(crate) fn rejects(reason: &str) -> BoxFuture<Result<Value, FetchError>> {
    let reason = reason.to_string();
    Box::pin(async move { Err(FetchError::rejected(reason)) })
}

/// A transport that answers every request with an empty result.
pub(crate) fn empty_transport() -> MockTransport {
    let mut transport = MockTransport::new();
    transport
        .expect_send()
        .returning(|_| resolves(json!({ "result": [] })));
    transport
}

/// Holds spawned effects until the test decides to run them.
#[derive(Clone, Default)]
pub(crate) struct DeferredSpawner {
    pending: Arc<Mutex<Vec<Pin<Box<dyn Future<Output = ()> + Send>>>>>,
}

impl DeferredSpawner {
    pub(crate) fn pending(&self) -> usize {
        self.pending.lock().len()
    }

    /// Run the effect spawned `index`-th among those still pending.
    pub(crate) fn run(&self, index: usize) {
        let future = self.pending.lock().remove(index);
        futures::executor::block_on(future);
    }
}

impl Spawner for DeferredSpawner {
    fn spawn(&self, future: Pin<Box<dyn Future<Output = ()> + Send>>) {
        self.pending.lock().push(future);
    }
}
