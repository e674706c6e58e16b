//! The runtime that orchestrates the action loop.

use core::future::Future;
use core::pin::Pin;

use flume::Receiver;

use crate::dispatcher::{Dispatcher, HandlerRegistry};
use crate::store::State;
use crate::{Action, ActionType, ComponentLogic, Effect, Emitter, Lifecycle, Renderer};

/// A spawner trait for executing futures on an async runtime.
///
/// This abstraction allows you to use whatever concurrency model you want
/// (tokio, async-std, a synchronous executor in tests).
///
/// Function pointers and closures automatically implement this trait via the
/// blanket implementation.
pub trait Spawner {
    /// Spawn a future on the async runtime.
    fn spawn(&self, future: Pin<Box<dyn Future<Output = ()> + Send>>);
}

/// Implement Spawner for any callable type that matches the signature.
impl<F> Spawner for F
where
    F: Fn(Pin<Box<dyn Future<Output = ()> + Send>>),
{
    fn spawn(&self, future: Pin<Box<dyn Future<Output = ()> + Send>>) {
        self(future)
    }
}

/// The runtime that orchestrates the action loop.
///
/// It:
/// 1. Registers the component's handlers via [`ComponentLogic::register`]
/// 2. Renders the initial state and queues the `Mounted` lifecycle action
/// 3. Dispatches queued actions one at a time, in order
/// 4. Re-renders via [`ComponentLogic::view`] whenever an action changed the state
/// 5. Spawns the effects scheduled by handlers once their action is done
///
/// Actions may be emitted from any thread via the [`Emitter`], but they are
/// always processed sequentially on the task driving [`WidgetRuntime::run`].
///
/// For testing with manual control, use [`TestWidgetRuntime`] with a
/// [`crate::TestRenderer`].
pub struct WidgetRuntime<S, Props, Logic, Render, Spawn>
where
    S: State,
    Logic: ComponentLogic<S, Props>,
    Render: Renderer<Props>,
    Spawn: Spawner,
{
    logic: Logic,
    renderer: Render,
    dispatcher: Dispatcher<S>,
    action_receiver: Receiver<Action>,
    emitter: Emitter,
    spawner: Spawn,
    rendered_version: u64,
    _props: core::marker::PhantomData<Props>,
}

impl<S, Props, Logic, Render, Spawn> WidgetRuntime<S, Props, Logic, Render, Spawn>
where
    S: State,
    Props: 'static,
    Logic: ComponentLogic<S, Props>,
    Render: Renderer<Props>,
    Spawn: Spawner,
{
    /// Create a new runtime.
    ///
    /// The runtime will not be started until [`WidgetRuntime::run`] is called.
    ///
    /// # Arguments
    ///
    /// * `initial_state` - The initial state
    /// * `logic` - Component logic implementing [`ComponentLogic`]
    /// * `renderer` - Platform rendering implementation for rendering Props
    /// * `spawner` - Spawner to execute async effects on your chosen runtime
    pub fn new(initial_state: S, logic: Logic, renderer: Render, spawner: Spawn) -> Self {
        let (action_sender, action_receiver) = flume::unbounded();

        let mut registry = HandlerRegistry::new();
        logic.register(&mut registry);

        WidgetRuntime {
            logic,
            renderer,
            dispatcher: Dispatcher::new(initial_state, registry),
            action_receiver,
            emitter: Emitter::new(action_sender),
            spawner,
            rendered_version: 0,
            _props: core::marker::PhantomData,
        }
    }

    /// A handle for queueing actions from outside the view.
    pub fn emitter(&self) -> Emitter {
        self.emitter.clone()
    }

    pub fn state(&self) -> S {
        self.dispatcher.get_state()
    }

    /// Mount the component and run the action loop until it is unmounted.
    ///
    /// - Renders the initial state.
    /// - Queues [`Lifecycle::Mounted`].
    /// - Processes queued actions until [`Lifecycle::Unmounted`] has been handled.
    pub async fn run(&mut self) {
        self.mount();

        while let Ok(action) = self.action_receiver.recv_async().await {
            if !self.step(action) {
                break;
            }
        }
        tracing::debug!("runtime stopped");
    }

    fn mount(&mut self) {
        self.render();
        self.emitter.emit(Action::lifecycle(Lifecycle::Mounted));
    }

    fn render(&mut self) {
        let state = self.dispatcher.get_state();
        let props = self.logic.view(&state, &self.emitter);
        self.renderer.render(props);
        self.rendered_version = self.dispatcher.store().version();
        tracing::debug!(version = self.rendered_version, "rendered");
    }

    /// Process one action. Returns false once the component is unmounted.
    fn step(&mut self, action: Action) -> bool {
        let unmounting = action.kind == ActionType::UNMOUNTED;

        let mut effects = Vec::new();
        self.dispatcher.dispatch(action, &mut effects);

        if self.dispatcher.store().version() != self.rendered_version {
            self.render();
        }

        for effect in effects {
            self.execute(effect);
        }

        !unmounting
    }

    fn execute(&self, effect: Effect) {
        let future = effect.execute(self.emitter.clone());
        self.spawner.spawn(future);
    }
}

#[cfg(any(test, feature = "testing"))]
/// Test spawner function that executes futures synchronously.
///
/// This blocks on the future immediately rather than spawning it on an async runtime.
pub fn test_spawner_fn(fut: Pin<Box<dyn Future<Output = ()> + Send>>) {
    futures::executor::block_on(fut);
}

#[cfg(any(test, feature = "testing"))]
/// Creates a test spawner that executes futures synchronously.
///
/// Effects still report back through the action queue, so their follow-up
/// actions are only handled on the next
/// [`process_events`](TestWidgetDriver::process_events).
pub fn create_test_spawner() -> fn(Pin<Box<dyn Future<Output = ()> + Send>>) {
    test_spawner_fn
}

#[cfg(any(test, feature = "testing"))]
/// Test runtime driver for manual action processing control.
///
/// Only available with the `testing` feature or during tests.
///
/// Returned by [`TestWidgetRuntime::run`].
pub struct TestWidgetDriver<S, Props, Logic, Render, Spawn>
where
    S: State,
    Props: 'static,
    Logic: ComponentLogic<S, Props>,
    Render: Renderer<Props>,
    Spawn: Spawner,
{
    runtime: WidgetRuntime<S, Props, Logic, Render, Spawn>,
    unmounted: bool,
}

#[cfg(any(test, feature = "testing"))]
impl<S, Props, Logic, Render, Spawn> TestWidgetDriver<S, Props, Logic, Render, Spawn>
where
    S: State,
    Props: 'static,
    Logic: ComponentLogic<S, Props>,
    Render: Renderer<Props>,
    Spawn: Spawner,
{
    /// Process all queued actions.
    ///
    /// Keeps going until the queue is empty, including actions emitted by
    /// effects spawned along the way. Stops early once the component has
    /// been unmounted.
    pub fn process_events(&mut self) {
        while !self.unmounted {
            let Ok(action) = self.runtime.action_receiver.try_recv() else {
                break;
            };
            self.unmounted = !self.runtime.step(action);
        }
    }

    /// Queue an action as if a listener had emitted it.
    pub fn emit(&self, action: Action) {
        self.runtime.emitter.emit(action);
    }

    pub fn emitter(&self) -> Emitter {
        self.runtime.emitter()
    }

    pub fn state(&self) -> S {
        self.runtime.state()
    }

    pub fn is_unmounted(&self) -> bool {
        self.unmounted
    }

    /// Number of actions waiting in the queue.
    pub fn queued(&self) -> usize {
        self.runtime.action_receiver.len()
    }
}

#[cfg(any(test, feature = "testing"))]
/// Test runtime with manual action processing control.
///
/// Only available with the `testing` feature or during tests.
///
/// Unlike [`WidgetRuntime`], this runtime does not process actions on its
/// own. Tests call [`process_events`](TestWidgetDriver::process_events) on
/// the returned driver to drain the queue, which gives precise control over
/// timing.
pub struct TestWidgetRuntime<S, Props, Logic, Render, Spawn>
where
    S: State,
    Props: 'static,
    Logic: ComponentLogic<S, Props>,
    Render: Renderer<Props>,
    Spawn: Spawner,
{
    runtime: WidgetRuntime<S, Props, Logic, Render, Spawn>,
}

#[cfg(any(test, feature = "testing"))]
impl<S, Props, Logic, Render, Spawn> TestWidgetRuntime<S, Props, Logic, Render, Spawn>
where
    S: State,
    Props: 'static,
    Logic: ComponentLogic<S, Props>,
    Render: Renderer<Props>,
    Spawn: Spawner,
{
    pub fn new(initial_state: S, logic: Logic, renderer: Render, spawner: Spawn) -> Self {
        TestWidgetRuntime {
            runtime: WidgetRuntime::new(initial_state, logic, renderer, spawner),
        }
    }

    /// Renders the initial state, queues `Mounted`, and returns a driver.
    ///
    /// `Mounted` is not handled until the first
    /// [`process_events`](TestWidgetDriver::process_events).
    pub fn run(mut self) -> TestWidgetDriver<S, Props, Logic, Render, Spawn> {
        self.runtime.mount();

        TestWidgetDriver {
            runtime: self.runtime,
            unmounted: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HandlerRegistry, TestRenderer};

    #[derive(Clone, Debug, PartialEq)]
    struct Counter {
        count: u32,
    }

    impl State for Counter {
        type Patch = u32;

        fn merge(&self, count: u32) -> Self {
            Counter { count }
        }
    }

    struct CounterLogic;

    fn bump() -> ActionType {
        ActionType::Custom("BUMP".to_string())
    }

    impl ComponentLogic<Counter, u32> for CounterLogic {
        fn register(&self, registry: &mut HandlerRegistry<Counter>) {
            registry
                .on(ActionType::MOUNTED, |ctx| {
                    ctx.spawn(Effect::just(Action::new(bump())));
                })
                .on(bump(), |ctx| {
                    let next = ctx.state().count + 1;
                    ctx.update(next);
                });
        }

        fn view(&self, state: &Counter, _emitter: &Emitter) -> u32 {
            state.count
        }
    }

    #[test]
    fn mount_renders_once_before_any_action() {
        let renderer = TestRenderer::new();
        let runtime = TestWidgetRuntime::new(
            Counter { count: 0 },
            CounterLogic,
            renderer.clone(),
            create_test_spawner(),
        );

        let _driver = runtime.run();

        renderer.with_renders(|renders| assert_eq!(renders, &vec![0]));
    }

    #[test]
    fn effects_emitted_on_mount_are_processed_in_the_same_drain() {
        let renderer = TestRenderer::new();
        let runtime = TestWidgetRuntime::new(
            Counter { count: 0 },
            CounterLogic,
            renderer.clone(),
            create_test_spawner(),
        );
        let mut driver = runtime.run();

        driver.process_events();

        // Mounted itself changes nothing, so it does not render.
        renderer.with_renders(|renders| assert_eq!(renders, &vec![0, 1]));
        assert_eq!(driver.state(), Counter { count: 1 });
    }

    #[test]
    fn unmounted_stops_processing() {
        let renderer = TestRenderer::new();
        let runtime = TestWidgetRuntime::new(
            Counter { count: 0 },
            CounterLogic,
            renderer.clone(),
            create_test_spawner(),
        );
        let mut driver = runtime.run();

        driver.emit(Action::lifecycle(Lifecycle::Unmounted));
        driver.emit(Action::new(bump()));
        driver.process_events();

        assert!(driver.is_unmounted());
        // Mounted's bump effect was queued behind Unmounted and never ran.
        assert_eq!(driver.state(), Counter { count: 0 });
    }
}
