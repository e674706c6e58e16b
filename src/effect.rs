//! Declarative effect system for describing deferred action processing.

use core::future::Future;
use core::pin::Pin;

use crate::{Action, Emitter};

/// A boxed, sendable future as handed to a [`Spawner`](crate::Spawner).
pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send + 'static>>;

/// Declarative description of deferred work that produces actions.
///
/// Handlers schedule effects through
/// [`HandlerContext::spawn`](crate::HandlerContext::spawn). The runtime
/// executes them on its spawner once the current action has been fully
/// processed, so whatever they emit arrives later as a new, independent event.
///
/// # Example
///
/// ```rust
/// use rest_table_mvu::{Action, ActionType, Effect};
///
/// // Trigger a follow-up action
/// let effect = Effect::just(Action::new(ActionType::FetchTable));
///
/// // Combine multiple effects
/// let effect = Effect::batch(vec![
///     Effect::just(Action::new(ActionType::SetName).with("name", "Wilma")),
///     Effect::just(Action::new(ActionType::FetchTable)),
/// ]);
///
/// // No side effects
/// let effect = Effect::none();
/// ```
#[allow(clippy::type_complexity)]
pub struct Effect(Box<dyn FnOnce(Emitter) -> BoxFuture<()> + Send + 'static>);

impl Effect {
    /// Start the effect, returning the future that drives it.
    pub fn execute(self, emitter: Emitter) -> BoxFuture<()> {
        (self.0)(emitter)
    }

    /// Create an effect that emits a single action.
    pub fn just(action: Action) -> Self {
        Self(Box::new(move |emitter: Emitter| -> BoxFuture<()> {
            Box::pin(async move {
                emitter.emit(action);
            })
        }))
    }

    /// Create an empty effect.
    pub fn none() -> Self {
        Self(Box::new(|_: Emitter| -> BoxFuture<()> { Box::pin(async {}) }))
    }

    /// Create an effect from an async closure that receives the emitter.
    ///
    /// ```rust
    /// use rest_table_mvu::{Action, ActionType, Effect};
    ///
    /// let effect = Effect::future(|emitter| async move {
    ///     emitter.emit(Action::new(ActionType::FetchTableSucceeded));
    /// });
    /// ```
    pub fn future<F, Fut>(f: F) -> Self
    where
        F: FnOnce(Emitter) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        Self(Box::new(move |emitter: Emitter| -> BoxFuture<()> {
            Box::pin(f(emitter))
        }))
    }

    /// Combine multiple effects into a single effect, run in order.
    pub fn batch(effects: Vec<Effect>) -> Self {
        Self(Box::new(move |emitter: Emitter| -> BoxFuture<()> {
            Box::pin(async move {
                for effect in effects {
                    effect.execute(emitter.clone()).await;
                }
            })
        }))
    }
}
