//! Routes actions to the handler registered for their type.

use std::collections::HashMap;

use crate::store::{State, Store};
use crate::{Action, ActionType, Effect};

/// A function bound to an action type.
pub type Handler<S> = Box<dyn Fn(&mut HandlerContext<'_, S>) + Send + Sync + 'static>;

/// Box a closure as a [`Handler`].
pub fn handler<S, F>(f: F) -> Handler<S>
where
    S: State,
    F: Fn(&mut HandlerContext<'_, S>) + Send + Sync + 'static,
{
    Box::new(f)
}

/// Action-type keyed handler map.
pub struct HandlerRegistry<S: State> {
    handlers: HashMap<ActionType, Handler<S>>,
}

impl<S: State> Default for HandlerRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> HandlerRegistry<S> {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Bind `handler` to `kind`, replacing any earlier binding.
    pub fn on<F>(&mut self, kind: ActionType, handler: F) -> &mut Self
    where
        F: Fn(&mut HandlerContext<'_, S>) + Send + Sync + 'static,
    {
        self.insert(kind, self::handler(handler))
    }

    pub fn insert(&mut self, kind: ActionType, handler: Handler<S>) -> &mut Self {
        if self.handlers.insert(kind.clone(), handler).is_some() {
            tracing::debug!(action = %kind, "replaced existing handler");
        }
        self
    }

    pub fn contains(&self, kind: &ActionType) -> bool {
        self.handlers.contains_key(kind)
    }

    fn get(&self, kind: &ActionType) -> Option<&Handler<S>> {
        self.handlers.get(kind)
    }
}

/// Everything a handler may touch while it runs.
///
/// State is only changed through [`update`](Self::update). Follow-up actions go
/// through [`dispatch`](Self::dispatch), which runs the nested handler to
/// completion before returning. Asynchronous work is scheduled with
/// [`spawn`](Self::spawn) and starts after the outermost action is done.
pub struct HandlerContext<'a, S: State> {
    action: &'a Action,
    dispatcher: &'a Dispatcher<S>,
    effects: &'a mut Vec<Effect>,
}

impl<'a, S: State> HandlerContext<'a, S> {
    pub fn action(&self) -> &Action {
        self.action
    }

    /// Current state, including updates made earlier in this handler.
    pub fn state(&self) -> S {
        self.dispatcher.store.get_state()
    }

    pub fn update(&mut self, patch: S::Patch) -> S {
        self.dispatcher.store.update(patch)
    }

    pub fn dispatch(&mut self, action: Action) {
        self.dispatcher.dispatch(action, self.effects);
    }

    pub fn spawn(&mut self, effect: Effect) {
        self.effects.push(effect);
    }
}

/// Owns the store and the handler map.
pub struct Dispatcher<S: State> {
    store: Store<S>,
    registry: HandlerRegistry<S>,
}

impl<S: State> Dispatcher<S> {
    pub fn new(initial: S, registry: HandlerRegistry<S>) -> Self {
        Self {
            store: Store::new(initial),
            registry,
        }
    }

    pub fn store(&self) -> &Store<S> {
        &self.store
    }

    pub fn get_state(&self) -> S {
        self.store.get_state()
    }

    /// Route `action` to its handler.
    ///
    /// Unregistered action types are dropped without touching the state.
    /// Effects scheduled by the handler chain are appended to `effects`.
    pub fn dispatch(&self, action: Action, effects: &mut Vec<Effect>) {
        let Some(handler) = self.registry.get(&action.kind) else {
            tracing::trace!(action = %action.kind, "no handler registered, dropping");
            return;
        };

        tracing::trace!(action = %action.kind, "dispatching");
        let mut context = HandlerContext {
            action: &action,
            dispatcher: self,
            effects,
        };
        handler(&mut context);
    }
}
