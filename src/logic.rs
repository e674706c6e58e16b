//! Component logic trait defining the state/action/view contract.

use crate::dispatcher::HandlerRegistry;
use crate::store::State;
use crate::Emitter;

/// Component logic hosted by a [`WidgetRuntime`](crate::WidgetRuntime).
///
/// Implementations provide two things:
/// - [`register`](Self::register): bind handlers to action types
/// - [`view`](Self::view): derive Props from state, with an emitter for callbacks
///
/// All state changes happen inside handlers; `view` must stay pure.
pub trait ComponentLogic<S: State, Props> {
    /// Bind this component's handlers.
    ///
    /// Called once, when the runtime is constructed. Lifecycle handlers are
    /// registered here like any other.
    fn register(&self, registry: &mut HandlerRegistry<S>);

    /// Reduce to Props from the current state.
    ///
    /// The provided [`Emitter`] lets Props carry listeners that queue actions.
    fn view(&self, state: &S, emitter: &Emitter) -> Props;
}

impl<S: State, Props, L: ComponentLogic<S, Props> + ?Sized> ComponentLogic<S, Props> for Box<L> {
    fn register(&self, registry: &mut HandlerRegistry<S>) {
        (**self).register(registry)
    }

    fn view(&self, state: &S, emitter: &Emitter) -> Props {
        (**self).view(state, emitter)
    }
}
