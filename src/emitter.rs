//! Action emitter for embedding callbacks in the view.

use flume::Sender;

use crate::Action;

/// Action emitter that can be embedded in a rendered view.
///
/// Clone this handle into event listeners so that user input queues actions
/// for the runtime. Completed effects use the same handle to report back.
///
/// `Emitter` wraps a channel sender, making it cheap to clone and safe to
/// move to other threads.
///
/// # Example
///
/// ```rust
/// use rest_table_mvu::{Action, ActionType, DomEvent, Emitter, Node};
///
/// fn name_input(name: &str, emitter: &Emitter) -> Node {
///     let emitter = emitter.clone();
///     Node::element("input")
///         .id("name-input")
///         .attr("value", name)
///         .on(DomEvent::KeyUp, move |data| {
///             emitter.emit(Action::new(ActionType::SetName).with("name", data.value));
///         })
/// }
/// ```
pub struct Emitter(pub(crate) Sender<Action>);

impl Clone for Emitter {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl Emitter {
    /// Create a new emitter from a channel sender.
    pub(crate) fn new(sender: Sender<Action>) -> Self {
        Self(sender)
    }

    /// Emit an action.
    ///
    /// This queues the action for processing by the runtime. Actions emitted
    /// after the runtime has shut down are dropped.
    pub fn emit(&self, action: Action) {
        if self.0.send(action).is_err() {
            tracing::trace!("runtime gone, dropping emitted action");
        }
    }
}
