//! Renderer abstraction for rendering Props.

use std::io::Write;
use std::sync::Arc;

use spin::Mutex;

use crate::view::Node;

/// Renderer abstraction for rendering Props.
///
/// Implement this trait to hand the view output to whatever draws it
/// (a DOM bridge, a terminal, a test harness).
///
/// [`render`](Self::render) is called with the initial Props and again
/// after every action that changed the state.
///
/// # Example
///
/// ```rust
/// use rest_table_mvu::{Node, Renderer};
///
/// struct ConsoleRenderer;
///
/// impl Renderer<Node> for ConsoleRenderer {
///     fn render(&mut self, props: Node) {
///         print!("{}", props.to_markup());
///     }
/// }
/// ```
pub trait Renderer<Props> {
    /// Render the given props.
    ///
    /// Props may contain listeners (via [`Emitter`](crate::Emitter)) that
    /// queue new actions.
    fn render(&mut self, props: Props);
}

impl<Props, R: Renderer<Props> + ?Sized> Renderer<Props> for Box<R> {
    fn render(&mut self, props: Props) {
        (**self).render(props)
    }
}

/// Writes each rendered tree as markup and keeps the latest one around.
///
/// The latest tree is shared, so another thread (e.g. a stdin reader) can
/// look up inputs in it and fire DOM events.
pub struct MarkupRenderer<W: Write> {
    out: W,
    latest: Arc<Mutex<Option<Node>>>,
}

impl<W: Write> MarkupRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            latest: Arc::new(Mutex::new(None)),
        }
    }

    /// Shared handle to the most recently rendered tree.
    pub fn latest(&self) -> Arc<Mutex<Option<Node>>> {
        self.latest.clone()
    }
}

impl<W: Write> Renderer<Node> for MarkupRenderer<W> {
    fn render(&mut self, props: Node) {
        let markup = props.to_markup();
        if let Err(err) = self
            .out
            .write_all(markup.as_bytes())
            .and_then(|_| self.out.flush())
        {
            tracing::warn!(error = %err, "failed to write rendered markup");
        }
        *self.latest.lock() = Some(props);
    }
}

#[cfg(any(test, feature = "testing"))]
/// Test renderer that captures all rendered Props for assertions.
///
/// Only available with the `testing` feature.
///
/// Use this with [`TestWidgetRuntime`](crate::TestWidgetRuntime) to capture
/// and inspect Props in integration tests.
pub struct TestRenderer<Props> {
    renders: Arc<Mutex<Vec<Props>>>,
}

#[cfg(any(test, feature = "testing"))]
impl<Props> Clone for TestRenderer<Props> {
    fn clone(&self) -> Self {
        Self {
            renders: self.renders.clone(),
        }
    }
}

#[cfg(any(test, feature = "testing"))]
impl<Props> Renderer<Props> for TestRenderer<Props> {
    fn render(&mut self, props: Props) {
        self.renders.lock().push(props);
    }
}

#[cfg(any(test, feature = "testing"))]
impl<Props> Default for TestRenderer<Props> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(any(test, feature = "testing"))]
impl<Props> TestRenderer<Props> {
    pub fn new() -> Self {
        Self {
            renders: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get the number of renders that have occurred.
    pub fn count(&self) -> usize {
        self.renders.lock().len()
    }

    /// Access the captured renders with a closure.
    ///
    /// The closure receives every captured Props in render order. Use it to
    /// make assertions or to fire listeners held by a rendered tree.
    ///
    /// Listeners only queue actions, so firing them here does not re-enter
    /// the renderer.
    pub fn with_renders<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Vec<Props>) -> R,
    {
        let renders = self.renders.lock();
        f(&renders)
    }

    /// Access the most recent render.
    ///
    /// # Panics
    ///
    /// Panics if nothing has been rendered yet.
    pub fn with_latest<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Props) -> R,
    {
        let renders = self.renders.lock();
        f(renders.last().expect("nothing rendered yet"))
    }
}
