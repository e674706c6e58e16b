//! Immutable-per-update state store.

use spin::Mutex;

/// A state record that can be shallow-merged with a partial update.
///
/// `merge` must return a new value; fields absent from the patch carry over
/// from `self` unchanged.
pub trait State: Clone + Send + 'static {
    /// Partial update applied by [`Store::update`].
    type Patch;

    fn merge(&self, patch: Self::Patch) -> Self;
}

/// Holds the current state and a version counter bumped on every update.
///
/// The version is the "state changed" signal the runtime consumes to decide
/// whether to re-render. The lock is only held while reading or swapping the
/// state, never while a handler runs.
pub struct Store<S: State> {
    inner: Mutex<Versioned<S>>,
}

struct Versioned<S> {
    state: S,
    version: u64,
}

impl<S: State> Store<S> {
    pub fn new(initial: S) -> Self {
        Self {
            inner: Mutex::new(Versioned {
                state: initial,
                version: 0,
            }),
        }
    }

    /// Snapshot of the current state.
    pub fn get_state(&self) -> S {
        self.inner.lock().state.clone()
    }

    /// Shallow-merge `patch` into the current state and return the new state.
    pub fn update(&self, patch: S::Patch) -> S {
        let mut inner = self.inner.lock();
        let next = inner.state.merge(patch);
        inner.state = next.clone();
        inner.version += 1;
        next
    }

    pub fn version(&self) -> u64 {
        self.inner.lock().version
    }
}
