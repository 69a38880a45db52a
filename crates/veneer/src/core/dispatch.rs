//! Cross-thread scheduling onto the UI-affine [`Context`].
//!
//! The crate is single-threaded by design. The one concession to other
//! threads is this hop: a [`Handle`] can be cloned onto any thread and used
//! to post closures that the screen host later drains, in order, on the UI
//! thread via [`Context::drain_pending`].

use std::sync::mpsc;

use crate::core::context::Context;

/// A deferred unit of work run against the context on the UI thread.
pub type Task = Box<dyn FnOnce(&mut Context) + Send>;

/// Cloneable sender half of a context's task queue.
#[derive(Clone)]
pub struct Handle {
    tx: mpsc::Sender<Task>,
}

impl Handle {
    pub(crate) fn new(tx: mpsc::Sender<Task>) -> Self {
        Self { tx }
    }

    /// Queue a task for the next [`Context::drain_pending`] call.
    ///
    /// Returns false if the context has been dropped.
    pub fn post(&self, task: impl FnOnce(&mut Context) + Send + 'static) -> bool {
        self.tx.send(Box::new(task)).is_ok()
    }
}
