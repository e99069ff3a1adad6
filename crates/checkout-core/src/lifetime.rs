//! View Lifetime
//!
//! Ties in-flight work to the lifetime of the page that started it. When the
//! view is torn down the pending plan fetch is aborted and its result never
//! reaches view state.

use std::future::Future;

use futures::future::{AbortHandle, Abortable};

/// Cancellation scope for one view instance
#[derive(Debug)]
pub struct ViewLifetime {
    handles: Vec<AbortHandle>,
}

impl Default for ViewLifetime {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewLifetime {
    pub fn new() -> Self {
        Self { handles: Vec::new() }
    }

    /// Wrap a future so it is aborted with this lifetime.
    ///
    /// The returned future yields `None` when aborted.
    pub fn bind<F>(&mut self, fut: F) -> impl Future<Output = Option<F::Output>> + use<F>
    where
        F: Future,
    {
        let (handle, registration) = AbortHandle::new_pair();
        self.handles.push(handle);
        let abortable = Abortable::new(fut, registration);
        async move { abortable.await.ok() }
    }

    /// Handle that cancels everything bound so far, for teardown hooks
    pub fn canceller(&self) -> Canceller {
        Canceller {
            handles: self.handles.clone(),
        }
    }

    pub fn cancel(&self) {
        for handle in &self.handles {
            handle.abort();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        !self.handles.is_empty() && self.handles.iter().all(AbortHandle::is_aborted)
    }
}

impl Drop for ViewLifetime {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Detached cancel handle; `Send + Sync` so it fits UI cleanup callbacks
#[derive(Clone, Debug)]
pub struct Canceller {
    handles: Vec<AbortHandle>,
}

impl Canceller {
    pub fn cancel(&self) {
        for handle in &self.handles {
            handle.abort();
        }
    }
}
