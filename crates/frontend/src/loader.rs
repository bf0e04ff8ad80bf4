use futures::future::{abortable, AbortHandle};
use futures_signals::signal::{Mutable, Signal};
use std::{
    future::Future,
    sync::atomic::{AtomicUsize, Ordering},
};

struct AsyncState {
    id: usize,
    handle: AbortHandle,
}

impl AsyncState {
    fn new(handle: AbortHandle) -> Self {
        static ID: AtomicUsize = AtomicUsize::new(0);

        let id = ID.fetch_add(1, Ordering::SeqCst);

        Self { id, handle }
    }
}

/// Holds the abort handle of at most one running task
pub struct AsyncLoader {
    loading: Mutable<Option<AsyncState>>,
}

impl Default for AsyncLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl AsyncLoader {
    pub fn new() -> Self {
        Self {
            loading: Mutable::new(None),
        }
    }

    /// abort the running task, `false` when nothing was running
    pub fn cancel(&self) -> bool {
        let mut loading = self.loading.lock_mut();

        if let Some(state) = loading.take() {
            state.handle.abort();
            true
        } else {
            false
        }
    }

    fn replace(&self, value: Option<AsyncState>) {
        let mut loading = self.loading.lock_mut();

        if let Some(state) = loading.as_mut() {
            state.handle.abort();
        }

        *loading = value;
    }

    /// Register `fut` as the running task (aborting the previous one)
    /// and return it wrapped, for the caller to drive.
    pub fn task<F>(&self, fut: F) -> impl Future<Output = ()> + 'static
    where
        F: Future<Output = ()> + 'static,
    {
        let (fut, handle) = abortable(fut);

        let state = AsyncState::new(handle);
        let id = state.id;

        self.replace(Some(state));

        let loading = self.loading.clone();

        async move {
            if let Ok(()) = fut.await {
                let mut loading = loading.lock_mut();

                if let Some(current_id) = loading.as_ref().map(|x| x.id) {
                    // If it hasn't been overwritten with a new state...
                    if current_id == id {
                        *loading = None;
                    }
                }
            } else {
                log::debug!("task {} aborted", id);
            }
        }
    }

    pub fn is_loading(&self) -> impl Signal<Item = bool> {
        self.loading.signal_ref(|x| x.is_some())
    }
}
