use std::future::Future;
use web_sys::{AbortController, AbortSignal};

use crate::error::FetchError;

/// A guard that cancels its request when dropped unsettled
pub trait Settle {
    fn settle(self);
}

/// Owns the `AbortController` of one request.
/// Dropping it before [`Abort::settle`] aborts the request.
pub struct Abort {
    controller: AbortController,
    url: String,
    settled: bool,
}

impl Abort {
    pub fn new(url: &str) -> Result<Self, FetchError> {
        Ok(Self {
            controller: AbortController::new()?,
            url: url.to_owned(),
            settled: false,
        })
    }

    pub fn signal(&self) -> AbortSignal {
        self.controller.signal()
    }
}

impl Settle for Abort {
    fn settle(mut self) {
        self.settled = true;
    }
}

impl Drop for Abort {
    fn drop(&mut self) {
        if !self.settled {
            log::debug!("abort in-flight request to {}", self.url);
            self.controller.abort();
        }
    }
}

/// Drive `request` to its end, then settle `guard` whatever the result.
/// Dropping the returned future midway still drops `guard` unsettled.
pub async fn until_settled<G, F>(guard: G, request: F) -> F::Output
where
    G: Settle,
    F: Future,
{
    let output = request.await;
    guard.settle();
    output
}

#[cfg(test)]
pub mod tests {
    use futures::{channel::oneshot, executor::LocalPool, task::LocalSpawnExt};
    use std::{cell::Cell, rc::Rc};

    use super::{until_settled, Settle};

    /// counts `settle` calls and unsettled drops
    struct Counted {
        settled: Rc<Cell<usize>>,
        aborted: Rc<Cell<usize>>,
        done: bool,
    }

    impl Counted {
        fn new() -> (Self, Rc<Cell<usize>>, Rc<Cell<usize>>) {
            let settled = Rc::new(Cell::new(0));
            let aborted = Rc::new(Cell::new(0));
            (Self { settled: settled.clone(), aborted: aborted.clone(), done: false }, settled, aborted)
        }
    }

    impl Settle for Counted {
        fn settle(mut self) {
            self.done = true;
            self.settled.set(self.settled.get() + 1);
        }
    }

    impl Drop for Counted {
        fn drop(&mut self) {
            if !self.done {
                self.aborted.set(self.aborted.get() + 1);
            }
        }
    }

    #[test]
    pub fn test_failed_body_read_is_settled_not_aborted() {
        let (guard, settled, aborted) = Counted::new();
        let output = futures::executor::block_on(until_settled(guard, async {
            Err::<u32, &str>("SyntaxError: Unexpected end of JSON input")
        }));

        assert!(output.is_err());
        assert_eq!(settled.get(), 1);
        assert_eq!(aborted.get(), 0);
    }

    #[test]
    pub fn test_dropped_request_is_aborted() {
        let mut pool = LocalPool::new();
        let (guard, settled, aborted) = Counted::new();
        let (tx, rx) = oneshot::channel::<()>();
        let (cancel_tx, cancel_rx) = oneshot::channel::<()>();

        pool.spawner().spawn_local(async move {
            let request = until_settled(guard, rx);
            futures::pin_mut!(request);
            // first of the two wins, the request future is dropped with this task
            let _ = futures::future::select(request, cancel_rx).await;
        }).unwrap();
        pool.run_until_stalled();

        cancel_tx.send(()).unwrap();
        pool.run_until_stalled();

        assert!(tx.send(()).is_err());
        assert_eq!(settled.get(), 0);
        assert_eq!(aborted.get(), 1);
    }
}
