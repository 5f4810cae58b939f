//! De-duplication of access-token refreshes.
//!
//! When several requests hit 401 at once, only the first one (the leader)
//! calls `/auth/refresh/`; the others park a oneshot receiver and get the
//! leader's outcome.

use crate::shared::api_error::ApiError;
use futures::channel::oneshot;
use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

type Outcome = Result<String, ApiError>;

#[derive(Default)]
struct GateState {
    in_flight: bool,
    waiters: Vec<oneshot::Sender<Outcome>>,
}

#[derive(Default)]
pub struct RefreshGate {
    state: RefCell<GateState>,
}

impl RefreshGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `refresh` unless a refresh is already in flight, in which case
    /// the caller waits for that one. Returns the new access token.
    pub async fn run<F, Fut>(&self, refresh: F) -> Outcome
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Outcome>,
    {
        let waiter = {
            let mut state = self.state.borrow_mut();
            if state.in_flight {
                let (tx, rx) = oneshot::channel();
                state.waiters.push(tx);
                Some(rx)
            } else {
                state.in_flight = true;
                None
            }
        };

        if let Some(rx) = waiter {
            log::debug!("refresh: waiting for in-flight refresh");
            return rx.await.unwrap_or(Err(ApiError::Unauthorized));
        }

        let outcome = refresh().await;

        let waiters = {
            let mut state = self.state.borrow_mut();
            state.in_flight = false;
            std::mem::take(&mut state.waiters)
        };
        log::debug!(
            "refresh: finished (ok={}), releasing {} waiter(s)",
            outcome.is_ok(),
            waiters.len()
        );
        for tx in waiters {
            let _ = tx.send(outcome.clone());
        }

        outcome
    }

    pub fn is_refreshing(&self) -> bool {
        self.state.borrow().in_flight
    }
}

thread_local! {
    static GATE: Rc<RefreshGate> = Rc::new(RefreshGate::new());
}

/// Process-wide gate used by the HTTP layer.
pub fn refresh_gate() -> Rc<RefreshGate> {
    GATE.with(Rc::clone)
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::cell::Cell;

    #[test]
    fn test_concurrent_callers_share_one_refresh() {
        let gate = RefreshGate::new();
        let calls = Cell::new(0);
        let (release_tx, release_rx) = oneshot::channel::<()>();

        let leader = gate.run(|| async {
            calls.set(calls.get() + 1);
            let _ = release_rx.await;
            Ok("fresh".to_string())
        });
        let follower_a = gate.run(|| async {
            calls.set(calls.get() + 1);
            Ok("wrong".to_string())
        });
        let follower_b = gate.run(|| async {
            calls.set(calls.get() + 1);
            Ok("wrong".to_string())
        });
        let release = async {
            let _ = release_tx.send(());
        };

        let (a, b, c, _) = block_on(async { futures::join!(leader, follower_a, follower_b, release) });

        assert_eq!(calls.get(), 1);
        assert_eq!(a.unwrap(), "fresh");
        assert_eq!(b.unwrap(), "fresh");
        assert_eq!(c.unwrap(), "fresh");
        assert!(!gate.is_refreshing());
    }

    #[test]
    fn test_failure_is_broadcast_and_gate_reopens() {
        let gate = RefreshGate::new();
        let (release_tx, release_rx) = oneshot::channel::<()>();

        let leader = gate.run(|| async {
            let _ = release_rx.await;
            Err(ApiError::Unauthorized)
        });
        let follower = gate.run(|| async { Ok("never".to_string()) });
        let release = async {
            let _ = release_tx.send(());
        };
        let (a, b, _) = block_on(async { futures::join!(leader, follower, release) });
        assert_eq!(a, Err(ApiError::Unauthorized));
        assert_eq!(b, Err(ApiError::Unauthorized));

        // A later 401 starts a new refresh
        let next = block_on(gate.run(|| async { Ok("again".to_string()) }));
        assert_eq!(next.unwrap(), "again");
    }
}
