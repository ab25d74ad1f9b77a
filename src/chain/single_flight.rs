//! Lazy single-flight initialization cell
//!
//! Manages creation of an expensive, potentially-failing client handle:
//! at most one construction is in flight at a time, every concurrent
//! caller observes the same outcome, and a successful handle is cached
//! for the lifetime of the process. A failed or timed-out attempt resets
//! the cell so the next caller starts a fresh attempt instead of leaving
//! the service permanently wedged.
//!
//! Construction runs on a spawned task, so a caller that abandons its
//! wait does not cancel the attempt: a late success still populates the
//! cache for subsequent callers.

use crate::{Error, Result};
use std::future::Future;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;

/// Shared outcome broadcast to every waiter of one construction attempt.
/// Errors are carried as plain strings so the outcome stays cloneable.
type InitOutcome<T> = std::result::Result<Arc<T>, String>;

enum State<T> {
    /// No handle and no construction attempt running
    Idle,

    /// A construction attempt is running; waiters share its outcome
    InFlight(watch::Receiver<Option<InitOutcome<T>>>),

    /// The handle was built; permanent for the process lifetime
    Ready(Arc<T>),
}

/// Single-flight cell holding at most one `T`
pub struct SingleFlight<T> {
    state: Arc<Mutex<State<T>>>,
}

impl<T> Default for SingleFlight<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SingleFlight<T> {
    /// Create an empty cell
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(State::Idle)),
        }
    }

    /// Non-blocking peek at the cached handle, if any
    pub fn ready(&self) -> Option<Arc<T>> {
        match self.state.lock() {
            Ok(state) => match &*state {
                State::Ready(handle) => Some(Arc::clone(handle)),
                _ => None,
            },
            Err(_) => None,
        }
    }
}

impl<T: Send + Sync + 'static> SingleFlight<T> {
    /// Return the cached handle, joining an in-flight construction or
    /// starting a new one when the cell is idle.
    ///
    /// The factory is invoked at most once per attempt regardless of call
    /// concurrency; it is responsible for bounding its own run time. On
    /// failure the cell resets to idle so a later call can retry.
    pub async fn get_or_init<F, Fut>(&self, factory: F) -> Result<Arc<T>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        let mut receiver = {
            let mut state = self
                .state
                .lock()
                .map_err(|_| Error::internal("single-flight state lock poisoned"))?;

            if let State::Ready(handle) = &*state {
                return Ok(Arc::clone(handle));
            }

            if let State::InFlight(receiver) = &*state {
                receiver.clone()
            } else {
                let (sender, receiver) = watch::channel(None);
                *state = State::InFlight(receiver.clone());

                let shared = Arc::clone(&self.state);
                let attempt = factory();
                tokio::spawn(async move {
                    let outcome: InitOutcome<T> = match attempt.await {
                        Ok(handle) => Ok(Arc::new(handle)),
                        Err(err) => Err(err.to_string()),
                    };

                    // Clear the in-flight marker on every path before
                    // broadcasting, so no waiter can observe a stale
                    // InFlight state after the outcome is known.
                    if let Ok(mut state) = shared.lock() {
                        *state = match &outcome {
                            Ok(handle) => State::Ready(Arc::clone(handle)),
                            Err(_) => State::Idle,
                        };
                    }
                    let _ = sender.send(Some(outcome));
                });

                receiver
            }
        };

        let outcome = match receiver.wait_for(|value| value.is_some()).await {
            Ok(value) => value
                .as_ref()
                .cloned()
                .ok_or_else(|| Error::internal("single-flight outcome missing"))?,
            Err(_) => {
                // The construction task died without reporting. Reset so
                // the next caller can retry instead of waiting forever.
                if let Ok(mut state) = self.state.lock() {
                    if matches!(&*state, State::InFlight(_)) {
                        *state = State::Idle;
                    }
                }
                return Err(Error::dependency_unavailable(
                    "client initialization was aborted before completing",
                ));
            }
        };

        outcome.map_err(Error::dependency_unavailable)
    }
}
