//! # SubManager Runtime
//!
//! The [`Store`] coordinates reducer execution and effect handling:
//!
//! 1. `send(action)` runs the reducer synchronously while holding the
//!    state write lock, so concurrent mutations serialize at the reducer
//!    and a reader always observes either the pre- or post-mutation
//!    snapshot, never a partial one.
//! 2. Returned effects execute in spawned tasks, fire-and-forget with
//!    respect to the core. An effect resolving to `Some(action)` feeds
//!    that action back through `send`.
//!
//! There is no retry, backoff, or dead-lettering: a failed external call
//! surfaces as a plain value (or a log line) and requires the user to
//! re-trigger the action.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use submanager_core::reducer::{Effect, Reducer};
use tokio::sync::RwLock;

/// Errors surfaced by [`Store`] operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// `drain` timed out with effects still running
    #[error("drain timed out with {0} effects still running")]
    DrainTimeout(usize),
}

/// Runtime that owns application state and executes effects.
///
/// Cloning a `Store` is cheap; clones share state and the pending-effect
/// counter.
pub struct Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    state: Arc<RwLock<S>>,
    reducer: Arc<R>,
    environment: E,
    pending_effects: Arc<AtomicUsize>,
}

impl<S, A, E, R> Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E> + Send + Sync + 'static,
    A: Send + 'static,
    S: Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    /// Creates a store with initial state, reducer, and environment
    #[must_use]
    pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
        Self {
            state: Arc::new(RwLock::new(initial_state)),
            reducer: Arc::new(reducer),
            environment,
            pending_effects: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Sends an action through the reducer and starts its effects.
    ///
    /// Returns once effect execution has been *started*, not completed;
    /// use [`Store::drain`] to wait for in-flight effects.
    #[tracing::instrument(skip_all, name = "store_send")]
    pub async fn send(&self, action: A) {
        let effects = {
            let mut state = self.state.write().await;
            self.reducer.reduce(&mut state, action, &self.environment)
        };
        for effect in effects {
            self.spawn_effect(effect);
        }
    }

    /// Reads a projection of the current state snapshot
    pub async fn state<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&S) -> T,
    {
        let state = self.state.read().await;
        f(&state)
    }

    /// Number of effects currently in flight
    #[must_use]
    pub fn pending_effects(&self) -> usize {
        self.pending_effects.load(Ordering::Acquire)
    }

    /// Waits for all in-flight effects to finish.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DrainTimeout`] when effects are still running
    /// after `timeout`.
    pub async fn drain(&self, timeout: Duration) -> Result<(), StoreError> {
        let start = std::time::Instant::now();
        loop {
            let pending = self.pending_effects();
            if pending == 0 {
                return Ok(());
            }
            if start.elapsed() >= timeout {
                tracing::warn!(pending, "drain timed out");
                return Err(StoreError::DrainTimeout(pending));
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }

    fn spawn_effect(&self, effect: Effect<A>) {
        match effect {
            Effect::None => {}
            Effect::Future(future) => {
                let store = self.clone();
                self.pending_effects.fetch_add(1, Ordering::AcqRel);
                tokio::spawn(async move {
                    if let Some(action) = future.await {
                        store.send_boxed(action).await;
                    }
                    store.pending_effects.fetch_sub(1, Ordering::AcqRel);
                });
            }
        }
    }

    // Boxed so the feedback loop does not produce an infinitely recursive
    // future type through spawn_effect.
    fn send_boxed(&self, action: A) -> BoxFuture<'static, ()> {
        let store = self.clone();
        Box::pin(async move { store.send(action).await })
    }
}

impl<S, A, E, R> Clone for Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E>,
    E: Clone,
{
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            reducer: Arc::clone(&self.reducer),
            environment: self.environment.clone(),
            pending_effects: Arc::clone(&self.pending_effects),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use submanager_core::{smallvec, Effects};

    #[derive(Clone, Debug, Default)]
    struct CounterState {
        count: i64,
    }

    #[derive(Clone, Debug)]
    enum CounterAction {
        Increment,
        IncrementLater,
    }

    #[derive(Clone)]
    struct CounterEnv;

    struct CounterReducer;

    impl Reducer for CounterReducer {
        type State = CounterState;
        type Action = CounterAction;
        type Environment = CounterEnv;

        fn reduce(
            &self,
            state: &mut CounterState,
            action: CounterAction,
            _env: &CounterEnv,
        ) -> Effects<CounterAction> {
            match action {
                CounterAction::Increment => {
                    state.count += 1;
                    smallvec![]
                }
                CounterAction::IncrementLater => {
                    smallvec![Effect::future(async { Some(CounterAction::Increment) })]
                }
            }
        }
    }

    #[tokio::test]
    async fn send_updates_state() {
        let store = Store::new(CounterState::default(), CounterReducer, CounterEnv);
        store.send(CounterAction::Increment).await;
        store.send(CounterAction::Increment).await;
        assert_eq!(store.state(|s| s.count).await, 2);
    }

    #[tokio::test]
    async fn effect_feedback_reaches_reducer() {
        let store = Store::new(CounterState::default(), CounterReducer, CounterEnv);
        store.send(CounterAction::IncrementLater).await;
        store.drain(Duration::from_secs(1)).await.unwrap();
        assert_eq!(store.state(|s| s.count).await, 1);
    }

    #[tokio::test]
    async fn drain_with_no_effects_returns_immediately() {
        let store = Store::new(CounterState::default(), CounterReducer, CounterEnv);
        store.drain(Duration::from_millis(10)).await.unwrap();
        assert_eq!(store.pending_effects(), 0);
    }
}
