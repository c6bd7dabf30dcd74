//! Reducer and effect abstractions.
//!
//! Reducers are pure functions `(State, Action, Environment) → Effects`.
//! They contain all business logic, update state in place (the caller owns
//! the copy-on-write discipline), and describe side effects as values. The
//! runtime crate executes effects in spawned tasks and feeds any produced
//! action back into the reducer.

use futures::future::BoxFuture;

use crate::Effects;

/// Describes a side effect to be executed by the runtime.
///
/// Effects are never executed by the reducer itself. They run
/// fire-and-forget with respect to the core: their outcome comes back as a
/// plain action value, never as a fault in the reducer's call path.
pub enum Effect<Action> {
    /// No-op effect
    None,
    /// Arbitrary async computation.
    ///
    /// If the future resolves to `Some(action)`, the action is fed back
    /// into the reducer.
    Future(BoxFuture<'static, Option<Action>>),
}

// Manual Debug since the future is opaque.
impl<Action> std::fmt::Debug for Effect<Action> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Effect::None => write!(f, "Effect::None"),
            Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
        }
    }
}

impl<Action> Effect<Action> {
    /// Wraps a future into an effect
    pub fn future<F>(future: F) -> Self
    where
        F: std::future::Future<Output = Option<Action>> + Send + 'static,
    {
        Effect::Future(Box::pin(future))
    }
}

/// The core abstraction for business logic.
///
/// # Example
///
/// ```ignore
/// impl Reducer for AppReducer {
///     type State = AppState;
///     type Action = AppAction;
///     type Environment = AppEnvironment;
///
///     fn reduce(
///         &self,
///         state: &mut AppState,
///         action: AppAction,
///         env: &AppEnvironment,
///     ) -> Effects<AppAction> {
///         match action {
///             AppAction::RefreshStatuses => {
///                 state.accounts = derive_statuses(env.clock.today(), &state.accounts);
///                 smallvec![]
///             }
///             // ...
///         }
///     }
/// }
/// ```
pub trait Reducer {
    /// The state type this reducer operates on
    type State;

    /// The action type this reducer processes
    type Action;

    /// The environment type with injected dependencies
    type Environment;

    /// Processes one action: validate, update state, describe effects.
    ///
    /// Must never block, suspend, or panic.
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> Effects<Self::Action>;
}
