//! Testing utilities for SubManager reducers.
//!
//! Provides [`ReducerTest`], a fluent Given-When-Then harness for
//! exercising a reducer against a fixed environment, plus assertion
//! helpers for effect lists.

#![allow(clippy::module_name_repetitions)]

use submanager_core::reducer::{Effect, Reducer};

type StateAssertion<S> = Box<dyn FnOnce(&S)>;
type EffectAssertion<A> = Box<dyn FnOnce(&[Effect<A>])>;

/// Fluent Given-When-Then harness for reducer tests.
///
/// # Example
///
/// ```ignore
/// ReducerTest::new(AppReducer::new())
///     .with_env(test_environment())
///     .given_state(AppState::default())
///     .when_action(AppAction::RefreshStatuses)
///     .then_state(|state| assert!(state.accounts.is_empty()))
///     .then_effects(assertions::assert_no_effects)
///     .run();
/// ```
pub struct ReducerTest<R, S, A, E>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    reducer: R,
    environment: Option<E>,
    initial_state: Option<S>,
    actions: Vec<A>,
    state_assertions: Vec<StateAssertion<S>>,
    effect_assertions: Vec<EffectAssertion<A>>,
}

impl<R, S, A, E> ReducerTest<R, S, A, E>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    /// Creates a harness around `reducer`
    #[must_use]
    pub const fn new(reducer: R) -> Self {
        Self {
            reducer,
            environment: None,
            initial_state: None,
            actions: Vec::new(),
            state_assertions: Vec::new(),
            effect_assertions: Vec::new(),
        }
    }

    /// Sets the environment
    #[must_use]
    pub fn with_env(mut self, env: E) -> Self {
        self.environment = Some(env);
        self
    }

    /// Sets the initial state (Given)
    #[must_use]
    pub fn given_state(mut self, state: S) -> Self {
        self.initial_state = Some(state);
        self
    }

    /// Appends an action to process (When). May be called several times;
    /// actions run in order and effect assertions see the last action's
    /// effects.
    #[must_use]
    pub fn when_action(mut self, action: A) -> Self {
        self.actions.push(action);
        self
    }

    /// Adds an assertion over the final state (Then)
    #[must_use]
    pub fn then_state<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&S) + 'static,
    {
        self.state_assertions.push(Box::new(assertion));
        self
    }

    /// Adds an assertion over the last action's effects (Then)
    #[must_use]
    pub fn then_effects<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&[Effect<A>]) + 'static,
    {
        self.effect_assertions.push(Box::new(assertion));
        self
    }

    /// Runs the actions and all assertions.
    ///
    /// # Panics
    ///
    /// Panics when state, environment, or actions are missing, or when an
    /// assertion fails.
    #[allow(clippy::expect_used)] // test harness
    pub fn run(self) {
        let mut state = self
            .initial_state
            .expect("initial state must be set with given_state()");
        let env = self
            .environment
            .expect("environment must be set with with_env()");
        assert!(
            !self.actions.is_empty(),
            "at least one action must be set with when_action()"
        );

        let mut effects = Vec::new();
        for action in self.actions {
            effects = self.reducer.reduce(&mut state, action, &env).into_vec();
        }

        for assertion in self.state_assertions {
            assertion(&state);
        }
        for assertion in self.effect_assertions {
            assertion(&effects);
        }
    }
}

/// Assertion helpers for effect lists
pub mod assertions {
    use submanager_core::reducer::Effect;

    /// Asserts that no effects were produced.
    ///
    /// # Panics
    ///
    /// Panics when the effect list is non-empty.
    pub fn assert_no_effects<A>(effects: &[Effect<A>]) {
        assert!(
            effects.is_empty() || matches!(effects, [Effect::None]),
            "expected no effects, found {}",
            effects.len()
        );
    }

    /// Asserts an exact number of effects.
    ///
    /// # Panics
    ///
    /// Panics when the count differs.
    pub fn assert_effects_count<A>(effects: &[Effect<A>], expected: usize) {
        assert_eq!(
            effects.len(),
            expected,
            "expected {expected} effects, found {}",
            effects.len()
        );
    }

    /// Asserts that at least one async effect was produced.
    ///
    /// # Panics
    ///
    /// Panics when no `Future` effect is present.
    pub fn assert_has_future_effect<A>(effects: &[Effect<A>]) {
        assert!(
            effects.iter().any(|e| matches!(e, Effect::Future(_))),
            "expected at least one Future effect, found none"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use submanager_core::{smallvec, Effects};

    #[derive(Clone, Debug, Default)]
    struct TallyState {
        total: u32,
    }

    #[derive(Clone, Debug)]
    enum TallyAction {
        Add(u32),
        AddViaEffect(u32),
    }

    struct TallyEnv;
    struct TallyReducer;

    impl Reducer for TallyReducer {
        type State = TallyState;
        type Action = TallyAction;
        type Environment = TallyEnv;

        fn reduce(
            &self,
            state: &mut TallyState,
            action: TallyAction,
            _env: &TallyEnv,
        ) -> Effects<TallyAction> {
            match action {
                TallyAction::Add(n) => {
                    state.total += n;
                    smallvec![]
                }
                TallyAction::AddViaEffect(n) => {
                    smallvec![Effect::future(async move { Some(TallyAction::Add(n)) })]
                }
            }
        }
    }

    #[test]
    fn runs_actions_in_order() {
        ReducerTest::new(TallyReducer)
            .with_env(TallyEnv)
            .given_state(TallyState::default())
            .when_action(TallyAction::Add(2))
            .when_action(TallyAction::Add(3))
            .then_state(|state| assert_eq!(state.total, 5))
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn surfaces_last_effects() {
        ReducerTest::new(TallyReducer)
            .with_env(TallyEnv)
            .given_state(TallyState::default())
            .when_action(TallyAction::AddViaEffect(1))
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 1);
                assertions::assert_has_future_effect(effects);
            })
            .run();
    }
}
