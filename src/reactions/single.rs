//! Single-behavior-per-state policies.

use std::collections::HashMap;

use crate::core::{Behavior, State};
use crate::reactions::policy::ReactionPolicy;

/// Registry holding at most one behavior per state.
///
/// Registration is an unconditional upsert: the last behavior registered for
/// a state replaces any previous one. Entries are never removed. Registering
/// for a state the machine never transitions through is legal and inert.
pub struct BehaviorRegistry<S: State> {
    behaviors: HashMap<S, Behavior>,
}

impl<S: State> BehaviorRegistry<S> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            behaviors: HashMap::new(),
        }
    }

    /// Register `behavior` for `state`, replacing any previous registration.
    pub fn set(&mut self, state: S, behavior: Behavior) {
        self.behaviors.insert(state, behavior);
    }

    /// Run the behavior registered for `state`, if any.
    pub fn run(&mut self, state: &S) {
        if let Some(behavior) = self.behaviors.get_mut(state) {
            behavior();
        }
    }

    /// Whether a behavior is registered for `state`.
    pub fn is_registered(&self, state: &S) -> bool {
        self.behaviors.contains_key(state)
    }

    /// Number of states with a registered behavior.
    pub fn len(&self) -> usize {
        self.behaviors.len()
    }

    /// Whether no behavior is registered at all.
    pub fn is_empty(&self) -> bool {
        self.behaviors.is_empty()
    }
}

impl<S: State> Default for BehaviorRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Policy that runs a state's behavior when the machine enters that state.
///
/// The behavior runs strictly after the state mutation: it observes the
/// machine already in its new state. Leaving a state fires nothing.
pub struct OnEntry<S: State> {
    registry: BehaviorRegistry<S>,
}

impl<S: State> OnEntry<S> {
    /// Create the policy with an empty registry.
    pub fn new() -> Self {
        Self::with_registry(BehaviorRegistry::new())
    }

    /// Create the policy around a caller-supplied registry. The supplied
    /// registry, including anything already registered in it, is the one
    /// used.
    pub fn with_registry(registry: BehaviorRegistry<S>) -> Self {
        Self { registry }
    }

    /// Register `behavior` for `state`, replacing any previous registration.
    pub fn set_behavior(&mut self, state: S, behavior: Behavior) {
        self.registry.set(state, behavior);
    }
}

impl<S: State> Default for OnEntry<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> ReactionPolicy<S> for OnEntry<S> {
    fn entered(&mut self, state: &S) {
        self.registry.run(state);
    }
}

/// Policy that runs a state's behavior when the machine leaves that state.
///
/// The behavior runs strictly before the state mutation: it observes the
/// machine still in its old state. Entering a state fires nothing.
pub struct OnExit<S: State> {
    registry: BehaviorRegistry<S>,
}

impl<S: State> OnExit<S> {
    /// Create the policy with an empty registry.
    pub fn new() -> Self {
        Self::with_registry(BehaviorRegistry::new())
    }

    /// Create the policy around a caller-supplied registry. The supplied
    /// registry, including anything already registered in it, is the one
    /// used.
    pub fn with_registry(registry: BehaviorRegistry<S>) -> Self {
        Self { registry }
    }

    /// Register `behavior` for `state`, replacing any previous registration.
    pub fn set_behavior(&mut self, state: S, behavior: Behavior) {
        self.registry.set(state, behavior);
    }
}

impl<S: State> Default for OnExit<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> ReactionPolicy<S> for OnExit<S> {
    fn leaving(&mut self, state: &S) {
        self.registry.run(state);
    }
}
