//! Multi-behavior policy over an open (hash-keyed) state domain.

use std::collections::HashMap;

use crate::core::{
    default_collection_factory, Behavior, BehaviorCollection, BehaviorCollectionFactory, State,
};
use crate::reactions::policy::{EntryExitReactions, ReactionPolicy};

/// Registry mapping states to ordered behavior collections.
///
/// Collections are created lazily: a state with no registrations has no
/// entry in the map at all until the first behavior is added for it. Within
/// a collection, behaviors accumulate in registration order and that order
/// is the invocation order (for the default FIFO containers).
pub struct CollectionRegistry<S: State> {
    collections: HashMap<S, Box<dyn BehaviorCollection>>,
}

impl<S: State> CollectionRegistry<S> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            collections: HashMap::new(),
        }
    }

    /// Append `behavior` to the collection for `state`, creating the
    /// collection via `factory` on first use.
    pub fn add(&mut self, state: S, behavior: Behavior, factory: &BehaviorCollectionFactory) {
        self.collections
            .entry(state)
            .or_insert_with(|| factory())
            .add(behavior);
    }

    /// Run every behavior in the collection for `state`, if one exists.
    pub fn run_all(&mut self, state: &S) {
        if let Some(collection) = self.collections.get_mut(state) {
            tracing::trace!(state = ?state, count = collection.len(), "running behaviors");
            collection.run_all();
        }
    }

    /// Whether `state` has a collection (i.e. at least one registration).
    pub fn is_registered(&self, state: &S) -> bool {
        self.collections.contains_key(state)
    }

    /// Number of states with at least one registered behavior.
    pub fn len(&self) -> usize {
        self.collections.len()
    }

    /// Whether no state has a registered behavior.
    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }
}

impl<S: State> Default for CollectionRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Policy that runs exit behaviors when leaving a state and entry behaviors
/// when entering one.
///
/// Keeps two independent registries. On a transition the machine drives the
/// full ordering: every exit behavior of the old state runs before the state
/// mutation, every entry behavior of the new state runs after it.
pub struct OnEntryAndExit<S: State> {
    factory: BehaviorCollectionFactory,
    entry: CollectionRegistry<S>,
    exit: CollectionRegistry<S>,
}

impl<S: State> OnEntryAndExit<S> {
    /// Create the policy with the default FIFO collection factory.
    pub fn new() -> Self {
        Self::with_factory(default_collection_factory())
    }

    /// Create the policy with a caller-supplied collection factory.
    pub fn with_factory(factory: BehaviorCollectionFactory) -> Self {
        Self::with_registries(factory, CollectionRegistry::new(), CollectionRegistry::new())
    }

    /// Create the policy around caller-supplied registries. The supplied
    /// registries, including anything already registered in them, are the
    /// ones used.
    pub fn with_registries(
        factory: BehaviorCollectionFactory,
        entry: CollectionRegistry<S>,
        exit: CollectionRegistry<S>,
    ) -> Self {
        Self {
            factory,
            entry,
            exit,
        }
    }
}

impl<S: State> Default for OnEntryAndExit<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> ReactionPolicy<S> for OnEntryAndExit<S> {
    fn leaving(&mut self, state: &S) {
        self.exit.run_all(state);
    }

    fn entered(&mut self, state: &S) {
        self.entry.run_all(state);
    }
}

impl<S: State> EntryExitReactions<S> for OnEntryAndExit<S> {
    fn add_entry(&mut self, state: S, behavior: Behavior) {
        self.entry.add(state, behavior, &self.factory);
    }

    fn add_exit(&mut self, state: S, behavior: Behavior) {
        self.exit.add(state, behavior, &self.factory);
    }

    fn collection_factory(&self) -> &BehaviorCollectionFactory {
        &self.factory
    }

    fn set_collection_factory(&mut self, factory: BehaviorCollectionFactory) {
        self.factory = factory;
    }
}
