//! Multi-behavior policy over a closed, enumerated state domain.

use std::marker::PhantomData;

use crate::core::{
    default_collection_factory, Behavior, BehaviorCollection, BehaviorCollectionFactory, EnumState,
};
use crate::reactions::policy::{EntryExitReactions, ReactionPolicy};

/// Registry mapping enumerated states to ordered behavior collections.
///
/// Storage is a dense table indexed by [`EnumState::ordinal`], sized to the
/// full domain up front: O(1) access with no hashing, and slot order is the
/// domain's declaration order. Slots stay unoccupied until the first
/// behavior is registered for their state.
pub struct EnumRegistry<E: EnumState> {
    slots: Vec<Option<Box<dyn BehaviorCollection>>>,
    _marker: PhantomData<E>,
}

impl<E: EnumState> EnumRegistry<E> {
    /// Create a registry with one empty slot per domain value.
    pub fn new() -> Self {
        let mut slots = Vec::with_capacity(E::COUNT);
        slots.resize_with(E::COUNT, || None);
        Self {
            slots,
            _marker: PhantomData,
        }
    }

    /// Append `behavior` to the collection for `state`, creating the
    /// collection via `factory` on first use.
    pub fn add(&mut self, state: E, behavior: Behavior, factory: &BehaviorCollectionFactory) {
        self.slots[state.ordinal()]
            .get_or_insert_with(|| factory())
            .add(behavior);
    }

    /// Run every behavior in the collection for `state`, if one exists.
    pub fn run_all(&mut self, state: &E) {
        if let Some(Some(collection)) = self.slots.get_mut(state.ordinal()) {
            tracing::trace!(state = ?state, count = collection.len(), "running behaviors");
            collection.run_all();
        }
    }

    /// Whether `state` has a collection (i.e. at least one registration).
    pub fn is_registered(&self, state: &E) -> bool {
        matches!(self.slots.get(state.ordinal()), Some(Some(_)))
    }

    /// Number of states with at least one registered behavior.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Whether no state has a registered behavior.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<E: EnumState> Default for EnumRegistry<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// [`OnEntryAndExit`](crate::reactions::OnEntryAndExit) semantics over a
/// closed state domain, backed by [`EnumRegistry`] tables.
///
/// Provided as a convenient, allocation-lean way of running entry and exit
/// behaviors when the states are a fixed enumeration; transition semantics
/// are identical to the hash-keyed policy.
pub struct OnEntryAndExitEnum<E: EnumState> {
    factory: BehaviorCollectionFactory,
    entry: EnumRegistry<E>,
    exit: EnumRegistry<E>,
}

impl<E: EnumState> OnEntryAndExitEnum<E> {
    /// Create the policy with the default FIFO collection factory.
    pub fn new() -> Self {
        Self::with_factory(default_collection_factory())
    }

    /// Create the policy with a caller-supplied collection factory.
    pub fn with_factory(factory: BehaviorCollectionFactory) -> Self {
        Self::with_registries(factory, EnumRegistry::new(), EnumRegistry::new())
    }

    /// Create the policy around caller-supplied registries. The supplied
    /// registries, including anything already registered in them, are the
    /// ones used.
    pub fn with_registries(
        factory: BehaviorCollectionFactory,
        entry: EnumRegistry<E>,
        exit: EnumRegistry<E>,
    ) -> Self {
        Self {
            factory,
            entry,
            exit,
        }
    }
}

impl<E: EnumState> Default for OnEntryAndExitEnum<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: EnumState> ReactionPolicy<E> for OnEntryAndExitEnum<E> {
    fn leaving(&mut self, state: &E) {
        self.exit.run_all(state);
    }

    fn entered(&mut self, state: &E) {
        self.entry.run_all(state);
    }
}

impl<E: EnumState> EntryExitReactions<E> for OnEntryAndExitEnum<E> {
    fn add_entry(&mut self, state: E, behavior: Behavior) {
        self.entry.add(state, behavior, &self.factory);
    }

    fn add_exit(&mut self, state: E, behavior: Behavior) {
        self.exit.add(state, behavior, &self.factory);
    }

    fn collection_factory(&self) -> &BehaviorCollectionFactory {
        &self.factory
    }

    fn set_collection_factory(&mut self, factory: BehaviorCollectionFactory) {
        self.factory = factory;
    }
}
