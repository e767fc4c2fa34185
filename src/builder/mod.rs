//! Fluent construction of entry-and-exit machines.

use crate::core::{default_collection_factory, Behavior, BehaviorCollectionFactory, State};
use crate::machine::OnEntryAndExitMachine;
use crate::reactions::{EntryExitReactions, OnEntryAndExit};

/// Builder assembling an [`OnEntryAndExitMachine`] in one expression.
///
/// Every piece is optional: an omitted initial state yields a machine
/// starting absent, an omitted factory yields the default FIFO collections.
/// `build` therefore cannot fail. Behaviors registered through the builder
/// end up in the same per-state collections, in registration order, as
/// behaviors added after construction.
///
/// # Example
///
/// ```rust
/// use reflex::MachineBuilder;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
///
/// let started = Arc::new(AtomicUsize::new(0));
///
/// let counter = Arc::clone(&started);
/// let mut machine = MachineBuilder::new()
///     .initial("idle")
///     .entry_behavior("running", move || {
///         counter.fetch_add(1, Ordering::SeqCst);
///     })
///     .build();
///
/// machine.set_state("running");
/// assert_eq!(started.load(Ordering::SeqCst), 1);
/// ```
pub struct MachineBuilder<S: State> {
    initial: Option<S>,
    factory: Option<BehaviorCollectionFactory>,
    entry: Vec<(S, Behavior)>,
    exit: Vec<(S, Behavior)>,
}

impl<S: State> MachineBuilder<S> {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self {
            initial: None,
            factory: None,
            entry: Vec::new(),
            exit: Vec::new(),
        }
    }

    /// Set the initial state. Without it the machine starts absent.
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    /// Use `factory` instead of the default FIFO collection factory.
    pub fn collection_factory(mut self, factory: BehaviorCollectionFactory) -> Self {
        self.factory = Some(factory);
        self
    }

    /// Append an entry behavior for `state`.
    pub fn entry_behavior(mut self, state: S, behavior: impl FnMut() + Send + 'static) -> Self {
        self.entry.push((state, Box::new(behavior)));
        self
    }

    /// Append an exit behavior for `state`.
    pub fn exit_behavior(mut self, state: S, behavior: impl FnMut() + Send + 'static) -> Self {
        self.exit.push((state, Box::new(behavior)));
        self
    }

    /// Build the machine.
    pub fn build(self) -> OnEntryAndExitMachine<S> {
        let factory = self.factory.unwrap_or_else(default_collection_factory);
        let mut machine =
            OnEntryAndExitMachine::with_policy(self.initial, OnEntryAndExit::with_factory(factory));

        for (state, behavior) in self.entry {
            machine.policy_mut().add_entry(state, behavior);
        }
        for (state, behavior) in self.exit {
            machine.policy_mut().add_exit(state, behavior);
        }

        machine
    }
}

impl<S: State> Default for MachineBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}
