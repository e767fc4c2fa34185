//! State holder and transition operation.

use crate::core::{BehaviorCollectionFactory, EnumState, State};
use crate::reactions::{
    CollectionRegistry, EntryExitReactions, EnumRegistry, OnEntry, OnEntryAndExit,
    OnEntryAndExitEnum, OnExit, ReactionPolicy,
};

/// A value-holding state machine that reacts to state changes.
///
/// The machine owns exactly one mutable current-state slot, initialized at
/// construction and mutated only by [`set_state`](Self::set_state). `None`
/// is the designated absent state: a machine may start absent, and queries
/// treat an absent current state as equal only to an absent query.
///
/// Which behaviors run on a transition is decided by the injected policy
/// `P`; the machine guarantees the ordering: the policy sees the old state
/// before the mutation and the new state after it. Any state may go to any
/// other state; the machine validates nothing beyond the no-op rules.
///
/// Behaviors run synchronously, in-line, on the calling thread inside
/// `set_state`. There is no internal locking; concurrent mutation is ruled
/// out by `&mut self` and callers that share a machine across threads must
/// serialize access themselves.
///
/// # Example
///
/// ```rust
/// use reflex::OnEntryAndExitMachine;
/// use std::sync::atomic::{AtomicI64, Ordering};
/// use std::sync::Arc;
///
/// let door_openings = Arc::new(AtomicI64::new(0));
///
/// let mut machine = OnEntryAndExitMachine::new("closed");
///
/// let counter = Arc::clone(&door_openings);
/// machine.add_entry_behavior("open", move || {
///     counter.fetch_add(1, Ordering::SeqCst);
/// });
/// let counter = Arc::clone(&door_openings);
/// machine.add_exit_behavior("open", move || {
///     counter.fetch_sub(1, Ordering::SeqCst);
/// });
///
/// machine.set_state("open");
/// assert_eq!(door_openings.load(Ordering::SeqCst), 1);
///
/// machine.set_state("closed");
/// assert_eq!(door_openings.load(Ordering::SeqCst), 0);
/// ```
pub struct StateMachine<S: State, P: ReactionPolicy<S>> {
    current: Option<S>,
    policy: P,
}

/// Machine running one behavior per state when that state is entered.
pub type OnEntryMachine<S> = StateMachine<S, OnEntry<S>>;

/// Machine running one behavior per state when that state is left.
pub type OnExitMachine<S> = StateMachine<S, OnExit<S>>;

/// Machine running ordered collections of entry and exit behaviors.
pub type OnEntryAndExitMachine<S> = StateMachine<S, OnEntryAndExit<S>>;

/// [`OnEntryAndExitMachine`] over a closed, enumerated state domain.
pub type OnEntryAndExitEnumMachine<E> = StateMachine<E, OnEntryAndExitEnum<E>>;

impl<S: State, P: ReactionPolicy<S>> StateMachine<S, P> {
    /// Create a machine with a custom reaction policy.
    ///
    /// This is the escape hatch for policies beyond the stock variants; the
    /// typed constructors on the aliases cover the common cases.
    pub fn with_policy(initial: impl Into<Option<S>>, policy: P) -> Self {
        Self {
            current: initial.into(),
            policy,
        }
    }

    /// The current state, or `None` if the machine is in the absent state.
    pub fn current_state(&self) -> Option<&S> {
        self.current.as_ref()
    }

    /// Whether `query` equals the current state.
    ///
    /// An absent current state is equal only to an absent (`None`) query.
    pub fn is_in_state(&self, query: impl Into<Option<S>>) -> bool {
        self.current == query.into()
    }

    /// Transition to `next`, running the policy's reactions.
    ///
    /// Passing `None`, or a value equal to the current state, is an
    /// idempotent no-op: the state stays unchanged and no behavior runs.
    /// Otherwise, as one synchronous step: the policy is notified that the
    /// current state (if any) is being left, the state slot is updated, and
    /// the policy is notified that the new state was entered. Exit reactions
    /// therefore observe the machine still in its old state, entry reactions
    /// observe it already in the new one.
    ///
    /// A panicking behavior propagates to the caller with that same timing:
    /// a fault in an exit reaction leaves the machine in the old state, a
    /// fault in an entry reaction leaves it in the new state.
    pub fn set_state(&mut self, next: impl Into<Option<S>>) {
        let Some(next) = next.into() else {
            return;
        };
        if self.current.as_ref() == Some(&next) {
            return;
        }

        tracing::trace!(from = ?self.current, to = ?next, "state transition");

        if let Some(current) = self.current.as_ref() {
            self.policy.leaving(current);
        }
        let entered = self.current.insert(next);
        self.policy.entered(entered);
    }

    /// The injected reaction policy.
    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Mutable access to the injected reaction policy, e.g. for registering
    /// behaviors on a custom policy.
    pub fn policy_mut(&mut self) -> &mut P {
        &mut self.policy
    }
}

impl<S: State> StateMachine<S, OnEntry<S>> {
    /// Create an on-entry machine with an empty behavior registry.
    ///
    /// # Example
    ///
    /// ```rust
    /// use reflex::OnEntryMachine;
    ///
    /// let machine = OnEntryMachine::<u32>::new(0);
    /// assert_eq!(machine.current_state(), Some(&0));
    /// ```
    pub fn new(initial: impl Into<Option<S>>) -> Self {
        Self::with_policy(initial, OnEntry::new())
    }

    /// Create an on-entry machine around a caller-supplied policy, e.g. one
    /// built over a pre-populated registry.
    pub fn with_reactions(initial: impl Into<Option<S>>, reactions: OnEntry<S>) -> Self {
        Self::with_policy(initial, reactions)
    }

    /// Register `behavior` for `state`, replacing any previous registration.
    ///
    /// The behavior runs each time a transition enters `state`, strictly
    /// after the machine's state reflects it.
    pub fn set_behavior_for_state(&mut self, state: S, behavior: impl FnMut() + Send + 'static) {
        self.policy.set_behavior(state, Box::new(behavior));
    }
}

impl<S: State> StateMachine<S, OnExit<S>> {
    /// Create an on-exit machine with an empty behavior registry.
    pub fn new(initial: impl Into<Option<S>>) -> Self {
        Self::with_policy(initial, OnExit::new())
    }

    /// Create an on-exit machine around a caller-supplied policy, e.g. one
    /// built over a pre-populated registry.
    pub fn with_reactions(initial: impl Into<Option<S>>, reactions: OnExit<S>) -> Self {
        Self::with_policy(initial, reactions)
    }

    /// Register `behavior` for `state`, replacing any previous registration.
    ///
    /// The behavior runs each time a transition leaves `state`, strictly
    /// before the machine's state changes.
    pub fn set_behavior_for_state(&mut self, state: S, behavior: impl FnMut() + Send + 'static) {
        self.policy.set_behavior(state, Box::new(behavior));
    }
}

impl<S: State, P: EntryExitReactions<S>> StateMachine<S, P> {
    /// Append `behavior` to the entry collection for `state`.
    ///
    /// Repeated calls for the same state accumulate; on each transition into
    /// `state` every registered entry behavior runs, in collection order.
    pub fn add_entry_behavior(&mut self, state: S, behavior: impl FnMut() + Send + 'static) {
        self.policy.add_entry(state, Box::new(behavior));
    }

    /// Append `behavior` to the exit collection for `state`.
    ///
    /// Repeated calls for the same state accumulate; on each transition out
    /// of `state` every registered exit behavior runs, in collection order.
    pub fn add_exit_behavior(&mut self, state: S, behavior: impl FnMut() + Send + 'static) {
        self.policy.add_exit(state, Box::new(behavior));
    }

    /// The factory used to create new behavior collections.
    pub fn collection_factory(&self) -> &BehaviorCollectionFactory {
        self.policy.collection_factory()
    }

    /// Replace the collection factory. Collections already created keep
    /// their current implementation; only collections created afterwards use
    /// the new one.
    pub fn set_collection_factory(&mut self, factory: BehaviorCollectionFactory) {
        self.policy.set_collection_factory(factory);
    }
}

impl<S: State> StateMachine<S, OnEntryAndExit<S>> {
    /// Create an entry-and-exit machine with the default FIFO collections.
    pub fn new(initial: impl Into<Option<S>>) -> Self {
        Self::with_policy(initial, OnEntryAndExit::new())
    }

    /// Create an entry-and-exit machine with a caller-supplied collection
    /// factory.
    pub fn with_collection_factory(
        initial: impl Into<Option<S>>,
        factory: BehaviorCollectionFactory,
    ) -> Self {
        Self::with_policy(initial, OnEntryAndExit::with_factory(factory))
    }

    /// Create an entry-and-exit machine around caller-supplied registries.
    /// The supplied registries, including anything already registered in
    /// them, are the ones used.
    pub fn with_registries(
        initial: impl Into<Option<S>>,
        factory: BehaviorCollectionFactory,
        entry: CollectionRegistry<S>,
        exit: CollectionRegistry<S>,
    ) -> Self {
        Self::with_policy(initial, OnEntryAndExit::with_registries(factory, entry, exit))
    }
}

impl<E: EnumState> StateMachine<E, OnEntryAndExitEnum<E>> {
    /// Create an enum-keyed entry-and-exit machine with the default FIFO
    /// collections.
    pub fn new(initial: impl Into<Option<E>>) -> Self {
        Self::with_policy(initial, OnEntryAndExitEnum::new())
    }

    /// Create an enum-keyed entry-and-exit machine with a caller-supplied
    /// collection factory.
    pub fn with_collection_factory(
        initial: impl Into<Option<E>>,
        factory: BehaviorCollectionFactory,
    ) -> Self {
        Self::with_policy(initial, OnEntryAndExitEnum::with_factory(factory))
    }

    /// Create an enum-keyed entry-and-exit machine around caller-supplied
    /// registries. The supplied registries, including anything already
    /// registered in them, are the ones used.
    pub fn with_registries(
        initial: impl Into<Option<E>>,
        factory: BehaviorCollectionFactory,
        entry: EnumRegistry<E>,
        exit: EnumRegistry<E>,
    ) -> Self {
        Self::with_policy(
            initial,
            OnEntryAndExitEnum::with_registries(factory, entry, exit),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::BehaviorCollection;
    use std::panic::{catch_unwind, AssertUnwindSafe};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    #[test]
    fn machine_starts_in_its_initial_state() {
        let machine = OnEntryMachine::new("idle");
        assert_eq!(machine.current_state(), Some(&"idle"));
        assert!(machine.is_in_state("idle"));
        assert!(!machine.is_in_state("busy"));
    }

    #[test]
    fn machine_may_start_absent() {
        let machine = OnEntryMachine::<u32>::new(None);
        assert_eq!(machine.current_state(), None);
        assert!(machine.is_in_state(None));
        assert!(!machine.is_in_state(3));
    }

    #[test]
    fn set_state_updates_the_current_state() {
        let mut machine = OnEntryMachine::new(1);
        machine.set_state(2);
        assert_eq!(machine.current_state(), Some(&2));
    }

    #[test]
    fn set_state_to_none_is_a_noop() {
        let fired = Arc::new(AtomicUsize::new(0));

        let mut machine = OnEntryMachine::new(1);
        let count = Arc::clone(&fired);
        machine.set_behavior_for_state(1, move || {
            count.fetch_add(1, Ordering::SeqCst);
        });

        machine.set_state(None);

        assert_eq!(machine.current_state(), Some(&1));
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn set_state_to_the_current_state_is_a_noop() {
        let fired = Arc::new(AtomicUsize::new(0));

        let mut machine = OnEntryMachine::new(1);
        let count = Arc::clone(&fired);
        machine.set_behavior_for_state(1, move || {
            count.fetch_add(1, Ordering::SeqCst);
        });

        machine.set_state(1);

        assert_eq!(machine.current_state(), Some(&1));
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn leaving_the_absent_state_fires_no_exit_behavior() {
        let fired = Arc::new(AtomicUsize::new(0));

        let mut machine = OnExitMachine::new(None);
        let count = Arc::clone(&fired);
        machine.set_behavior_for_state(1, move || {
            count.fetch_add(1, Ordering::SeqCst);
        });

        machine.set_state(1);

        assert_eq!(machine.current_state(), Some(&1));
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn entry_behavior_fires_on_the_target_state_only() {
        let fired = Arc::new(AtomicUsize::new(0));

        let mut machine = OnEntryMachine::new("a");
        let count = Arc::clone(&fired);
        machine.set_behavior_for_state("b", move || {
            count.fetch_add(1, Ordering::SeqCst);
        });

        machine.set_state("c");
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        machine.set_state("b");
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn exit_behavior_fires_when_leaving_its_state() {
        let fired = Arc::new(AtomicUsize::new(0));

        let mut machine = OnExitMachine::new("a");
        let count = Arc::clone(&fired);
        machine.set_behavior_for_state("a", move || {
            count.fetch_add(1, Ordering::SeqCst);
        });

        machine.set_state("b");
        assert_eq!(fired.load(Ordering::SeqCst), 1);

        machine.set_state("c");
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn reregistering_replaces_the_prior_behavior() {
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));

        let mut machine = OnEntryMachine::new(0);
        let count = Arc::clone(&first);
        machine.set_behavior_for_state(1, move || {
            count.fetch_add(1, Ordering::SeqCst);
        });
        let count = Arc::clone(&second);
        machine.set_behavior_for_state(1, move || {
            count.fetch_add(1, Ordering::SeqCst);
        });

        machine.set_state(1);

        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }

    // A panicking exit behavior runs before the mutation, so the intended
    // transition must not take effect.
    #[test]
    fn faulting_exit_behavior_leaves_the_machine_in_the_old_state() {
        let mut machine = OnExitMachine::new("a");
        machine.set_behavior_for_state("a", || panic!("exit fault"));

        let result = catch_unwind(AssertUnwindSafe(|| machine.set_state("b")));

        assert!(result.is_err());
        assert_eq!(machine.current_state(), Some(&"a"));
    }

    // A panicking entry behavior runs after the mutation, so the machine is
    // left in the new state.
    #[test]
    fn faulting_entry_behavior_leaves_the_machine_in_the_new_state() {
        let mut machine = OnEntryMachine::new("a");
        machine.set_behavior_for_state("b", || panic!("entry fault"));

        let result = catch_unwind(AssertUnwindSafe(|| machine.set_state("b")));

        assert!(result.is_err());
        assert_eq!(machine.current_state(), Some(&"b"));
    }

    #[test]
    fn exit_behaviors_run_before_entry_behaviors() {
        let log = Arc::new(Mutex::new(Vec::new()));

        let mut machine = OnEntryAndExitMachine::new("a");
        for label in ["exit a 1", "exit a 2"] {
            let log = Arc::clone(&log);
            machine.add_exit_behavior("a", move || {
                log.lock().unwrap().push(label);
            });
        }
        for label in ["entry b 1", "entry b 2"] {
            let log = Arc::clone(&log);
            machine.add_entry_behavior("b", move || {
                log.lock().unwrap().push(label);
            });
        }

        machine.set_state("b");

        assert_eq!(
            *log.lock().unwrap(),
            vec!["exit a 1", "exit a 2", "entry b 1", "entry b 2"]
        );
    }

    #[test]
    fn collection_behaviors_fire_on_every_qualifying_transition() {
        let fired = Arc::new(AtomicUsize::new(0));

        let mut machine = OnEntryAndExitMachine::new(0);
        let count = Arc::clone(&fired);
        machine.add_entry_behavior(1, move || {
            count.fetch_add(1, Ordering::SeqCst);
        });

        machine.set_state(1);
        machine.set_state(0);
        machine.set_state(1);

        assert_eq!(fired.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn custom_policy_observes_old_state_then_new_state() {
        struct RecordingPolicy {
            log: Arc<Mutex<Vec<String>>>,
        }

        impl ReactionPolicy<u32> for RecordingPolicy {
            fn leaving(&mut self, state: &u32) {
                self.log.lock().unwrap().push(format!("leaving {state}"));
            }

            fn entered(&mut self, state: &u32) {
                self.log.lock().unwrap().push(format!("entered {state}"));
            }
        }

        let log = Arc::new(Mutex::new(Vec::new()));
        let mut machine = StateMachine::with_policy(
            1,
            RecordingPolicy {
                log: Arc::clone(&log),
            },
        );

        machine.set_state(2);
        machine.set_state(2);
        machine.set_state(3);

        assert_eq!(
            *log.lock().unwrap(),
            vec!["leaving 1", "entered 2", "leaving 2", "entered 3"]
        );
    }

    #[test]
    fn policy_accessors_reach_the_injected_policy() {
        let fired = Arc::new(AtomicUsize::new(0));

        let mut machine = OnEntryAndExitMachine::new(0);
        assert!(machine.policy().collection_factory()().is_empty());

        let count = Arc::clone(&fired);
        machine.policy_mut().add_entry(
            1,
            Box::new(move || {
                count.fetch_add(1, Ordering::SeqCst);
            }),
        );

        machine.set_state(1);
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }
}
