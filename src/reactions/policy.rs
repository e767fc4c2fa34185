//! Policy traits implemented by all reacting variants.

use crate::core::{Behavior, BehaviorCollectionFactory, State};

/// Strategy invoked by a machine's transition operation.
///
/// For an accepted transition the machine calls [`leaving`](Self::leaving)
/// with the current state (if any) strictly before the state mutation, then
/// mutates, then calls [`entered`](Self::entered) with the new state. A
/// policy that ignores one of the notifications yields an exit-only or
/// entry-only machine; both defaults are no-ops.
///
/// Rejected transitions (`None` target, or a target equal to the current
/// state) never reach the policy.
///
/// # Example
///
/// ```rust
/// use reflex::reactions::ReactionPolicy;
/// use reflex::StateMachine;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
///
/// // A policy that counts every accepted transition.
/// struct CountTransitions(Arc<AtomicUsize>);
///
/// impl ReactionPolicy<u32> for CountTransitions {
///     fn entered(&mut self, _state: &u32) {
///         self.0.fetch_add(1, Ordering::SeqCst);
///     }
/// }
///
/// let count = Arc::new(AtomicUsize::new(0));
/// let mut machine = StateMachine::with_policy(1, CountTransitions(Arc::clone(&count)));
///
/// machine.set_state(2);
/// machine.set_state(2); // no-op, not counted
/// machine.set_state(3);
///
/// assert_eq!(count.load(Ordering::SeqCst), 2);
/// ```
pub trait ReactionPolicy<S: State> {
    /// Called with the state being left, before the machine's state changes.
    fn leaving(&mut self, state: &S) {
        let _ = state;
    }

    /// Called with the state just entered, after the machine's state changed.
    fn entered(&mut self, state: &S) {
        let _ = state;
    }
}

/// A policy holding ordered entry and exit behavior collections per state.
///
/// Implemented by the multi-behavior policies ([`OnEntryAndExit`] and
/// [`OnEntryAndExitEnum`]); the machine forwards its `add_entry_behavior` /
/// `add_exit_behavior` and factory accessors through this trait, so both
/// variants share one registration surface.
///
/// [`OnEntryAndExit`]: crate::reactions::OnEntryAndExit
/// [`OnEntryAndExitEnum`]: crate::reactions::OnEntryAndExitEnum
pub trait EntryExitReactions<S: State>: ReactionPolicy<S> {
    /// Append a behavior to the entry collection for `state`, creating the
    /// collection through the factory on first use.
    fn add_entry(&mut self, state: S, behavior: Behavior);

    /// Append a behavior to the exit collection for `state`, creating the
    /// collection through the factory on first use.
    fn add_exit(&mut self, state: S, behavior: Behavior);

    /// The factory used to create new behavior collections.
    fn collection_factory(&self) -> &BehaviorCollectionFactory;

    /// Replace the factory. Collections already created keep their current
    /// implementation; only collections created afterwards use the new one.
    fn set_collection_factory(&mut self, factory: BehaviorCollectionFactory);
}
