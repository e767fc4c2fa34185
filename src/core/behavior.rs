//! Behaviors and the ordered containers that hold them.
//!
//! A behavior is a zero-argument, no-return, side-effecting closure supplied
//! by the embedding code. The multi-behavior machine variants keep one
//! ordered container of behaviors per state; the container implementation is
//! pluggable through a factory so callers can substitute, say, a
//! deduplicating or priority-ordered container without touching machine
//! logic.

use std::sync::Arc;

/// A caller-supplied unit of work run when a machine changes state.
///
/// Behaviors take no arguments and return nothing; they act purely through
/// the state they capture. They run synchronously, in-line, on the thread
/// that calls the transition operation.
pub type Behavior = Box<dyn FnMut() + Send>;

/// An ordered, mutable, append-only container of behaviors.
///
/// The container's iteration order is its invocation order. The default
/// implementation is [`FifoCollection`], which runs behaviors in insertion
/// order; alternative implementations may reorder or deduplicate on `add`.
///
/// # Example
///
/// ```rust
/// use reflex::core::{BehaviorCollection, FifoCollection};
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
///
/// let counter = Arc::new(AtomicUsize::new(0));
///
/// let mut collection = FifoCollection::new();
/// let seen = Arc::clone(&counter);
/// collection.add(Box::new(move || {
///     seen.fetch_add(1, Ordering::SeqCst);
/// }));
///
/// collection.run_all();
/// assert_eq!(counter.load(Ordering::SeqCst), 1);
/// ```
pub trait BehaviorCollection: Send {
    /// Append a behavior to the container.
    fn add(&mut self, behavior: Behavior);

    /// Run every behavior in the container, in the container's order.
    fn run_all(&mut self);

    /// Number of behaviors held.
    fn len(&self) -> usize;

    /// Whether the container holds no behaviors.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The default behavior container: runs behaviors in insertion order.
pub struct FifoCollection {
    behaviors: Vec<Behavior>,
}

impl FifoCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self {
            behaviors: Vec::new(),
        }
    }
}

impl Default for FifoCollection {
    fn default() -> Self {
        Self::new()
    }
}

impl BehaviorCollection for FifoCollection {
    fn add(&mut self, behavior: Behavior) {
        self.behaviors.push(behavior);
    }

    fn run_all(&mut self) {
        for behavior in &mut self.behaviors {
            behavior();
        }
    }

    fn len(&self) -> usize {
        self.behaviors.len()
    }
}

/// Strategy that creates a fresh, empty behavior container on demand.
///
/// The multi-behavior machines call the factory the first time a behavior is
/// registered for a given state. The factory is shared (`Arc`) so it can be
/// cloned into registries and swapped at runtime through the machine's
/// accessor; swapping affects only containers created afterwards.
pub type BehaviorCollectionFactory = Arc<dyn Fn() -> Box<dyn BehaviorCollection> + Send + Sync>;

/// The default factory: produces [`FifoCollection`]s.
///
/// # Example
///
/// ```rust
/// use reflex::core::{default_collection_factory, BehaviorCollection};
///
/// let factory = default_collection_factory();
/// let collection = factory();
/// assert!(collection.is_empty());
/// ```
pub fn default_collection_factory() -> BehaviorCollectionFactory {
    Arc::new(|| Box::new(FifoCollection::new()))
}
