//! Reflex: a reacting state machine library
//!
//! Reflex is a small building block for systems that need to attach side
//! effects to state changes — UI widgets, protocol handlers, workflow
//! engines — without writing ad-hoc conditional dispatch each time the
//! state moves. A machine holds one current state value; callers register
//! zero-argument closures ("behaviors") against state values, and the
//! machine runs them synchronously when a transition enters or leaves the
//! matching state.
//!
//! # Core Concepts
//!
//! - **State**: any clonable, equality-comparable, hashable value via the
//!   `State` bound — closed enums, integers, strings all qualify
//! - **Reaction policy**: an injected strategy deciding which behaviors run
//!   when a state is left and when one is entered
//! - **Behavior collections**: ordered, append-only per-state behavior
//!   sequences, created through a pluggable factory
//!
//! # Example
//!
//! ```rust
//! use reflex::{state_enum, OnEntryMachine};
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//!
//! state_enum! {
//!     enum Light {
//!         Red,
//!         Green,
//!     }
//! }
//!
//! let crossings = Arc::new(AtomicUsize::new(0));
//!
//! let mut machine = OnEntryMachine::new(Light::Red);
//! let counter = Arc::clone(&crossings);
//! machine.set_behavior_for_state(Light::Green, move || {
//!     counter.fetch_add(1, Ordering::SeqCst);
//! });
//!
//! machine.set_state(Light::Green);
//! assert!(machine.is_in_state(Light::Green));
//! assert_eq!(crossings.load(Ordering::SeqCst), 1);
//!
//! // Transitioning to the current state is a no-op and fires nothing.
//! machine.set_state(Light::Green);
//! assert_eq!(crossings.load(Ordering::SeqCst), 1);
//! ```

pub mod builder;
pub mod core;
pub mod machine;
pub mod reactions;

// Re-export commonly used types
pub use builder::MachineBuilder;
pub use core::{
    default_collection_factory, Behavior, BehaviorCollection, BehaviorCollectionFactory, EnumState,
    FifoCollection, State,
};
pub use machine::{
    OnEntryAndExitEnumMachine, OnEntryAndExitMachine, OnEntryMachine, OnExitMachine, StateMachine,
};
pub use reactions::{
    BehaviorRegistry, CollectionRegistry, EntryExitReactions, EnumRegistry, OnEntry, OnEntryAndExit,
    OnEntryAndExitEnum, OnExit, ReactionPolicy,
};
