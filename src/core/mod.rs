//! Core vocabulary types for reacting state machines.
//!
//! This module contains the building blocks the machines are assembled from:
//! - State bounds via the `State` and `EnumState` traits
//! - The `Behavior` closure type and ordered behavior containers
//! - The pluggable collection factory that creates those containers
//!
//! Nothing in this module performs a transition; it is pure vocabulary that
//! the `reactions` and `machine` modules compose.

mod behavior;
mod macros;
mod state;

pub use behavior::{
    default_collection_factory, Behavior, BehaviorCollection, BehaviorCollectionFactory,
    FifoCollection,
};
pub use state::{EnumState, State};
