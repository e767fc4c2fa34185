//! The state machine itself.
//!
//! One generic type, [`StateMachine`], holds the current state and drives
//! the transition operation; everything variant-specific lives in the
//! injected [`ReactionPolicy`](crate::reactions::ReactionPolicy). Aliases
//! pair the machine with each stock policy:
//!
//! - [`OnEntryMachine`] / [`OnExitMachine`]: one behavior per state, run on
//!   entry or on exit
//! - [`OnEntryAndExitMachine`]: ordered entry and exit behavior collections
//!   per state
//! - [`OnEntryAndExitEnumMachine`]: the same over a closed, enumerated
//!   state domain

mod state_machine;

pub use state_machine::{
    OnEntryAndExitEnumMachine, OnEntryAndExitMachine, OnEntryMachine, OnExitMachine, StateMachine,
};
