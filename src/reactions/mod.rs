//! Reaction policies: the strategies a machine runs behaviors through.
//!
//! A [`StateMachine`](crate::machine::StateMachine) does not decide which
//! behaviors fire on a transition; it notifies its injected policy that the
//! current state is being left and that the new state was entered, and the
//! policy does the rest. The policies here cover the stock variants:
//!
//! - [`OnEntry`] / [`OnExit`]: at most one behavior per state, fired when the
//!   machine enters or leaves that state
//! - [`OnEntryAndExit`]: ordered collections of entry and exit behaviors per
//!   state, hash-keyed for open state domains
//! - [`OnEntryAndExitEnum`]: the same semantics over a dense ordinal-indexed
//!   table for closed, enumerated state domains
//!
//! Custom policies implement [`ReactionPolicy`] and plug into
//! `StateMachine::with_policy`.

mod collection;
mod enumerated;
mod policy;
mod single;

pub use collection::{CollectionRegistry, OnEntryAndExit};
pub use enumerated::{EnumRegistry, OnEntryAndExitEnum};
pub use policy::{EntryExitReactions, ReactionPolicy};
pub use single::{BehaviorRegistry, OnEntry, OnExit};
