//! Reset
//!
//! Lets the user return the app to a clean state, one category at a time.
//! The host passes the categories the user ticked to
//! [`ResetCoordinator::reset`] and receives back the ones that could not be
//! completed, so it can tell the user which parts of the reset failed.

mod action;
mod coordinator;

pub use action::{all_reset_actions, ResetAction};
pub use coordinator::ResetCoordinator;
