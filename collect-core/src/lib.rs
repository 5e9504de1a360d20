#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    dead_code
)]

//! `collect-core` is the native core shared by the Collect data-collection apps.
//!
//! It owns the logic that must behave identically on every host: the one-shot
//! migration of legacy account preferences into form metadata, and the reset
//! of local application state (preferences, saved instances, blank forms and
//! the various caches). Storage, databases and locale handling stay with the
//! host and are reached through foreign traits.

/// Host capabilities (preference store, file store, databases, locale), logging and storage layout.
pub mod primitives;

/// Preference keys, the packaged default schema and the form metadata migrator.
pub mod preferences;

/// Resetting local application state.
pub mod reset;

/// Error handling helpers shared by the crate's error enums.
pub mod collect_error;

#[cfg(test)]
pub(crate) mod test_utils;

pub use collect_error::collect_error;
pub use collect_macros::collect_export;

uniffi::setup_scaffolding!("collect_core");
