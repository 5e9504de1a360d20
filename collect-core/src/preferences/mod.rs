//! Preferences
//!
//! The app keeps its settings in the host's preference stores (see
//! [`DevicePreferenceStore`](crate::primitives::key_value_store::DevicePreferenceStore)).
//! This module names the keys the core touches, carries the packaged default
//! values, and migrates legacy account preferences into form metadata.

/// Preference key names.
pub mod keys;

mod error;
mod migrator;
mod schema;

pub use error::PreferenceError;
pub use migrator::{FormMetadataMigrator, MIGRATION_FLOW};
pub use schema::{PreferenceDefault, PreferenceSchema, PreferenceValue};
