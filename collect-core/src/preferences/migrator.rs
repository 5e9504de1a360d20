use std::sync::Arc;

use chrono::Utc;

use super::keys::{
    KEY_METADATA_EMAIL, KEY_METADATA_MIGRATED, KEY_METADATA_USERNAME,
    KEY_SELECTED_GOOGLE_ACCOUNT, KEY_USERNAME,
};
use crate::collect_export;
use crate::primitives::key_value_store::{DevicePreferenceStore, PreferenceStoreExt};

/// The migration flow, from source key to target key, in processing order.
pub const MIGRATION_FLOW: [(&str, &str); 2] = [
    (KEY_USERNAME, KEY_METADATA_USERNAME),
    (KEY_SELECTED_GOOGLE_ACCOUNT, KEY_METADATA_EMAIL),
];

/// What a call to [`FormMetadataMigrator::migrate`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MigrationOutcome {
    /// The flag was already set; nothing was written
    AlreadyMigrated,
    /// The values were copied and the flag set
    Migrated {
        /// Number of target keys written
        copied: usize,
    },
    /// The commit failed; the flag stays unset so the next start retries
    CommitFailed,
}

/// Copies legacy account preferences into the form metadata preferences, once.
///
/// The `username` preference becomes the metadata username and the selected
/// Google account becomes the metadata email. Source keys are left untouched.
/// A persisted flag makes the migration run at most once per install; resetting
/// preferences clears the flag.
///
/// # Examples
///
/// ## Kotlin
///
/// ```kotlin
/// // Application.onCreate()
/// FormMetadataMigrator(defaultPreferenceStore).migrate()
/// ```
#[derive(uniffi::Object)]
pub struct FormMetadataMigrator {
    store: Arc<dyn DevicePreferenceStore>,
}

#[collect_export]
impl FormMetadataMigrator {
    /// Creates a migrator over the app's default preference store
    #[uniffi::constructor]
    #[must_use]
    pub fn new(store: Arc<dyn DevicePreferenceStore>) -> Arc<Self> {
        Arc::new(Self { store })
    }

    /// Migrates the form metadata if it hasn't already been done.
    ///
    /// Never fails: missing or unreadable source values are skipped and a failed
    /// commit is logged.
    pub fn migrate(&self) {
        if let MigrationOutcome::Migrated { copied } = migrate_store(self.store.as_ref()) {
            crate::info!(
                "metadata_migration.completed copied={copied} timestamp={}",
                Utc::now().to_rfc3339()
            );
        }
    }
}

/// Runs the migration against `store`.
pub(crate) fn migrate_store<S: DevicePreferenceStore + ?Sized>(store: &S) -> MigrationOutcome {
    if store.bool_or(KEY_METADATA_MIGRATED, false) {
        crate::info!(
            "metadata_migration.skipped reason=already_migrated timestamp={}",
            Utc::now().to_rfc3339()
        );
        return MigrationOutcome::AlreadyMigrated;
    }

    let mut editor = store.edit();
    let mut copied = 0;
    for (source, target) in MIGRATION_FLOW {
        let value = store.string_or(source, "");
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        crate::info!("metadata_migration.copy source={source} target={target}");
        editor = editor.put_string(target, value);
        copied += 1;
    }

    match editor.put_bool(KEY_METADATA_MIGRATED, true).commit() {
        Ok(()) => MigrationOutcome::Migrated { copied },
        Err(e) => {
            crate::error!(
                "metadata_migration.commit_failed error={e} timestamp={}",
                Utc::now().to_rfc3339()
            );
            MigrationOutcome::CommitFailed
        }
    }
}
