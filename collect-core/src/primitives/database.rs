use thiserror::Error;

use super::{catch_callback_panic, CallbackError};

/// Errors reported by a host database handle
#[derive(Debug, Error, uniffi::Error)]
pub enum DatabaseError {
    /// The database file could not be deleted
    #[error("failed to delete database: {0}")]
    DeleteFailure(String),
    /// Unexpected error in foreign callback
    #[error("unexpected error in foreign callback: {0}")]
    UnexpectedUniFFICallbackError(String),
}

impl From<uniffi::UnexpectedUniFFICallbackError> for DatabaseError {
    fn from(e: uniffi::UnexpectedUniFFICallbackError) -> Self {
        Self::UnexpectedUniFFICallbackError(e.reason)
    }
}

impl CallbackError for DatabaseError {
    fn callback_panic(operation: &str) -> Self {
        Self::UnexpectedUniFFICallbackError(format!(
            "panic in DeviceDatabase.{operation} callback"
        ))
    }
}

/// A database owned by the host app, such as the instances or forms database.
///
/// On Android this wraps `InstancesDao.deleteInstancesDatabase()` and
/// `FormsDao.deleteFormsDatabase()`.
#[uniffi::export(with_foreign)]
pub trait DeviceDatabase: Send + Sync {
    /// Human readable name used in logs (e.g. `instances`)
    fn name(&self) -> String;

    /// Drops all content of the database
    ///
    /// # Errors
    /// - `DatabaseError::DeleteFailure` if the database could not be deleted
    fn delete_database(&self) -> Result<(), DatabaseError>;
}

/// Deletes the database, logging the outcome.
///
/// Returns whether the deletion succeeded.
pub(crate) fn delete_database_logged(database: &dyn DeviceDatabase) -> bool {
    let name = catch_callback_panic("name", || Ok::<_, DatabaseError>(database.name()))
        .unwrap_or_else(|_| "unknown".to_string());

    match catch_callback_panic("delete_database", || database.delete_database()) {
        Ok(()) => {
            crate::debug!("database.deleted name={name}");
            true
        }
        Err(e) => {
            crate::error!("database.delete_failed name={name} error={e}");
            false
        }
    }
}
