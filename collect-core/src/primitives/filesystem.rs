use thiserror::Error;

use super::{catch_callback_panic, CallbackError};

/// Errors that can occur during file store operations
#[derive(Debug, Error, uniffi::Error)]
pub enum FileStoreError {
    /// The path does not exist
    #[error("requested path does not exist")]
    PathDoesNotExist,
    /// The caller is not allowed to read or modify the path
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    /// Something went wrong with the filesystem operation
    #[error("IO failure: {0}")]
    IoFailure(String),
    /// Unexpected UniFFI callback error
    #[error("unexpected uniffi callback error: {0}")]
    UnexpectedUniFFICallbackError(String),
}

/// Converts unexpected UniFFI callback errors to `FileStoreError`.
///
/// Required for foreign trait support: when a native implementation of
/// [`DeviceFileStore`] hits an unhandled exception, UniFFI reports it as this
/// variant instead of panicking.
impl From<uniffi::UnexpectedUniFFICallbackError> for FileStoreError {
    fn from(error: uniffi::UnexpectedUniFFICallbackError) -> Self {
        Self::UnexpectedUniFFICallbackError(error.reason)
    }
}

impl CallbackError for FileStoreError {
    fn callback_panic(operation: &str) -> Self {
        Self::UnexpectedUniFFICallbackError(format!(
            "panic in DeviceFileStore.{operation} callback"
        ))
    }
}

/// Hierarchical storage implemented by the native side.
///
/// All paths are absolute paths as understood by the host (for example
/// `/storage/emulated/0/odk/instances`).
#[uniffi::export(with_foreign)]
pub trait DeviceFileStore: Send + Sync {
    /// Check whether a file or folder exists at `path`
    ///
    /// # Errors
    /// - `FileStoreError` if the check itself fails
    fn exists(&self, path: String) -> Result<bool, FileStoreError>;

    /// Check whether `path` is a folder
    ///
    /// # Errors
    /// - `FileStoreError` if the check itself fails
    fn is_directory(&self, path: String) -> Result<bool, FileStoreError>;

    /// List the entries of a folder. No recursion.
    ///
    /// # Notes
    /// Entries are returned without the folder path. Only the entry name is returned.
    ///
    /// # Errors
    /// - `FileStoreError::PathDoesNotExist` if the folder does not exist
    /// - `FileStoreError::PermissionDenied` if the folder cannot be listed
    fn list_directory(&self, path: String) -> Result<Vec<String>, FileStoreError>;

    /// Delete a file or an empty folder
    ///
    /// # Errors
    /// - `FileStoreError::PathDoesNotExist` if nothing exists at `path`
    /// - `FileStoreError::IoFailure` if the entry cannot be deleted (including non-empty folders)
    fn delete(&self, path: String) -> Result<(), FileStoreError>;
}

/// Joins a folder path and an entry name as returned by `list_directory`.
#[must_use]
pub fn join_path(folder: &str, entry: &str) -> String {
    if folder.is_empty() {
        return entry.to_string();
    }
    format!("{}/{}", folder.trim_end_matches('/'), entry.trim_start_matches('/'))
}

/// Deletion helpers for all [`DeviceFileStore`]s.
///
/// These never return errors: failures are logged and reported as `false`.
#[allow(clippy::module_name_repetitions)]
pub trait FileStoreExt: DeviceFileStore {
    /// Deletes every entry below `path`, depth-first, keeping `path` itself.
    ///
    /// A missing `path` counts as success. A folder that cannot be listed is
    /// treated as empty, which also counts as success. Every entry is attempted
    /// even after a failure; the result is `true` only if all of them were deleted.
    fn delete_folder_contents(&self, path: &str) -> bool {
        match catch_callback_panic("exists", || self.exists(path.to_string())) {
            Ok(false) => return true,
            Ok(true) => {}
            Err(e) => {
                crate::error!("filesystem.exists_failed path={path} error={e}");
                return false;
            }
        }

        let mut all_deleted = true;
        for entry in self.list_entries(path) {
            all_deleted &= self.delete_recursive(&join_path(path, &entry));
        }
        all_deleted
    }

    /// Deletes `path`, first emptying it if it is a folder.
    ///
    /// Failures below `path` are not reported on their own; they surface as a
    /// failure to delete `path` itself.
    fn delete_recursive(&self, path: &str) -> bool {
        let is_directory =
            catch_callback_panic("is_directory", || self.is_directory(path.to_string()))
                .unwrap_or_else(|e| {
                    crate::warn!("filesystem.is_directory_failed path={path} error={e}");
                    false
                });

        if is_directory {
            for entry in self.list_entries(path) {
                self.delete_recursive(&join_path(path, &entry));
            }
        }

        match catch_callback_panic("delete", || self.delete(path.to_string())) {
            Ok(()) => true,
            Err(e) => {
                crate::warn!("filesystem.delete_failed path={path} error={e}");
                false
            }
        }
    }

    /// Deletes a single file. A missing file counts as success.
    fn delete_file_if_present(&self, path: &str) -> bool {
        match catch_callback_panic("exists", || self.exists(path.to_string())) {
            Ok(false) => true,
            Ok(true) => match catch_callback_panic("delete", || self.delete(path.to_string())) {
                Ok(()) => true,
                Err(e) => {
                    crate::warn!("filesystem.delete_failed path={path} error={e}");
                    false
                }
            },
            Err(e) => {
                crate::error!("filesystem.exists_failed path={path} error={e}");
                false
            }
        }
    }

    /// Lists `path`, treating an unreadable folder as an empty one.
    fn list_entries(&self, path: &str) -> Vec<String> {
        catch_callback_panic("list_directory", || self.list_directory(path.to_string()))
            .unwrap_or_else(|e| {
                crate::warn!(
                    "filesystem.list_failed path={path} error={e} treating_as=empty"
                );
                Vec::new()
            })
    }
}

impl<T: DeviceFileStore + ?Sized> FileStoreExt for T {}
