use std::fs;
use std::io;
use std::path::Path;

use super::filesystem::{DeviceFileStore, FileStoreError};
use crate::collect_error::AnyhowErrorExt;

/// [`DeviceFileStore`] over the local filesystem.
///
/// Used by desktop hosts and by integration tests. Mobile hosts implement the
/// trait natively.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFileStore;

impl LocalFileStore {
    /// Creates a new local file store
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

fn map_io_error(operation: &str, path: &str, error: io::Error) -> FileStoreError {
    match error.kind() {
        io::ErrorKind::NotFound => FileStoreError::PathDoesNotExist,
        io::ErrorKind::PermissionDenied => FileStoreError::PermissionDenied(path.to_string()),
        _ => FileStoreError::IoFailure(
            anyhow::Error::new(error)
                .context(format!("{operation} {path}"))
                .to_generic_message(),
        ),
    }
}

impl DeviceFileStore for LocalFileStore {
    fn exists(&self, path: String) -> Result<bool, FileStoreError> {
        Path::new(&path)
            .try_exists()
            .map_err(|e| map_io_error("exists", &path, e))
    }

    fn is_directory(&self, path: String) -> Result<bool, FileStoreError> {
        match fs::symlink_metadata(&path) {
            Ok(metadata) => Ok(metadata.is_dir()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(map_io_error("stat", &path, e)),
        }
    }

    fn list_directory(&self, path: String) -> Result<Vec<String>, FileStoreError> {
        let entries = fs::read_dir(&path).map_err(|e| map_io_error("list", &path, e))?;
        let mut names = entries
            .map(|entry| {
                entry
                    .map(|entry| entry.file_name().to_string_lossy().into_owned())
                    .map_err(|e| map_io_error("list", &path, e))
            })
            .collect::<Result<Vec<_>, _>>()?;
        names.sort();
        Ok(names)
    }

    fn delete(&self, path: String) -> Result<(), FileStoreError> {
        if self.is_directory(path.clone())? {
            fs::remove_dir(&path).map_err(|e| map_io_error("remove_dir", &path, e))
        } else {
            fs::remove_file(&path).map_err(|e| map_io_error("remove_file", &path, e))
        }
    }
}
