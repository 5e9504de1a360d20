use thiserror::Error;

use super::{catch_callback_panic, CallbackError};

/// Errors that can occur when interacting with the device preference store
#[allow(clippy::module_name_repetitions)]
#[derive(Debug, Error, uniffi::Error)]
pub enum KeyValueStoreError {
    /// The requested key was not found in the store
    #[error("key not found")]
    KeyNotFound,
    /// The stored value has a different type than the one requested
    #[error("failed to parse value")]
    ParsingFailure,
    /// The store could not durably write the requested edits
    #[error("failed to commit edits")]
    CommitFailure,
    /// An unexpected error occurred in the foreign callback
    #[error("unexpected error in foreign callback: {0}")]
    UnexpectedUniFFICallbackError(String),
}

impl From<uniffi::UnexpectedUniFFICallbackError> for KeyValueStoreError {
    fn from(e: uniffi::UnexpectedUniFFICallbackError) -> Self {
        Self::UnexpectedUniFFICallbackError(e.reason)
    }
}

impl CallbackError for KeyValueStoreError {
    fn callback_panic(operation: &str) -> Self {
        Self::UnexpectedUniFFICallbackError(format!(
            "panic in DevicePreferenceStore.{operation} callback"
        ))
    }
}

/// A single change to the preference store.
///
/// Edits are handed to the store in batches and applied in order.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Enum)]
pub enum PreferenceEdit {
    /// Store a string value
    PutString {
        /// Preference key
        key: String,
        /// New value
        value: String,
    },
    /// Store a boolean value
    PutBool {
        /// Preference key
        key: String,
        /// New value
        value: bool,
    },
    /// Remove a key. Removing a missing key is not an error.
    Remove {
        /// Preference key
        key: String,
    },
    /// Remove every key in the store
    Clear,
}

/// A named preference store implemented by the host app.
///
/// Android backs this with `SharedPreferences` (the default preferences and the
/// separate admin preferences are two instances), iOS with `UserDefaults`.
///
/// This is explicitly **not a secure store!** Do not store anything sensitive here.
#[uniffi::export(with_foreign)]
pub trait DevicePreferenceStore: Send + Sync {
    /// Get a string value
    ///
    /// # Errors
    /// - `KeyValueStoreError::KeyNotFound` if the key is not set
    /// - `KeyValueStoreError::ParsingFailure` if the value is not a string
    fn get_string(&self, key: String) -> Result<String, KeyValueStoreError>;

    /// Get a boolean value
    ///
    /// # Errors
    /// - `KeyValueStoreError::KeyNotFound` if the key is not set
    /// - `KeyValueStoreError::ParsingFailure` if the value is not a boolean
    fn get_bool(&self, key: String) -> Result<bool, KeyValueStoreError>;

    /// Whether any value is stored under `key`
    ///
    /// # Errors
    /// - `KeyValueStoreError::UnexpectedUniFFICallbackError` if the host fails
    fn contains(&self, key: String) -> Result<bool, KeyValueStoreError>;

    /// Apply `edits` as a single transaction and block until it is durably written.
    ///
    /// Either all edits become visible or none do (`SharedPreferences.Editor.commit()`).
    ///
    /// # Errors
    /// - `KeyValueStoreError::CommitFailure` if the write did not persist
    fn commit(&self, edits: Vec<PreferenceEdit>) -> Result<(), KeyValueStoreError>;

    /// Apply `edits` in memory right away and persist them in the background
    /// (`SharedPreferences.Editor.apply()`). Failures are not reported.
    fn apply(&self, edits: Vec<PreferenceEdit>);
}

/// Batches edits to a [`DevicePreferenceStore`], like a `SharedPreferences.Editor`.
#[must_use = "edits are only written by `commit` or `apply`"]
pub struct PreferenceEditor<'a, S: DevicePreferenceStore + ?Sized> {
    store: &'a S,
    edits: Vec<PreferenceEdit>,
}

impl<'a, S: DevicePreferenceStore + ?Sized> PreferenceEditor<'a, S> {
    fn new(store: &'a S) -> Self {
        Self {
            store,
            edits: Vec::new(),
        }
    }

    /// Queue a string write
    pub fn put_string(mut self, key: &str, value: &str) -> Self {
        self.edits.push(PreferenceEdit::PutString {
            key: key.to_string(),
            value: value.to_string(),
        });
        self
    }

    /// Queue a boolean write
    pub fn put_bool(mut self, key: &str, value: bool) -> Self {
        self.edits.push(PreferenceEdit::PutBool {
            key: key.to_string(),
            value,
        });
        self
    }

    /// Queue a removal
    pub fn remove(mut self, key: &str) -> Self {
        self.edits.push(PreferenceEdit::Remove {
            key: key.to_string(),
        });
        self
    }

    /// Queue removal of every key
    pub fn clear(mut self) -> Self {
        self.edits.push(PreferenceEdit::Clear);
        self
    }

    /// Write the queued edits synchronously.
    ///
    /// # Errors
    /// - Any error from the underlying store's `commit`
    pub fn commit(self) -> Result<(), KeyValueStoreError> {
        let Self { store, edits } = self;
        catch_callback_panic("commit", || store.commit(edits))
    }

    /// Hand the queued edits to the store without waiting for persistence.
    pub fn apply(self) {
        let Self { store, edits } = self;
        let result: Result<(), KeyValueStoreError> = catch_callback_panic("apply", || {
            store.apply(edits);
            Ok(())
        });
        if let Err(e) = result {
            crate::warn!("preferences.apply_failed error={e}");
        }
    }
}

/// Read helpers and editor access for all [`DevicePreferenceStore`]s.
#[allow(clippy::module_name_repetitions)]
pub trait PreferenceStoreExt: DevicePreferenceStore {
    /// Reads a string, returning `default` when the key is missing or unreadable.
    fn string_or(&self, key: &str, default: &str) -> String {
        match catch_callback_panic("get_string", || self.get_string(key.to_string())) {
            Ok(value) => value,
            Err(KeyValueStoreError::KeyNotFound) => default.to_string(),
            Err(e) => {
                crate::warn!("preferences.read_failed key={key} error={e}");
                default.to_string()
            }
        }
    }

    /// Reads a boolean, returning `default` when the key is missing or unreadable.
    fn bool_or(&self, key: &str, default: bool) -> bool {
        match catch_callback_panic("get_bool", || self.get_bool(key.to_string())) {
            Ok(value) => value,
            Err(KeyValueStoreError::KeyNotFound) => default,
            Err(e) => {
                crate::warn!("preferences.read_failed key={key} error={e}");
                default
            }
        }
    }

    /// Whether `key` is set.
    ///
    /// # Errors
    /// - Any error from the underlying store's `contains`
    fn has_key(&self, key: &str) -> Result<bool, KeyValueStoreError> {
        catch_callback_panic("contains", || self.contains(key.to_string()))
    }

    /// Starts a batch of edits.
    fn edit(&self) -> PreferenceEditor<'_, Self> {
        PreferenceEditor::new(self)
    }
}

impl<T: DevicePreferenceStore + ?Sized> PreferenceStoreExt for T {}
