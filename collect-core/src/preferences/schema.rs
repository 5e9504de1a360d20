use std::collections::HashSet;
use std::sync::Arc;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use super::error::PreferenceError;
use crate::collect_export;
use crate::primitives::key_value_store::{
    DevicePreferenceStore, KeyValueStoreError, PreferenceStoreExt,
};

/// Default values shipped with the app, re-applied after a preferences reset.
const PACKAGED_DEFAULTS: &str = include_str!("../../resources/preference_defaults.json");

/// A default preference value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PreferenceValue {
    /// Boolean preference (check boxes)
    Bool(bool),
    /// String preference (lists and text fields)
    String(String),
}

/// One entry of the default schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceDefault {
    /// Preference key
    pub key: String,
    /// Value written when the key is not set
    pub value: PreferenceValue,
}

/// The set of default preference values, equivalent to the defaults declared
/// in the app's preference screens.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Object)]
pub struct PreferenceSchema {
    defaults: Vec<PreferenceDefault>,
}

#[collect_export]
impl PreferenceSchema {
    /// Loads the defaults packaged with the core.
    ///
    /// # Errors
    /// - `PreferenceError` if the packaged defaults are malformed
    #[uniffi::constructor]
    pub fn packaged() -> Result<Arc<Self>, PreferenceError> {
        Self::parse(PACKAGED_DEFAULTS).map(Arc::new)
    }

    /// Loads defaults supplied by the host as a JSON array of `{ "key", "value" }` objects.
    ///
    /// # Errors
    /// - `PreferenceError::Generic` if the JSON cannot be parsed
    /// - `PreferenceError::EmptyKey` or `PreferenceError::DuplicateKey` for invalid entries
    #[uniffi::constructor]
    pub fn from_json(json: String) -> Result<Arc<Self>, PreferenceError> {
        Self::parse(&json).map(Arc::new)
    }

    /// Keys that have a default, in schema order
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.defaults.iter().map(|d| d.key.clone()).collect()
    }
}

impl PreferenceSchema {
    fn parse(json: &str) -> Result<Self, PreferenceError> {
        let defaults: Vec<PreferenceDefault> =
            serde_json::from_str(json).context("parsing preference defaults")?;

        let mut seen = HashSet::new();
        for (index, default) in defaults.iter().enumerate() {
            if default.key.trim().is_empty() {
                return Err(PreferenceError::EmptyKey {
                    index: u32::try_from(index).unwrap_or(u32::MAX),
                });
            }
            if !seen.insert(default.key.as_str()) {
                return Err(PreferenceError::DuplicateKey {
                    key: default.key.clone(),
                });
            }
        }

        Ok(Self { defaults })
    }

    /// The defaults in schema order
    #[must_use]
    pub fn defaults(&self) -> &[PreferenceDefault] {
        &self.defaults
    }

    /// Writes the default of every key that is not set in `store`, in one commit.
    ///
    /// Keys that already hold a value are left alone. Returns how many defaults were written.
    ///
    /// # Errors
    /// - Any error from reading or committing to `store`
    pub fn apply_missing<S: DevicePreferenceStore + ?Sized>(
        &self,
        store: &S,
    ) -> Result<usize, KeyValueStoreError> {
        let mut editor = store.edit();
        let mut written = 0;
        for default in &self.defaults {
            if store.has_key(&default.key)? {
                continue;
            }
            editor = match &default.value {
                PreferenceValue::Bool(value) => editor.put_bool(&default.key, *value),
                PreferenceValue::String(value) => editor.put_string(&default.key, value),
            };
            written += 1;
        }

        if written > 0 {
            editor.commit()?;
        }
        Ok(written)
    }
}
