#![allow(dead_code)]

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use collect_core::preferences::PreferenceSchema;
use collect_core::primitives::config::{ResetOptions, StorageLayout};
use collect_core::primitives::database::{DatabaseError, DeviceDatabase};
use collect_core::primitives::key_value_store::{
    DevicePreferenceStore, KeyValueStoreError, PreferenceEdit,
};
use collect_core::primitives::local_filesystem::LocalFileStore;
use collect_core::primitives::locale::LocaleApplier;
use collect_core::reset::ResetCoordinator;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Str(String),
    Bool(bool),
}

/// Preference store backed by a `HashMap`, standing in for `SharedPreferences`
#[derive(Default)]
pub struct MapPreferences {
    pub values: Mutex<HashMap<String, Value>>,
    pub commits: Mutex<usize>,
}

impl MapPreferences {
    pub fn with_strings(entries: &[(&str, &str)]) -> Arc<Self> {
        let store = Self::default();
        {
            let mut values = store.values.lock().unwrap();
            for (key, value) in entries {
                values.insert((*key).to_string(), Value::Str((*value).to_string()));
            }
        }
        Arc::new(store)
    }

    pub fn string(&self, key: &str) -> Option<String> {
        match self.values.lock().unwrap().get(key) {
            Some(Value::Str(value)) => Some(value.clone()),
            _ => None,
        }
    }

    pub fn boolean(&self, key: &str) -> Option<bool> {
        match self.values.lock().unwrap().get(key) {
            Some(Value::Bool(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn commits(&self) -> usize {
        *self.commits.lock().unwrap()
    }

    fn write(&self, edits: Vec<PreferenceEdit>) {
        let mut values = self.values.lock().unwrap();
        for edit in edits {
            match edit {
                PreferenceEdit::PutString { key, value } => {
                    values.insert(key, Value::Str(value));
                }
                PreferenceEdit::PutBool { key, value } => {
                    values.insert(key, Value::Bool(value));
                }
                PreferenceEdit::Remove { key } => {
                    values.remove(&key);
                }
                PreferenceEdit::Clear => values.clear(),
            }
        }
    }
}

impl DevicePreferenceStore for MapPreferences {
    fn get_string(&self, key: String) -> Result<String, KeyValueStoreError> {
        match self.values.lock().unwrap().get(&key) {
            Some(Value::Str(value)) => Ok(value.clone()),
            Some(Value::Bool(_)) => Err(KeyValueStoreError::ParsingFailure),
            None => Err(KeyValueStoreError::KeyNotFound),
        }
    }

    fn get_bool(&self, key: String) -> Result<bool, KeyValueStoreError> {
        match self.values.lock().unwrap().get(&key) {
            Some(Value::Bool(value)) => Ok(*value),
            Some(Value::Str(_)) => Err(KeyValueStoreError::ParsingFailure),
            None => Err(KeyValueStoreError::KeyNotFound),
        }
    }

    fn contains(&self, key: String) -> Result<bool, KeyValueStoreError> {
        Ok(self.values.lock().unwrap().contains_key(&key))
    }

    fn commit(&self, edits: Vec<PreferenceEdit>) -> Result<(), KeyValueStoreError> {
        self.write(edits);
        *self.commits.lock().unwrap() += 1;
        Ok(())
    }

    fn apply(&self, edits: Vec<PreferenceEdit>) {
        self.write(edits);
    }
}

pub struct NoopDatabase;

impl DeviceDatabase for NoopDatabase {
    fn name(&self) -> String {
        "noop".to_string()
    }

    fn delete_database(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

#[derive(Default)]
pub struct LocaleSpy {
    pub applied: Mutex<Vec<String>>,
}

impl LocaleApplier for LocaleSpy {
    fn apply_language(&self, language_tag: String) {
        self.applied.lock().unwrap().push(language_tag);
    }
}

pub struct Harness {
    pub preferences: Arc<MapPreferences>,
    pub admin: Arc<MapPreferences>,
    pub locale: Arc<LocaleSpy>,
    pub coordinator: Arc<ResetCoordinator>,
}

/// Builds a coordinator over the real filesystem below `odk_root`.
pub fn harness(odk_root: &Path, tile_cache: &Path) -> Harness {
    let preferences = MapPreferences::with_strings(&[]);
    let admin = MapPreferences::with_strings(&[]);
    let locale = Arc::new(LocaleSpy::default());
    let coordinator = ResetCoordinator::new(
        preferences.clone(),
        admin.clone(),
        Arc::new(LocalFileStore::new()),
        Arc::new(NoopDatabase),
        Arc::new(NoopDatabase),
        locale.clone(),
        StorageLayout::from_root(
            &odk_root.to_string_lossy(),
            &tile_cache.to_string_lossy(),
        ),
        PreferenceSchema::packaged().expect("packaged defaults parse"),
        ResetOptions::default(),
    );

    Harness {
        preferences,
        admin,
        locale,
        coordinator,
    }
}
