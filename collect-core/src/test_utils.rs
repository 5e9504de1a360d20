//! Test utilities for unit tests.
//!
//! Every fake shares its state between clones, so a test can hand one clone to
//! the code under test and inspect another.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::primitives::database::{DatabaseError, DeviceDatabase};
use crate::primitives::filesystem::{DeviceFileStore, FileStoreError};
use crate::primitives::key_value_store::{
    DevicePreferenceStore, KeyValueStoreError, PreferenceEdit,
};
use crate::primitives::locale::LocaleApplier;

////////////////////////////////////////////////////////////////////////////////
// Preferences
////////////////////////////////////////////////////////////////////////////////

/// A stored preference value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredValue {
    Str(String),
    Bool(bool),
}

#[derive(Default)]
struct PreferenceState {
    values: BTreeMap<String, StoredValue>,
    commits: usize,
    applies: usize,
    writes: usize,
    fail_commits: bool,
    fail_removal_of: Option<String>,
    removal_attempts: Vec<String>,
}

impl PreferenceState {
    fn write(&mut self, edits: &[PreferenceEdit]) {
        for edit in edits {
            match edit {
                PreferenceEdit::PutString { key, value } => {
                    self.values
                        .insert(key.clone(), StoredValue::Str(value.clone()));
                }
                PreferenceEdit::PutBool { key, value } => {
                    self.values.insert(key.clone(), StoredValue::Bool(*value));
                }
                PreferenceEdit::Remove { key } => {
                    self.values.remove(key);
                }
                PreferenceEdit::Clear => self.values.clear(),
            }
            self.writes += 1;
        }
    }
}

/// In-memory [`DevicePreferenceStore`] that counts writes and can fail on demand.
#[derive(Clone, Default)]
pub struct InMemoryPreferenceStore {
    state: Arc<Mutex<PreferenceState>>,
}

impl InMemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding `entries` as strings. Seeding is not counted as a write.
    pub fn with_strings(entries: &[(&str, &str)]) -> Self {
        let store = Self::new();
        {
            let mut state = store.state.lock().unwrap();
            for (key, value) in entries {
                state
                    .values
                    .insert((*key).to_string(), StoredValue::Str((*value).to_string()));
            }
        }
        store
    }

    pub fn string(&self, key: &str) -> Option<String> {
        match self.state.lock().unwrap().values.get(key) {
            Some(StoredValue::Str(value)) => Some(value.clone()),
            _ => None,
        }
    }

    pub fn boolean(&self, key: &str) -> Option<bool> {
        match self.state.lock().unwrap().values.get(key) {
            Some(StoredValue::Bool(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().unwrap().values.is_empty()
    }

    pub fn snapshot(&self) -> BTreeMap<String, StoredValue> {
        self.state.lock().unwrap().values.clone()
    }

    /// Number of successful `commit` calls
    pub fn commit_count(&self) -> usize {
        self.state.lock().unwrap().commits
    }

    /// Number of `apply` calls
    pub fn apply_count(&self) -> usize {
        self.state.lock().unwrap().applies
    }

    /// Number of individual edits written by `commit` or `apply`
    pub fn write_count(&self) -> usize {
        self.state.lock().unwrap().writes
    }

    /// Makes every following `commit` fail
    pub fn fail_commits(&self) {
        self.state.lock().unwrap().fail_commits = true;
    }

    /// Makes any `commit` that removes `key` fail
    pub fn fail_removal_of(&self, key: &str) {
        self.state.lock().unwrap().fail_removal_of = Some(key.to_string());
    }

    /// Keys of every removal handed to `commit`, in call order, including failed ones
    pub fn removal_attempts(&self) -> Vec<String> {
        self.state.lock().unwrap().removal_attempts.clone()
    }
}

impl DevicePreferenceStore for InMemoryPreferenceStore {
    fn get_string(&self, key: String) -> Result<String, KeyValueStoreError> {
        match self.state.lock().unwrap().values.get(&key) {
            Some(StoredValue::Str(value)) => Ok(value.clone()),
            Some(StoredValue::Bool(_)) => Err(KeyValueStoreError::ParsingFailure),
            None => Err(KeyValueStoreError::KeyNotFound),
        }
    }

    fn get_bool(&self, key: String) -> Result<bool, KeyValueStoreError> {
        match self.state.lock().unwrap().values.get(&key) {
            Some(StoredValue::Bool(value)) => Ok(*value),
            Some(StoredValue::Str(_)) => Err(KeyValueStoreError::ParsingFailure),
            None => Err(KeyValueStoreError::KeyNotFound),
        }
    }

    fn contains(&self, key: String) -> Result<bool, KeyValueStoreError> {
        Ok(self.state.lock().unwrap().values.contains_key(&key))
    }

    fn commit(&self, edits: Vec<PreferenceEdit>) -> Result<(), KeyValueStoreError> {
        let mut state = self.state.lock().unwrap();

        let mut removes_failing_key = false;
        for edit in &edits {
            if let PreferenceEdit::Remove { key } = edit {
                state.removal_attempts.push(key.clone());
                removes_failing_key |= state.fail_removal_of.as_deref() == Some(key.as_str());
            }
        }

        if state.fail_commits || removes_failing_key {
            return Err(KeyValueStoreError::CommitFailure);
        }

        state.write(&edits);
        state.commits += 1;
        Ok(())
    }

    fn apply(&self, edits: Vec<PreferenceEdit>) {
        let mut state = self.state.lock().unwrap();
        state.write(&edits);
        state.applies += 1;
    }
}

////////////////////////////////////////////////////////////////////////////////
// Files
////////////////////////////////////////////////////////////////////////////////

#[derive(Default)]
struct FileTree {
    directories: BTreeSet<String>,
    files: BTreeSet<String>,
    deny_delete: HashSet<String>,
    deny_list: HashSet<String>,
    delete_calls: usize,
}

impl FileTree {
    fn add_parents(&mut self, path: &str) {
        for (index, _) in path.match_indices('/').filter(|(index, _)| *index > 0) {
            self.directories.insert(path[..index].to_string());
        }
    }

    fn children(&self, folder: &str) -> Vec<String> {
        let prefix = format!("{}/", folder.trim_end_matches('/'));
        self.directories
            .iter()
            .chain(self.files.iter())
            .filter_map(|path| path.strip_prefix(&prefix))
            .filter(|rest| !rest.is_empty() && !rest.contains('/'))
            .map(ToString::to_string)
            .collect()
    }
}

/// In-memory [`DeviceFileStore`] with absolute paths and per-path failures.
#[derive(Clone, Default)]
pub struct InMemoryFileStore {
    tree: Arc<Mutex<FileTree>>,
}

impl InMemoryFileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding `paths` as files, with their parent folders.
    pub fn with_files(paths: &[&str]) -> Self {
        let store = Self::new();
        store.add_files(paths);
        store
    }

    pub fn add_files(&self, paths: &[&str]) {
        let mut tree = self.tree.lock().unwrap();
        for path in paths {
            tree.add_parents(path);
            tree.files.insert((*path).to_string());
        }
    }

    pub fn add_dir(&self, path: &str) {
        let mut tree = self.tree.lock().unwrap();
        tree.add_parents(path);
        tree.directories.insert(path.to_string());
    }

    pub fn contains(&self, path: &str) -> bool {
        let tree = self.tree.lock().unwrap();
        tree.files.contains(path) || tree.directories.contains(path)
    }

    /// Every file and folder below `folder`, at any depth
    pub fn entries_under(&self, folder: &str) -> Vec<String> {
        let prefix = format!("{}/", folder.trim_end_matches('/'));
        let tree = self.tree.lock().unwrap();
        tree.directories
            .iter()
            .chain(tree.files.iter())
            .filter(|path| path.starts_with(&prefix))
            .cloned()
            .collect()
    }

    /// Makes deleting `path` fail with a permission error
    pub fn deny_delete(&self, path: &str) {
        self.tree.lock().unwrap().deny_delete.insert(path.to_string());
    }

    /// Makes listing `path` fail with a permission error
    pub fn deny_list(&self, path: &str) {
        self.tree.lock().unwrap().deny_list.insert(path.to_string());
    }

    /// Number of `delete` calls, successful or not
    pub fn delete_calls(&self) -> usize {
        self.tree.lock().unwrap().delete_calls
    }
}

impl DeviceFileStore for InMemoryFileStore {
    fn exists(&self, path: String) -> Result<bool, FileStoreError> {
        Ok(self.contains(&path))
    }

    fn is_directory(&self, path: String) -> Result<bool, FileStoreError> {
        Ok(self.tree.lock().unwrap().directories.contains(&path))
    }

    fn list_directory(&self, path: String) -> Result<Vec<String>, FileStoreError> {
        let tree = self.tree.lock().unwrap();
        if tree.deny_list.contains(&path) {
            return Err(FileStoreError::PermissionDenied(path));
        }
        if !tree.directories.contains(&path) {
            return Err(FileStoreError::PathDoesNotExist);
        }
        Ok(tree.children(&path))
    }

    fn delete(&self, path: String) -> Result<(), FileStoreError> {
        let mut tree = self.tree.lock().unwrap();
        tree.delete_calls += 1;

        if tree.deny_delete.contains(&path) {
            return Err(FileStoreError::PermissionDenied(path));
        }
        if tree.files.remove(&path) {
            return Ok(());
        }
        if !tree.directories.contains(&path) {
            return Err(FileStoreError::PathDoesNotExist);
        }
        if !tree.children(&path).is_empty() {
            return Err(FileStoreError::IoFailure(format!("{path} is not empty")));
        }
        tree.directories.remove(&path);
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////
// Databases and locale
////////////////////////////////////////////////////////////////////////////////

/// [`DeviceDatabase`] that records deletions
pub struct RecordingDatabase {
    name: String,
    fail: bool,
    delete_calls: AtomicUsize,
}

impl RecordingDatabase {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            fail: false,
            delete_calls: AtomicUsize::new(0),
        }
    }

    /// A database whose deletion always fails
    pub fn failing(name: &str) -> Self {
        Self {
            fail: true,
            ..Self::new(name)
        }
    }

    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }
}

impl DeviceDatabase for RecordingDatabase {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn delete_database(&self) -> Result<(), DatabaseError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(DatabaseError::DeleteFailure(format!("{}.db is locked", self.name)));
        }
        Ok(())
    }
}

/// [`LocaleApplier`] that records applied languages
#[derive(Default)]
pub struct RecordingLocale {
    applied: Mutex<Vec<String>>,
}

impl RecordingLocale {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn applied(&self) -> Vec<String> {
        self.applied.lock().unwrap().clone()
    }
}

impl LocaleApplier for RecordingLocale {
    fn apply_language(&self, language_tag: String) {
        self.applied.lock().unwrap().push(language_tag);
    }
}
