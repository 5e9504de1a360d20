use std::sync::Arc;

use chrono::Utc;

use super::action::ResetAction;
use crate::collect_export;
use crate::preferences::keys::{GENERAL_PREFERENCE_KEYS, KEY_APP_LANGUAGE};
use crate::preferences::PreferenceSchema;
use crate::primitives::config::{ResetOptions, StorageLayout};
use crate::primitives::database::{delete_database_logged, DeviceDatabase};
use crate::primitives::filesystem::{DeviceFileStore, FileStoreExt};
use crate::primitives::key_value_store::{DevicePreferenceStore, PreferenceStoreExt};
use crate::primitives::locale::{apply_language_logged, LocaleApplier};

/// Resets local application state.
///
/// Every collaborator is injected: the two preference stores, the file store,
/// the instances and forms databases, and the locale switcher. Calls are
/// synchronous and must not overlap; the host serializes them.
///
/// # Examples
///
/// ## Kotlin
///
/// ```kotlin
/// val coordinator = ResetCoordinator(
///     preferences = defaultPreferenceStore,
///     adminPreferences = adminPreferenceStore,
///     files = AndroidFileStore(),
///     instancesDatabase = InstancesDatabase(),
///     formsDatabase = FormsDatabase(),
///     locale = LocaleHelperBridge(context),
///     layout = storageLayoutFromRoot(Collect.ODK_ROOT, tileCachePath),
///     schema = PreferenceSchema.packaged(),
///     options = ResetOptions(defaultLanguage = "en"),
/// )
/// val failed = coordinator.reset(listOf(ResetAction.INSTANCES, ResetAction.FORMS))
/// ```
#[derive(uniffi::Object)]
pub struct ResetCoordinator {
    preferences: Arc<dyn DevicePreferenceStore>,
    admin_preferences: Arc<dyn DevicePreferenceStore>,
    files: Arc<dyn DeviceFileStore>,
    instances_database: Arc<dyn DeviceDatabase>,
    forms_database: Arc<dyn DeviceDatabase>,
    locale: Arc<dyn LocaleApplier>,
    layout: StorageLayout,
    schema: Arc<PreferenceSchema>,
    options: ResetOptions,
}

#[collect_export]
impl ResetCoordinator {
    /// Creates a coordinator over the given collaborators.
    #[uniffi::constructor]
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        preferences: Arc<dyn DevicePreferenceStore>,
        admin_preferences: Arc<dyn DevicePreferenceStore>,
        files: Arc<dyn DeviceFileStore>,
        instances_database: Arc<dyn DeviceDatabase>,
        forms_database: Arc<dyn DeviceDatabase>,
        locale: Arc<dyn LocaleApplier>,
        layout: StorageLayout,
        schema: Arc<PreferenceSchema>,
        options: ResetOptions,
    ) -> Arc<Self> {
        Arc::new(Self {
            preferences,
            admin_preferences,
            files,
            instances_database,
            forms_database,
            locale,
            layout,
            schema,
            options,
        })
    }

    /// Runs the requested actions in order and returns those that did not complete.
    ///
    /// Every action runs even if an earlier one failed. The result keeps the
    /// request order and only ever contains requested actions.
    #[must_use]
    pub fn reset(&self, actions: Vec<ResetAction>) -> Vec<ResetAction> {
        self.run_all(actions, Some)
    }

    /// Same as [`reset`](Self::reset) for hosts that still pass integer action codes.
    ///
    /// Unknown codes are skipped and reported back as failed.
    #[must_use]
    pub fn reset_codes(&self, codes: Vec<i32>) -> Vec<i32> {
        self.run_all(codes, ResetAction::from_code)
    }
}

impl ResetCoordinator {
    fn run_all<T>(&self, requested: Vec<T>, resolve: impl Fn(T) -> Option<ResetAction>) -> Vec<T>
    where
        T: Copy + PartialEq + std::fmt::Debug,
    {
        let run_start_time = Utc::now();
        crate::info!(
            "reset.started requested={:?} timestamp={}",
            requested,
            run_start_time.to_rfc3339()
        );

        let mut failed = requested.clone();
        for tag in requested {
            let Some(action) = resolve(tag) else {
                crate::warn!("reset.unknown_action tag={tag:?}");
                continue;
            };

            if self.run_action(action) {
                if let Some(position) = failed.iter().position(|t| *t == tag) {
                    failed.remove(position);
                }
            }
        }

        crate::info!(
            "reset.completed failed={:?} duration_ms={} timestamp={}",
            failed,
            (Utc::now() - run_start_time).num_milliseconds(),
            Utc::now().to_rfc3339()
        );
        failed
    }

    fn run_action(&self, action: ResetAction) -> bool {
        let succeeded = match action {
            ResetAction::Preferences => self.reset_preferences(),
            ResetAction::Instances => self.reset_instances(),
            ResetAction::Forms => self.reset_forms(),
            ResetAction::Layers => self
                .files
                .delete_folder_contents(&self.layout.offline_layers_dir),
            ResetAction::Cache => self.files.delete_folder_contents(&self.layout.cache_dir),
            ResetAction::MapTileCache => {
                self.files.delete_folder_contents(&self.layout.tile_cache_dir)
            }
        };

        if succeeded {
            crate::info!("reset.action_succeeded action={action}");
        } else {
            crate::warn!("reset.action_failed action={action}");
        }
        succeeded
    }

    fn reset_preferences(&self) -> bool {
        let cleared_general = self.reset_general_preferences();

        match self.schema.apply_missing(self.preferences.as_ref()) {
            Ok(written) => crate::debug!("reset.defaults_applied count={written}"),
            Err(e) => crate::warn!("reset.defaults_failed error={e}"),
        }

        let cleared_admin = match self.admin_preferences.edit().clear().commit() {
            Ok(()) => true,
            Err(e) => {
                crate::error!("reset.admin_clear_failed error={e}");
                false
            }
        };

        let deleted_settings_folder = self.files.delete_folder_contents(&self.layout.settings_dir);
        let deleted_settings_file = self.files.delete_file_if_present(&self.layout.settings_file);

        cleared_general && cleared_admin && deleted_settings_folder && deleted_settings_file
    }

    /// Removes the general preferences one key at a time, stopping at the first
    /// removal that does not commit. On success, restores the default language.
    fn reset_general_preferences(&self) -> bool {
        let all_removed = GENERAL_PREFERENCE_KEYS.iter().all(|key| {
            match self.preferences.edit().remove(key).commit() {
                Ok(()) => true,
                Err(e) => {
                    crate::error!("reset.preference_removal_failed key={key} error={e}");
                    false
                }
            }
        });
        if !all_removed {
            return false;
        }

        let language = &self.options.default_language;
        self.preferences
            .edit()
            .put_string(KEY_APP_LANGUAGE, language)
            .apply();
        apply_language_logged(self.locale.as_ref(), language);
        true
    }

    fn reset_instances(&self) -> bool {
        let deleted_database = delete_database_logged(self.instances_database.as_ref());
        let deleted_folder = self.files.delete_folder_contents(&self.layout.instances_dir);
        deleted_database && deleted_folder
    }

    // The forms database outcome is logged but does not decide the action.
    fn reset_forms(&self) -> bool {
        delete_database_logged(self.forms_database.as_ref());
        let deleted_folder = self.files.delete_folder_contents(&self.layout.forms_dir);
        let deleted_itemsets = self.files.delete_file_if_present(&self.layout.itemset_db_file);
        deleted_folder && deleted_itemsets
    }
}
