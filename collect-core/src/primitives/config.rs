use super::filesystem::join_path;

/// Folder holding exported settings, below the ODK root
pub const SETTINGS_FOLDER: &str = "settings";
/// Legacy single-file settings export, below the ODK root
pub const LEGACY_SETTINGS_FILE: &str = "collect.settings";
/// Folder holding filled-in form instances, below the ODK root
pub const INSTANCES_FOLDER: &str = "instances";
/// Folder holding blank form definitions and their media, below the ODK root
pub const FORMS_FOLDER: &str = "forms";
/// Folder holding auxiliary databases, below the ODK root
pub const METADATA_FOLDER: &str = "metadata";
/// Itemset database used by external select widgets, below the metadata folder
pub const ITEMSET_DATABASE_FILE: &str = "itemsets.db";
/// Folder holding offline map layers, below the ODK root
pub const OFFLINE_LAYERS_FOLDER: &str = "layers";
/// Folder holding the generic cache, below the ODK root
pub const CACHE_FOLDER: &str = ".cache";

/// Language the app falls back to after its preferences are reset
pub const DEFAULT_LANGUAGE: &str = "en";

/// Locations of everything the app keeps on local storage.
///
/// # Examples
///
/// ## Kotlin
///
/// ```kotlin
/// val layout = storageLayoutFromRoot(
///     odkRoot = Environment.getExternalStorageDirectory().path + "/odk",
///     tileCacheDir = Configuration.getInstance().osmdroidTileCache.path,
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct StorageLayout {
    /// Exported settings folder
    pub settings_dir: String,
    /// Legacy `collect.settings` file
    pub settings_file: String,
    /// Filled-in form instances
    pub instances_dir: String,
    /// Blank forms and form media
    pub forms_dir: String,
    /// Itemset database file for external selects
    pub itemset_db_file: String,
    /// Offline map layers
    pub offline_layers_dir: String,
    /// Generic cache
    pub cache_dir: String,
    /// Third-party map tile cache, which lives outside the ODK root
    pub tile_cache_dir: String,
}

impl StorageLayout {
    /// Derives the standard layout below `odk_root`.
    #[must_use]
    pub fn from_root(odk_root: &str, tile_cache_dir: &str) -> Self {
        let metadata_dir = join_path(odk_root, METADATA_FOLDER);
        Self {
            settings_dir: join_path(odk_root, SETTINGS_FOLDER),
            settings_file: join_path(odk_root, LEGACY_SETTINGS_FILE),
            instances_dir: join_path(odk_root, INSTANCES_FOLDER),
            forms_dir: join_path(odk_root, FORMS_FOLDER),
            itemset_db_file: join_path(&metadata_dir, ITEMSET_DATABASE_FILE),
            offline_layers_dir: join_path(odk_root, OFFLINE_LAYERS_FOLDER),
            cache_dir: join_path(odk_root, CACHE_FOLDER),
            tile_cache_dir: tile_cache_dir.to_string(),
        }
    }
}

/// Derives the standard storage layout below `odk_root`.
#[uniffi::export]
#[must_use]
pub fn storage_layout_from_root(odk_root: String, tile_cache_dir: String) -> StorageLayout {
    StorageLayout::from_root(&odk_root, &tile_cache_dir)
}

/// Tunables of a reset.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct ResetOptions {
    /// Language written to `app_language` and applied after a preferences reset
    pub default_language: String,
}

impl Default for ResetOptions {
    fn default() -> Self {
        Self {
            default_language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}
