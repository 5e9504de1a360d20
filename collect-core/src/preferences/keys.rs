/// Server username, the legacy source of the metadata username
pub const KEY_USERNAME: &str = "username";
/// Google account picked for Google Drive/Sheets, the legacy source of the metadata email
pub const KEY_SELECTED_GOOGLE_ACCOUNT: &str = "selected_google_account";
/// Username recorded in form metadata
pub const KEY_METADATA_USERNAME: &str = "metadata_username";
/// Email recorded in form metadata
pub const KEY_METADATA_EMAIL: &str = "metadata_email";
/// Phone number recorded in form metadata
pub const KEY_METADATA_PHONENUMBER: &str = "metadata_phonenumber";
/// Set once legacy values have been copied into form metadata
pub const KEY_METADATA_MIGRATED: &str = "metadata_migrated";
/// Language of the app UI
pub const KEY_APP_LANGUAGE: &str = "app_language";

/// General preferences removed when the user resets preferences, in removal order.
///
/// Removing [`KEY_METADATA_MIGRATED`] here re-enables the form metadata migration.
pub const GENERAL_PREFERENCE_KEYS: [&str; 19] = [
    "splashPath",
    "showSplash",
    "formChooserListSortingOrder",
    "instance_sync",
    "delete_send",
    "map_basemap_behavior",
    "high_resolution",
    KEY_METADATA_MIGRATED,
    "map_sdk_behavior",
    "default_completed",
    "font_size",
    KEY_APP_LANGUAGE,
    "navigation",
    "constraint_behavior",
    "autosend",
    "analytics",
    KEY_METADATA_PHONENUMBER,
    KEY_METADATA_EMAIL,
    KEY_METADATA_USERNAME,
];
