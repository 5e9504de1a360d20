/// Host-provided preference storage (`SharedPreferences` / `UserDefaults`).
pub mod key_value_store;

/// Host-provided file storage and the recursive delete helpers built on it.
pub mod filesystem;

/// A [`filesystem::DeviceFileStore`] backed by `std::fs`, for desktop hosts and tests.
pub mod local_filesystem;

/// Host-provided handles to the instances and forms databases.
pub mod database;

/// Host-provided locale switching.
pub mod locale;

/// Paths of the folders and files that make up the app's local storage.
pub mod config;

/// Logging that forwards to the host's logger.
pub mod logger;

/// Errors that can represent a panic raised while calling into a foreign callback.
pub(crate) trait CallbackError {
    /// Builds the error reported when `operation` panicked.
    fn callback_panic(operation: &str) -> Self;
}

/// Safely invoke a foreign callback, catching any panics from UniFFI lifting.
///
/// When foreign implementations (Kotlin/Swift) throw exceptions that cannot be
/// represented in the callback's return type, UniFFI may panic while lifting the
/// value. This turns those panics into an error of the callback's own type.
pub(crate) fn catch_callback_panic<T, E, F>(operation: &str, f: F) -> Result<T, E>
where
    E: CallbackError,
    F: FnOnce() -> Result<T, E>,
{
    std::panic::catch_unwind(std::panic::AssertUnwindSafe(f))
        .unwrap_or_else(|_| Err(E::callback_panic(operation)))
}
