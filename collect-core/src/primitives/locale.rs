/// Switches the language of the running app.
///
/// Android implements this with `LocaleHelper.updateLocale(context)`, which
/// reads the `app_language` preference and updates the resources configuration.
#[uniffi::export(with_foreign)]
pub trait LocaleApplier: Send + Sync {
    /// Apply `language_tag` (a BCP 47 tag such as `en`) to the running process
    fn apply_language(&self, language_tag: String);
}

/// Applies `language_tag`, logging instead of unwinding if the host callback panics.
pub(crate) fn apply_language_logged(locale: &dyn LocaleApplier, language_tag: &str) {
    let applied = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        locale.apply_language(language_tag.to_string());
    }));
    match applied {
        Ok(()) => crate::debug!("locale.applied language={language_tag}"),
        Err(_) => crate::error!(
            "locale.apply_failed language={language_tag} error=panic in LocaleApplier.apply_language callback"
        ),
    }
}
