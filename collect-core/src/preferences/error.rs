/// Errors raised while loading preference configuration
#[crate::collect_error]
pub enum PreferenceError {
    /// A default entry has an empty key
    #[error("preference default #{index} has an empty key")]
    EmptyKey {
        /// Position of the entry in the schema
        index: u32,
    },
    /// The same key has more than one default
    #[error("duplicate preference default for key: {key}")]
    DuplicateKey {
        /// The repeated key
        key: String,
    },
}
