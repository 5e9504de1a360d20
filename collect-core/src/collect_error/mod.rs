//! Error handling utilities
//!
//! This module provides a unified approach to error handling that combines:
//! - Strongly typed error variants for specific, known error cases
//! - Generic error handling for `anyhow`-based error chains
//!
//! Use the `#[collect_error]` macro to automatically add generic error handling
//! capabilities to your error enums.

pub use collect_macros::collect_error;

/// Helper trait for converting anyhow errors to generic error messages
pub trait AnyhowErrorExt {
    /// Convert an anyhow error to a string, preserving the error chain
    fn to_generic_message(self) -> String;
}

impl AnyhowErrorExt for anyhow::Error {
    fn to_generic_message(self) -> String {
        let mut message = self.to_string();

        let chain: Vec<String> = self.chain().skip(1).map(ToString::to_string).collect();
        if !chain.is_empty() {
            message.push_str(" (caused by: ");
            message.push_str(&chain.join(" -> "));
            message.push(')');
        }

        message
    }
}
