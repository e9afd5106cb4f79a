//! Error types for the authoring workflow.
//!
//! Matching and substitution are infallible string transforms; only the
//! authoring operations validate caller input.

use thiserror::Error;

/// Errors from creating authoring replacements.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthoringError {
    /// The selected text span is empty.
    #[error("selection is empty")]
    EmptySelection,

    /// No key was proposed for the new token.
    #[error("token key is empty")]
    EmptyKey,

    /// The proposed key has no valid identifier characters left after
    /// sanitization.
    #[error("token key '{0}' has no valid identifier characters")]
    InvalidKey(String),
}
