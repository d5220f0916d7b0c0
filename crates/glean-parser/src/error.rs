//! Error types for glean-parser.

/// Errors that prevent extraction from producing any result.
///
/// Truncated literals and comments are not errors; they surface as
/// [`Diagnostic`](crate::types::Diagnostic)s on the result instead.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("Unknown language: {0}")]
    UnknownLanguage(String),

    #[error("Invalid language profile '{id}': {reason}")]
    InvalidProfile { id: String, reason: String },
}
