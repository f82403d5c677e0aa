//! Content error types.
//!
//! The verification pipeline itself never fails. These errors only arise
//! when directives, tones, or scenarios are parsed from authored text.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContentError {
    /// A directive base condition outside the closed set.
    #[error("Unknown directive condition '{0}'")]
    UnknownCondition(String),

    /// An exception type outside the closed set.
    #[error("Unknown directive exception '{0}'")]
    UnknownException(String),

    /// An interrogation tone other than soft, firm, or harsh.
    #[error("Unknown interrogation tone '{0}'")]
    UnknownTone(String),

    /// Authored JSON that does not match the content schema.
    #[error("Malformed content: {0}")]
    Json(#[from] serde_json::Error),
}
