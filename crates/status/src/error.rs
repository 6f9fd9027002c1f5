//! Error types for status snapshot parsing.

/// Errors produced while decoding a status document.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("invalid status JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("status document is not a JSON object")]
    NotAnObject,
}
