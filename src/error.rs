//! Vocalis Error Types
//!
//! Errors raised by the collaborators around the NLP core. The classifier and
//! the response generator are total and never produce one of these.

use thiserror::Error;

/// Central error type for Vocalis
#[derive(Error, Debug)]
pub enum AssistantError {
    #[error("Speech recognition error: {0}")]
    Asr(String),

    #[error("Speech synthesis error: {0}")]
    Tts(String),

    #[error("Audio conversion error: {0}")]
    Audio(String),

    #[error("Interaction store error: {0}")]
    Store(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IPC error: {0}")]
    Ipc(String),

    #[error("Lock poisoned: {0}")]
    Lock(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for Vocalis operations
pub type AssistantResult<T> = Result<T, AssistantError>;

/// Helper to convert Mutex poison errors
impl<T> From<std::sync::PoisonError<T>> for AssistantError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        AssistantError::Lock(err.to_string())
    }
}
