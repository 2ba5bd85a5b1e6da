//! Error types for save decoding and storage access.
//!
//! Neither escapes the engine: [`SaveError`] collapses into the default
//! record on load, and [`StorageError`] switches the store to memory-only.

/// Failure to turn a stored blob into a [`SaveRecord`](crate::save::SaveRecord)
/// or a record into a blob.
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("blob is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("decoded blob is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("save data is not a JSON object")]
    NotAnObject,

    #[error("invalid value for `{key}`: {reason}")]
    InvalidField { key: String, reason: &'static str },

    #[error("save version {found} is older than the minimum supported {min}")]
    Incompatible { found: u32, min: u32 },

    #[error("`{key}` is not a finite number and cannot be saved")]
    NonFinite { key: &'static str },
}

/// Failure of the underlying persistence medium.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage is unavailable")]
    Unavailable,

    #[error("failed to read `{key}`: {reason}")]
    Read { key: String, reason: String },

    #[error("failed to write `{key}`: {reason}")]
    Write { key: String, reason: String },

    #[error("failed to remove `{key}`: {reason}")]
    Remove { key: String, reason: String },
}
