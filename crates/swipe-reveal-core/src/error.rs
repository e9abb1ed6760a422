//! Error types for the core crate.

use thiserror::Error;

/// Errors raised while writing to or reading from a [`SavedState`](crate::SavedState).
#[derive(Error, Debug)]
pub enum StateError {
    /// A value could not be encoded into the container.
    #[error("failed to encode saved state entry '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// A stored value did not match the requested type.
    #[error("failed to decode saved state entry '{key}': {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The serialized container itself was malformed.
    #[error("malformed saved state document: {0}")]
    Document(#[from] serde_json::Error),
}

/// Result type for saved state operations.
pub type StateResult<T> = Result<T, StateError>;
