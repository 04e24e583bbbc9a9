//! Error types for the session layer.

use playhall_protocol::{Rejection, StoreError};

/// Errors that can occur during session management.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The token doesn't belong to any open session: never issued,
    /// already logged out, or superseded by a newer login.
    #[error("Invalid session token.")]
    InvalidToken,

    /// The session store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl SessionError {
    /// Splits an error into the refusal a client should see, or the
    /// fault that must propagate.
    pub fn into_rejection(self) -> Result<Rejection, StoreError> {
        match self {
            Self::InvalidToken => Ok(Rejection::InvalidSession),
            Self::Store(e) => Err(e),
        }
    }
}
