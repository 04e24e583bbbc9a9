//! The taxonomy of expected, recoverable refusals.
//!
//! A [`Rejection`] is not a fault: it's a normal answer ("that nickname
//! is taken") that ends up as a `REJECTED` status with a message. Its
//! `Display` output IS that message, so it must stay human-readable.

/// Why a request was turned down.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    /// An input failed validation. `field` names the offending input.
    #[error("{reason}")]
    ValidationFailed { field: &'static str, reason: String },

    /// The thing the request refers to doesn't exist (or isn't active).
    #[error("{0}")]
    NotFound(String),

    /// The request collides with existing state: duplicate name,
    /// nickname or email, or a player already in the game.
    #[error("{0}")]
    Conflict(String),

    /// The session token doesn't resolve to an open session.
    #[error("Invalid session token.")]
    InvalidSession,
}
