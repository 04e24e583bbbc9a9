//! Error types for the game layer.

use playhall_protocol::{Rejection, StoreError};

/// Errors that can occur during game operations.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// An active game already holds this name.
    #[error("A game with this name already exists.")]
    AlreadyExists,

    /// No active game holds this name.
    #[error("Game not found.")]
    NotFound,

    /// The player is already on one of the game's teams.
    #[error("Player is already in this game.")]
    AlreadyJoined,

    /// The game store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl GameError {
    /// Splits an error into the refusal a client should see, or the
    /// fault that must propagate.
    pub fn into_rejection(self) -> Result<Rejection, StoreError> {
        let reason = self.to_string();
        match self {
            Self::AlreadyExists | Self::AlreadyJoined => Ok(Rejection::Conflict(reason)),
            Self::NotFound => Ok(Rejection::NotFound(reason)),
            Self::Store(e) => Err(e),
        }
    }
}
