//! Unified error type for Playhall.

use playhall_game::GameError;
use playhall_protocol::{ProtocolError, StoreError};
use playhall_registry::RegistryError;
use playhall_session::SessionError;

/// Top-level error that wraps all crate-specific errors.
///
/// Facade operations turn expected refusals into a `REJECTED` status, so
/// what surfaces here is either a storage fault or a request that
/// couldn't be decoded. The `#[from]` attribute on each variant lets `?`
/// convert sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum PlayhallError {
    /// A protocol-level error (encode, decode, invalid message).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A session-level error that wasn't turned into a rejection.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// A registry-level error that wasn't turned into a rejection.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// A game-level error that wasn't turned into a rejection.
    #[error(transparent)]
    Game(#[from] GameError),

    /// A persistence fault.
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_protocol_error() {
        let err = ProtocolError::InvalidMessage("bad".into());
        let playhall_err: PlayhallError = err.into();
        assert!(matches!(playhall_err, PlayhallError::Protocol(_)));
        assert!(playhall_err.to_string().contains("bad"));
    }

    #[test]
    fn test_from_store_error() {
        let err = StoreError::Unavailable("db down".into());
        let playhall_err: PlayhallError = err.into();
        assert!(matches!(playhall_err, PlayhallError::Store(_)));
        assert!(playhall_err.to_string().contains("db down"));
    }

    #[test]
    fn test_from_session_error() {
        let playhall_err: PlayhallError = SessionError::InvalidToken.into();
        assert!(matches!(playhall_err, PlayhallError::Session(_)));
    }

    #[test]
    fn test_from_registry_error() {
        let playhall_err: PlayhallError = RegistryError::NotRegistered.into();
        assert!(matches!(playhall_err, PlayhallError::Registry(_)));
    }

    #[test]
    fn test_from_game_error() {
        let playhall_err: PlayhallError = GameError::NotFound.into();
        assert!(matches!(playhall_err, PlayhallError::Game(_)));
        assert_eq!(playhall_err.to_string(), "Game not found.");
    }
}
