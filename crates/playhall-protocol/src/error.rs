//! Error types shared across Playhall crates.
//!
//! [`ProtocolError`] covers encoding/decoding of requests and responses.
//! [`StoreError`] is what a persistence backend reports when it can't do
//! its job; the core never tries to recover from it.

/// Errors that can occur in the protocol layer.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning a Rust type into bytes).
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed: malformed JSON, missing required fields,
    /// or an unknown request type.
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// The message parsed but makes no sense at the protocol level.
    #[error("invalid message: {0}")]
    InvalidMessage(String),
}

/// A fault in the persistence collaborator.
///
/// These are never turned into a `REJECTED` response. They propagate up
/// to whoever called the facade, unmodified.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backend couldn't be reached or refused the operation.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A record a unit of work depends on is gone.
    #[error("{entity} {id} not found in store")]
    Missing { entity: &'static str, id: String },

    /// A unique key constraint would be violated.
    #[error("duplicate {entity} key: {key}")]
    Duplicate { entity: &'static str, key: String },
}
