//! Player records and registry limits.

use playhall_protocol::PlayerId;

/// Length limits applied at registration.
///
/// All limits count characters, not bytes.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    pub max_nickname_len: usize,
    pub max_email_len: usize,
    pub max_password_len: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            max_nickname_len: 20,
            max_email_len: 20,
            max_password_len: 20,
        }
    }
}

/// A registered player.
///
/// `nickname` and `email` are each unique across the registry.
/// `password_hash` is opaque: the registry only ever compares it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: PlayerId,
    pub nickname: String,
    pub email: String,
    pub password_hash: String,
}

/// A player that passed validation but hasn't been stored yet.
#[derive(Debug, Clone)]
pub struct NewPlayer {
    pub nickname: String,
    pub email: String,
    pub password_hash: String,
}
