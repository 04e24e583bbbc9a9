//! Error types for the player registry.

use playhall_protocol::{Rejection, StoreError};

/// Errors from registering or authenticating a player.
///
/// The `Display` text of every variant except `Store` is what the end
/// user sees, so don't reword them casually.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Nickname exceeds maximum length of {max}")]
    NicknameTooLong { max: usize },

    #[error("Email exceeds maximum length of {max}")]
    EmailTooLong { max: usize },

    #[error("Password exceeds maximum length of {max}")]
    PasswordTooLong { max: usize },

    #[error("Nickname already exists!")]
    NicknameTaken,

    #[error("Email already used!")]
    EmailTaken,

    #[error("Invalid email format!")]
    InvalidEmail,

    #[error("Password empty!")]
    EmptyPassword,

    /// Login with a nickname nobody registered.
    #[error("Player not registered!")]
    NotRegistered,

    /// Login with the right nickname and the wrong hash.
    #[error("Wrong password!")]
    WrongPassword,

    /// The player store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl RegistryError {
    /// Splits an error into the refusal a client should see, or the
    /// fault that must propagate.
    pub fn into_rejection(self) -> Result<Rejection, StoreError> {
        let reason = self.to_string();
        let rejection = match self {
            Self::NicknameTooLong { .. } => Rejection::ValidationFailed {
                field: "nickName",
                reason,
            },
            Self::EmailTooLong { .. } | Self::InvalidEmail => {
                Rejection::ValidationFailed {
                    field: "email",
                    reason,
                }
            }
            Self::PasswordTooLong { .. } | Self::EmptyPassword | Self::WrongPassword => {
                Rejection::ValidationFailed {
                    field: "passwordHash",
                    reason,
                }
            }
            Self::NicknameTaken | Self::EmailTaken => Rejection::Conflict(reason),
            Self::NotRegistered => Rejection::NotFound(reason),
            Self::Store(e) => return Err(e),
        };
        Ok(rejection)
    }
}
