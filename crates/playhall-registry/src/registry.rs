//! The player registry: sign-up validation and credential checks.

use std::sync::LazyLock;

use playhall_protocol::PlayerId;
use regex::Regex;

use crate::{NewPlayer, Player, PlayerStore, RegistryConfig, RegistryError};

/// `local@domain.tld`, with a 2–6 letter top-level domain.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,6}$")
        .expect("email pattern is a valid regex")
});

/// Registers players and checks their credentials.
///
/// Like the session manager, this is not thread-safe on its own: the
/// facade serializes access so the "nickname not taken" check and the
/// insert that follows it can't interleave with another registration.
pub struct PlayerRegistry<S: PlayerStore> {
    store: S,
    config: RegistryConfig,
}

impl<S: PlayerStore> PlayerRegistry<S> {
    pub fn new(store: S, config: RegistryConfig) -> Self {
        Self { store, config }
    }

    /// `true` if someone registered under this nickname.
    pub fn exists(&self, nickname: &str) -> Result<bool, RegistryError> {
        Ok(self.store.find_by_nickname(nickname)?.is_some())
    }

    /// Checks a nickname/password-hash pair.
    ///
    /// # Errors
    /// - [`RegistryError::NotRegistered`]: unknown nickname
    /// - [`RegistryError::WrongPassword`]: hash mismatch
    pub fn authenticate(
        &self,
        nickname: &str,
        password_hash: &str,
    ) -> Result<PlayerId, RegistryError> {
        let player = self
            .store
            .find_by_nickname(nickname)?
            .ok_or(RegistryError::NotRegistered)?;

        if player.password_hash != password_hash {
            tracing::debug!(player_id = %player.id, "wrong password");
            return Err(RegistryError::WrongPassword);
        }
        Ok(player.id)
    }

    /// Validates and stores a new player.
    ///
    /// Checks run in a fixed order and stop at the first failure:
    /// nickname length, email length, password length, nickname taken,
    /// email taken, email shape, empty password.
    pub fn register(
        &mut self,
        nickname: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<Player, RegistryError> {
        self.validate(nickname, email, password_hash)?;

        let player = self.store.insert(NewPlayer {
            nickname: nickname.to_owned(),
            email: email.to_owned(),
            password_hash: password_hash.to_owned(),
        })?;

        tracing::info!(player_id = %player.id, nickname, "player registered");
        Ok(player)
    }

    pub fn player(&self, id: PlayerId) -> Result<Option<Player>, RegistryError> {
        Ok(self.store.find_by_id(id)?)
    }

    /// Players with the given ids, in `ids` order; unknown ids are dropped.
    pub fn players_by_ids(&self, ids: &[PlayerId]) -> Result<Vec<Player>, RegistryError> {
        Ok(self.store.find_by_ids(ids)?)
    }

    /// Every registered player, in registration order.
    pub fn all_players(&self) -> Result<Vec<Player>, RegistryError> {
        Ok(self.store.find_all()?)
    }

    pub fn count(&self) -> Result<usize, RegistryError> {
        Ok(self.store.count()?)
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    fn validate(
        &self,
        nickname: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<(), RegistryError> {
        let limits = &self.config;

        if nickname.chars().count() > limits.max_nickname_len {
            return Err(RegistryError::NicknameTooLong {
                max: limits.max_nickname_len,
            });
        }
        if email.chars().count() > limits.max_email_len {
            return Err(RegistryError::EmailTooLong {
                max: limits.max_email_len,
            });
        }
        if password_hash.chars().count() > limits.max_password_len {
            return Err(RegistryError::PasswordTooLong {
                max: limits.max_password_len,
            });
        }
        if self.store.find_by_nickname(nickname)?.is_some() {
            return Err(RegistryError::NicknameTaken);
        }
        if self.store.find_by_email(email)?.is_some() {
            return Err(RegistryError::EmailTaken);
        }
        if !EMAIL_PATTERN.is_match(email) {
            return Err(RegistryError::InvalidEmail);
        }
        if password_hash.is_empty() {
            return Err(RegistryError::EmptyPassword);
        }
        Ok(())
    }
}

// =========================================================================
// Tests
// =========================================================================
