//! The session manager: opens, closes, and accounts for login sessions.
//!
//! Responsibilities:
//! - Creating a session on login (closing any earlier open one first)
//! - Closing sessions on logout
//! - Bumping "last activity" when a player does something
//! - Resolving a token to the player that owns it
//! - Summing up total play time over a player's whole history
//!
//! # Concurrency note
//!
//! `SessionManager` is NOT thread-safe by itself. Every operation that
//! changes state takes `&mut self`, so the facade keeps the manager
//! behind a mutex and holds it across the whole close-then-create
//! sequence of a login. That's what makes "at most one open session per
//! player" hold under concurrent logins.

use std::sync::Arc;

use chrono::TimeDelta;
use playhall_protocol::{Clock, PlayerId};
use rand::Rng;

use crate::{NewSession, Session, SessionConfig, SessionError, SessionStore};

/// Manages login sessions on top of a [`SessionStore`].
///
/// ## Lifecycle
///
/// ```text
/// create_session() ──→ [open] ──record_activity()──→ [open]
///        │                │
///        │                ├──close_session()──→ [closed]
///        │                │
///        └── (next login of the same player) ──→ [closed]
/// ```
///
/// There is no background expiry. The expiration window only matters at
/// the moment a session is closed.
pub struct SessionManager<S: SessionStore> {
    store: S,
    config: SessionConfig,
    clock: Arc<dyn Clock>,
}

impl<S: SessionStore> SessionManager<S> {
    pub fn new(store: S, config: SessionConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            config,
            clock,
        }
    }

    /// Opens a new session for a player and returns its token.
    ///
    /// Any session the player still has open is closed first, following
    /// the same rules as [`close_session`](Self::close_session).
    pub fn create_session(
        &mut self,
        player_id: PlayerId,
    ) -> Result<String, SessionError> {
        if let Some(previous) = self.store.find_open_by_player(player_id)? {
            self.close(previous)?;
        }

        let session = self.store.insert(NewSession {
            player_id,
            token: generate_token(),
            login_time: self.clock.now(),
        })?;

        tracing::info!(%player_id, session_id = %session.id, "session created");
        Ok(session.token)
    }

    /// Closes the open session holding `token`.
    ///
    /// Unknown tokens and already-closed sessions are accepted silently:
    /// logging out twice is not an error.
    pub fn close_session(&mut self, token: &str) -> Result<(), SessionError> {
        match self.store.find_open_by_token(token)? {
            Some(session) => self.close(session),
            None => {
                tracing::debug!("close requested for unknown or closed session");
                Ok(())
            }
        }
    }

    /// Marks the open session holding `token` as active right now.
    /// No-op if there's no such session.
    pub fn record_activity(&mut self, token: &str) -> Result<(), SessionError> {
        if let Some(mut session) = self.store.find_open_by_token(token)? {
            session.last_activity_time = self.clock.now();
            self.store.save(&session)?;
            tracing::debug!(player_id = %session.player_id, "activity recorded");
        }
        Ok(())
    }

    /// The open session holding `token`, if any.
    pub fn lookup_open_session(
        &self,
        token: &str,
    ) -> Result<Option<Session>, SessionError> {
        Ok(self.store.find_open_by_token(token)?)
    }

    /// `true` iff `token` belongs to an open session.
    pub fn is_valid(&self, token: &str) -> Result<bool, SessionError> {
        Ok(self.lookup_open_session(token)?.is_some())
    }

    /// Resolves a token to the player owning it.
    ///
    /// # Errors
    /// [`SessionError::InvalidToken`] if no open session holds the token.
    pub fn resolve_player(&self, token: &str) -> Result<PlayerId, SessionError> {
        self.lookup_open_session(token)?
            .map(|session| session.player_id)
            .ok_or(SessionError::InvalidToken)
    }

    /// Total seconds the player spent logged in, over every session ever
    /// recorded for them (open ones included).
    pub fn total_play_time(&self, player_id: PlayerId) -> Result<i64, SessionError> {
        Ok(self
            .store
            .find_all_by_player(player_id)?
            .iter()
            .map(Session::duration_secs)
            .sum())
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Read access to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Closes an open session.
    ///
    /// If the last activity is still inside the expiration window, the
    /// session counts as live right up to now and its last activity moves
    /// to now. Past the window, the last recorded activity stands.
    fn close(&mut self, mut session: Session) -> Result<(), SessionError> {
        if session.closed {
            return Ok(());
        }

        let now = self.clock.now();
        let window = i64::try_from(self.config.expiration_secs)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .unwrap_or(TimeDelta::MAX);
        let still_live = session
            .last_activity_time
            .checked_add_signed(window)
            .is_none_or(|deadline| deadline > now);

        session.closed = true;
        if still_live {
            session.last_activity_time = now;
        }
        self.store.save(&session)?;

        tracing::info!(
            player_id = %session.player_id,
            session_id = %session.id,
            still_live,
            "session closed"
        );
        Ok(())
    }
}

/// Generates a random 32-character hex string (128 bits of entropy).
fn generate_token() -> String {
    let mut rng = rand::rng();
    let bytes: [u8; 16] = rng.random();
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

// =========================================================================
// Tests
// =========================================================================
