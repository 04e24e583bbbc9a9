//! Persistence for session records.
//!
//! The session manager doesn't own storage. It talks to a
//! [`SessionStore`], which a deployment backs with whatever database it
//! likes. [`MemorySessionStore`] is the in-process implementation used
//! by default and in tests.

use std::collections::HashMap;

use playhall_protocol::{PlayerId, SessionId, StoreError};

use crate::{NewSession, Session};

/// Lookups and writes the session manager needs.
///
/// "Open" means `closed == false`. Implementations must return the
/// state as of the last [`save`](Self::save), so a session closed via
/// `save` stops showing up in the `find_open_*` lookups immediately.
pub trait SessionStore: Send + 'static {
    /// The open session of a player, if any.
    fn find_open_by_player(
        &self,
        player_id: PlayerId,
    ) -> Result<Option<Session>, StoreError>;

    /// The open session holding this token, if any.
    fn find_open_by_token(
        &self,
        token: &str,
    ) -> Result<Option<Session>, StoreError>;

    /// Every session the player ever had, open or closed, oldest first.
    fn find_all_by_player(
        &self,
        player_id: PlayerId,
    ) -> Result<Vec<Session>, StoreError>;

    /// Stores a brand-new open session and assigns its id.
    fn insert(&mut self, session: NewSession) -> Result<Session, StoreError>;

    /// Overwrites an existing session (activity bump, close).
    ///
    /// # Errors
    /// [`StoreError::Missing`] if no session with this id exists.
    fn save(&mut self, session: &Session) -> Result<(), StoreError>;
}

/// An in-memory [`SessionStore`].
///
/// Sessions are kept in an append-only `Vec` (id `n` lives at index
/// `n - 1`), with two indexes over the open ones so token and player
/// lookups don't scan history. The indexes are kept in sync on every
/// write.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    sessions: Vec<Session>,

    /// Open sessions by token.
    open_tokens: HashMap<String, SessionId>,

    /// Open session by player. At most one per player.
    open_players: HashMap<PlayerId, SessionId>,

    /// All sessions by player, in creation order.
    history: HashMap<PlayerId, Vec<SessionId>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of sessions ever recorded.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    fn get(&self, id: SessionId) -> Option<&Session> {
        let index = usize::try_from(id.0).ok()?.checked_sub(1)?;
        self.sessions.get(index)
    }

    fn get_mut(&mut self, id: SessionId) -> Option<&mut Session> {
        let index = usize::try_from(id.0).ok()?.checked_sub(1)?;
        self.sessions.get_mut(index)
    }
}

impl SessionStore for MemorySessionStore {
    fn find_open_by_player(
        &self,
        player_id: PlayerId,
    ) -> Result<Option<Session>, StoreError> {
        Ok(self
            .open_players
            .get(&player_id)
            .and_then(|id| self.get(*id))
            .cloned())
    }

    fn find_open_by_token(
        &self,
        token: &str,
    ) -> Result<Option<Session>, StoreError> {
        Ok(self
            .open_tokens
            .get(token)
            .and_then(|id| self.get(*id))
            .cloned())
    }

    fn find_all_by_player(
        &self,
        player_id: PlayerId,
    ) -> Result<Vec<Session>, StoreError> {
        let ids = match self.history.get(&player_id) {
            Some(ids) => ids,
            None => return Ok(Vec::new()),
        };
        Ok(ids.iter().filter_map(|id| self.get(*id)).cloned().collect())
    }

    fn insert(&mut self, new: NewSession) -> Result<Session, StoreError> {
        if self.open_tokens.contains_key(&new.token) {
            return Err(StoreError::Duplicate {
                entity: "session token",
                key: new.token,
            });
        }

        let id = SessionId(self.sessions.len() as u64 + 1);
        let session = Session {
            id,
            player_id: new.player_id,
            token: new.token,
            login_time: new.login_time,
            last_activity_time: new.login_time,
            closed: false,
        };

        self.open_tokens.insert(session.token.clone(), id);
        self.open_players.insert(session.player_id, id);
        self.history.entry(session.player_id).or_default().push(id);
        self.sessions.push(session.clone());

        Ok(session)
    }

    fn save(&mut self, session: &Session) -> Result<(), StoreError> {
        let stored = self.get_mut(session.id).ok_or_else(|| StoreError::Missing {
            entity: "session",
            id: session.id.to_string(),
        })?;
        *stored = session.clone();

        if session.closed {
            self.open_tokens.remove(&session.token);
            if self.open_players.get(&session.player_id) == Some(&session.id) {
                self.open_players.remove(&session.player_id);
            }
        }
        Ok(())
    }
}
