//! Persistence for player records.

use std::collections::{BTreeMap, HashMap};

use playhall_protocol::{PlayerId, StoreError};

use crate::{NewPlayer, Player};

/// Lookups and writes the player registry needs.
pub trait PlayerStore: Send + 'static {
    fn find_by_nickname(&self, nickname: &str) -> Result<Option<Player>, StoreError>;

    fn find_by_email(&self, email: &str) -> Result<Option<Player>, StoreError>;

    fn find_by_id(&self, id: PlayerId) -> Result<Option<Player>, StoreError>;

    /// The players with these ids, in `ids` order. Unknown ids are
    /// skipped rather than reported.
    fn find_by_ids(&self, ids: &[PlayerId]) -> Result<Vec<Player>, StoreError>;

    /// Every player, in registration order.
    fn find_all(&self) -> Result<Vec<Player>, StoreError>;

    /// Stores a new player and assigns its id.
    ///
    /// # Errors
    /// [`StoreError::Duplicate`] if the nickname or email is already
    /// taken. The registry checks this first; the store enforces it.
    fn insert(&mut self, player: NewPlayer) -> Result<Player, StoreError>;

    fn count(&self) -> Result<usize, StoreError>;
}

/// An in-memory [`PlayerStore`] with unique indexes on nickname and
/// email.
#[derive(Debug, Default)]
pub struct MemoryPlayerStore {
    players: BTreeMap<PlayerId, Player>,
    nicknames: HashMap<String, PlayerId>,
    emails: HashMap<String, PlayerId>,
    next_id: u64,
}

impl MemoryPlayerStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PlayerStore for MemoryPlayerStore {
    fn find_by_nickname(&self, nickname: &str) -> Result<Option<Player>, StoreError> {
        Ok(self
            .nicknames
            .get(nickname)
            .and_then(|id| self.players.get(id))
            .cloned())
    }

    fn find_by_email(&self, email: &str) -> Result<Option<Player>, StoreError> {
        Ok(self
            .emails
            .get(email)
            .and_then(|id| self.players.get(id))
            .cloned())
    }

    fn find_by_id(&self, id: PlayerId) -> Result<Option<Player>, StoreError> {
        Ok(self.players.get(&id).cloned())
    }

    fn find_by_ids(&self, ids: &[PlayerId]) -> Result<Vec<Player>, StoreError> {
        Ok(ids
            .iter()
            .filter_map(|id| self.players.get(id))
            .cloned()
            .collect())
    }

    fn find_all(&self) -> Result<Vec<Player>, StoreError> {
        Ok(self.players.values().cloned().collect())
    }

    fn insert(&mut self, new: NewPlayer) -> Result<Player, StoreError> {
        if self.nicknames.contains_key(&new.nickname) {
            return Err(StoreError::Duplicate {
                entity: "player nickname",
                key: new.nickname,
            });
        }
        if self.emails.contains_key(&new.email) {
            return Err(StoreError::Duplicate {
                entity: "player email",
                key: new.email,
            });
        }

        self.next_id += 1;
        let player = Player {
            id: PlayerId(self.next_id),
            nickname: new.nickname,
            email: new.email,
            password_hash: new.password_hash,
        };

        self.nicknames.insert(player.nickname.clone(), player.id);
        self.emails.insert(player.email.clone(), player.id);
        self.players.insert(player.id, player.clone());
        Ok(player)
    }

    fn count(&self) -> Result<usize, StoreError> {
        Ok(self.players.len())
    }
}
