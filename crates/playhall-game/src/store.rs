//! Arena-style persistence for games and teams.
//!
//! Games and teams live in separate tables keyed by id. A team carries
//! its game's id rather than a reference to it, so the store never has
//! to deal with cycles. A third table maps each name to the one game
//! currently active under it.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use playhall_protocol::{GameId, PlayerId, StoreError, TeamId, Timestamp};

use crate::{Game, GameTeam, NewGame, NewTeam};

/// Lookups and writes the game coordinator needs.
///
/// Each write method is one unit: it either applies completely or
/// leaves the store untouched. A backend with transactions runs each
/// method in its own.
pub trait GameStore: Send + 'static {
    /// The id of the active game holding this name, if any.
    fn find_active_by_name(&self, name: &str) -> Result<Option<GameId>, StoreError>;

    fn find_game(&self, id: GameId) -> Result<Option<Game>, StoreError>;

    /// Every game ever created, oldest first.
    fn find_all_games(&self) -> Result<Vec<Game>, StoreError>;

    /// The teams of a game in join order. Empty for an unknown game.
    fn teams_of(&self, game_id: GameId) -> Result<Vec<GameTeam>, StoreError>;

    /// Stores a new game with no end time, its host's team, and marks the
    /// game active under its name. Assigns both ids.
    ///
    /// # Errors
    /// [`StoreError::Duplicate`] if another game is already active under
    /// this name.
    fn insert_game(&mut self, game: NewGame) -> Result<(Game, GameTeam), StoreError>;

    /// Sets the game's end time and frees its name.
    ///
    /// # Errors
    /// [`StoreError::Missing`] if no game with this id exists.
    fn end_game(&mut self, id: GameId, end_time: Timestamp) -> Result<Game, StoreError>;

    /// Appends a new single-player team to a game and assigns its id.
    ///
    /// # Errors
    /// [`StoreError::Missing`] if the game doesn't exist.
    fn insert_team(&mut self, team: NewTeam) -> Result<GameTeam, StoreError>;

    /// Overwrites an existing team.
    ///
    /// # Errors
    /// [`StoreError::Missing`] if no team with this id exists.
    fn save_team(&mut self, team: &GameTeam) -> Result<(), StoreError>;
}

/// An in-memory [`GameStore`].
#[derive(Debug, Default)]
pub struct MemoryGameStore {
    games: BTreeMap<GameId, Game>,
    teams: BTreeMap<TeamId, GameTeam>,

    /// Team ids per game, in join order.
    rosters: HashMap<GameId, Vec<TeamId>>,

    /// Name → the one active game under it.
    active: HashMap<String, GameId>,

    next_game_id: u64,
    next_team_id: u64,
}

impl MemoryGameStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a single-player team to a game whose roster exists.
    fn push_team(&mut self, game_id: GameId, player_id: PlayerId) -> GameTeam {
        self.next_team_id += 1;
        let members = BTreeSet::from([player_id]);
        let team = GameTeam {
            id: TeamId(self.next_team_id),
            game_id,
            remaining_player_ids: members.clone(),
            player_ids: members,
        };

        self.rosters.entry(game_id).or_default().push(team.id);
        self.teams.insert(team.id, team.clone());
        team
    }
}

impl GameStore for MemoryGameStore {
    fn find_active_by_name(&self, name: &str) -> Result<Option<GameId>, StoreError> {
        Ok(self.active.get(name).copied())
    }

    fn find_game(&self, id: GameId) -> Result<Option<Game>, StoreError> {
        Ok(self.games.get(&id).cloned())
    }

    fn find_all_games(&self) -> Result<Vec<Game>, StoreError> {
        Ok(self.games.values().cloned().collect())
    }

    fn teams_of(&self, game_id: GameId) -> Result<Vec<GameTeam>, StoreError> {
        let Some(roster) = self.rosters.get(&game_id) else {
            return Ok(Vec::new());
        };
        Ok(roster
            .iter()
            .filter_map(|id| self.teams.get(id))
            .cloned()
            .collect())
    }

    fn insert_game(&mut self, new: NewGame) -> Result<(Game, GameTeam), StoreError> {
        if self.active.contains_key(&new.name) {
            return Err(StoreError::Duplicate {
                entity: "active game name",
                key: new.name,
            });
        }

        self.next_game_id += 1;
        let game = Game {
            id: GameId(self.next_game_id),
            name: new.name,
            host_player_id: new.host_player_id,
            start_time: new.start_time,
            end_time: None,
        };
        self.games.insert(game.id, game.clone());
        self.rosters.insert(game.id, Vec::new());
        self.active.insert(game.name.clone(), game.id);

        let host_team = self.push_team(game.id, game.host_player_id);
        Ok((game, host_team))
    }

    fn end_game(&mut self, id: GameId, end_time: Timestamp) -> Result<Game, StoreError> {
        let game = self.games.get_mut(&id).ok_or_else(|| StoreError::Missing {
            entity: "game",
            id: id.to_string(),
        })?;
        game.end_time = Some(end_time);

        if self.active.get(&game.name) == Some(&id) {
            self.active.remove(&game.name);
        }
        Ok(game.clone())
    }

    fn insert_team(&mut self, new: NewTeam) -> Result<GameTeam, StoreError> {
        if !self.rosters.contains_key(&new.game_id) {
            return Err(StoreError::Missing {
                entity: "game",
                id: new.game_id.to_string(),
            });
        }
        Ok(self.push_team(new.game_id, new.player_id))
    }

    fn save_team(&mut self, team: &GameTeam) -> Result<(), StoreError> {
        let stored = self.teams.get_mut(&team.id).ok_or_else(|| StoreError::Missing {
            entity: "team",
            id: team.id.to_string(),
        })?;
        *stored = team.clone();
        Ok(())
    }
}
