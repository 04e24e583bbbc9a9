//! Game coordinator: creates games, adds teams, and ends games.

use std::sync::Arc;

use playhall_protocol::{Clock, PlayerId};

use crate::{GameError, GameSnapshot, GameStore, NewGame, NewTeam};

/// What a [`GameCoordinator::leave_game`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveOutcome {
    /// The player was taken off their team's remaining members.
    Left,
    /// The player's team was the last one standing, so the game ended.
    /// The team itself is left as it was.
    GameEnded,
    /// The player had no remaining place in the game. Nothing changed.
    NotActive,
}

/// Owns the game/team state machine.
///
/// Every operation is a read-check-write sequence against the store, so
/// callers must serialize them (the facade holds this behind a mutex).
/// Games are looked up by name through the store's active-name index.
pub struct GameCoordinator<S: GameStore> {
    store: S,
    clock: Arc<dyn Clock>,
}

impl<S: GameStore> GameCoordinator<S> {
    pub fn new(store: S, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Starts a new game under `name` with the host as its first team.
    ///
    /// # Errors
    /// [`GameError::AlreadyExists`] if an active game already holds the name.
    pub fn create_game(
        &mut self,
        name: &str,
        host_player_id: PlayerId,
    ) -> Result<GameSnapshot, GameError> {
        if self.active_game(name)?.is_some() {
            tracing::debug!(name, %host_player_id, "game name taken");
            return Err(GameError::AlreadyExists);
        }

        let (game, host_team) = self.store.insert_game(NewGame {
            name: name.to_owned(),
            host_player_id,
            start_time: self.clock.now(),
        })?;

        tracing::info!(game_id = %game.id, name, %host_player_id, "game created");
        Ok(GameSnapshot {
            game,
            teams: vec![host_team],
        })
    }

    /// Adds a new single-player team to the active game under `name`.
    ///
    /// # Errors
    /// - [`GameError::NotFound`]: no active game with this name
    /// - [`GameError::AlreadyJoined`]: the player is, or was, on a team
    pub fn join_game(
        &mut self,
        name: &str,
        player_id: PlayerId,
    ) -> Result<GameSnapshot, GameError> {
        let mut snapshot = self.active_game(name)?.ok_or(GameError::NotFound)?;

        if snapshot.has_member(player_id) {
            tracing::debug!(game_id = %snapshot.game.id, %player_id, "already in game");
            return Err(GameError::AlreadyJoined);
        }

        let team = self.store.insert_team(NewTeam {
            game_id: snapshot.game.id,
            player_id,
        })?;
        snapshot.teams.push(team);

        tracing::info!(
            game_id = %snapshot.game.id,
            %player_id,
            teams = snapshot.teams.len(),
            phase = %snapshot.phase(),
            "player joined"
        );
        Ok(snapshot)
    }

    /// Takes a player out of the active game under `name`.
    ///
    /// If the player's team is the only one with members left, the game
    /// ends instead and the team keeps its remaining members.
    ///
    /// # Errors
    /// [`GameError::NotFound`] if no active game has this name.
    pub fn leave_game(
        &mut self,
        name: &str,
        player_id: PlayerId,
    ) -> Result<LeaveOutcome, GameError> {
        let snapshot = self.active_game(name)?.ok_or(GameError::NotFound)?;

        let Some(team) = snapshot.team_with_remaining(player_id) else {
            tracing::debug!(game_id = %snapshot.game.id, %player_id, "not an active member");
            return Ok(LeaveOutcome::NotActive);
        };

        if snapshot.standing_teams() == 1 {
            let game = self.store.end_game(snapshot.game.id, self.clock.now())?;

            tracing::info!(
                game_id = %game.id,
                %player_id,
                duration_secs = game.duration_secs(),
                "game ended"
            );
            return Ok(LeaveOutcome::GameEnded);
        }

        let mut team = team.clone();
        team.remaining_player_ids.remove(&player_id);
        self.store.save_team(&team)?;

        tracing::info!(
            game_id = %snapshot.game.id,
            team_id = %team.id,
            %player_id,
            phase = %snapshot.phase(),
            "player left"
        );
        Ok(LeaveOutcome::Left)
    }

    /// The active game under `name` with its teams, if there is one.
    ///
    /// A name that still points at an ended game counts as free.
    pub fn active_game(&self, name: &str) -> Result<Option<GameSnapshot>, GameError> {
        let Some(id) = self.store.find_active_by_name(name)? else {
            return Ok(None);
        };
        let Some(game) = self.store.find_game(id)?.filter(|g| g.is_active()) else {
            return Ok(None);
        };
        let teams = self.store.teams_of(id)?;
        Ok(Some(GameSnapshot { game, teams }))
    }

    /// Every game ever created with its teams, oldest first.
    pub fn all_games(&self) -> Result<Vec<GameSnapshot>, GameError> {
        self.store
            .find_all_games()?
            .into_iter()
            .map(|game| {
                let teams = self.store.teams_of(game.id)?;
                Ok(GameSnapshot { game, teams })
            })
            .collect()
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}

// =========================================================================
// Tests
// =========================================================================
