//! Game and team records, and the game lifecycle state machine.

use std::collections::BTreeSet;

use playhall_protocol::{GameId, PlayerId, TeamId, Timestamp};

// ---------------------------------------------------------------------------
// Game
// ---------------------------------------------------------------------------

/// One match instance.
///
/// A game is "active" while `end_time` is `None`. At most one active
/// game holds a given name at any moment; once it ends, the name is free
/// again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    pub id: GameId,
    pub name: String,
    /// The player who created the game. Their team is always first.
    pub host_player_id: PlayerId,
    pub start_time: Timestamp,
    pub end_time: Option<Timestamp>,
}

impl Game {
    pub fn is_active(&self) -> bool {
        self.end_time.is_none()
    }

    /// Whole seconds from start to end, or `None` while the game runs.
    pub fn duration_secs(&self) -> Option<i64> {
        self.end_time
            .map(|end| end.timestamp() - self.start_time.timestamp())
    }
}

/// What the store needs to create a [`Game`]. The store assigns the id.
#[derive(Debug, Clone)]
pub struct NewGame {
    pub name: String,
    pub host_player_id: PlayerId,
    pub start_time: Timestamp,
}

// ---------------------------------------------------------------------------
// GameTeam
// ---------------------------------------------------------------------------

/// A team within a game.
///
/// Teams point at their game by id; the game never holds its teams
/// directly. Every team starts as a single player, and `remaining_player_ids`
/// only ever shrinks, so it stays a subset of `player_ids`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameTeam {
    pub id: TeamId,
    pub game_id: GameId,
    /// Everyone who was ever on this team.
    pub player_ids: BTreeSet<PlayerId>,
    /// The members who haven't left yet.
    pub remaining_player_ids: BTreeSet<PlayerId>,
}

impl GameTeam {
    /// `true` if the player was ever on this team.
    pub fn has_member(&self, player_id: PlayerId) -> bool {
        self.player_ids.contains(&player_id)
    }

    /// `true` if the player is on this team and hasn't left.
    pub fn has_remaining(&self, player_id: PlayerId) -> bool {
        self.remaining_player_ids.contains(&player_id)
    }

    /// `true` while at least one member is still playing.
    pub fn is_standing(&self) -> bool {
        !self.remaining_player_ids.is_empty()
    }
}

/// What the store needs to create a single-player [`GameTeam`].
#[derive(Debug, Clone, Copy)]
pub struct NewTeam {
    pub game_id: GameId,
    pub player_id: PlayerId,
}

// ---------------------------------------------------------------------------
// GamePhase
// ---------------------------------------------------------------------------

/// The lifecycle phase of a game.
///
/// ```text
/// WaitingForPlayers → InProgress → Ended
///         └──────────────────────────┘
/// ```
///
/// - **WaitingForPlayers**: only the host's team exists.
/// - **InProgress**: at least two teams have joined. Some of them may
///   have emptied out as players left.
/// - **Ended**: the game has an end time. Its name can be reused.
///
/// A host alone in their game can leave it, which ends it straight from
/// `WaitingForPlayers`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    WaitingForPlayers,
    InProgress,
    Ended,
}

impl std::fmt::Display for GamePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WaitingForPlayers => write!(f, "WaitingForPlayers"),
            Self::InProgress => write!(f, "InProgress"),
            Self::Ended => write!(f, "Ended"),
        }
    }
}

// ---------------------------------------------------------------------------
// GameSnapshot
// ---------------------------------------------------------------------------

/// A game together with its teams in join order, as read from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub game: Game,
    pub teams: Vec<GameTeam>,
}

impl GameSnapshot {
    pub fn phase(&self) -> GamePhase {
        if !self.game.is_active() {
            GamePhase::Ended
        } else if self.teams.len() < 2 {
            GamePhase::WaitingForPlayers
        } else {
            GamePhase::InProgress
        }
    }

    /// Number of teams that still have a member playing.
    pub fn standing_teams(&self) -> usize {
        self.teams.iter().filter(|t| t.is_standing()).count()
    }

    /// The team whose remaining members include `player_id`, if any.
    pub fn team_with_remaining(&self, player_id: PlayerId) -> Option<&GameTeam> {
        self.teams.iter().find(|t| t.has_remaining(player_id))
    }

    /// `true` if the player was ever on any team of this game.
    pub fn has_member(&self, player_id: PlayerId) -> bool {
        self.teams.iter().any(|t| t.has_member(player_id))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeDelta, Utc};

    use super::*;

    fn game(end_after_secs: Option<i64>) -> Game {
        let start = DateTime::<Utc>::UNIX_EPOCH;
        Game {
            id: GameId(1),
            name: "g1".into(),
            host_player_id: PlayerId(1),
            start_time: start,
            end_time: end_after_secs.map(|s| start + TimeDelta::seconds(s)),
        }
    }

    fn team(id: u64, player: u64, standing: bool) -> GameTeam {
        let players = BTreeSet::from([PlayerId(player)]);
        GameTeam {
            id: TeamId(id),
            game_id: GameId(1),
            remaining_player_ids: if standing { players.clone() } else { BTreeSet::new() },
            player_ids: players,
        }
    }

    #[test]
    fn test_duration_secs_only_when_ended() {
        assert_eq!(game(None).duration_secs(), None);
        assert_eq!(game(Some(95)).duration_secs(), Some(95));
    }

    #[test]
    fn test_phase_host_alone_is_waiting() {
        let snap = GameSnapshot {
            game: game(None),
            teams: vec![team(1, 1, true)],
        };
        assert_eq!(snap.phase(), GamePhase::WaitingForPlayers);
    }

    #[test]
    fn test_phase_two_teams_in_progress() {
        let snap = GameSnapshot {
            game: game(None),
            teams: vec![team(1, 1, true), team(2, 2, false)],
        };
        assert_eq!(snap.phase(), GamePhase::InProgress);
        assert_eq!(snap.standing_teams(), 1);
    }

    #[test]
    fn test_phase_with_end_time_is_ended() {
        let snap = GameSnapshot {
            game: game(Some(10)),
            teams: vec![team(1, 1, true), team(2, 2, true)],
        };
        assert_eq!(snap.phase(), GamePhase::Ended);
    }

    #[test]
    fn test_team_with_remaining_ignores_departed() {
        let snap = GameSnapshot {
            game: game(None),
            teams: vec![team(1, 1, true), team(2, 2, false)],
        };
        assert_eq!(snap.team_with_remaining(PlayerId(1)).map(|t| t.id), Some(TeamId(1)));
        assert!(snap.team_with_remaining(PlayerId(2)).is_none());
        // Departed players still count as members.
        assert!(snap.has_member(PlayerId(2)));
    }

    #[test]
    fn test_game_phase_display() {
        assert_eq!(GamePhase::WaitingForPlayers.to_string(), "WaitingForPlayers");
        assert_eq!(GamePhase::Ended.to_string(), "Ended");
    }
}
