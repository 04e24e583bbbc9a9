//! The game-details projection.
//!
//! Each output field is filled only when its name is in the caller's
//! [`Includes`] set. Team members come out as display strings; the
//! caller decides how a player id becomes one (a nickname, usually).

use playhall_protocol::{GameDetailsView, GameResult, Includes, PlayerId, TeamDetailsView, fields};

use crate::{GameCoordinator, GameError, GameSnapshot, GameStore, GameTeam};

impl<S: GameStore> GameCoordinator<S> {
    /// Projects every game ever created, oldest first, showing team
    /// members as raw player ids.
    pub fn game_details(&self, includes: &Includes) -> Result<Vec<GameDetailsView>, GameError> {
        self.game_details_with(includes, |ids| {
            Ok(ids.iter().map(|id| id.0.to_string()).collect())
        })
    }

    /// Projects every game ever created, oldest first, turning each
    /// team's member ids into display strings with `resolve`.
    ///
    /// `resolve` is only called when `teamsDetails` is included.
    pub fn game_details_with<E, F>(
        &self,
        includes: &Includes,
        mut resolve: F,
    ) -> Result<Vec<GameDetailsView>, E>
    where
        E: From<GameError>,
        F: FnMut(&[PlayerId]) -> Result<Vec<String>, E>,
    {
        self.all_games()?
            .iter()
            .map(|snapshot| project(snapshot, includes, &mut resolve))
            .collect()
    }
}

/// Builds the view of one game.
pub fn project<E, F>(
    snapshot: &GameSnapshot,
    includes: &Includes,
    resolve: &mut F,
) -> Result<GameDetailsView, E>
where
    F: FnMut(&[PlayerId]) -> Result<Vec<String>, E>,
{
    let game = &snapshot.game;
    let mut view = GameDetailsView::default();

    if includes.contains(fields::GAME_NAME) {
        view.game_name = Some(game.name.clone());
    }
    if includes.contains(fields::DURATION) {
        view.duration = game.duration_secs();
    }
    if includes.contains(fields::START_TIME) {
        view.start_time = Some(game.start_time);
    }
    if includes.contains(fields::END_TIME) {
        view.end_time = game.end_time;
    }
    if includes.contains(fields::TEAMS_DETAILS) {
        let teams = snapshot
            .teams
            .iter()
            .map(|team| project_team(team, snapshot, resolve))
            .collect::<Result<_, E>>()?;
        view.teams_details = Some(teams);
    }
    Ok(view)
}

fn project_team<E, F>(
    team: &GameTeam,
    snapshot: &GameSnapshot,
    resolve: &mut F,
) -> Result<TeamDetailsView, E>
where
    F: FnMut(&[PlayerId]) -> Result<Vec<String>, E>,
{
    let ids: Vec<PlayerId> = team.player_ids.iter().copied().collect();
    let mut view = TeamDetailsView {
        players: resolve(&ids)?,
        exit_time: None,
        result: None,
    };

    if let Some(end) = snapshot.game.end_time {
        view.exit_time = Some(end);
        view.result = Some(if team.is_standing() {
            GameResult::Victory
        } else {
            GameResult::Defeat
        });
    }
    Ok(view)
}
