//! The Playhall facade: the externally visible operations.
//!
//! Each component sits behind its own `tokio::sync::Mutex`, held for the
//! whole check-then-mutate sequence of an operation. When an operation
//! needs more than one component it always locks them in the order
//! sessions → registry → games, so two operations can never wait on
//! each other in a cycle.

use playhall_game::{GameCoordinator, GameStore};
use playhall_protocol::{
    Codec, GameDetailsPage, Includes, JsonCodec, PlayerDetailsPage, PlayerDetailsRequest,
    PlayerDetailsView, PlayerId, Rejection, StatusResponse, StoreError, fields,
};
use playhall_registry::{PlayerRegistry, PlayerStore};
use playhall_session::{SessionManager, SessionStore};
use tokio::sync::Mutex;

use crate::PlayhallError;

/// Turns an expected refusal into a `REJECTED` status carrying its
/// reason. Storage faults pass through as errors.
fn refuse(refusal: Result<Rejection, StoreError>) -> Result<StatusResponse, PlayhallError> {
    let rejection = refusal?;
    tracing::debug!(%rejection, "request rejected");
    Ok(StatusResponse::rejected(rejection.to_string()))
}

/// Composes sessions, the player registry, and games into one service.
///
/// Build one with [`PlayhallBuilder`](crate::PlayhallBuilder). All
/// operations take `&self`, so a `Playhall` can be shared behind an
/// `Arc` across tasks.
pub struct Playhall<P, S, G, C = JsonCodec>
where
    P: PlayerStore,
    S: SessionStore,
    G: GameStore,
    C: Codec,
{
    pub(crate) sessions: Mutex<SessionManager<S>>,
    pub(crate) registry: Mutex<PlayerRegistry<P>>,
    pub(crate) games: Mutex<GameCoordinator<G>>,
    pub(crate) codec: C,
}

impl<P, S, G, C> Playhall<P, S, G, C>
where
    P: PlayerStore,
    S: SessionStore,
    G: GameStore,
    C: Codec,
{
    pub(crate) fn from_parts(
        sessions: SessionManager<S>,
        registry: PlayerRegistry<P>,
        games: GameCoordinator<G>,
        codec: C,
    ) -> Self {
        Self {
            sessions: Mutex::new(sessions),
            registry: Mutex::new(registry),
            games: Mutex::new(games),
            codec,
        }
    }

    // -----------------------------------------------------------------------
    // Players and sessions
    // -----------------------------------------------------------------------

    /// Checks credentials and opens a new session, closing any session
    /// the player already had.
    pub async fn login(
        &self,
        nickname: &str,
        password_hash: &str,
    ) -> Result<StatusResponse, PlayhallError> {
        let mut sessions = self.sessions.lock().await;
        let registry = self.registry.lock().await;

        let player_id = match registry.authenticate(nickname, password_hash) {
            Ok(id) => id,
            Err(e) => return refuse(e.into_rejection()),
        };
        let token = sessions.create_session(player_id)?;

        tracing::info!(%player_id, nickname, "player logged in");
        Ok(StatusResponse::with_token(token))
    }

    /// Closes the session behind `token`. Always succeeds, even for a
    /// token that was never issued.
    pub async fn logout(&self, token: &str) -> Result<StatusResponse, PlayhallError> {
        self.sessions.lock().await.close_session(token)?;
        Ok(StatusResponse::success())
    }

    pub async fn register(
        &self,
        nickname: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<StatusResponse, PlayhallError> {
        let mut registry = self.registry.lock().await;
        match registry.register(nickname, email, password_hash) {
            Ok(_) => Ok(StatusResponse::success()),
            Err(e) => refuse(e.into_rejection()),
        }
    }

    pub async fn player_exists(&self, nickname: &str) -> Result<bool, PlayhallError> {
        Ok(self.registry.lock().await.exists(nickname)?)
    }

    // -----------------------------------------------------------------------
    // Games
    // -----------------------------------------------------------------------

    /// Starts a game named `name` hosted by the token's player.
    pub async fn create_game(
        &self,
        name: &str,
        token: &str,
    ) -> Result<StatusResponse, PlayhallError> {
        let player_id = match self.resolve_player(token).await? {
            Ok(id) => id,
            Err(rejected) => return Ok(rejected),
        };
        match self.games.lock().await.create_game(name, player_id) {
            Ok(_) => Ok(StatusResponse::success()),
            Err(e) => refuse(e.into_rejection()),
        }
    }

    /// Adds the token's player to the active game named `name`.
    pub async fn join_game(
        &self,
        name: &str,
        token: &str,
    ) -> Result<StatusResponse, PlayhallError> {
        let player_id = match self.resolve_player(token).await? {
            Ok(id) => id,
            Err(rejected) => return Ok(rejected),
        };
        match self.games.lock().await.join_game(name, player_id) {
            Ok(_) => Ok(StatusResponse::success()),
            Err(e) => refuse(e.into_rejection()),
        }
    }

    /// Takes the token's player out of the active game named `name`.
    ///
    /// Succeeds even when the player had nothing to leave, as long as
    /// the game exists.
    pub async fn leave_game(
        &self,
        name: &str,
        token: &str,
    ) -> Result<StatusResponse, PlayhallError> {
        let player_id = match self.resolve_player(token).await? {
            Ok(id) => id,
            Err(rejected) => return Ok(rejected),
        };
        match self.games.lock().await.leave_game(name, player_id) {
            Ok(_) => Ok(StatusResponse::success()),
            Err(e) => refuse(e.into_rejection()),
        }
    }

    /// Projects every game ever created. Team members are shown by
    /// nickname; ids with no registered player are dropped.
    pub async fn game_details(
        &self,
        includes: &Includes,
    ) -> Result<GameDetailsPage, PlayhallError> {
        let registry = self.registry.lock().await;
        let games = self.games.lock().await;

        let game_details = games.game_details_with::<PlayhallError, _>(includes, |ids| {
            let players = registry.players_by_ids(ids)?;
            Ok(players.into_iter().map(|p| p.nickname).collect())
        })?;

        Ok(GameDetailsPage {
            total_number: game_details.len(),
            game_details,
        })
    }

    // -----------------------------------------------------------------------
    // Player details
    // -----------------------------------------------------------------------

    /// Lists players, optionally filtered by nickname and paged.
    ///
    /// A `player_token` counts as activity for that session. Paging
    /// applies only when both `page` (zero-based) and `page_size` are
    /// given; `total_players` is then the number of registered players,
    /// otherwise the number of players returned.
    pub async fn player_details(
        &self,
        request: &PlayerDetailsRequest,
    ) -> Result<PlayerDetailsPage, PlayhallError> {
        let mut sessions = self.sessions.lock().await;
        let registry = self.registry.lock().await;

        if let Some(token) = &request.player_token {
            sessions.record_activity(token)?;
        }

        let selected = registry
            .all_players()?
            .into_iter()
            .filter(|p| request.filter.as_ref().is_none_or(|f| f.matches(&p.nickname)));

        let (players, total_players) = match (request.page, request.page_size) {
            (Some(page), Some(page_size)) => {
                let players: Vec<_> = selected
                    .skip(page.saturating_mul(page_size))
                    .take(page_size)
                    .collect();
                (players, registry.count()?)
            }
            _ => {
                let players: Vec<_> = selected.collect();
                let total = players.len();
                (players, total)
            }
        };

        let includes = &request.includes;
        let player_details = players
            .into_iter()
            .map(|player| -> Result<PlayerDetailsView, PlayhallError> {
                let mut view = PlayerDetailsView::default();
                if includes.contains(fields::TOTAL_PLAY_TIME) {
                    view.total_play_time = Some(sessions.total_play_time(player.id)?);
                }
                if includes.contains(fields::NICK_NAME) {
                    view.nick_name = Some(player.nickname);
                }
                Ok(view)
            })
            .collect::<Result<_, _>>()?;

        Ok(PlayerDetailsPage {
            player_details,
            total_players,
        })
    }

    /// Resolves a token to its player, or the `REJECTED` status to send
    /// back when it doesn't resolve.
    async fn resolve_player(
        &self,
        token: &str,
    ) -> Result<Result<PlayerId, StatusResponse>, PlayhallError> {
        match self.sessions.lock().await.resolve_player(token) {
            Ok(id) => Ok(Ok(id)),
            Err(e) => refuse(e.into_rejection()).map(Err),
        }
    }
}
