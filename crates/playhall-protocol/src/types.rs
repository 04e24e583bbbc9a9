//! Core protocol types for Playhall's request/response format.
//!
//! Everything in here is plain data: identifiers, the request enum a
//! transport decodes, the uniform response envelope, and the projected
//! "details" views returned by the listing operations.
//!
//! Field names on the wire are camelCase (`loginStatus`, `gameName`,
//! `teamsDetails`) because that's what existing clients already speak.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Timestamp;

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A unique identifier for a registered player.
///
/// Newtype wrapper around `u64` so a `PlayerId` can't be passed where a
/// `GameId` is expected. `#[serde(transparent)]` keeps the JSON form a
/// plain number: `PlayerId(42)` is just `42`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P-{}", self.0)
    }
}

/// A unique identifier for one login session record.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SessionId(pub u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S-{}", self.0)
    }
}

/// A unique identifier for one game instance (one match).
///
/// Game *names* are reused once a game ends; ids never are.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct GameId(pub u64);

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "G-{}", self.0)
    }
}

/// A unique identifier for a team within a game.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TeamId(pub u64);

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T-{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Status envelope
// ---------------------------------------------------------------------------

/// Outcome of a request: accepted or turned down with a reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Success,
    Rejected,
}

/// The uniform response for every state-changing operation.
///
/// `token` is only set by a successful login, `message` only by a
/// rejection. Both are omitted from the JSON when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    #[serde(rename = "loginStatus")]
    pub status: Status,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl StatusResponse {
    /// A bare success with no token and no message.
    pub fn success() -> Self {
        Self {
            status: Status::Success,
            token: None,
            message: None,
        }
    }

    /// A success carrying a freshly issued session token.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            status: Status::Success,
            token: Some(token.into()),
            message: None,
        }
    }

    /// A rejection. `message` is shown to the end user verbatim.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            status: Status::Rejected,
            token: None,
            message: Some(message.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }
}

// ---------------------------------------------------------------------------
// Field inclusion
// ---------------------------------------------------------------------------

/// Names of the optional fields a details request can ask for.
pub mod fields {
    pub const GAME_NAME: &str = "gameName";
    pub const DURATION: &str = "duration";
    pub const START_TIME: &str = "startTime";
    pub const END_TIME: &str = "endTime";
    pub const TEAMS_DETAILS: &str = "teamsDetails";
    pub const NICK_NAME: &str = "nickName";
    pub const TOTAL_PLAY_TIME: &str = "totalPlayTime";
}

/// The set of field names a caller wants populated in a details view.
///
/// Anything not in the set is left `None` and skipped on the wire.
/// An empty set therefore yields empty views, which is still a valid
/// (if not very useful) answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Includes(BTreeSet<String>);

impl Includes {
    /// Every field the details views know about.
    pub fn all() -> Self {
        [
            fields::GAME_NAME,
            fields::DURATION,
            fields::START_TIME,
            fields::END_TIME,
            fields::TEAMS_DETAILS,
            fields::NICK_NAME,
            fields::TOTAL_PLAY_TIME,
        ]
        .into_iter()
        .collect()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Includes {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

// ---------------------------------------------------------------------------
// Details views
// ---------------------------------------------------------------------------

/// How a team fared once its game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameResult {
    Victory,
    Defeat,
}

/// Projection of one team. `exit_time` and `result` are only present
/// once the owning game has ended.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamDetailsView {
    pub players: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_time: Option<Timestamp>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<GameResult>,
}

/// Projection of one game, limited to the requested [`Includes`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameDetailsView {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_name: Option<String>,

    /// Whole seconds between start and end. Absent while in progress.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<Timestamp>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<Timestamp>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teams_details: Option<Vec<TeamDetailsView>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameDetailsPage {
    pub game_details: Vec<GameDetailsView>,
    pub total_number: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerDetailsView {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nick_name: Option<String>,

    /// Accumulated session time in whole seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_play_time: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerDetailsPage {
    pub player_details: Vec<PlayerDetailsView>,
    pub total_players: usize,
}

/// Restricts a player listing to the given nicknames. An empty list
/// means "no restriction".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerFilter {
    #[serde(default)]
    pub nick_names: Vec<String>,
}

impl PlayerFilter {
    pub fn matches(&self, nickname: &str) -> bool {
        self.nick_names.is_empty() || self.nick_names.iter().any(|n| n == nickname)
    }
}

/// Parameters of a player listing.
///
/// Paging only applies when both `page` (zero-based) and `page_size`
/// are given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerDetailsRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_token: Option<String>,

    #[serde(default)]
    pub includes: Includes,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<PlayerFilter>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<usize>,
}

// ---------------------------------------------------------------------------
// Request / Response
// ---------------------------------------------------------------------------

/// Every operation a client can ask for.
///
/// Internally tagged: `{ "type": "login", "nickName": "alice", ... }`.
/// The transport in front of Playhall (HTTP, WebSocket, a test harness)
/// only has to decode one of these and hand it to the facade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Request {
    Login {
        nick_name: String,
        password_hash: String,
    },
    Logout {
        token: String,
    },
    Register {
        nick_name: String,
        email: String,
        password_hash: String,
    },
    PlayerExists {
        nick_name: String,
    },
    CreateGame {
        game_name: String,
        player_token: String,
    },
    JoinGame {
        game_name: String,
        player_token: String,
    },
    LeaveGame {
        game_name: String,
        player_token: String,
    },
    GameDetails {
        #[serde(default)]
        includes: Includes,
    },
    PlayerDetails(PlayerDetailsRequest),
}

/// The answer to a [`Request`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Response {
    Status(StatusResponse),
    PlayerExists { exists: bool },
    GameDetails(GameDetailsPage),
    PlayerDetails(PlayerDetailsPage),
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    //! The JSON shapes below are what clients parse, so these tests pin
    //! the serde attributes rather than round-tripping everything.

    use chrono::{DateTime, Utc};

    use super::*;

    #[test]
    fn test_player_id_serializes_as_plain_number() {
        let json = serde_json::to_string(&PlayerId(42)).unwrap();
        assert_eq!(json, "42");
    }

    #[test]
    fn test_id_display_prefixes() {
        assert_eq!(PlayerId(7).to_string(), "P-7");
        assert_eq!(SessionId(1).to_string(), "S-1");
        assert_eq!(GameId(3).to_string(), "G-3");
        assert_eq!(TeamId(9).to_string(), "T-9");
    }

    #[test]
    fn test_status_response_success_omits_optional_fields() {
        let json = serde_json::to_value(StatusResponse::success()).unwrap();
        assert_eq!(json, serde_json::json!({ "loginStatus": "SUCCESS" }));
    }

    #[test]
    fn test_status_response_rejected_carries_message() {
        let json =
            serde_json::to_value(StatusResponse::rejected("Wrong password!"))
                .unwrap();
        assert_eq!(json["loginStatus"], "REJECTED");
        assert_eq!(json["message"], "Wrong password!");
        assert!(json.get("token").is_none());
    }

    #[test]
    fn test_status_response_with_token() {
        let resp = StatusResponse::with_token("abc");
        assert!(resp.is_success());
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["token"], "abc");
    }

    #[test]
    fn test_includes_from_strings() {
        let includes: Includes = ["gameName", "duration"].into_iter().collect();
        assert!(includes.contains(fields::GAME_NAME));
        assert!(includes.contains(fields::DURATION));
        assert!(!includes.contains(fields::TEAMS_DETAILS));
    }

    #[test]
    fn test_includes_deserializes_from_array() {
        let includes: Includes =
            serde_json::from_str(r#"["nickName","totalPlayTime"]"#).unwrap();
        assert!(includes.contains(fields::NICK_NAME));
        assert!(includes.contains(fields::TOTAL_PLAY_TIME));
    }

    #[test]
    fn test_includes_all_covers_every_field() {
        let all = Includes::all();
        for field in [
            fields::GAME_NAME,
            fields::DURATION,
            fields::START_TIME,
            fields::END_TIME,
            fields::TEAMS_DETAILS,
            fields::NICK_NAME,
            fields::TOTAL_PLAY_TIME,
        ] {
            assert!(all.contains(field), "{field} missing");
        }
    }

    #[test]
    fn test_game_details_view_skips_unset_fields() {
        let view = GameDetailsView {
            game_name: Some("g1".into()),
            ..GameDetailsView::default()
        };
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json, serde_json::json!({ "gameName": "g1" }));
    }

    #[test]
    fn test_team_details_view_result_is_screaming_case() {
        let view = TeamDetailsView {
            players: vec!["alice".into()],
            exit_time: Some(DateTime::<Utc>::UNIX_EPOCH),
            result: Some(GameResult::Defeat),
        };
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["result"], "DEFEAT");
        assert_eq!(json["exitTime"], "1970-01-01T00:00:00Z");
    }

    #[test]
    fn test_player_filter_empty_matches_everyone() {
        let filter = PlayerFilter::default();
        assert!(filter.matches("anyone"));
    }

    #[test]
    fn test_player_filter_restricts_to_listed_nicknames() {
        let filter = PlayerFilter {
            nick_names: vec!["alice".into()],
        };
        assert!(filter.matches("alice"));
        assert!(!filter.matches("bob"));
    }

    #[test]
    fn test_request_login_json_format() {
        let json = r#"{"type":"login","nickName":"alice","passwordHash":"h1"}"#;
        let req: Request = serde_json::from_str(json).unwrap();
        assert_eq!(
            req,
            Request::Login {
                nick_name: "alice".into(),
                password_hash: "h1".into(),
            }
        );
    }

    #[test]
    fn test_request_create_game_json_format() {
        let req = Request::CreateGame {
            game_name: "g1".into(),
            player_token: "tok".into(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["type"], "createGame");
        assert_eq!(json["gameName"], "g1");
        assert_eq!(json["playerToken"], "tok");
    }

    #[test]
    fn test_request_player_details_defaults() {
        let json = r#"{"type":"playerDetails"}"#;
        let req: Request = serde_json::from_str(json).unwrap();
        assert_eq!(req, Request::PlayerDetails(PlayerDetailsRequest::default()));
    }

    #[test]
    fn test_request_unknown_type_returns_error() {
        let result: Result<Request, _> =
            serde_json::from_str(r#"{"type":"flyToMoon"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_response_status_is_tagged() {
        let resp = Response::Status(StatusResponse::success());
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["type"], "status");
        assert_eq!(json["loginStatus"], "SUCCESS");
    }
}
