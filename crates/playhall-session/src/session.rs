//! Session types: the records that represent a player's logins.
//!
//! A "session" is the server's record of one successful login. It tracks:
//! - WHO logged in (`PlayerId`)
//! - HOW they prove it on later requests (an opaque token)
//! - WHEN they logged in and were last seen
//! - WHETHER it's still open
//!
//! Sessions are never deleted. Closed ones are history, and that history
//! is what total play time is computed from.

use playhall_protocol::{PlayerId, SessionId, Timestamp};

// ---------------------------------------------------------------------------
// SessionConfig
// ---------------------------------------------------------------------------

/// Configuration for session behavior.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// How long (in seconds) after the last recorded activity a session
    /// still counts as live when it is closed.
    ///
    /// Closing inside this window stretches the session's last activity
    /// up to the close time; closing after it leaves the last recorded
    /// activity alone. Nothing expires sessions in the background.
    ///
    /// Default: 10800 seconds (3 hours).
    pub expiration_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            expiration_secs: 10_800,
        }
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// One login of one player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: SessionId,

    /// Which player this session belongs to.
    pub player_id: PlayerId,

    /// Opaque secret the client presents on every request.
    ///
    /// A 32-character lowercase hex string (128 bits of randomness).
    pub token: String,

    pub login_time: Timestamp,

    pub last_activity_time: Timestamp,

    /// `false` while the session is open. At most one open session
    /// exists per player.
    pub closed: bool,
}

impl Session {
    pub fn is_open(&self) -> bool {
        !self.closed
    }

    /// Seconds between login and last activity.
    ///
    /// Both ends are truncated to whole epoch seconds before subtracting,
    /// so a session from 10.9s to 11.1s counts as one second.
    pub fn duration_secs(&self) -> i64 {
        self.last_activity_time.timestamp() - self.login_time.timestamp()
    }
}

/// The fields of a session that exist before the store assigns an id.
#[derive(Debug, Clone)]
pub struct NewSession {
    pub player_id: PlayerId,
    pub token: String,
    pub login_time: Timestamp,
}
