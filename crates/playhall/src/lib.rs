//! # Playhall
//!
//! Tracks online players, authenticates them, keeps time-bounded login
//! sessions, and coordinates ad-hoc multiplayer games made of teams.
//!
//! The [`Playhall`] facade composes three components:
//!
//! - sessions ([`playhall_session`]): one open session per player,
//!   activity tracking, total play time
//! - the player registry ([`playhall_registry`]): sign-up validation and
//!   credential checks
//! - games ([`playhall_game`]): the create/join/leave state machine and
//!   the game-details projection
//!
//! ## Quick Start
//!
//! ```rust
//! use playhall::prelude::*;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), PlayhallError> {
//! let hall = Playhall::builder().build();
//!
//! hall.register("alice", "alice@mail.com", "h1").await?;
//! let login = hall.login("alice", "h1").await?;
//! let token = login.token.unwrap_or_default();
//!
//! let created = hall.create_game("g1", &token).await?;
//! assert!(created.is_success());
//! # Ok(())
//! # }
//! ```

mod builder;
mod dispatch;
mod error;
mod facade;
pub mod telemetry;

pub use builder::{MemoryPlayhall, PlayhallBuilder};
pub use error::PlayhallError;
pub use facade::Playhall;

pub use playhall_game as game;
pub use playhall_protocol as protocol;
pub use playhall_registry as registry;
pub use playhall_session as session;

pub mod prelude {
    //! Everything needed to build and call a Playhall.

    pub use crate::{MemoryPlayhall, Playhall, PlayhallBuilder, PlayhallError};
    pub use playhall_game::{GameStore, MemoryGameStore};
    pub use playhall_protocol::{
        Clock, Codec, GameDetailsPage, Includes, JsonCodec, ManualClock, PlayerDetailsPage,
        PlayerDetailsRequest, PlayerFilter, Request, Response, Status, StatusResponse,
        SystemClock,
    };
    pub use playhall_registry::{MemoryPlayerStore, PlayerStore, RegistryConfig};
    pub use playhall_session::{MemorySessionStore, SessionConfig, SessionStore};
}
