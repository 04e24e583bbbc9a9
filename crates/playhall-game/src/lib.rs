//! Game and team lifecycle for Playhall.
//!
//! A game is a named match made of single-player teams. The host's team
//! comes first; every join appends another. Players leave one at a time
//! until a single team is left standing, and the next departure from
//! that team ends the game and frees its name.
//!
//! # Key types
//!
//! - [`GameCoordinator`]: create, join, leave, and the details projection
//! - [`GameStore`]: arena persistence for games, teams, and the
//!   active-name index
//! - [`GameSnapshot`]: a game with its teams, in join order
//! - [`GamePhase`]: lifecycle state machine

mod coordinator;
mod details;
mod error;
mod game;
mod store;

pub use coordinator::{GameCoordinator, LeaveOutcome};
pub use details::project;
pub use error::GameError;
pub use game::{Game, GamePhase, GameSnapshot, GameTeam, NewGame, NewTeam};
pub use store::{GameStore, MemoryGameStore};
