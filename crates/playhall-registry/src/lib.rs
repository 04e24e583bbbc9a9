//! Player registry for Playhall.
//!
//! Owns the rules for who may sign up ([`PlayerRegistry::register`]) and
//! whether a nickname/password-hash pair is good
//! ([`PlayerRegistry::authenticate`]). Password hashing itself is the
//! caller's business: the registry only compares opaque strings.
//!
//! Storage is pluggable through [`PlayerStore`]; [`MemoryPlayerStore`]
//! keeps everything in process.

mod error;
mod player;
mod registry;
mod store;

pub use error::RegistryError;
pub use player::{NewPlayer, Player, RegistryConfig};
pub use registry::PlayerRegistry;
pub use store::{MemoryPlayerStore, PlayerStore};
