//! `PlayhallBuilder`: configures and assembles a [`Playhall`].

use std::sync::Arc;

use playhall_game::{GameCoordinator, GameStore, MemoryGameStore};
use playhall_protocol::{Clock, Codec, JsonCodec, SystemClock};
use playhall_registry::{MemoryPlayerStore, PlayerRegistry, PlayerStore, RegistryConfig};
use playhall_session::{MemorySessionStore, SessionConfig, SessionManager, SessionStore};

use crate::Playhall;

/// A [`Playhall`] over the in-memory stores, speaking JSON.
pub type MemoryPlayhall = Playhall<MemoryPlayerStore, MemorySessionStore, MemoryGameStore>;

impl MemoryPlayhall {
    /// Creates a new builder.
    pub fn builder() -> PlayhallBuilder {
        PlayhallBuilder::new()
    }
}

/// Builder for configuring a Playhall instance.
///
/// # Example
///
/// ```rust
/// use playhall::prelude::*;
///
/// let hall = Playhall::builder()
///     .session_config(SessionConfig { expiration_secs: 600 })
///     .build();
/// ```
pub struct PlayhallBuilder {
    session_config: SessionConfig,
    registry_config: RegistryConfig,
    clock: Arc<dyn Clock>,
}

impl PlayhallBuilder {
    /// Creates a new builder with default settings and the system clock.
    pub fn new() -> Self {
        Self {
            session_config: SessionConfig::default(),
            registry_config: RegistryConfig::default(),
            clock: Arc::new(SystemClock),
        }
    }

    /// Sets the session configuration.
    pub fn session_config(mut self, config: SessionConfig) -> Self {
        self.session_config = config;
        self
    }

    /// Sets the registration limits.
    pub fn registry_config(mut self, config: RegistryConfig) -> Self {
        self.registry_config = config;
        self
    }

    /// Sets where "now" comes from. Tests pass a `ManualClock`.
    pub fn clock(mut self, clock: impl Clock) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Builds a Playhall over fresh in-memory stores with `JsonCodec`.
    pub fn build(self) -> MemoryPlayhall {
        self.build_with(
            MemoryPlayerStore::new(),
            MemorySessionStore::new(),
            MemoryGameStore::new(),
            JsonCodec,
        )
    }

    /// Builds a Playhall over the given stores and codec.
    pub fn build_with<P, S, G, C>(
        self,
        players: P,
        sessions: S,
        games: G,
        codec: C,
    ) -> Playhall<P, S, G, C>
    where
        P: PlayerStore,
        S: SessionStore,
        G: GameStore,
        C: Codec,
    {
        tracing::debug!(
            expiration_secs = self.session_config.expiration_secs,
            "building playhall"
        );
        Playhall::from_parts(
            SessionManager::new(sessions, self.session_config, Arc::clone(&self.clock)),
            PlayerRegistry::new(players, self.registry_config),
            GameCoordinator::new(games, self.clock),
            codec,
        )
    }
}

impl Default for PlayhallBuilder {
    fn default() -> Self {
        Self::new()
    }
}
