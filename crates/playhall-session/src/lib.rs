//! Login session management for Playhall.
//!
//! This crate handles the lifecycle of a player's logins:
//!
//! 1. **Opening**: one open session per player; a new login closes the
//!    previous one ([`SessionManager::create_session`])
//! 2. **Tracking**: resolving tokens and recording activity
//! 3. **Closing**: logout, with the lazy expiration-window rule
//! 4. **Accounting**: total play time over the full session history
//!
//! Storage is pluggable through the [`SessionStore`] trait;
//! [`MemorySessionStore`] keeps everything in process.
//!
//! # How it fits in the stack
//!
//! ```text
//! Facade (above)  ← resolves tokens before touching games
//!     ↕
//! Session Layer (this crate)  ← who is logged in, and for how long
//!     ↕
//! Protocol Layer (below)  ← PlayerId, Clock, StoreError
//! ```

mod error;
mod manager;
mod session;
mod store;

pub use error::SessionError;
pub use manager::SessionManager;
pub use session::{NewSession, Session, SessionConfig};
pub use store::{MemorySessionStore, SessionStore};
