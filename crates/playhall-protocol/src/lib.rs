//! Shared vocabulary for Playhall.
//!
//! This crate defines what every other layer speaks:
//!
//! - **Types** ([`PlayerId`], [`Request`], [`Response`], the details
//!   views): identifiers and the request/response shapes.
//! - **Clock** ([`Clock`], [`SystemClock`], [`ManualClock`]): where
//!   "now" comes from.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]): how requests and
//!   responses become bytes.
//! - **Errors** ([`Rejection`], [`StoreError`], [`ProtocolError`]):
//!   expected refusals versus faults.
//!
//! # Architecture
//!
//! ```text
//! Facade (playhall)  ← decodes Requests, returns Responses
//!     ↕
//! Session / Registry / Game  ← domain state machines
//!     ↕
//! Protocol (this crate)  ← ids, views, clock, rejection taxonomy
//! ```

mod clock;
mod codec;
mod error;
mod rejection;
mod types;

pub use clock::{Clock, ManualClock, SystemClock, Timestamp};
pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::{ProtocolError, StoreError};
pub use rejection::Rejection;
pub use types::{
    GameDetailsPage, GameDetailsView, GameId, GameResult, Includes, PlayerDetailsPage,
    PlayerDetailsRequest, PlayerDetailsView, PlayerFilter, PlayerId, Request, Response, SessionId,
    Status, StatusResponse, TeamDetailsView, TeamId, fields,
};
