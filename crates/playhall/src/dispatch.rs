//! Request dispatch: one [`Request`] in, one [`Response`] out.
//!
//! Whatever carries requests to Playhall (an HTTP handler, a socket
//! loop, a test) decodes bytes with the configured codec, calls
//! [`Playhall::handle`], and encodes the answer.
//! [`Playhall::handle_bytes`] does all three.

use playhall_game::GameStore;
use playhall_protocol::{Codec, Request, Response};
use playhall_registry::PlayerStore;
use playhall_session::SessionStore;

use crate::{Playhall, PlayhallError};

impl<P, S, G, C> Playhall<P, S, G, C>
where
    P: PlayerStore,
    S: SessionStore,
    G: GameStore,
    C: Codec,
{
    /// Routes a request to the matching operation.
    pub async fn handle(&self, request: Request) -> Result<Response, PlayhallError> {
        let response = match request {
            Request::Login {
                nick_name,
                password_hash,
            } => Response::Status(self.login(&nick_name, &password_hash).await?),
            Request::Logout { token } => Response::Status(self.logout(&token).await?),
            Request::Register {
                nick_name,
                email,
                password_hash,
            } => Response::Status(self.register(&nick_name, &email, &password_hash).await?),
            Request::PlayerExists { nick_name } => Response::PlayerExists {
                exists: self.player_exists(&nick_name).await?,
            },
            Request::CreateGame {
                game_name,
                player_token,
            } => Response::Status(self.create_game(&game_name, &player_token).await?),
            Request::JoinGame {
                game_name,
                player_token,
            } => Response::Status(self.join_game(&game_name, &player_token).await?),
            Request::LeaveGame {
                game_name,
                player_token,
            } => Response::Status(self.leave_game(&game_name, &player_token).await?),
            Request::GameDetails { includes } => {
                Response::GameDetails(self.game_details(&includes).await?)
            }
            Request::PlayerDetails(details) => {
                Response::PlayerDetails(self.player_details(&details).await?)
            }
        };
        Ok(response)
    }

    /// Decodes a request, handles it, and encodes the response.
    ///
    /// # Errors
    /// [`PlayhallError::Protocol`] if the bytes aren't a valid request.
    /// Rejections are not errors: they come back encoded as a
    /// `REJECTED` status.
    pub async fn handle_bytes(&self, data: &[u8]) -> Result<Vec<u8>, PlayhallError> {
        let request: Request = match self.codec.decode(data) {
            Ok(request) => request,
            Err(e) => {
                tracing::debug!(error = %e, "failed to decode request");
                return Err(e.into());
            }
        };
        let response = self.handle(request).await?;
        Ok(self.codec.encode(&response)?)
    }
}
