//! Codec trait and implementations for serializing/deserializing messages.
//!
//! A codec turns [`Request`](crate::Request)s and
//! [`Response`](crate::Response)s into bytes and back. The facade doesn't
//! care which format is used, only that something implements [`Codec`].
//!
//! Currently we provide [`JsonCodec`]. A binary codec can be added later
//! without touching the facade.

use serde::{Serialize, de::DeserializeOwned};

use crate::ProtocolError;

/// A codec that can encode Rust types to bytes and decode bytes back.
///
/// `Send + Sync + 'static` because the codec lives inside the facade,
/// which is shared between Tokio tasks behind an `Arc`.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into bytes.
    ///
    /// # Errors
    /// Returns `ProtocolError::Encode` if serialization fails.
    fn encode<T: Serialize>(
        &self,
        value: &T,
    ) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes bytes back into a value.
    ///
    /// # Errors
    /// Returns `ProtocolError::Decode` if the bytes are malformed,
    /// incomplete, or don't match the expected type.
    fn decode<T: DeserializeOwned>(
        &self,
        data: &[u8],
    ) -> Result<T, ProtocolError>;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] that uses JSON (via `serde_json`).
///
/// This is behind the `json` feature flag (enabled by default).
///
/// ## Example
///
/// ```rust
/// use playhall_protocol::{Codec, JsonCodec, Request};
///
/// let codec = JsonCodec;
///
/// let request = Request::PlayerExists { nick_name: "alice".into() };
/// let bytes = codec.encode(&request).unwrap();
/// let decoded: Request = codec.decode(&bytes).unwrap();
/// assert_eq!(request, decoded);
/// ```
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(
        &self,
        value: &T,
    ) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(
        &self,
        data: &[u8],
    ) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}

#[cfg(all(test, feature = "json"))]
mod tests {
    use super::*;
    use crate::{Request, Response, StatusResponse};

    #[test]
    fn test_json_codec_decodes_wire_request() {
        let codec = JsonCodec;
        let req: Request = codec
            .decode(br#"{"type":"logout","token":"abc"}"#)
            .expect("should decode");
        assert_eq!(req, Request::Logout { token: "abc".into() });
    }

    #[test]
    fn test_json_codec_encodes_response() {
        let codec = JsonCodec;
        let bytes = codec
            .encode(&Response::Status(StatusResponse::rejected("Game not found.")))
            .expect("should encode");
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["type"], "status");
        assert_eq!(json["loginStatus"], "REJECTED");
        assert_eq!(json["message"], "Game not found.");
    }

    #[test]
    fn test_json_codec_garbage_returns_decode_error() {
        let codec = JsonCodec;
        let result: Result<Request, _> = codec.decode(b"not json at all");
        assert!(matches!(result, Err(ProtocolError::Decode(_))));
    }

    #[test]
    fn test_json_codec_missing_field_returns_decode_error() {
        let codec = JsonCodec;
        let result: Result<Request, _> =
            codec.decode(br#"{"type":"login","nickName":"alice"}"#);
        assert!(matches!(result, Err(ProtocolError::Decode(_))));
    }
}
