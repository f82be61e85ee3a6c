//! Byte-level encoding of invocations.
//!
//! The collaborator seam passes typed [`Invocation`](crate::Invocation)s,
//! but anything that has to put one on a socket, a log, or a journal
//! needs bytes. The [`Codec`] trait is that conversion, and
//! [`JsonCodec`] is the implementation shipped by default.

use serde::{Serialize, de::DeserializeOwned};

use crate::ProtocolError;

/// Converts serializable values to bytes and back.
///
/// `Send + Sync + 'static` because a codec usually lives inside a
/// transport that is shared between threads.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into bytes.
    ///
    /// # Errors
    /// Returns `ProtocolError::Encode` if the value can't be represented
    /// in this format.
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes bytes back into a value.
    ///
    /// # Errors
    /// Returns `ProtocolError::Decode` if the bytes are malformed or
    /// carry a wire code the target type doesn't know.
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError>;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] backed by `serde_json`.
///
/// Behind the `json` feature (on by default).
///
/// ```rust
/// use fidget_protocol::{Codec, Command, Invocation, JsonCodec};
///
/// let codec = JsonCodec;
/// let invocation = Command::HallOfFamePage { page: 2 }.encode().unwrap();
///
/// let bytes = codec.encode(&invocation).unwrap();
/// let decoded: Invocation = codec.decode(&bytes).unwrap();
/// assert_eq!(invocation, decoded);
/// ```
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}
