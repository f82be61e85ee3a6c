//! Unified error type for Fidget.

use fidget_protocol::{ArgumentError, ProtocolError};
use fidget_session::{ResponseError, SessionError};
use fidget_transport::{CredentialsError, TransportError};

/// Top-level error that wraps every crate-specific error.
///
/// The `#[from]` on each variant lets `?` convert sub-crate errors
/// automatically, so a caller can use one error type throughout.
#[derive(Debug, thiserror::Error)]
pub enum FidgetError {
    /// Connecting or logging in failed.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// A command argument was rejected before sending.
    #[error(transparent)]
    Argument(#[from] ArgumentError),

    /// A response query failed (failed command or missing key).
    #[error(transparent)]
    Response(#[from] ResponseError),

    /// Credentials could not be built.
    #[error(transparent)]
    Credentials(#[from] CredentialsError),

    /// A collaborator-level error.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Encoding or decoding failed.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}
