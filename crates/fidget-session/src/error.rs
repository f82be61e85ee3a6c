//! Error types for the session layer.

use fidget_protocol::CommandKind;
use fidget_transport::{CredentialsError, OpenFailure};

/// A session could not be created.
///
/// No [`Session`](crate::Session) exists when one of these is returned,
/// so there is nothing to clean up.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// The collaborator couldn't connect, or the server address or
    /// environment was unusable. Retrying may help once that is fixed.
    #[error("session creation failed: {0}")]
    CreationFailed(String),

    /// The credentials were refused, by the server or because they can
    /// never be valid (empty username). Retrying with the same input won't help.
    #[error("authentication rejected: {0}")]
    AuthenticationRejected(String),
}

impl From<OpenFailure> for SessionError {
    fn from(failure: OpenFailure) -> Self {
        match failure {
            OpenFailure::Connection(reason) => Self::CreationFailed(reason),
            OpenFailure::Credentials(reason) => Self::AuthenticationRejected(reason),
        }
    }
}

impl From<CredentialsError> for SessionError {
    fn from(error: CredentialsError) -> Self {
        match error {
            CredentialsError::Empty(_) => Self::AuthenticationRejected(error.to_string()),
            CredentialsError::Missing(_) | CredentialsError::InvalidServerUrl { .. } => {
                Self::CreationFailed(error.to_string())
            }
        }
    }
}

/// A query on a [`CommandResponse`](crate::CommandResponse) failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResponseError {
    /// The command itself failed, so the response carries no data.
    #[error("{0} failed; the response has no data")]
    CommandFailed(CommandKind),

    /// The response has no value for this key.
    #[error("key {0:?} not found in response")]
    KeyNotFound(String),
}
