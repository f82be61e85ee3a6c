use fidget_protocol::{CommandKind, ProtocolError};

/// Why a connection could not be opened.
///
/// The two cases are kept apart so the session can report them
/// differently: one means "try again later", the other "fix your login".
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OpenFailure {
    /// The server couldn't be reached or refused the connection.
    #[error("connection failed: {0}")]
    Connection(String),

    /// The server was reached but rejected the credentials.
    #[error("credentials rejected: {0}")]
    Credentials(String),
}

/// Errors that can occur in the transport layer.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The connection handle isn't (or is no longer) known to the collaborator.
    #[error("unknown connection conn-{0}")]
    UnknownConnection(u64),

    /// The server answered the command with an error.
    #[error("{command} failed: {reason}")]
    CommandFailed { command: CommandKind, reason: String },

    /// The invocation could not be encoded or decoded.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The async runtime behind a blocking bridge could not be built.
    #[error("async runtime unavailable: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Credentials could not be assembled from their inputs.
#[derive(Debug, thiserror::Error)]
pub enum CredentialsError {
    /// A required environment variable is not set.
    #[error("environment variable {0} is not set")]
    Missing(&'static str),

    /// A required field is empty.
    #[error("{0} must not be empty")]
    Empty(&'static str),

    /// The server address isn't a usable URL.
    #[error("invalid server address {address:?}: {source}")]
    InvalidServerUrl {
        address: String,
        #[source]
        source: url::ParseError,
    },
}
