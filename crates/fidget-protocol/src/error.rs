//! Error types for the protocol layer.
//!
//! Two enums live here. [`ProtocolError`] is about the wire itself
//! (bytes that don't decode, codes nobody knows). [`ArgumentError`] is
//! about a command the caller built: it is raised before anything is
//! sent, so the caller can fix the argument and try again.

use crate::CommandKind;

/// Errors that can occur while encoding or decoding wire data.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning a Rust type into bytes).
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed (turning bytes into a Rust type).
    ///
    /// Common causes: malformed JSON, missing fields, or a wire code
    /// that doesn't belong to the expected vocabulary.
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// The message decoded but breaks a protocol rule.
    #[error("invalid message: {0}")]
    InvalidMessage(String),

    /// A numeric code has no variant in the named vocabulary.
    ///
    /// `kind` is the Rust type name (e.g. `"MountType"`), so the log line
    /// says which table the code was looked up in.
    #[error("unknown {kind} wire code {code}")]
    UnknownWireCode { kind: &'static str, code: u16 },
}

/// A command argument failed a client-side check.
///
/// These are raised before the collaborator is contacted. Nothing went
/// over the wire, and the session is untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArgumentError {
    /// A numeric argument exceeds what its wire slot can carry.
    #[error("{argument} = {value} is out of range (maximum {max})")]
    OutOfRange {
        argument: &'static str,
        value: u64,
        max: u64,
    },

    /// A string argument contains a NUL byte.
    ///
    /// The collaborator reads arguments as C strings, so everything after
    /// the NUL would be cut off without anyone noticing.
    #[error("argument {position} of {command} contains a NUL byte")]
    InteriorNul { command: CommandKind, position: usize },
}
