//! Wire protocol for Fidget.
//!
//! This crate defines the "language" a client speaks to the game server:
//!
//! - **Vocabulary** ([`FortressBuildingType`], [`MountType`], etc.):
//!   closed sets of game objects, each variant pinned to a wire code.
//! - **Commands** ([`Command`], [`CommandKind`]): the fixed catalog of
//!   actions a session can request, and the opcode each one maps to.
//! - **Invocation** ([`Invocation`], [`Arg`]): the encoded form of a
//!   command that is handed to the transport collaborator.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]): how invocations are
//!   converted to/from bytes.
//! - **Errors** ([`ProtocolError`], [`ArgumentError`]).
//!
//! # Architecture
//!
//! The protocol layer sits below the session. It doesn't know about
//! connections or handles. It only knows what a command looks like on
//! the wire.
//!
//! ```text
//! Session (typed methods) → Protocol (Invocation) → Transport (collaborator)
//! ```

// ---------------------------------------------------------------------------
// Module declarations
// ---------------------------------------------------------------------------

// `wire` holds the `wire_enum!` macro. `#[macro_use]` makes the macro
// visible to every module declared after it, so it has to come first.
#[macro_use]
mod wire;

mod codec;
mod command;
mod error;
mod vocab;

// ---------------------------------------------------------------------------
// Re-exports
// ---------------------------------------------------------------------------

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use command::{Arg, Command, CommandKind, Invocation};
pub use error::{ArgumentError, ProtocolError};
pub use vocab::{
    AttributeType, FortressBuildingType, FortressResourceType,
    FortressUnitType, FortunePaymentType, GuildSkillType,
    HellevatorTreatType, MountType, PlayerItemPlaceType, TimeSkipType,
    UnderworldBuildingType, UnderworldResourceType, UnderworldUnitType,
};
