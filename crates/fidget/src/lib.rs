//! # Fidget
//!
//! Typed command client for a session-oriented game protocol.
//!
//! Open a [`Session`](prelude::Session) on a collaborator, call any of the
//! catalog commands on it, and read the key/value
//! [`CommandResponse`](prelude::CommandResponse) that comes back. Every
//! handle the collaborator hands out is given back when its owner drops.
//!
//! ## Quick Start
//!
//! ```rust
//! use fidget::prelude::*;
//!
//! # fn main() -> Result<(), FidgetError> {
//! let transport = MemoryTransport::new()
//!     .with_account("alice", "secret")
//!     .respond(CommandKind::Update, [("level", "12")]);
//!
//! let session = Session::login(&transport, "alice", "secret", "s1.example.net")?;
//! let response = session.update();
//! assert_eq!(response.value("level")?, "12");
//! # Ok(())
//! # }
//! ```
//!
//! ## Crates
//!
//! | Module        | Crate              | Contents                               |
//! |---------------|--------------------|----------------------------------------|
//! | [`protocol`]  | `fidget-protocol`  | vocabulary, command catalog, codec     |
//! | [`transport`] | `fidget-transport` | collaborator trait, handles, credentials |
//! | [`session`]   | `fidget-session`   | `Session`, `CommandResponse`           |

mod error;

pub use error::FidgetError;
pub use fidget_protocol as protocol;
pub use fidget_session as session;
pub use fidget_transport as transport;

/// Everything a typical caller needs, in one import.
pub mod prelude {
    pub use crate::FidgetError;
    pub use fidget_protocol::{
        ArgumentError, AttributeType, Command, CommandKind, FortressBuildingType,
        FortressResourceType, FortressUnitType, FortunePaymentType, GuildSkillType,
        HellevatorTreatType, MountType, PlayerItemPlaceType, TimeSkipType,
        UnderworldBuildingType, UnderworldResourceType, UnderworldUnitType,
    };
    pub use fidget_session::{CommandResponse, ResponseError, Session, SessionError};
    pub use fidget_transport::{
        AsyncTransport, BlockingTransport, Credentials, MemoryTransport, Transport,
    };
}
