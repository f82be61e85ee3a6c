//! Sessions and responses for Fidget.
//!
//! This crate is what callers actually hold:
//!
//! 1. **[`Session`]**: one authenticated connection. Creating it connects
//!    and logs in. Every catalog command is a method on it. Dropping it
//!    closes the connection.
//! 2. **[`CommandResponse`]**: the result of one command. It is a
//!    key/value record that is queried lazily, and dropping it hands the
//!    result back to the collaborator.
//!
//! # How it fits in the stack
//!
//! ```text
//! Caller (above)            ← holds Session, reads CommandResponse
//!     ↕
//! Session Layer (this crate) ← validates, encodes, owns the handles
//!     ↕
//! Transport Layer (below)    ← the collaborator that does the real work
//! ```
//!
//! # Lifetimes
//!
//! A response borrows the session it came from, so the compiler rejects
//! any attempt to keep a response after its session is gone:
//!
//! ```compile_fail
//! use fidget_session::Session;
//! use fidget_transport::MemoryTransport;
//!
//! let transport = MemoryTransport::new().with_account("a", "b");
//! let response = {
//!     let session = Session::login(&transport, "a", "b", "s1.example.net").unwrap();
//!     session.update()
//! };
//! ```

mod error;
mod response;
mod session;

pub use error::{ResponseError, SessionError};
pub use response::CommandResponse;
pub use session::Session;
