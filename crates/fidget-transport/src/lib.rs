//! The collaborator seam for Fidget.
//!
//! A session never talks to the network itself. Everything it needs
//! (connecting, authenticating, running a command, reading the result)
//! goes through the [`Transport`] capability defined here.
//!
//! The collaborator hands out opaque handles and owns the memory behind
//! them. Each handle must be given back exactly once. The handle types
//! in this crate are neither `Copy` nor `Clone`, and every `release_*`
//! method takes its handle by value, so a handle that was given back
//! can't be used again. This doesn't stop a second handle being minted
//! for the same id with [`ConnectionHandle::new`] and released as well.
//! Catching that is the collaborator's job: [`MemoryTransport`] counts
//! it in [`MemoryStats::foreign_releases`].
//!
//! # Provided collaborators
//!
//! - [`MemoryTransport`]: fully in-process, scriptable, counts every
//!   handle it issues and receives back. Used by tests and the demo.
//! - [`BlockingTransport`]: adapts an [`AsyncTransport`] to the
//!   synchronous [`Transport`] contract on a private tokio runtime.

#![allow(async_fn_in_trait)]

mod blocking;
mod credentials;
mod error;
mod memory;

pub use blocking::{AsyncTransport, BlockingTransport};
pub use credentials::Credentials;
pub use error::{CredentialsError, OpenFailure, TransportError};
pub use memory::{MemoryStats, MemoryTransport};

use std::fmt;
use std::sync::Arc;

use fidget_protocol::Invocation;

// ---------------------------------------------------------------------------
// Handles
// ---------------------------------------------------------------------------

/// An authenticated connection, owned by whoever opened it.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct ConnectionHandle(u64);

impl ConnectionHandle {
    /// Wraps a collaborator-assigned id.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the collaborator-assigned id.
    pub fn id(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ConnectionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// The raw result of one successful command.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct ResultHandle(u64);

impl ResultHandle {
    /// Wraps a collaborator-assigned id.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the collaborator-assigned id.
    pub fn id(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ResultHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "result-{}", self.0)
    }
}

/// A key list buffer borrowed from the collaborator.
///
/// Keys come back in the collaborator's order and may repeat.
#[derive(Debug)]
pub struct KeyList {
    id: u64,
    keys: Vec<String>,
}

impl KeyList {
    pub fn new(id: u64, keys: Vec<String>) -> Self {
        Self { id, keys }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }
}

/// A single value buffer borrowed from the collaborator.
#[derive(Debug)]
pub struct RawValue {
    id: u64,
    value: String,
}

impl RawValue {
    pub fn new(id: u64, value: String) -> Self {
        Self { id, value }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

// ---------------------------------------------------------------------------
// Transport
// ---------------------------------------------------------------------------

/// The capability a session is built on.
///
/// Every method takes `&self`: collaborators that keep state use
/// interior mutability, which lets several responses borrow the same
/// collaborator at once.
///
/// ## Failure model
///
/// - Opening can fail in two distinguishable ways ([`OpenFailure`]).
/// - `invoke` returning `Err` means "no result"; the caller turns that
///   into an invalid response and carries on.
/// - Key and value lookups never fail outright: a missing value is
///   `None`, an unknown result yields an empty key list.
pub trait Transport {
    /// Why `invoke` produced no result.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Connects to the server and authenticates in one step.
    fn open_and_authenticate(
        &self,
        credentials: &Credentials,
    ) -> Result<ConnectionHandle, OpenFailure>;

    /// Gives a connection back. Called exactly once per opened handle.
    fn release_connection(&self, connection: ConnectionHandle);

    /// Runs one command on an open connection.
    fn invoke(
        &self,
        connection: &ConnectionHandle,
        invocation: &Invocation,
    ) -> Result<ResultHandle, Self::Error>;

    /// Gives a result back.
    fn release_result(&self, result: ResultHandle);

    /// Lists the keys present in a result.
    fn list_keys(&self, result: &ResultHandle) -> KeyList;

    /// Gives a key list back.
    fn release_key_list(&self, keys: KeyList);

    /// Looks up one value. `None` means the key is absent.
    fn get_value(&self, result: &ResultHandle, key: &str) -> Option<RawValue>;

    /// Gives a value back.
    fn release_value(&self, value: RawValue);
}

// A shared reference is a transport too, so a test can keep using the
// collaborator while a session holds it.
impl<T: Transport + ?Sized> Transport for &T {
    type Error = T::Error;

    fn open_and_authenticate(
        &self,
        credentials: &Credentials,
    ) -> Result<ConnectionHandle, OpenFailure> {
        (**self).open_and_authenticate(credentials)
    }

    fn release_connection(&self, connection: ConnectionHandle) {
        (**self).release_connection(connection);
    }

    fn invoke(
        &self,
        connection: &ConnectionHandle,
        invocation: &Invocation,
    ) -> Result<ResultHandle, Self::Error> {
        (**self).invoke(connection, invocation)
    }

    fn release_result(&self, result: ResultHandle) {
        (**self).release_result(result);
    }

    fn list_keys(&self, result: &ResultHandle) -> KeyList {
        (**self).list_keys(result)
    }

    fn release_key_list(&self, keys: KeyList) {
        (**self).release_key_list(keys);
    }

    fn get_value(&self, result: &ResultHandle, key: &str) -> Option<RawValue> {
        (**self).get_value(result, key)
    }

    fn release_value(&self, value: RawValue) {
        (**self).release_value(value);
    }
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    type Error = T::Error;

    fn open_and_authenticate(
        &self,
        credentials: &Credentials,
    ) -> Result<ConnectionHandle, OpenFailure> {
        (**self).open_and_authenticate(credentials)
    }

    fn release_connection(&self, connection: ConnectionHandle) {
        (**self).release_connection(connection);
    }

    fn invoke(
        &self,
        connection: &ConnectionHandle,
        invocation: &Invocation,
    ) -> Result<ResultHandle, Self::Error> {
        (**self).invoke(connection, invocation)
    }

    fn release_result(&self, result: ResultHandle) {
        (**self).release_result(result);
    }

    fn list_keys(&self, result: &ResultHandle) -> KeyList {
        (**self).list_keys(result)
    }

    fn release_key_list(&self, keys: KeyList) {
        (**self).release_key_list(keys);
    }

    fn get_value(&self, result: &ResultHandle, key: &str) -> Option<RawValue> {
        (**self).get_value(result, key)
    }

    fn release_value(&self, value: RawValue) {
        (**self).release_value(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_handle_display() {
        assert_eq!(ConnectionHandle::new(7).to_string(), "conn-7");
    }

    #[test]
    fn test_result_handle_display() {
        assert_eq!(ResultHandle::new(12).to_string(), "result-12");
    }

    #[test]
    fn test_handle_id_round_trips() {
        assert_eq!(ConnectionHandle::new(42).id(), 42);
        assert_eq!(ResultHandle::new(43).id(), 43);
    }

    #[test]
    fn test_key_list_preserves_order_and_duplicates() {
        let list = KeyList::new(1, vec!["b".into(), "a".into(), "b".into()]);
        assert_eq!(list.keys(), ["b", "a", "b"]);
    }

    #[test]
    fn test_arc_transport_delegates_to_inner() {
        let memory = Arc::new(MemoryTransport::new().with_account("u", "p"));
        let credentials = Credentials::new("u", "p", "https://s1.example.net").unwrap();

        let shared = Arc::clone(&memory);
        let connection = shared.open_and_authenticate(&credentials).unwrap();
        shared.release_connection(connection);

        let stats = memory.stats();
        assert_eq!(stats.connections_opened, 1);
        assert_eq!(stats.connections_released, 1);
    }
}
