//! Driving an async collaborator from the synchronous core.
//!
//! Sessions are blocking on purpose. A collaborator that is naturally
//! async (an HTTP client, say) implements [`AsyncTransport`] instead of
//! [`Transport`], and [`BlockingTransport`] bridges the two by running
//! each call to completion on its own current-thread runtime.
//!
//! ```text
//! Session ──▶ BlockingTransport ──block_on──▶ AsyncTransport (async fn)
//! ```
//!
//! Releases are plain `fn`s on both sides. Giving a handle back must
//! never wait, because it happens from `Drop`.
//!
//! # Panics
//!
//! `block_on` panics when called from inside another tokio runtime, so
//! a `BlockingTransport` must be used from ordinary threads only (or via
//! `tokio::task::spawn_blocking`).

use fidget_protocol::Invocation;
use tokio::runtime::{Builder, Runtime};

use crate::{
    ConnectionHandle, Credentials, KeyList, OpenFailure, RawValue, ResultHandle,
    Transport, TransportError,
};

/// The async form of [`Transport`].
///
/// Same contract, same handles. Only the calls that may wait on the
/// server are `async`.
pub trait AsyncTransport {
    /// Why `invoke` produced no result.
    type Error: std::error::Error + Send + Sync + 'static;

    async fn open_and_authenticate(
        &self,
        credentials: &Credentials,
    ) -> Result<ConnectionHandle, OpenFailure>;

    fn release_connection(&self, connection: ConnectionHandle);

    async fn invoke(
        &self,
        connection: &ConnectionHandle,
        invocation: &Invocation,
    ) -> Result<ResultHandle, Self::Error>;

    fn release_result(&self, result: ResultHandle);

    async fn list_keys(&self, result: &ResultHandle) -> KeyList;

    fn release_key_list(&self, keys: KeyList);

    async fn get_value(&self, result: &ResultHandle, key: &str) -> Option<RawValue>;

    fn release_value(&self, value: RawValue);
}

/// Adapts an [`AsyncTransport`] to the blocking [`Transport`] contract.
///
/// Owns a single-threaded tokio runtime. Each I/O call is driven to
/// completion with `block_on` before returning.
pub struct BlockingTransport<A> {
    inner: A,
    runtime: Runtime,
}

impl<A: AsyncTransport> BlockingTransport<A> {
    /// Wraps `inner` and starts the runtime that will drive it.
    ///
    /// # Errors
    /// Returns [`TransportError::Runtime`] if the runtime can't be built.
    pub fn new(inner: A) -> Result<Self, TransportError> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(TransportError::Runtime)?;
        tracing::debug!("blocking transport runtime started");
        Ok(Self { inner, runtime })
    }

    /// The wrapped async collaborator.
    pub fn get_ref(&self) -> &A {
        &self.inner
    }

    /// Unwraps the async collaborator, shutting the runtime down.
    pub fn into_inner(self) -> A {
        self.inner
    }
}

impl<A: AsyncTransport> Transport for BlockingTransport<A> {
    type Error = A::Error;

    fn open_and_authenticate(
        &self,
        credentials: &Credentials,
    ) -> Result<ConnectionHandle, OpenFailure> {
        self.runtime
            .block_on(self.inner.open_and_authenticate(credentials))
    }

    fn release_connection(&self, connection: ConnectionHandle) {
        self.inner.release_connection(connection);
    }

    fn invoke(
        &self,
        connection: &ConnectionHandle,
        invocation: &Invocation,
    ) -> Result<ResultHandle, Self::Error> {
        self.runtime
            .block_on(self.inner.invoke(connection, invocation))
    }

    fn release_result(&self, result: ResultHandle) {
        self.inner.release_result(result);
    }

    fn list_keys(&self, result: &ResultHandle) -> KeyList {
        self.runtime.block_on(self.inner.list_keys(result))
    }

    fn release_key_list(&self, keys: KeyList) {
        self.inner.release_key_list(keys);
    }

    fn get_value(&self, result: &ResultHandle, key: &str) -> Option<RawValue> {
        self.runtime.block_on(self.inner.get_value(result, key))
    }

    fn release_value(&self, value: RawValue) {
        self.inner.release_value(value);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use fidget_protocol::{Command, CommandKind};

    use super::*;
    use crate::MemoryTransport;

    /// An async collaborator that yields to the timer before each call.
    struct Sleepy(MemoryTransport);

    impl AsyncTransport for Sleepy {
        type Error = TransportError;

        async fn open_and_authenticate(
            &self,
            credentials: &Credentials,
        ) -> Result<ConnectionHandle, OpenFailure> {
            tokio::time::sleep(Duration::from_millis(1)).await;
            self.0.open_and_authenticate(credentials)
        }

        fn release_connection(&self, connection: ConnectionHandle) {
            self.0.release_connection(connection);
        }

        async fn invoke(
            &self,
            connection: &ConnectionHandle,
            invocation: &Invocation,
        ) -> Result<ResultHandle, Self::Error> {
            tokio::time::sleep(Duration::from_millis(1)).await;
            self.0.invoke(connection, invocation)
        }

        fn release_result(&self, result: ResultHandle) {
            self.0.release_result(result);
        }

        async fn list_keys(&self, result: &ResultHandle) -> KeyList {
            tokio::task::yield_now().await;
            self.0.list_keys(result)
        }

        fn release_key_list(&self, keys: KeyList) {
            self.0.release_key_list(keys);
        }

        async fn get_value(&self, result: &ResultHandle, key: &str) -> Option<RawValue> {
            tokio::task::yield_now().await;
            self.0.get_value(result, key)
        }

        fn release_value(&self, value: RawValue) {
            self.0.release_value(value);
        }
    }

    #[test]
    fn test_blocking_transport_drives_async_calls() {
        let memory = MemoryTransport::new()
            .with_account("alice", "secret")
            .respond(CommandKind::Update, [("level", "3")]);
        let transport = BlockingTransport::new(Sleepy(memory)).unwrap();
        let credentials = Credentials::new("alice", "secret", "s1.example.net").unwrap();

        let connection = transport.open_and_authenticate(&credentials).unwrap();
        let result = transport
            .invoke(&connection, &Command::Update.invocation())
            .unwrap();

        let keys = transport.list_keys(&result);
        assert_eq!(keys.keys(), ["level"]);
        transport.release_key_list(keys);

        let value = transport.get_value(&result, "level").unwrap();
        assert_eq!(value.as_str(), "3");
        transport.release_value(value);

        transport.release_result(result);
        transport.release_connection(connection);

        let stats = transport.get_ref().0.stats();
        assert_eq!(stats.invocations, 1);
        assert_eq!(stats.outstanding(), 0);
    }

    #[test]
    fn test_blocking_transport_passes_open_failure_through() {
        let transport =
            BlockingTransport::new(Sleepy(MemoryTransport::new().unreachable())).unwrap();
        let credentials = Credentials::new("alice", "secret", "s1.example.net").unwrap();

        let err = transport.open_and_authenticate(&credentials).unwrap_err();
        assert!(matches!(err, OpenFailure::Connection(_)));
    }
}
