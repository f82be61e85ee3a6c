//! An in-process collaborator.
//!
//! [`MemoryTransport`] plays the server side of the seam without any
//! networking. It is configured up front with a builder:
//!
//! ```rust
//! use fidget_protocol::CommandKind;
//! use fidget_transport::MemoryTransport;
//!
//! let transport = MemoryTransport::new()
//!     .with_account("alice", "secret")
//!     .respond(CommandKind::Update, [("level", "12"), ("gold", "300")])
//!     .fail(CommandKind::BuyBeer, "tavern closed");
//! ```
//!
//! At runtime it does what a real collaborator would: checks logins,
//! hands out handles, answers commands, and takes the handles back.
//! It also keeps books on all of that ([`MemoryStats`]) and a journal of
//! every invocation it received, so tests can assert on both.
//!
//! Each invocation goes through the codec on the way in, the same way a
//! byte-oriented collaborator would see it.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use fidget_protocol::{Codec, CommandKind, Invocation, JsonCodec, ProtocolError};

use crate::{
    ConnectionHandle, Credentials, KeyList, OpenFailure, RawValue, ResultHandle,
    Transport, TransportError,
};

/// Process-wide handle counter. Handles from different transports never
/// share an id, so a handle released to the wrong transport is noticed.
static NEXT_HANDLE_ID: AtomicU64 = AtomicU64::new(1);

fn next_handle_id() -> u64 {
    NEXT_HANDLE_ID.fetch_add(1, Ordering::Relaxed)
}

// ---------------------------------------------------------------------------
// MemoryStats
// ---------------------------------------------------------------------------

/// Counters for everything a [`MemoryTransport`] issued and got back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoryStats {
    pub connections_opened: u64,
    pub connections_released: u64,
    pub invocations: u64,
    pub results_issued: u64,
    pub results_released: u64,
    pub key_lists_issued: u64,
    pub key_lists_released: u64,
    pub values_issued: u64,
    pub values_released: u64,
    /// Releases of handles this transport doesn't know (double or
    /// misdirected releases). Should always be zero.
    pub foreign_releases: u64,
}

impl MemoryStats {
    /// Handles issued but not yet released, across all four kinds.
    pub fn outstanding(&self) -> u64 {
        (self.connections_opened - self.connections_released)
            + (self.results_issued - self.results_released)
            + (self.key_lists_issued - self.key_lists_released)
            + (self.values_issued - self.values_released)
    }
}

// ---------------------------------------------------------------------------
// MemoryTransport
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
enum Script {
    Respond(Vec<(String, String)>),
    Fail(String),
}

#[derive(Debug, Default)]
struct State {
    connections: HashSet<u64>,
    /// Live results and the entries each one carries.
    results: HashMap<u64, Vec<(String, String)>>,
    key_lists: HashSet<u64>,
    values: HashSet<u64>,
    journal: Vec<Invocation>,
    stats: MemoryStats,
}

/// A scriptable, in-process [`Transport`].
///
/// Commands without a script get a valid, empty response.
#[derive(Debug)]
pub struct MemoryTransport<C: Codec = JsonCodec> {
    codec: C,
    accounts: HashMap<String, String>,
    reachable: bool,
    scripts: HashMap<CommandKind, Script>,
    state: Mutex<State>,
}

impl MemoryTransport {
    /// Creates a reachable transport with no accounts, using JSON.
    pub fn new() -> Self {
        Self::with_codec(JsonCodec)
    }
}

impl Default for MemoryTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Codec> MemoryTransport<C> {
    /// Creates a reachable transport with no accounts and the given codec.
    pub fn with_codec(codec: C) -> Self {
        Self {
            codec,
            accounts: HashMap::new(),
            reachable: true,
            scripts: HashMap::new(),
            state: Mutex::new(State::default()),
        }
    }

    /// Registers a username/password pair that will authenticate.
    pub fn with_account(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.accounts.insert(username.into(), password.into());
        self
    }

    /// Makes every connection attempt fail as if the server were down.
    pub fn unreachable(mut self) -> Self {
        self.reachable = false;
        self
    }

    /// Scripts the entries returned for `kind`.
    ///
    /// Entries keep their order, and a key may appear more than once. A
    /// value lookup on a repeated key returns the last occurrence.
    pub fn respond<I, K, V>(mut self, kind: CommandKind, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let entries = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.scripts.insert(kind, Script::Respond(entries));
        self
    }

    /// Scripts `kind` to fail with `reason`.
    pub fn fail(mut self, kind: CommandKind, reason: impl Into<String>) -> Self {
        self.scripts.insert(kind, Script::Fail(reason.into()));
        self
    }

    /// A snapshot of the handle counters.
    pub fn stats(&self) -> MemoryStats {
        self.state().stats
    }

    /// Every invocation received so far, as decoded on the server side.
    pub fn invocations(&self) -> Vec<Invocation> {
        self.state().journal.clone()
    }

    // A panic while the lock was held can't leave the counters
    // half-updated, so a poisoned lock is still usable.
    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<C: Codec> Transport for MemoryTransport<C> {
    type Error = TransportError;

    fn open_and_authenticate(
        &self,
        credentials: &Credentials,
    ) -> Result<ConnectionHandle, OpenFailure> {
        if !self.reachable {
            return Err(OpenFailure::Connection(format!(
                "{} is unreachable",
                credentials.server()
            )));
        }

        let accepted = self
            .accounts
            .get(credentials.username())
            .is_some_and(|password| password == credentials.password());
        if !accepted {
            tracing::debug!(username = credentials.username(), "login rejected");
            return Err(OpenFailure::Credentials(format!(
                "wrong username or password for {}",
                credentials.username()
            )));
        }

        let id = next_handle_id();
        let mut state = self.state();
        state.connections.insert(id);
        state.stats.connections_opened += 1;

        let connection = ConnectionHandle::new(id);
        tracing::debug!(%connection, server = %credentials.server(), "connection opened");
        Ok(connection)
    }

    fn release_connection(&self, connection: ConnectionHandle) {
        let mut state = self.state();
        if state.connections.remove(&connection.id()) {
            state.stats.connections_released += 1;
            tracing::debug!(%connection, "connection released");
        } else {
            state.stats.foreign_releases += 1;
            tracing::warn!(%connection, "release of unknown connection");
        }
    }

    fn invoke(
        &self,
        connection: &ConnectionHandle,
        invocation: &Invocation,
    ) -> Result<ResultHandle, TransportError> {
        let bytes = self.codec.encode(invocation)?;
        let received: Invocation = self.codec.decode(&bytes)?;
        if received != *invocation {
            return Err(ProtocolError::InvalidMessage(format!(
                "{} changed in transit",
                invocation.command
            ))
            .into());
        }
        let command = received.command;

        let mut state = self.state();
        if !state.connections.contains(&connection.id()) {
            return Err(TransportError::UnknownConnection(connection.id()));
        }
        state.stats.invocations += 1;
        state.journal.push(received);

        let entries = match self.scripts.get(&command) {
            Some(Script::Fail(reason)) => {
                return Err(TransportError::CommandFailed {
                    command,
                    reason: reason.clone(),
                });
            }
            Some(Script::Respond(entries)) => entries.clone(),
            None => Vec::new(),
        };

        let id = next_handle_id();
        state.results.insert(id, entries);
        state.stats.results_issued += 1;

        let result = ResultHandle::new(id);
        tracing::trace!(%connection, %command, %result, bytes = bytes.len(), "invocation answered");
        Ok(result)
    }

    fn release_result(&self, result: ResultHandle) {
        let mut state = self.state();
        if state.results.remove(&result.id()).is_some() {
            state.stats.results_released += 1;
        } else {
            state.stats.foreign_releases += 1;
            tracing::warn!(%result, "release of unknown result");
        }
    }

    fn list_keys(&self, result: &ResultHandle) -> KeyList {
        let mut state = self.state();
        let keys = match state.results.get(&result.id()) {
            Some(entries) => entries.iter().map(|(k, _)| k.clone()).collect(),
            None => {
                tracing::warn!(%result, "key list requested for unknown result");
                Vec::new()
            }
        };

        let id = next_handle_id();
        state.key_lists.insert(id);
        state.stats.key_lists_issued += 1;
        KeyList::new(id, keys)
    }

    fn release_key_list(&self, keys: KeyList) {
        let mut state = self.state();
        if state.key_lists.remove(&keys.id()) {
            state.stats.key_lists_released += 1;
        } else {
            state.stats.foreign_releases += 1;
            tracing::warn!(id = keys.id(), "release of unknown key list");
        }
    }

    fn get_value(&self, result: &ResultHandle, key: &str) -> Option<RawValue> {
        let mut state = self.state();
        let value = state
            .results
            .get(&result.id())?
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())?;

        let id = next_handle_id();
        state.values.insert(id);
        state.stats.values_issued += 1;
        Some(RawValue::new(id, value))
    }

    fn release_value(&self, value: RawValue) {
        let mut state = self.state();
        if state.values.remove(&value.id()) {
            state.stats.values_released += 1;
        } else {
            state.stats.foreign_releases += 1;
            tracing::warn!(id = value.id(), "release of unknown value");
        }
    }
}
