//! The result of one command: a lazily-queried key/value record.
//!
//! A [`CommandResponse`] doesn't copy the result out of the collaborator.
//! It holds the collaborator's result handle and asks for keys or values
//! only when the caller does. Every buffer the collaborator lends out
//! along the way (a key list, a single value) is wrapped in a guard that
//! gives it back on drop, so an early `?` can't leak one.
//!
//! ## Valid vs. invalid
//!
//! A response is **valid** when the collaborator produced a result.
//! When the command failed, the response is **invalid**. It still
//! exists, still says which command it was for, and carries the failure
//! reason, but every data query returns
//! [`ResponseError::CommandFailed`].

use std::collections::{HashMap, HashSet};
use std::fmt;

use fidget_protocol::CommandKind;
use fidget_transport::{KeyList, RawValue, ResultHandle, Transport};

use crate::ResponseError;

// ---------------------------------------------------------------------------
// Scoped guards
// ---------------------------------------------------------------------------

/// Holds a key list and hands it back on drop.
struct KeyListGuard<'a, T: Transport> {
    transport: &'a T,
    keys: Option<KeyList>,
}

impl<'a, T: Transport> KeyListGuard<'a, T> {
    fn new(transport: &'a T, keys: KeyList) -> Self {
        Self {
            transport,
            keys: Some(keys),
        }
    }

    fn keys(&self) -> &[String] {
        self.keys.as_ref().map(KeyList::keys).unwrap_or_default()
    }
}

impl<T: Transport> Drop for KeyListGuard<'_, T> {
    fn drop(&mut self) {
        if let Some(keys) = self.keys.take() {
            self.transport.release_key_list(keys);
        }
    }
}

/// Holds one value and hands it back on drop.
struct ValueGuard<'a, T: Transport> {
    transport: &'a T,
    value: Option<RawValue>,
}

impl<'a, T: Transport> ValueGuard<'a, T> {
    fn new(transport: &'a T, value: RawValue) -> Self {
        Self {
            transport,
            value: Some(value),
        }
    }

    fn as_str(&self) -> &str {
        self.value.as_ref().map(RawValue::as_str).unwrap_or_default()
    }
}

impl<T: Transport> Drop for ValueGuard<'_, T> {
    fn drop(&mut self) {
        if let Some(value) = self.value.take() {
            self.transport.release_value(value);
        }
    }
}

// ---------------------------------------------------------------------------
// CommandResponse
// ---------------------------------------------------------------------------

/// The outcome of one command on a [`Session`](crate::Session).
///
/// Borrows the session's transport for `'s`, so it can't outlive the
/// session. Not `Clone`: the result handle is released exactly once,
/// when this value is dropped.
pub struct CommandResponse<'s, T: Transport> {
    transport: &'s T,
    command: CommandKind,
    result: Option<ResultHandle>,
    failure: Option<String>,
}

impl<'s, T: Transport> CommandResponse<'s, T> {
    pub(crate) fn succeeded(
        transport: &'s T,
        command: CommandKind,
        result: ResultHandle,
    ) -> Self {
        Self {
            transport,
            command,
            result: Some(result),
            failure: None,
        }
    }

    pub(crate) fn failed(transport: &'s T, command: CommandKind, reason: String) -> Self {
        Self {
            transport,
            command,
            result: None,
            failure: Some(reason),
        }
    }

    /// Whether the command produced a result.
    pub fn is_valid(&self) -> bool {
        self.result.is_some()
    }

    /// The command this response answers.
    pub fn command(&self) -> CommandKind {
        self.command
    }

    /// Why the command failed, for an invalid response.
    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    /// The set of keys present in the result.
    ///
    /// Repeated keys in the underlying result appear once.
    ///
    /// # Errors
    /// [`ResponseError::CommandFailed`] if the response is invalid.
    pub fn keys(&self) -> Result<HashSet<String>, ResponseError> {
        let result = self.result()?;
        let list = KeyListGuard::new(self.transport, self.transport.list_keys(result));
        Ok(list.keys().iter().cloned().collect())
    }

    /// The value stored under `key`.
    ///
    /// # Errors
    /// - [`ResponseError::CommandFailed`] if the response is invalid
    /// - [`ResponseError::KeyNotFound`] if the result has no such key
    pub fn value(&self, key: &str) -> Result<String, ResponseError> {
        let result = self.result()?;
        let raw = self
            .transport
            .get_value(result, key)
            .ok_or_else(|| ResponseError::KeyNotFound(key.to_owned()))?;
        let value = ValueGuard::new(self.transport, raw);
        Ok(value.as_str().to_owned())
    }

    /// Every key with its value.
    ///
    /// Values are still fetched (and given back) one key at a time.
    ///
    /// # Errors
    /// As [`CommandResponse::keys`] and [`CommandResponse::value`].
    pub fn entries(&self) -> Result<HashMap<String, String>, ResponseError> {
        self.keys()?
            .into_iter()
            .map(|key| {
                let value = self.value(&key)?;
                Ok((key, value))
            })
            .collect()
    }

    fn result(&self) -> Result<&ResultHandle, ResponseError> {
        self.result
            .as_ref()
            .ok_or(ResponseError::CommandFailed(self.command))
    }
}

impl<T: Transport> Drop for CommandResponse<'_, T> {
    fn drop(&mut self) {
        if let Some(result) = self.result.take() {
            tracing::trace!(%result, command = %self.command, "releasing result");
            self.transport.release_result(result);
        }
    }
}

impl<T: Transport> fmt::Debug for CommandResponse<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandResponse")
            .field("command", &self.command)
            .field("result", &self.result)
            .field("failure", &self.failure)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use fidget_protocol::CommandKind;
    use fidget_transport::MemoryTransport;

    use crate::{ResponseError, Session};

    fn transport() -> MemoryTransport {
        MemoryTransport::new()
            .with_account("alice", "secret")
            .respond(
                CommandKind::Update,
                [("level", "12"), ("gold", "300"), ("level", "13")],
            )
            .fail(CommandKind::BuyBeer, "tavern closed")
    }

    fn login(transport: &MemoryTransport) -> Session<&MemoryTransport> {
        Session::login(transport, "alice", "secret", "s1.example.net").unwrap()
    }

    // =====================================================================
    // Valid responses
    // =====================================================================

    #[test]
    fn test_keys_deduplicates_repeated_keys() {
        let transport = transport();
        let session = login(&transport);
        let response = session.update();

        let keys = response.keys().unwrap();
        assert_eq!(keys.len(), 2);
        assert!(keys.contains("level"));
        assert!(keys.contains("gold"));
    }

    #[test]
    fn test_value_present_key_returns_value() {
        let transport = transport();
        let session = login(&transport);
        let response = session.update();

        assert_eq!(response.value("gold").unwrap(), "300");
    }

    #[test]
    fn test_value_missing_key_returns_key_not_found() {
        let transport = transport();
        let session = login(&transport);
        let response = session.update();

        let err = response.value("mushrooms").unwrap_err();
        assert_eq!(err, ResponseError::KeyNotFound("mushrooms".into()));
    }

    #[test]
    fn test_entries_reads_every_key() {
        let transport = transport();
        let session = login(&transport);
        let response = session.update();

        let entries = response.entries().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries["gold"], "300");
    }

    #[test]
    fn test_queries_release_every_buffer() {
        let transport = transport();
        {
            let session = login(&transport);
            let response = session.update();
            let _ = response.keys().unwrap();
            let _ = response.value("gold").unwrap();
            let _ = response.value("nope");
            let _ = response.entries().unwrap();
        }

        let stats = transport.stats();
        // keys() + entries() each list keys once.
        assert_eq!(stats.key_lists_issued, 2);
        assert_eq!(stats.key_lists_released, 2);
        // value("gold") + two values inside entries().
        assert_eq!(stats.values_issued, 3);
        assert_eq!(stats.values_released, 3);
        assert_eq!(stats.outstanding(), 0);
        assert_eq!(stats.foreign_releases, 0);
    }

    // =====================================================================
    // Invalid responses
    // =====================================================================

    #[test]
    fn test_failed_command_yields_invalid_response() {
        let transport = transport();
        let session = login(&transport);
        let response = session.buy_beer();

        assert!(!response.is_valid());
        assert_eq!(response.command(), CommandKind::BuyBeer);
        assert!(response.failure().unwrap().contains("tavern closed"));
    }

    #[test]
    fn test_keys_on_invalid_response_returns_command_failed() {
        let transport = transport();
        let session = login(&transport);
        let response = session.buy_beer();

        assert_eq!(
            response.keys().unwrap_err(),
            ResponseError::CommandFailed(CommandKind::BuyBeer)
        );
        assert_eq!(
            response.value("gold").unwrap_err(),
            ResponseError::CommandFailed(CommandKind::BuyBeer)
        );
    }

    #[test]
    fn test_invalid_response_releases_nothing() {
        let transport = transport();
        {
            let session = login(&transport);
            let _response = session.buy_beer();
        }
        let stats = transport.stats();
        assert_eq!(stats.results_issued, 0);
        assert_eq!(stats.results_released, 0);
        assert_eq!(stats.foreign_releases, 0);
    }
}
