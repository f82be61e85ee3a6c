//! End-to-end tests: sessions, responses and collaborators together.

use std::sync::Arc;
use std::time::Duration;

use fidget::prelude::*;
use fidget::protocol::{Arg, Invocation};
use fidget::transport::{
    ConnectionHandle, KeyList, MemoryStats, OpenFailure, RawValue, ResultHandle,
    TransportError,
};

// =========================================================================
// Fixtures
// =========================================================================

fn game_server() -> MemoryTransport {
    MemoryTransport::new()
        .with_account("alice", "secret")
        .respond(
            CommandKind::HallOfFamePage,
            [
                ("rank.1", "Ironclad"),
                ("rank.2", "Mosswhistle"),
                ("rank.3", "Quill"),
            ],
        )
        .fail(CommandKind::GuildRaid, "not in a guild")
}

fn assert_all_released(stats: MemoryStats) {
    assert_eq!(stats.outstanding(), 0, "leaked handles: {stats:?}");
    assert_eq!(stats.foreign_releases, 0, "double releases: {stats:?}");
}

/// An async collaborator that waits on the timer before every I/O call.
struct RemoteServer {
    inner: MemoryTransport,
    latency: Duration,
}

impl AsyncTransport for RemoteServer {
    type Error = TransportError;

    async fn open_and_authenticate(
        &self,
        credentials: &Credentials,
    ) -> Result<ConnectionHandle, OpenFailure> {
        tokio::time::sleep(self.latency).await;
        self.inner.open_and_authenticate(credentials)
    }

    fn release_connection(&self, connection: ConnectionHandle) {
        self.inner.release_connection(connection);
    }

    async fn invoke(
        &self,
        connection: &ConnectionHandle,
        invocation: &Invocation,
    ) -> Result<ResultHandle, TransportError> {
        tokio::time::sleep(self.latency).await;
        self.inner.invoke(connection, invocation)
    }

    fn release_result(&self, result: ResultHandle) {
        self.inner.release_result(result);
    }

    async fn list_keys(&self, result: &ResultHandle) -> KeyList {
        self.inner.list_keys(result)
    }

    fn release_key_list(&self, keys: KeyList) {
        self.inner.release_key_list(keys);
    }

    async fn get_value(&self, result: &ResultHandle, key: &str) -> Option<RawValue> {
        self.inner.get_value(result, key)
    }

    fn release_value(&self, value: RawValue) {
        self.inner.release_value(value);
    }
}

// =========================================================================
// Scenarios
// =========================================================================

#[test]
fn test_update_then_hall_of_fame_releases_everything() {
    let server = game_server();
    {
        let session = Session::login(&server, "alice", "secret", "s1.example.net").unwrap();

        let update = session.update();
        assert!(update.is_valid());
        assert!(update.keys().unwrap().is_empty());

        let ranking = session.hall_of_fame_page(0);
        assert!(ranking.is_valid());
        let keys = ranking.keys().unwrap();
        assert!(!keys.is_empty());
        for key in &keys {
            assert!(!ranking.value(key).unwrap().is_empty());
        }
        assert_eq!(ranking.value("rank.1").unwrap(), "Ironclad");
    }

    let stats = server.stats();
    assert_eq!(stats.connections_opened, 1);
    assert_eq!(stats.connections_released, 1);
    assert_eq!(stats.results_issued, 2);
    assert_eq!(stats.results_released, 2);
    assert_all_released(stats);

    let journal = server.invocations();
    assert_eq!(journal[1].command.opcode(), 100);
    assert_eq!(journal[1].args, vec![Arg::U64(0)]);
}

#[test]
fn test_failed_login_leaves_nothing_to_release() {
    let server = game_server();
    let result = Session::login(&server, "alice", "letmein", "s1.example.net");

    assert!(matches!(result, Err(SessionError::AuthenticationRejected(_))));
    assert_eq!(server.stats(), MemoryStats::default());
}

#[test]
fn test_error_propagates_through_fidget_error() {
    fn run(server: &MemoryTransport) -> Result<String, FidgetError> {
        let session = Session::login(server, "alice", "secret", "s1.example.net")?;
        let response = session.guild_raid();
        Ok(response.value("loot")?)
    }

    let server = game_server();
    let err = run(&server).unwrap_err();
    assert!(matches!(
        err,
        FidgetError::Response(ResponseError::CommandFailed(CommandKind::GuildRaid))
    ));
    assert_all_released(server.stats());
}

#[test]
fn test_session_owns_shared_transport() {
    let server = Arc::new(game_server());
    let session = Session::login(Arc::clone(&server), "alice", "secret", "s1.example.net").unwrap();

    let response = session.buy_mount(MountType::Dragon);
    assert!(response.is_valid());
    drop(response);
    drop(session);

    assert_eq!(server.invocations()[0].args, vec![Arg::U8(4)]);
    assert_all_released(server.stats());
}

#[test]
fn test_session_moves_to_worker_thread() {
    let server = Arc::new(game_server());
    let session = Session::login(Arc::clone(&server), "alice", "secret", "s1.example.net").unwrap();

    let handle = std::thread::spawn(move || {
        let response = session.hall_of_fame_page(0);
        response.keys().map(|keys| keys.len())
    });

    assert_eq!(handle.join().unwrap().unwrap(), 3);
    assert_all_released(server.stats());
}

#[test]
fn test_blocking_bridge_runs_full_session() {
    let remote = RemoteServer {
        inner: game_server(),
        latency: Duration::from_millis(2),
    };
    let transport = BlockingTransport::new(remote).unwrap();
    let credentials = Credentials::new("alice", "secret", "https://s1.example.net").unwrap();

    {
        let session = Session::connect(&transport, &credentials).unwrap();
        let ranking = session.hall_of_fame_page(0);
        assert_eq!(ranking.entries().unwrap().len(), 3);

        let failed = session.guild_raid();
        assert!(!failed.is_valid());
        assert!(failed.failure().unwrap().contains("not in a guild"));
    }

    assert_all_released(transport.get_ref().inner.stats());
}
