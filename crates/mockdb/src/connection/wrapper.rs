//! Connection state machine.
//!
//! State lives behind `Arc<Mutex>` so that commands and transactions can hold
//! a `Weak` back-reference without owning the connection. The lock is never
//! held across an await point.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

use crate::command::MockDbCommand;
use crate::constants::{DEFAULT_DATABASE, DEFAULT_DATA_SOURCE, SERVER_VERSION};
use crate::database::MockDatabase;
use crate::error::{MockDbError, Result};
use crate::factory::MockDbProviderFactory;
use crate::lifecycle::{DisposeGuard, ensure_not_cancelled};
use crate::provider::{ConnectionState, DbConnection, DbProviderFactory, IsolationLevel};
use crate::transaction::MockDbTransaction;

const OBJECT_NAME: &str = "connection";

static NEXT_CONNECTION_ID: AtomicU64 = AtomicU64::new(1);

/// Shared connection type for back-references.
type SharedConnection = Arc<Mutex<ConnectionInner>>;

/// Internal connection state.
#[derive(Debug)]
struct ConnectionInner {
    id: u64,
    guard: DisposeGuard,
    state: ConnectionState,
    connection_string: String,
    /// Released on dispose.
    database: Option<MockDatabase>,
    /// Released on dispose.
    factory: Option<MockDbProviderFactory>,
}

impl ConnectionInner {
    fn transition(&mut self, to: ConnectionState) {
        let from = std::mem::replace(&mut self.state, to);
        if from != to {
            tracing::debug!(connection_id = self.id, %from, %to, "Connection state changed");
        }
    }

    fn ensure_open(&self) -> Result<()> {
        if self.state == ConnectionState::Open {
            Ok(())
        } else {
            Err(MockDbError::invalid_state())
        }
    }

    fn database(&self) -> Result<&MockDatabase> {
        self.database
            .as_ref()
            .ok_or(MockDbError::disposed(OBJECT_NAME))
    }

    fn factory(&self) -> Result<&MockDbProviderFactory> {
        self.factory
            .as_ref()
            .ok_or(MockDbError::disposed(OBJECT_NAME))
    }
}

/// In-memory connection.
///
/// Starts `Closed`. `open`/`close` are idempotent. Commands and transactions
/// can only be created while open. Once disposed, every operation except
/// disposal itself fails. Dropping the connection disposes it.
///
/// # Example
///
/// ```rust
/// use mockdb::{DbConnection, MockDatabase};
///
/// let connection = MockDatabase::new().create_connection();
/// assert!(connection.create_command().unwrap_err().is_invalid_state());
///
/// connection.open().unwrap();
/// let command = connection.create_command().unwrap();
/// assert!(command.connection().unwrap().refers_to(&connection));
///
/// connection.dispose();
/// assert!(connection.state().unwrap_err().is_disposed());
/// ```
#[derive(Debug)]
pub struct MockDbConnection {
    id: u64,
    inner: SharedConnection,
}

impl MockDbConnection {
    /// Create a closed connection wired to a fresh factory of `database`.
    #[must_use]
    pub fn new(database: MockDatabase) -> Self {
        let factory = database.create_provider_factory();
        Self::with_factory(database, factory)
    }

    /// Create a closed connection wired to an existing factory.
    #[must_use]
    pub fn with_factory(database: MockDatabase, factory: MockDbProviderFactory) -> Self {
        let id = NEXT_CONNECTION_ID.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(connection_id = id, "Connection created");

        Self {
            id,
            inner: Arc::new(Mutex::new(ConnectionInner {
                id,
                guard: DisposeGuard::new(OBJECT_NAME),
                state: ConnectionState::Closed,
                connection_string: String::new(),
                database: Some(database),
                factory: Some(factory),
            })),
        }
    }

    /// Process-unique identifier, used in log events.
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Non-owning reference to this connection.
    #[must_use]
    pub fn downgrade(&self) -> ConnectionRef {
        ConnectionRef {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Runs `f` against the live state, failing if disposed.
    fn live<T>(&self, f: impl FnOnce(&mut ConnectionInner) -> Result<T>) -> Result<T> {
        let mut inner = self.inner.lock();
        inner.guard.check()?;
        f(&mut *inner)
    }
}

#[async_trait]
impl DbConnection for MockDbConnection {
    type Command = MockDbCommand;
    type Transaction = MockDbTransaction;
    type Factory = MockDbProviderFactory;

    fn connection_string(&self) -> Result<String> {
        self.live(|inner| Ok(inner.connection_string.clone()))
    }

    fn set_connection_string(&self, value: &str) -> Result<()> {
        self.live(|inner| {
            inner.connection_string = value.to_owned();
            Ok(())
        })
    }

    fn database(&self) -> Result<String> {
        self.live(|_| Ok(DEFAULT_DATABASE.to_owned()))
    }

    fn data_source(&self) -> Result<String> {
        self.live(|_| Ok(DEFAULT_DATA_SOURCE.to_owned()))
    }

    fn server_version(&self) -> Result<String> {
        self.live(|_| Ok(SERVER_VERSION.to_owned()))
    }

    /// Unbounded: opening never blocks.
    fn connection_timeout(&self) -> Result<Duration> {
        self.live(|_| Ok(Duration::MAX))
    }

    fn state(&self) -> Result<ConnectionState> {
        self.live(|inner| Ok(inner.state))
    }

    fn change_database(&self, database: &str) -> Result<()> {
        self.live(|_| {
            Err(MockDbError::not_supported(format!(
                "change_database('{database}') is not supported"
            )))
        })
    }

    fn open(&self) -> Result<()> {
        self.live(|inner| {
            inner.transition(ConnectionState::Open);
            Ok(())
        })
    }

    fn close(&self) -> Result<()> {
        self.live(|inner| {
            inner.transition(ConnectionState::Closed);
            Ok(())
        })
    }

    async fn open_async(&self, cancel: &CancellationToken) -> Result<()> {
        tokio::task::yield_now().await;
        ensure_not_cancelled(cancel, "open")?;
        self.open()
    }

    async fn close_async(&self, cancel: &CancellationToken) -> Result<()> {
        tokio::task::yield_now().await;
        ensure_not_cancelled(cancel, "close")?;
        self.close()
    }

    fn create_command(&self) -> Result<MockDbCommand> {
        let factory = self.live(|inner| {
            inner.ensure_open()?;
            inner.factory().cloned()
        })?;

        let mut command = factory.create_command();
        command.set_connection(Some(self.downgrade()));
        tracing::debug!(connection_id = self.id, "Command created");
        Ok(command)
    }

    fn begin_transaction(&self, isolation_level: IsolationLevel) -> Result<MockDbTransaction> {
        let database = self.live(|inner| {
            inner.ensure_open()?;
            inner.database().copied()
        })?;

        tracing::debug!(
            connection_id = self.id,
            ?isolation_level,
            "Transaction started"
        );
        Ok(MockDbTransaction::new(
            isolation_level,
            self.downgrade(),
            database,
        ))
    }

    async fn begin_transaction_async(
        &self,
        isolation_level: IsolationLevel,
        cancel: &CancellationToken,
    ) -> Result<MockDbTransaction> {
        tokio::task::yield_now().await;
        ensure_not_cancelled(cancel, "begin_transaction")?;
        self.begin_transaction(isolation_level)
    }

    fn provider_factory(&self) -> Result<MockDbProviderFactory> {
        self.live(|inner| inner.factory().cloned())
    }

    fn dispose(&self) {
        let mut inner = self.inner.lock();
        if inner.guard.is_disposed() {
            return;
        }

        inner.transition(ConnectionState::Closed);
        inner.database = None;
        inner.factory = None;
        inner.guard.release();
        tracing::debug!(connection_id = inner.id, "Connection disposed");
    }

    async fn dispose_async(&self) {
        self.dispose();
    }

    fn is_disposed(&self) -> bool {
        self.inner.lock().guard.is_disposed()
    }
}

impl Drop for MockDbConnection {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// Non-owning back-reference to a [`MockDbConnection`].
///
/// Does not keep the connection alive. Reads through a reference whose
/// connection was disposed or dropped fail with a disposed error.
#[derive(Debug, Clone)]
pub struct ConnectionRef {
    inner: Weak<Mutex<ConnectionInner>>,
}

impl ConnectionRef {
    /// Current state of the referenced connection.
    pub fn state(&self) -> Result<ConnectionState> {
        let shared = self
            .inner
            .upgrade()
            .ok_or(MockDbError::disposed(OBJECT_NAME))?;
        let inner = shared.lock();
        inner.guard.check()?;
        let state = inner.state;
        drop(inner);
        Ok(state)
    }

    /// Returns true while the connection exists and is not disposed.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.inner
            .upgrade()
            .is_some_and(|shared| !shared.lock().guard.is_disposed())
    }

    /// Returns true if this reference points at `connection`.
    #[must_use]
    pub fn refers_to(&self, connection: &MockDbConnection) -> bool {
        std::ptr::eq(self.inner.as_ptr(), Arc::as_ptr(&connection.inner))
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_transition_to_same_state_is_noop() {
        let connection = MockDatabase::new().create_connection();
        connection.close().unwrap();
        assert_eq!(connection.state().unwrap(), ConnectionState::Closed);
    }

    #[test]
    fn test_connection_ref_outlives_connection() {
        let connection = MockDatabase::new().create_connection();
        let reference = connection.downgrade();
        assert!(reference.is_alive());
        assert!(reference.refers_to(&connection));

        drop(connection);
        assert!(!reference.is_alive());
        assert!(reference.state().unwrap_err().is_disposed());
    }

    #[test]
    fn test_connection_ref_sees_state_changes() {
        let connection = MockDatabase::new().create_connection();
        let reference = connection.downgrade();

        connection.open().unwrap();
        assert_eq!(reference.state().unwrap(), ConnectionState::Open);

        connection.dispose();
        assert!(!reference.is_alive());
        assert!(reference.state().unwrap_err().is_disposed());
    }

    #[test]
    fn test_refers_to_distinguishes_connections() {
        let database = MockDatabase::new();
        let first = database.create_connection();
        let second = database.create_connection();
        assert!(!first.downgrade().refers_to(&second));
    }
}
