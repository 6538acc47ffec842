//! Transaction handle.
//!
//! There is no data to commit against, so commit and rollback only enforce
//! the disposal contract.

use crate::connection::ConnectionRef;
use crate::database::MockDatabase;
use crate::error::{MockDbError, Result};
use crate::lifecycle::DisposeGuard;
use crate::provider::{DbTransaction, IsolationLevel};

const OBJECT_NAME: &str = "transaction";

/// Transaction started on an open [`MockDbConnection`](crate::MockDbConnection).
///
/// Disposing the transaction never touches the connection, and closing the
/// connection afterwards does not invalidate the transaction.
#[derive(Debug)]
pub struct MockDbTransaction {
    guard: DisposeGuard,
    isolation_level: IsolationLevel,
    connection: Option<ConnectionRef>,
    database: Option<MockDatabase>,
}

impl MockDbTransaction {
    pub(crate) const fn new(
        isolation_level: IsolationLevel,
        connection: ConnectionRef,
        database: MockDatabase,
    ) -> Self {
        Self {
            guard: DisposeGuard::new(OBJECT_NAME),
            isolation_level,
            connection: Some(connection),
            database: Some(database),
        }
    }

    /// Database root the owning connection belongs to.
    pub fn database(&self) -> Result<&MockDatabase> {
        self.guard.check()?;
        self.database
            .as_ref()
            .ok_or(MockDbError::disposed(OBJECT_NAME))
    }
}

impl DbTransaction for MockDbTransaction {
    type Connection = ConnectionRef;

    fn isolation_level(&self) -> Result<IsolationLevel> {
        self.guard.check()?;
        Ok(self.isolation_level)
    }

    fn connection(&self) -> Result<ConnectionRef> {
        self.guard.check()?;
        self.connection
            .clone()
            .ok_or(MockDbError::disposed(OBJECT_NAME))
    }

    fn commit(&self) -> Result<()> {
        self.guard.check()?;
        tracing::trace!(isolation_level = ?self.isolation_level, "Commit");
        Ok(())
    }

    fn rollback(&self) -> Result<()> {
        self.guard.check()?;
        tracing::trace!(isolation_level = ?self.isolation_level, "Rollback");
        Ok(())
    }

    fn dispose(&mut self) {
        if self.guard.release() {
            self.connection = None;
            self.database = None;
            tracing::debug!("Transaction disposed");
        }
    }

    fn is_disposed(&self) -> bool {
        self.guard.is_disposed()
    }
}
