//! Database root: the entry point that wires factories and connections.

use crate::connection::MockDbConnection;
use crate::factory::MockDbProviderFactory;

/// Entry point of the mock driver.
///
/// Carries no state. Each call to
/// [`create_connection`](Self::create_connection) or
/// [`create_provider_factory`](Self::create_provider_factory) produces an
/// independent object graph; no mutable state is shared between connections.
///
/// # Example
///
/// ```rust
/// use mockdb::{ConnectionState, DbConnection, IsolationLevel, MockDatabase};
///
/// let database = MockDatabase::new();
/// let connection = database.create_connection();
/// connection.open().unwrap();
///
/// let transaction = connection.begin_transaction(IsolationLevel::ReadCommitted).unwrap();
/// assert_eq!(connection.state().unwrap(), ConnectionState::Open);
/// drop(transaction);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MockDatabase;

impl MockDatabase {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Create a provider factory bound to this database.
    #[must_use]
    pub const fn create_provider_factory(&self) -> MockDbProviderFactory {
        MockDbProviderFactory::new(*self)
    }

    /// Create a closed connection wired to a fresh provider factory.
    #[must_use]
    pub fn create_connection(&self) -> MockDbConnection {
        MockDbConnection::new(*self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{ConnectionState, DbConnection, DbProviderFactory};

    #[test]
    fn test_create_connection() {
        let database = MockDatabase::new();
        let connection = database.create_connection();
        assert_eq!(connection.state().unwrap(), ConnectionState::Closed);
    }

    #[test]
    fn test_create_provider_factory() {
        let database = MockDatabase::new();
        let factory = database.create_provider_factory();
        assert_eq!(factory.database(), &database);
        assert!(!factory.can_create_command_builder());
    }

    #[test]
    fn test_connections_are_independent() {
        let database = MockDatabase::new();
        let first = database.create_connection();
        let second = database.create_connection();

        first.open().unwrap();
        first.set_connection_string("Data Source=first").unwrap();

        assert_eq!(second.state().unwrap(), ConnectionState::Closed);
        assert_eq!(second.connection_string().unwrap(), "");
        assert_ne!(first.id(), second.id());
    }
}
