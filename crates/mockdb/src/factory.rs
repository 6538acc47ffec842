//! Provider factory for the mock driver.

use crate::command::MockDbCommand;
use crate::connection::MockDbConnection;
use crate::database::MockDatabase;
use crate::error::{MockDbError, Result};
use crate::parameter::MockDbParameter;
use crate::provider::{ConnectionStringBuilder, DbProviderFactory};

/// Produces fresh connections, commands and parameters for one database.
///
/// Holds nothing but a handle to the database it serves. Capability flags
/// keep their default `false` values.
#[derive(Debug, Clone)]
pub struct MockDbProviderFactory {
    database: MockDatabase,
}

impl MockDbProviderFactory {
    #[must_use]
    pub const fn new(database: MockDatabase) -> Self {
        Self { database }
    }

    #[must_use]
    pub const fn database(&self) -> &MockDatabase {
        &self.database
    }
}

impl DbProviderFactory for MockDbProviderFactory {
    type Connection = MockDbConnection;
    type Command = MockDbCommand;
    type Parameter = MockDbParameter;

    fn create_connection(&self) -> MockDbConnection {
        MockDbConnection::with_factory(self.database.clone(), self.clone())
    }

    fn create_command(&self) -> MockDbCommand {
        MockDbCommand::new()
    }

    fn create_parameter(&self) -> MockDbParameter {
        MockDbParameter::new()
    }

    fn create_connection_string_builder(&self) -> Result<ConnectionStringBuilder> {
        Err(MockDbError::not_implemented("create_connection_string_builder"))
    }
}
