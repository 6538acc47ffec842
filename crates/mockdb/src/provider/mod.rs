//! Generic driver abstraction.
//!
//! Code under test depends on these traits; the mock types in this crate
//! implement them. The traits mirror a conventional client driver:
//!
//! - [`DbConnection`] - lifecycle state machine and gated factories
//! - [`DbCommand`] - a statement bound to a connection
//! - [`DbTransaction`] - a unit of work with a fixed isolation level
//! - [`DbProviderFactory`] - creation-only entry point for one driver

mod types;

use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

pub use types::{
    CommandBehavior, CommandType, ConnectionState, ConnectionStringBuilder, DataRowVersion,
    DbType, DbValue, IsolationLevel, ParameterDirection, Rows, UpdateRowSource,
};

use crate::error::Result;

/// A logical session to a data source.
///
/// Every method except [`is_disposed`](Self::is_disposed),
/// [`dispose`](Self::dispose) and [`dispose_async`](Self::dispose_async) fails
/// once the connection has been disposed.
#[async_trait]
pub trait DbConnection: Send + Sync {
    /// Command type produced by [`create_command`](Self::create_command).
    type Command: DbCommand;
    /// Transaction type produced by [`begin_transaction`](Self::begin_transaction).
    type Transaction: DbTransaction;
    /// Factory this connection was created by.
    type Factory;

    fn connection_string(&self) -> Result<String>;

    fn set_connection_string(&self, value: &str) -> Result<()>;

    /// Name of the current database.
    fn database(&self) -> Result<String>;

    /// Name of the server this connection targets.
    fn data_source(&self) -> Result<String>;

    /// Version string of the server.
    fn server_version(&self) -> Result<String>;

    /// Time to wait while opening before giving up.
    fn connection_timeout(&self) -> Result<Duration>;

    fn state(&self) -> Result<ConnectionState>;

    fn change_database(&self, database: &str) -> Result<()>;

    fn open(&self) -> Result<()>;

    fn close(&self) -> Result<()>;

    /// Opens the connection, honouring `cancel` up to the point the state
    /// changes.
    async fn open_async(&self, cancel: &CancellationToken) -> Result<()>;

    async fn close_async(&self, cancel: &CancellationToken) -> Result<()>;

    fn create_command(&self) -> Result<Self::Command>;

    fn begin_transaction(&self, isolation_level: IsolationLevel) -> Result<Self::Transaction>;

    /// Begins a transaction with the driver's default isolation level.
    fn begin_transaction_default(&self) -> Result<Self::Transaction> {
        self.begin_transaction(IsolationLevel::Unspecified)
    }

    async fn begin_transaction_async(
        &self,
        isolation_level: IsolationLevel,
        cancel: &CancellationToken,
    ) -> Result<Self::Transaction>;

    fn provider_factory(&self) -> Result<Self::Factory>;

    /// Releases the connection. Idempotent.
    fn dispose(&self);

    /// Async form of [`dispose`](Self::dispose), sharing its idempotency guard.
    async fn dispose_async(&self);

    fn is_disposed(&self) -> bool;
}

/// A statement to execute against a connection.
#[async_trait]
pub trait DbCommand: Send + Sync {
    /// Parameter type accepted by this command.
    type Parameter;
    /// Collection holding this command's parameters.
    type Parameters;

    fn command_text(&self) -> &str;

    fn set_command_text(&mut self, text: &str);

    fn command_timeout(&self) -> Duration;

    fn set_command_timeout(&mut self, timeout: Duration);

    fn command_type(&self) -> CommandType;

    fn set_command_type(&mut self, command_type: CommandType);

    fn design_time_visible(&self) -> bool;

    fn set_design_time_visible(&mut self, visible: bool);

    fn updated_row_source(&self) -> UpdateRowSource;

    fn set_updated_row_source(&mut self, source: UpdateRowSource);

    fn parameters(&self) -> &Self::Parameters;

    fn parameters_mut(&mut self) -> &mut Self::Parameters;

    fn create_parameter(&self) -> Result<Self::Parameter>;

    /// Executes the command and returns the number of affected rows.
    fn execute_non_query(&mut self) -> Result<u64>;

    /// Executes the command and returns the first column of the first row.
    fn execute_scalar(&mut self) -> Result<DbValue>;

    fn execute_reader(&mut self, behavior: CommandBehavior) -> Result<Rows>;

    async fn execute_non_query_async(&mut self, cancel: &CancellationToken) -> Result<u64>;

    async fn execute_scalar_async(&mut self, cancel: &CancellationToken) -> Result<DbValue>;

    fn prepare(&mut self) -> Result<()>;

    /// Attempts to cancel an in-flight execution.
    fn cancel(&self) -> Result<()>;

    fn dispose(&mut self);

    fn is_disposed(&self) -> bool;
}

/// A unit of work started on an open connection.
pub trait DbTransaction: Send + Sync {
    /// Non-owning handle to the connection the transaction was started on.
    type Connection;

    fn isolation_level(&self) -> Result<IsolationLevel>;

    fn connection(&self) -> Result<Self::Connection>;

    fn commit(&self) -> Result<()>;

    fn rollback(&self) -> Result<()>;

    /// Releases the transaction. Never rolls back implicitly.
    fn dispose(&mut self);

    fn is_disposed(&self) -> bool;
}

/// Creation-only entry point producing driver objects.
pub trait DbProviderFactory: Send + Sync {
    type Connection: DbConnection;
    type Command: DbCommand;
    type Parameter;

    fn create_connection(&self) -> Self::Connection;

    fn create_command(&self) -> Self::Command;

    fn create_parameter(&self) -> Self::Parameter;

    fn create_connection_string_builder(&self) -> Result<ConnectionStringBuilder>;

    fn can_create_command_builder(&self) -> bool {
        false
    }

    fn can_create_data_adapter(&self) -> bool {
        false
    }

    fn can_create_data_source_enumerator(&self) -> bool {
        false
    }

    fn can_create_batch(&self) -> bool {
        false
    }
}
