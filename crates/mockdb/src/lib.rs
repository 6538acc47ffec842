//! In-memory stand-in for a relational database client driver.
//!
//! Code that depends on the [`provider`] traits can be exercised against
//! [`MockDatabase`] without a real database. Connections are local state
//! machines with no I/O:
//!
//! - a connection starts `Closed`; `open`/`close` are idempotent
//! - commands and transactions can only be created while `Open`
//! - disposal is terminal and idempotent; afterwards every operation fails
//! - async operations check their cancellation token before changing state
//!
//! Query execution is deliberately absent and reports not-implemented.
//!
//! # Example
//!
//! ```rust
//! use mockdb::{ConnectionState, DbConnection, MockDatabase};
//! use tokio_util::sync::CancellationToken;
//!
//! # tokio_test::block_on(async {
//! let connection = MockDatabase::new().create_connection();
//! connection.open_async(&CancellationToken::new()).await.unwrap();
//! assert_eq!(connection.state().unwrap(), ConnectionState::Open);
//! # });
//! ```

pub mod command;
pub mod config;
pub mod connection;
pub mod constants;
pub mod database;
mod error;
pub mod factory;
mod lifecycle;
pub mod observability;
pub mod parameter;
pub mod provider;
pub mod transaction;

pub use command::MockDbCommand;
pub use config::{LoggingConfig, MockDbConfig, MockDbConfigBuilder};
pub use connection::{ConnectionRef, MockDbConnection};
pub use database::MockDatabase;
pub use error::{MockDbError, Result};
pub use factory::MockDbProviderFactory;
pub use lifecycle::DisposeGuard;
pub use parameter::{MockDbParameter, MockDbParameterCollection};
pub use provider::{
    CommandBehavior, CommandType, ConnectionState, ConnectionStringBuilder, DataRowVersion,
    DbCommand, DbConnection, DbProviderFactory, DbTransaction, DbType, DbValue, IsolationLevel,
    ParameterDirection, Rows, UpdateRowSource,
};
