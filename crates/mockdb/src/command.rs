//! Command stub.
//!
//! Properties are plain stored fields. There is no query engine, so every
//! execution path reports not-implemented once the disposal check passes.

use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::connection::ConnectionRef;
use crate::error::{MockDbError, Result};
use crate::lifecycle::{DisposeGuard, ensure_not_cancelled};
use crate::parameter::{MockDbParameter, MockDbParameterCollection};
use crate::provider::{CommandBehavior, CommandType, DbCommand, DbValue, Rows, UpdateRowSource};

const OBJECT_NAME: &str = "command";

/// Command bound to a connection, or unbound when created by a factory.
#[derive(Debug)]
pub struct MockDbCommand {
    guard: DisposeGuard,
    command_text: String,
    command_timeout: Duration,
    command_type: CommandType,
    design_time_visible: bool,
    updated_row_source: UpdateRowSource,
    connection: Option<ConnectionRef>,
    parameters: MockDbParameterCollection,
}

impl MockDbCommand {
    #[must_use]
    pub fn new() -> Self {
        Self {
            guard: DisposeGuard::new(OBJECT_NAME),
            command_text: String::new(),
            command_timeout: Duration::ZERO,
            command_type: CommandType::default(),
            design_time_visible: false,
            updated_row_source: UpdateRowSource::default(),
            connection: None,
            parameters: MockDbParameterCollection::new(),
        }
    }

    #[must_use]
    pub const fn connection(&self) -> Option<&ConnectionRef> {
        self.connection.as_ref()
    }

    pub fn set_connection(&mut self, connection: Option<ConnectionRef>) {
        self.connection = connection;
    }

    fn not_implemented<T>(&self, operation: &'static str) -> Result<T> {
        self.guard.check()?;
        Err(MockDbError::not_implemented(operation))
    }
}

impl Default for MockDbCommand {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DbCommand for MockDbCommand {
    type Parameter = MockDbParameter;
    type Parameters = MockDbParameterCollection;

    fn command_text(&self) -> &str {
        &self.command_text
    }

    fn set_command_text(&mut self, text: &str) {
        text.clone_into(&mut self.command_text);
    }

    fn command_timeout(&self) -> Duration {
        self.command_timeout
    }

    fn set_command_timeout(&mut self, timeout: Duration) {
        self.command_timeout = timeout;
    }

    fn command_type(&self) -> CommandType {
        self.command_type
    }

    fn set_command_type(&mut self, command_type: CommandType) {
        self.command_type = command_type;
    }

    fn design_time_visible(&self) -> bool {
        self.design_time_visible
    }

    fn set_design_time_visible(&mut self, visible: bool) {
        self.design_time_visible = visible;
    }

    fn updated_row_source(&self) -> UpdateRowSource {
        self.updated_row_source
    }

    fn set_updated_row_source(&mut self, source: UpdateRowSource) {
        self.updated_row_source = source;
    }

    fn parameters(&self) -> &MockDbParameterCollection {
        &self.parameters
    }

    fn parameters_mut(&mut self) -> &mut MockDbParameterCollection {
        &mut self.parameters
    }

    fn create_parameter(&self) -> Result<MockDbParameter> {
        self.not_implemented("create_parameter")
    }

    fn execute_non_query(&mut self) -> Result<u64> {
        self.not_implemented("execute_non_query")
    }

    fn execute_scalar(&mut self) -> Result<DbValue> {
        self.not_implemented("execute_scalar")
    }

    fn execute_reader(&mut self, behavior: CommandBehavior) -> Result<Rows> {
        tracing::trace!(?behavior, "execute_reader requested");
        self.not_implemented("execute_reader")
    }

    async fn execute_non_query_async(&mut self, cancel: &CancellationToken) -> Result<u64> {
        ensure_not_cancelled(cancel, "execute_non_query")?;
        self.not_implemented("execute_non_query")
    }

    async fn execute_scalar_async(&mut self, cancel: &CancellationToken) -> Result<DbValue> {
        ensure_not_cancelled(cancel, "execute_scalar")?;
        self.not_implemented("execute_scalar")
    }

    fn prepare(&mut self) -> Result<()> {
        self.not_implemented("prepare")
    }

    fn cancel(&self) -> Result<()> {
        self.not_implemented("cancel")
    }

    fn dispose(&mut self) {
        if self.guard.release() {
            self.connection = None;
            tracing::debug!("Command disposed");
        }
    }

    fn is_disposed(&self) -> bool {
        self.guard.is_disposed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MockDatabase;
    use crate::provider::{DbConnection, DbType};

    #[test]
    fn test_properties_are_stored() {
        let mut command = MockDbCommand::new();
        command.set_command_text("SELECT 1");
        command.set_command_timeout(Duration::from_secs(15));
        command.set_command_type(CommandType::StoredProcedure);
        command.set_design_time_visible(true);
        command.set_updated_row_source(UpdateRowSource::None);

        assert_eq!(command.command_text(), "SELECT 1");
        assert_eq!(command.command_timeout(), Duration::from_secs(15));
        assert_eq!(command.command_type(), CommandType::StoredProcedure);
        assert!(command.design_time_visible());
        assert_eq!(command.updated_row_source(), UpdateRowSource::None);
    }

    #[test]
    fn test_execution_is_not_implemented() {
        let mut command = MockDbCommand::new();
        assert!(command.execute_non_query().unwrap_err().is_not_implemented());
        assert!(command.execute_scalar().unwrap_err().is_not_implemented());
        assert!(
            command
                .execute_reader(CommandBehavior::Default)
                .unwrap_err()
                .is_not_implemented()
        );
        assert!(command.prepare().unwrap_err().is_not_implemented());
        assert!(command.cancel().unwrap_err().is_not_implemented());
        assert!(command.create_parameter().unwrap_err().is_not_implemented());
    }

    #[tokio::test]
    async fn test_async_execution_is_not_implemented() {
        let mut command = MockDbCommand::new();
        let token = CancellationToken::new();
        let err = command.execute_non_query_async(&token).await.unwrap_err();
        assert!(err.is_not_implemented());
        let err = command.execute_scalar_async(&token).await.unwrap_err();
        assert!(err.is_not_implemented());
    }

    #[tokio::test]
    async fn test_async_execution_observes_cancellation() {
        let mut command = MockDbCommand::new();
        let token = CancellationToken::new();
        token.cancel();
        let err = command.execute_scalar_async(&token).await.unwrap_err();
        assert!(err.is_cancelled());
    }

    #[test]
    fn test_parameters_are_editable() {
        let mut command = MockDbCommand::new();
        command
            .parameters_mut()
            .add(MockDbParameter::named("@id").with_value(7).with_db_type(DbType::Int32));

        assert_eq!(command.parameters().len(), 1);
        let parameter = command.parameters().get_by_name("@id").unwrap();
        assert_eq!(parameter.value(), &DbValue::Int(7));
    }

    #[test]
    fn test_dispose_releases_connection() {
        let connection = MockDatabase::new().create_connection();
        connection.open().unwrap();
        let mut command = connection.create_command().unwrap();
        assert!(command.connection().is_some());

        command.dispose();
        command.dispose();

        assert!(command.is_disposed());
        assert!(command.connection().is_none());
        assert!(command.execute_non_query().unwrap_err().is_disposed());
    }
}
