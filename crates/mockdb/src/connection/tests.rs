//! Lifecycle tests for `MockDbConnection`.

use std::time::Duration;

use tokio_test::{assert_pending, assert_ready_err, assert_ready_ok};
use tokio_util::sync::CancellationToken;

use crate::MockDatabase;
use crate::provider::{
    ConnectionState, DbConnection, DbProviderFactory, DbTransaction, IsolationLevel,
};

#[test]
fn test_fresh_connection_is_closed() {
    let connection = MockDatabase::new().create_connection();
    assert_eq!(connection.state().unwrap(), ConnectionState::Closed);
    assert!(!connection.is_disposed());
}

#[test]
fn test_open_succeeds() {
    let connection = MockDatabase::new().create_connection();
    connection.open().unwrap();
    assert_eq!(connection.state().unwrap(), ConnectionState::Open);
}

#[test]
fn test_open_then_close() {
    let connection = MockDatabase::new().create_connection();
    connection.open().unwrap();
    connection.close().unwrap();
    assert_eq!(connection.state().unwrap(), ConnectionState::Closed);
}

#[test]
fn test_open_and_close_are_idempotent() {
    let connection = MockDatabase::new().create_connection();

    connection.open().unwrap();
    connection.open().unwrap();
    assert_eq!(connection.state().unwrap(), ConnectionState::Open);

    connection.close().unwrap();
    connection.close().unwrap();
    assert_eq!(connection.state().unwrap(), ConnectionState::Closed);
}

#[tokio::test]
async fn test_open_async_succeeds() {
    let connection = MockDatabase::new().create_connection();
    connection.open_async(&CancellationToken::new()).await.unwrap();
    assert_eq!(connection.state().unwrap(), ConnectionState::Open);
}

#[tokio::test]
async fn test_open_async_then_close_async() {
    let connection = MockDatabase::new().create_connection();
    let token = CancellationToken::new();

    connection.open_async(&token).await.unwrap();
    connection.close_async(&token).await.unwrap();

    assert_eq!(connection.state().unwrap(), ConnectionState::Closed);
}

#[tokio::test]
async fn test_open_async_cancelled_leaves_state_closed() {
    let connection = MockDatabase::new().create_connection();
    let token = CancellationToken::new();
    token.cancel();

    let err = connection.open_async(&token).await.unwrap_err();

    assert!(err.is_cancelled());
    assert_eq!(connection.state().unwrap(), ConnectionState::Closed);
}

#[tokio::test]
async fn test_close_async_cancelled_leaves_state_open() {
    let connection = MockDatabase::new().create_connection();
    connection.open().unwrap();

    let token = CancellationToken::new();
    token.cancel();
    let err = connection.close_async(&token).await.unwrap_err();

    assert!(err.is_cancelled());
    assert_eq!(connection.state().unwrap(), ConnectionState::Open);
}

#[test]
fn test_open_async_cancelled_while_suspended() {
    let connection = MockDatabase::new().create_connection();
    let token = CancellationToken::new();

    let mut open = tokio_test::task::spawn(connection.open_async(&token));
    assert_pending!(open.poll());
    assert_eq!(connection.state().unwrap(), ConnectionState::Closed);

    token.cancel();
    let err = assert_ready_err!(open.poll());

    assert!(err.is_cancelled());
    assert_eq!(connection.state().unwrap(), ConnectionState::Closed);
}

#[test]
fn test_open_async_commits_after_suspension() {
    let connection = MockDatabase::new().create_connection();
    let token = CancellationToken::new();

    let mut open = tokio_test::task::spawn(connection.open_async(&token));
    assert_pending!(open.poll());
    assert_eq!(connection.state().unwrap(), ConnectionState::Closed);

    assert_ready_ok!(open.poll());
    assert_eq!(connection.state().unwrap(), ConnectionState::Open);
}

#[test]
fn test_close_async_cancelled_while_suspended() {
    let connection = MockDatabase::new().create_connection();
    connection.open().unwrap();
    let token = CancellationToken::new();

    let mut close = tokio_test::task::spawn(connection.close_async(&token));
    assert_pending!(close.poll());
    token.cancel();
    let err = assert_ready_err!(close.poll());

    assert!(err.is_cancelled());
    assert_eq!(connection.state().unwrap(), ConnectionState::Open);
}

#[test]
fn test_begin_transaction_async_cancelled_while_suspended() {
    let connection = MockDatabase::new().create_connection();
    connection.open().unwrap();
    let token = CancellationToken::new();

    let mut begin = tokio_test::task::spawn(
        connection.begin_transaction_async(IsolationLevel::Serializable, &token),
    );
    assert_pending!(begin.poll());
    token.cancel();
    let err = assert_ready_err!(begin.poll());

    assert!(err.is_cancelled());
    assert_eq!(connection.state().unwrap(), ConnectionState::Open);
}

#[test]
fn test_cancel_after_commit_has_no_effect() {
    let connection = MockDatabase::new().create_connection();
    let token = CancellationToken::new();

    tokio_test::block_on(connection.open_async(&token)).unwrap();
    token.cancel();

    assert_eq!(connection.state().unwrap(), ConnectionState::Open);
}

#[test]
fn test_create_command_fails_when_closed() {
    let connection = MockDatabase::new().create_connection();

    let err = connection.create_command().unwrap_err();

    assert!(err.is_invalid_state());
    assert_eq!(connection.state().unwrap(), ConnectionState::Closed);
}

#[test]
fn test_create_command_succeeds_when_open() {
    let connection = MockDatabase::new().create_connection();
    connection.open().unwrap();

    let command = connection.create_command().unwrap();

    assert_eq!(connection.state().unwrap(), ConnectionState::Open);
    assert!(command.connection().unwrap().refers_to(&connection));
}

#[test]
fn test_create_command_fails_after_close() {
    let connection = MockDatabase::new().create_connection();
    connection.open().unwrap();
    connection.close().unwrap();

    assert!(connection.create_command().unwrap_err().is_invalid_state());
}

#[test]
fn test_begin_transaction_fails_when_closed() {
    let connection = MockDatabase::new().create_connection();

    let err = connection.begin_transaction_default().unwrap_err();

    assert!(err.is_invalid_state());
    assert_eq!(connection.state().unwrap(), ConnectionState::Closed);
}

#[test]
fn test_begin_transaction_succeeds_when_open() {
    let connection = MockDatabase::new().create_connection();
    connection.open().unwrap();

    let transaction = connection
        .begin_transaction(IsolationLevel::RepeatableRead)
        .unwrap();

    assert_eq!(connection.state().unwrap(), ConnectionState::Open);
    assert_eq!(
        transaction.isolation_level().unwrap(),
        IsolationLevel::RepeatableRead
    );
    assert!(transaction.connection().unwrap().refers_to(&connection));
}

#[tokio::test]
async fn test_begin_transaction_async_fails_when_closed() {
    let connection = MockDatabase::new().create_connection();

    let err = connection
        .begin_transaction_async(IsolationLevel::ReadCommitted, &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(err.is_invalid_state());
    assert_eq!(connection.state().unwrap(), ConnectionState::Closed);
}

#[tokio::test]
async fn test_begin_transaction_async_succeeds_when_open() {
    let connection = MockDatabase::new().create_connection();
    connection.open().unwrap();

    let transaction = connection
        .begin_transaction_async(IsolationLevel::Snapshot, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(transaction.isolation_level().unwrap(), IsolationLevel::Snapshot);
}

#[tokio::test]
async fn test_begin_transaction_async_observes_cancellation() {
    let connection = MockDatabase::new().create_connection();
    connection.open().unwrap();
    let token = CancellationToken::new();
    token.cancel();

    let err = connection
        .begin_transaction_async(IsolationLevel::ReadCommitted, &token)
        .await
        .unwrap_err();

    assert!(err.is_cancelled());
    assert_eq!(connection.state().unwrap(), ConnectionState::Open);
}

#[test]
fn test_dispose_rejects_every_operation() {
    let connection = MockDatabase::new().create_connection();
    connection.open().unwrap();

    connection.dispose();

    assert!(connection.is_disposed());
    assert!(connection.open().unwrap_err().is_disposed());
    assert!(connection.close().unwrap_err().is_disposed());
    assert!(connection.state().unwrap_err().is_disposed());
    assert!(connection.connection_string().unwrap_err().is_disposed());
    assert!(connection.set_connection_string("x").unwrap_err().is_disposed());
    assert!(connection.database().unwrap_err().is_disposed());
    assert!(connection.data_source().unwrap_err().is_disposed());
    assert!(connection.server_version().unwrap_err().is_disposed());
    assert!(connection.connection_timeout().unwrap_err().is_disposed());
    assert!(connection.change_database("other").unwrap_err().is_disposed());
    assert!(connection.create_command().unwrap_err().is_disposed());
    assert!(connection.begin_transaction_default().unwrap_err().is_disposed());
    assert!(connection.provider_factory().unwrap_err().is_disposed());
}

#[tokio::test]
async fn test_async_operations_fail_after_dispose() {
    let connection = MockDatabase::new().create_connection();
    connection.open().unwrap();
    connection.dispose();
    let token = CancellationToken::new();

    let err = connection.open_async(&token).await.unwrap_err();
    assert!(err.is_disposed());

    let err = connection.close_async(&token).await.unwrap_err();
    assert!(err.is_disposed());

    let err = connection
        .begin_transaction_async(IsolationLevel::ReadCommitted, &token)
        .await
        .unwrap_err();
    assert!(err.is_disposed());
}

#[tokio::test]
async fn test_cancellation_reported_before_disposal() {
    let connection = MockDatabase::new().create_connection();
    connection.dispose();
    let token = CancellationToken::new();
    token.cancel();

    let err = connection.close_async(&token).await.unwrap_err();

    assert!(err.is_cancelled());
    assert!(connection.is_disposed());
}

#[test]
fn test_dispose_is_idempotent() {
    let connection = MockDatabase::new().create_connection();
    connection.dispose();
    connection.dispose();
    assert!(connection.is_disposed());
}

#[test]
fn test_dispose_closes_first() {
    let connection = MockDatabase::new().create_connection();
    connection.open().unwrap();
    let back_ref = connection.downgrade();

    connection.dispose();

    assert!(!back_ref.is_alive());
    assert!(back_ref.state().unwrap_err().is_disposed());
}

#[tokio::test]
async fn test_dispose_async_shares_guard() {
    let connection = MockDatabase::new().create_connection();

    connection.dispose_async().await;
    connection.dispose();
    connection.dispose_async().await;

    assert!(connection.open().unwrap_err().is_disposed());
    let err = connection
        .open_async(&CancellationToken::new())
        .await
        .unwrap_err();
    assert!(err.is_disposed());
}

#[test]
fn test_connection_string_is_persistent() {
    const CONNECTION_STRING: &str = "Test_Value";
    let connection = MockDatabase::new().create_connection();

    connection.set_connection_string(CONNECTION_STRING).unwrap();
    assert_eq!(connection.connection_string().unwrap(), CONNECTION_STRING);

    connection.open().unwrap();
    connection.close().unwrap();
    assert_eq!(connection.connection_string().unwrap(), CONNECTION_STRING);
}

#[test]
fn test_connection_string_is_not_parsed() {
    let connection = MockDatabase::new().create_connection();
    connection.set_connection_string(";;=garbage==;").unwrap();
    assert_eq!(connection.connection_string().unwrap(), ";;=garbage==;");
}

#[test]
fn test_identity_strings_default() {
    let connection = MockDatabase::new().create_connection();
    assert_eq!(connection.database().unwrap(), "MockDb");
    assert_eq!(connection.data_source().unwrap(), "localhost");
    assert_eq!(
        connection.server_version().unwrap(),
        env!("CARGO_PKG_VERSION")
    );
    assert_eq!(connection.connection_timeout().unwrap(), Duration::MAX);
}

#[test]
fn test_identity_strings_are_fixed_per_connection() {
    let database = MockDatabase::new();
    let first = database.create_connection();
    let second = database.create_provider_factory().create_connection();

    first.set_connection_string("Database=Billing;Server=billing-db").unwrap();
    first.open().unwrap();

    for connection in [&first, &second] {
        assert_eq!(connection.database().unwrap(), "MockDb");
        assert_eq!(connection.data_source().unwrap(), "localhost");
        assert_eq!(
            connection.server_version().unwrap(),
            env!("CARGO_PKG_VERSION")
        );
    }
}

#[test]
fn test_change_database_not_supported() {
    let connection = MockDatabase::new().create_connection();
    let err = connection.change_database("Other").unwrap_err();
    assert!(err.is_not_supported());
    assert_eq!(connection.database().unwrap(), "MockDb");
}

#[test]
fn test_factory_connection_behaves_the_same() {
    let factory = MockDatabase::new().create_provider_factory();
    let connection = factory.create_connection();

    assert_eq!(connection.state().unwrap(), ConnectionState::Closed);
    assert!(connection.create_command().unwrap_err().is_invalid_state());

    connection.open().unwrap();
    assert!(connection.create_command().is_ok());
}

#[test]
fn test_full_lifecycle_scenario() {
    let root = MockDatabase::new();
    let connection = root.create_connection();
    assert_eq!(connection.state().unwrap(), ConnectionState::Closed);

    connection.open().unwrap();
    assert_eq!(connection.state().unwrap(), ConnectionState::Open);

    let transaction = connection
        .begin_transaction(IsolationLevel::ReadCommitted)
        .unwrap();
    assert_eq!(
        transaction.isolation_level().unwrap(),
        IsolationLevel::ReadCommitted
    );

    connection.dispose();
    assert!(connection.state().unwrap_err().is_disposed());
    assert!(connection.open().unwrap_err().is_disposed());

    // The transaction is not disposed by its connection.
    assert!(!transaction.is_disposed());
    transaction.commit().unwrap();
    assert!(transaction.connection().unwrap().state().unwrap_err().is_disposed());
}

#[tokio::test]
async fn test_connection_moves_across_tasks() {
    let connection = MockDatabase::new().create_connection();

    let connection = tokio::spawn(async move {
        connection.open_async(&CancellationToken::new()).await.unwrap();
        connection
    })
    .await
    .unwrap();

    assert_eq!(connection.state().unwrap(), ConnectionState::Open);
}
