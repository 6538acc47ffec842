//! Connection lifecycle for the mock driver.
//!
//! Provides:
//! - `MockDbConnection`: the connection state machine
//! - `ConnectionRef`: non-owning back-reference held by commands and transactions

mod wrapper;

#[cfg(test)]
mod tests;

pub use wrapper::{ConnectionRef, MockDbConnection};
