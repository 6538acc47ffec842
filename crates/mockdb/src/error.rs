//! Error hierarchy for mockdb.
//!
//! Follows the canonical error struct pattern: the kind enum stays private and
//! callers classify errors through the `is_xxx()` predicates.

use thiserror::Error;

/// Root error type for the mock driver.
///
/// Every failure surfaces synchronously to the immediate caller. The driver
/// performs no I/O, so none of these are transient and nothing is retried.
///
/// # Example
///
/// ```rust
/// use mockdb::{DbConnection, MockDatabase};
///
/// let connection = MockDatabase::new().create_connection();
/// let err = connection.create_command().unwrap_err();
/// assert!(err.is_invalid_state());
/// ```
#[derive(Error, Debug)]
#[error("{kind}")]
pub struct MockDbError {
    kind: ErrorKind,
}

/// Internal error classification.
#[derive(Error, Debug)]
#[non_exhaustive]
pub(crate) enum ErrorKind {
    /// Operation attempted on an instance whose disposal has completed.
    #[error("cannot access a disposed object: {object}")]
    Disposed { object: &'static str },

    /// Operation requires an open connection.
    #[error("connection must be open; ensure open() or open_async() has been called")]
    InvalidState,

    /// Async operation observed cancellation before committing its effect.
    #[error("operation cancelled: {operation}")]
    Cancelled { operation: &'static str },

    /// Behaviour intentionally absent from the mock driver.
    #[error("not implemented: {operation}")]
    NotImplemented { operation: &'static str },

    /// Operation categorically unsupported by the mock driver.
    #[error("not supported: {0}")]
    NotSupported(String),

    /// Parameter lookup by name or index failed.
    #[error("parameter not found: {0}")]
    ParameterNotFound(String),

    /// Configuration could not be loaded or is invalid.
    #[error("configuration error: {0}")]
    Config(String),
}

impl MockDbError {
    // ═══════════════════════════════════════════════════════════════════════
    // Constructors
    // ═══════════════════════════════════════════════════════════════════════

    /// Create error for an operation on a disposed object.
    #[must_use]
    pub const fn disposed(object: &'static str) -> Self {
        Self {
            kind: ErrorKind::Disposed { object },
        }
    }

    /// Create error for an operation that requires an open connection.
    #[must_use]
    pub const fn invalid_state() -> Self {
        Self {
            kind: ErrorKind::InvalidState,
        }
    }

    /// Create error for a cancelled async operation.
    #[must_use]
    pub const fn cancelled(operation: &'static str) -> Self {
        Self {
            kind: ErrorKind::Cancelled { operation },
        }
    }

    /// Create error for an operation the mock does not implement.
    #[must_use]
    pub const fn not_implemented(operation: &'static str) -> Self {
        Self {
            kind: ErrorKind::NotImplemented { operation },
        }
    }

    /// Create error for an unsupported operation.
    #[must_use]
    pub fn not_supported(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::NotSupported(message.into()),
        }
    }

    /// Create error for a missing parameter.
    #[must_use]
    pub fn parameter_not_found(key: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::ParameterNotFound(key.into()),
        }
    }

    /// Create error for a configuration problem.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Config(message.into()),
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Predicate Methods (is_xxx)
    // ═══════════════════════════════════════════════════════════════════════

    /// Returns true if the target object was already disposed.
    #[must_use]
    pub const fn is_disposed(&self) -> bool {
        matches!(self.kind, ErrorKind::Disposed { .. })
    }

    /// Returns true if the connection had to be open but was closed.
    #[must_use]
    pub const fn is_invalid_state(&self) -> bool {
        matches!(self.kind, ErrorKind::InvalidState)
    }

    /// Returns true if the operation observed a cancellation request.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self.kind, ErrorKind::Cancelled { .. })
    }

    /// Returns true if the operation is not implemented by the mock.
    #[must_use]
    pub const fn is_not_implemented(&self) -> bool {
        matches!(self.kind, ErrorKind::NotImplemented { .. })
    }

    /// Returns true if the operation is not supported by the mock.
    #[must_use]
    pub const fn is_not_supported(&self) -> bool {
        matches!(self.kind, ErrorKind::NotSupported(_))
    }

    /// Returns true if a parameter lookup failed.
    #[must_use]
    pub const fn is_parameter_not_found(&self) -> bool {
        matches!(self.kind, ErrorKind::ParameterNotFound(_))
    }

    /// Returns true if this is a configuration error.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self.kind, ErrorKind::Config(_))
    }
}

impl From<toml::de::Error> for MockDbError {
    fn from(err: toml::de::Error) -> Self {
        Self::config(err.to_string())
    }
}

/// Result type alias for mock driver operations.
pub type Result<T> = std::result::Result<T, MockDbError>;
