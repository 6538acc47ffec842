//! Shared lifecycle guards.
//!
//! Every disposable handle embeds a [`DisposeGuard`] and calls
//! [`DisposeGuard::check`] before doing anything else. Async operations call
//! [`ensure_not_cancelled`] at their single commit point.

use tokio_util::sync::CancellationToken;

use crate::error::{MockDbError, Result};

/// Tracks the terminal "disposed" flag of one resource.
#[derive(Debug, Clone, Copy)]
pub struct DisposeGuard {
    object: &'static str,
    disposed: bool,
}

impl DisposeGuard {
    /// Create a guard for a live object of the given kind.
    ///
    /// `object` names the resource in error messages.
    #[must_use]
    pub const fn new(object: &'static str) -> Self {
        Self {
            object,
            disposed: false,
        }
    }

    #[must_use]
    pub const fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Fails with a disposed error once the guard has been released.
    pub const fn check(&self) -> Result<()> {
        if self.disposed {
            return Err(MockDbError::disposed(self.object));
        }
        Ok(())
    }

    /// Marks the resource disposed.
    ///
    /// Returns `true` only for the call that performed the transition, so
    /// release logic runs exactly once.
    pub const fn release(&mut self) -> bool {
        if self.disposed {
            return false;
        }
        self.disposed = true;
        true
    }
}

/// Fails with a cancelled error if `cancel` has been triggered.
pub fn ensure_not_cancelled(cancel: &CancellationToken, operation: &'static str) -> Result<()> {
    if cancel.is_cancelled() {
        tracing::debug!(operation, "Cancellation observed before commit");
        return Err(MockDbError::cancelled(operation));
    }
    Ok(())
}
