//! Constants for the mock driver

/// Database name reported by every connection
pub const DEFAULT_DATABASE: &str = "MockDb";

/// Data source reported by every connection
pub const DEFAULT_DATA_SOURCE: &str = "localhost";

/// Server version reported by every connection: the crate's own version
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default tracing filter directive
pub const DEFAULT_LOG_LEVEL: &str = "info";
