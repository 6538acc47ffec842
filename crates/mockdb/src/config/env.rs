//! Environment variable loading for configuration

use super::builder::MockDbConfigBuilder;

/// Environment variable names
pub mod vars {
    /// Explicit config file path; skips the well-known locations.
    pub const MOCKDB_CONFIG: &str = "MOCKDB_CONFIG";
    pub const MOCKDB_LOG_LEVEL: &str = "MOCKDB_LOG_LEVEL";
    pub const MOCKDB_JSON_LOGS: &str = "MOCKDB_JSON_LOGS";
}

/// Load configuration from the process environment
pub fn load_from_env(builder: MockDbConfigBuilder) -> MockDbConfigBuilder {
    apply_env(builder, |key| std::env::var(key).ok())
}

/// Apply overrides from an arbitrary variable lookup
pub fn apply_env<F>(mut builder: MockDbConfigBuilder, lookup: F) -> MockDbConfigBuilder
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(level) = lookup(vars::MOCKDB_LOG_LEVEL) {
        builder = builder.log_level(level);
    }

    if let Some(val) = lookup(vars::MOCKDB_JSON_LOGS) {
        builder = builder.json_logs(parse_bool(&val));
    }

    builder
}

fn parse_bool(s: &str) -> bool {
    matches!(s.to_lowercase().as_str(), "true" | "1" | "yes" | "on")
}
