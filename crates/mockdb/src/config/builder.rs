//! Configuration builder

use crate::constants::DEFAULT_LOG_LEVEL;
use crate::error::{MockDbError, Result};

/// Settings for applications and test harnesses that embed the mock driver.
///
/// Connections report fixed identity strings; only logging is configurable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MockDbConfig {
    pub logging: LoggingConfig,
}

impl MockDbConfig {
    #[must_use]
    pub fn builder() -> MockDbConfigBuilder {
        MockDbConfigBuilder::new()
    }

    #[must_use]
    pub const fn logging(&self) -> &LoggingConfig {
        &self.logging
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            json: false,
        }
    }
}

/// Configuration builder with fluent API
#[derive(Debug, Default)]
pub struct MockDbConfigBuilder {
    log_level: Option<String>,
    json_logs: Option<bool>,
}

impl MockDbConfigBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = Some(level.into());
        self
    }

    #[must_use]
    pub const fn json_logs(mut self, enabled: bool) -> Self {
        self.json_logs = Some(enabled);
        self
    }

    /// Build the configuration.
    ///
    /// # Errors
    ///
    /// Returns a config error if the log level is blank.
    pub fn build(self) -> Result<MockDbConfig> {
        let level = match self.log_level {
            Some(level) if level.trim().is_empty() => {
                return Err(MockDbError::config("log_level must not be empty"));
            }
            Some(level) => level,
            None => DEFAULT_LOG_LEVEL.to_string(),
        };

        Ok(MockDbConfig {
            logging: LoggingConfig {
                level,
                json: self.json_logs.unwrap_or(false),
            },
        })
    }
}
