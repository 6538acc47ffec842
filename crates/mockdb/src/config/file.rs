//! TOML configuration file loading
//!
//! ```toml
//! [logging]
//! level = "mockdb=debug"
//! json = false
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::builder::MockDbConfigBuilder;
use crate::error::{MockDbError, Result};

const CONFIG_FILE_NAME: &str = "mockdb.toml";

/// Candidate config locations, highest priority first.
///
/// `mockdb.toml` in the working directory, then
/// `$HOME/.config/mockdb/config.toml`.
#[must_use]
pub fn config_candidates(cwd: Option<&Path>, home: Option<&Path>) -> Vec<PathBuf> {
    let local = cwd.map_or_else(
        || PathBuf::from(CONFIG_FILE_NAME),
        |dir| dir.join(CONFIG_FILE_NAME),
    );

    std::iter::once(local)
        .chain(home.map(|home| home.join(".config").join("mockdb").join("config.toml")))
        .collect()
}

/// First candidate that exists on disk.
#[must_use]
pub fn first_existing(candidates: &[PathBuf]) -> Option<PathBuf> {
    candidates.iter().find(|path| path.is_file()).cloned()
}

/// Find a config file in the process's working and home directories.
#[must_use]
pub fn find_config_file() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok();
    let home = std::env::var_os("HOME").map(PathBuf::from);
    first_existing(&config_candidates(cwd.as_deref(), home.as_deref()))
}

/// Apply the `[logging]` table of a TOML file on top of `builder`.
///
/// # Errors
///
/// Returns a config error naming `path` if it cannot be read or parsed.
pub fn load_from_file(path: &Path, builder: MockDbConfigBuilder) -> Result<MockDbConfigBuilder> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| MockDbError::config(format!("cannot read {}: {e}", path.display())))?;

    let parsed: FileConfig = toml::from_str(&content)
        .map_err(|e| MockDbError::config(format!("invalid TOML in {}: {e}", path.display())))?;

    Ok(parsed.apply(builder))
}

/// Apply TOML text directly, without touching the filesystem.
///
/// # Errors
///
/// Returns a config error if `content` is not valid TOML for this schema.
pub fn load_from_str(content: &str, builder: MockDbConfigBuilder) -> Result<MockDbConfigBuilder> {
    let parsed: FileConfig = toml::from_str(content)?;
    Ok(parsed.apply(builder))
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    logging: LoggingSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct LoggingSection {
    level: Option<String>,
    json: Option<bool>,
}

impl FileConfig {
    fn apply(self, mut builder: MockDbConfigBuilder) -> MockDbConfigBuilder {
        let LoggingSection { level, json } = self.logging;
        if let Some(level) = level {
            builder = builder.log_level(level);
        }
        if let Some(json) = json {
            builder = builder.json_logs(json);
        }
        builder
    }
}
