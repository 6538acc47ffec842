//! Configuration management
//!
//! Supports configuration loading with precedence: env > file > defaults

mod builder;
mod env;
mod file;

use std::path::{Path, PathBuf};

pub use builder::{LoggingConfig, MockDbConfig, MockDbConfigBuilder};
pub use env::{apply_env, load_from_env, vars};
pub use file::{
    config_candidates, find_config_file, first_existing, load_from_file, load_from_str,
};

use crate::error::Result;

/// Load configuration with precedence: env > file > defaults
///
/// The file named by `MOCKDB_CONFIG` wins over the well-known locations.
///
/// # Errors
///
/// Returns a config error if the selected file cannot be read or parsed.
pub fn load_config() -> Result<MockDbConfigBuilder> {
    let cwd = std::env::current_dir().ok();
    let home = std::env::var_os("HOME").map(PathBuf::from);
    load_config_with(
        |key| std::env::var(key).ok(),
        &config_candidates(cwd.as_deref(), home.as_deref()),
    )
}

/// Layered loading against an injected environment and candidate list.
///
/// # Errors
///
/// Returns a config error if the selected file cannot be read or parsed.
pub fn load_config_with<F>(lookup: F, candidates: &[PathBuf]) -> Result<MockDbConfigBuilder>
where
    F: Fn(&str) -> Option<String>,
{
    let path = lookup(vars::MOCKDB_CONFIG)
        .map(PathBuf::from)
        .or_else(|| first_existing(candidates));

    let mut builder = MockDbConfigBuilder::new();
    if let Some(path) = path {
        tracing::info!(path = %path.display(), "Loading configuration");
        builder = load_from_file(&path, builder)?;
    }

    Ok(apply_env(builder, lookup))
}

/// Load configuration from a specific file path, then apply the environment
///
/// # Errors
///
/// Returns a config error if `path` cannot be read or parsed.
pub fn load_config_from_path(path: &Path) -> Result<MockDbConfigBuilder> {
    let builder = load_from_file(path, MockDbConfigBuilder::new())?;
    Ok(load_from_env(builder))
}
