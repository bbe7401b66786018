//! Secret providers for database connection settings.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::{ConnectionSettings, Result, SecretProvider};
use crate::error::LookupError;

/// Reads connection settings from a JSON file, e.g.
/// `{ "database": "/srv/collections.db" }`.
///
/// The file is re-read on every call.
#[derive(Debug, Clone)]
pub struct FileSecretProvider {
    path: PathBuf,
}

impl FileSecretProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SecretProvider for FileSecretProvider {
    fn connection_settings(&self) -> Result<ConnectionSettings> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            LookupError::Credentials(format!("{}: {}", self.path.display(), e))
        })?;
        let settings: ConnectionSettings = serde_json::from_str(&content).map_err(|e| {
            LookupError::Credentials(format!("{}: {}", self.path.display(), e))
        })?;
        debug!("Credentials loaded from {}", self.path.display());
        Ok(settings)
    }
}

/// Reads the database location from an environment variable.
#[derive(Debug, Clone)]
pub struct EnvSecretProvider {
    variable: String,
}

impl EnvSecretProvider {
    pub fn new(variable: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
        }
    }
}

impl SecretProvider for EnvSecretProvider {
    fn connection_settings(&self) -> Result<ConnectionSettings> {
        match std::env::var_os(&self.variable) {
            Some(value) if !value.is_empty() => Ok(ConnectionSettings {
                database: PathBuf::from(value),
            }),
            _ => Err(LookupError::Credentials(format!(
                "environment variable {} is not set",
                self.variable
            ))),
        }
    }
}

/// Fixed connection settings.
#[derive(Debug, Clone)]
pub struct StaticSecretProvider {
    settings: ConnectionSettings,
}

impl StaticSecretProvider {
    pub fn new(database: impl Into<PathBuf>) -> Self {
        Self {
            settings: ConnectionSettings {
                database: database.into(),
            },
        }
    }
}

impl SecretProvider for StaticSecretProvider {
    fn connection_settings(&self) -> Result<ConnectionSettings> {
        Ok(self.settings.clone())
    }
}
