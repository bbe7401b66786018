//! Configuration structures for the statement pipeline.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration for the ocrstmt pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Report workbook configuration.
    pub report: ReportConfig,

    /// Account database configuration.
    pub database: DatabaseConfig,

    /// Batch run configuration.
    pub batch: BatchConfig,
}

/// Report workbook configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// File name prefix; the run date and `.xlsx` are appended.
    pub file_prefix: String,

    /// chrono format string for the run date in the file name.
    pub date_format: String,

    /// Worksheet name used when writing.
    pub sheet_name: String,

    /// Prefix placed on the file number so spreadsheets keep it as text.
    pub text_marker: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            file_prefix: "ocr_statement_output_".to_string(),
            date_format: "%m-%d-%Y".to_string(),
            sheet_name: "Sheet1".to_string(),
            text_marker: "'".to_string(),
        }
    }
}

/// Where the account database credentials come from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// JSON credentials file. Takes precedence over `database_env`.
    pub credentials_file: Option<PathBuf>,

    /// Environment variable holding the database location.
    pub database_env: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            credentials_file: None,
            database_env: "OCRSTMT_DATABASE".to_string(),
        }
    }
}

/// Batch run configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Open the output folder when the batch finishes.
    pub reveal_output: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self { reveal_output: true }
    }
}

impl AppConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}
