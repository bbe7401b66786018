//! Account lookup against the collections database.
//!
//! The database and its credentials are external collaborators; this module
//! only fixes their interfaces and ships a SQLite-backed implementation.

mod secrets;
mod sqlite;

pub use secrets::{EnvSecretProvider, FileSecretProvider, StaticSecretProvider};
pub use sqlite::{SqlRecordLookup, LOOKUP_SQL};

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::LookupError;
use crate::models::statement::LookupRow;

/// Result type for lookup operations.
pub type Result<T> = std::result::Result<T, LookupError>;

/// Finds the account rows belonging to a reference number.
pub trait RecordLookup {
    /// Return every MASTER/DEBTOR row whose forwarded reference equals
    /// `reference`. An absent reference matches nothing.
    fn lookup(&self, reference: Option<&str>) -> Result<Vec<LookupRow>>;
}

/// Supplies the settings needed to reach the database.
pub trait SecretProvider {
    fn connection_settings(&self) -> Result<ConnectionSettings>;
}

/// Everything needed to open a database connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionSettings {
    /// Location of the database.
    pub database: PathBuf,
}

impl<T: SecretProvider + ?Sized> SecretProvider for Box<T> {
    fn connection_settings(&self) -> Result<ConnectionSettings> {
        (**self).connection_settings()
    }
}

impl<T: RecordLookup + ?Sized> RecordLookup for Box<T> {
    fn lookup(&self, reference: Option<&str>) -> Result<Vec<LookupRow>> {
        (**self).lookup(reference)
    }
}
