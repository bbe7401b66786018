//! SQLite-backed account lookup.

use rusqlite::types::ValueRef;
use rusqlite::{params, Connection, OpenFlags, Row};
use tracing::{debug, warn};

use super::{ConnectionSettings, RecordLookup, Result, SecretProvider};
use crate::error::LookupError;
use crate::models::statement::LookupRow;

/// MASTER/DEBTOR join keyed on the forwarded reference number.
pub const LOOKUP_SQL: &str = "
    SELECT m.FILENO, m.FORW_FILENO, m.FORW_REFNO, d.NAME,
           m.CHARGE_OFF, m.ORIG_CLAIM, m.CHARGE_OFF_DATE
    FROM MASTER m INNER JOIN DEBTOR d ON m.FILENO = d.FILENO
    WHERE m.FORW_REFNO = ?1
";

/// Account lookup over a SQLite database.
///
/// Settings are requested from the provider and a fresh read-only connection
/// is opened for every lookup, then closed before returning.
pub struct SqlRecordLookup<P> {
    secrets: P,
}

impl<P: SecretProvider> SqlRecordLookup<P> {
    pub fn new(secrets: P) -> Self {
        Self { secrets }
    }

    fn connect(&self, settings: &ConnectionSettings) -> Result<Connection> {
        Connection::open_with_flags(&settings.database, OpenFlags::SQLITE_OPEN_READ_ONLY).map_err(
            |e| LookupError::Connect {
                database: settings.database.display().to_string(),
                reason: e.to_string(),
            },
        )
    }
}

impl<P: SecretProvider> RecordLookup for SqlRecordLookup<P> {
    fn lookup(&self, reference: Option<&str>) -> Result<Vec<LookupRow>> {
        let settings = self.secrets.connection_settings()?;
        let conn = self.connect(&settings)?;

        let result = query_rows(&conn, reference);

        if let Err((_, e)) = conn.close() {
            warn!("Failed to close connection to {}: {}", settings.database.display(), e);
        }

        let rows = result?;
        debug!("Lookup for {:?} returned {} rows", reference, rows.len());
        Ok(rows)
    }
}

fn query_rows(conn: &Connection, reference: Option<&str>) -> Result<Vec<LookupRow>> {
    let mut stmt = conn
        .prepare(LOOKUP_SQL)
        .map_err(|e| LookupError::Query(e.to_string()))?;

    let rows = stmt
        .query_map(params![reference], |row| {
            Ok(LookupRow {
                file_number: text_at(row, 0)?,
                forwarded_file_number: text_at(row, 1)?,
                forwarded_reference: text_at(row, 2)?,
                debtor_name: text_at(row, 3)?,
                charge_off: text_at(row, 4)?,
                original_claim: text_at(row, 5)?,
                charge_off_date: text_at(row, 6)?,
            })
        })
        .map_err(|e| LookupError::Query(e.to_string()))?;

    rows.collect::<rusqlite::Result<Vec<_>>>()
        .map_err(|e| LookupError::Query(e.to_string()))
}

/// Render any column value as text; NULL becomes an empty string.
fn text_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<String> {
    Ok(match row.get_ref(idx)? {
        ValueRef::Null => String::new(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(f) => f.to_string(),
        ValueRef::Text(t) | ValueRef::Blob(t) => String::from_utf8_lossy(t).into_owned(),
    })
}
