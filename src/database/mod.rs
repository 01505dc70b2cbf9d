use std::fs::File;
use std::path::Path;

use rusqlite::{Connection, OpenFlags};

use crate::error::SourceError;

pub mod queries;
#[cfg(test)]
pub mod schema;

/// Open the event database read-only, failing fast when it is missing or
/// the process lacks permission to read it.
pub fn open_source(db_path: &Path) -> Result<Connection, SourceError> {
    if !db_path.exists() {
        return Err(SourceError::NotFound(db_path.to_path_buf()));
    }

    if File::open(db_path).is_err() {
        return Err(SourceError::Unreadable(db_path.to_path_buf()));
    }

    let conn = Connection::open_with_flags(
        db_path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .map_err(|source| SourceError::Query {
        path: db_path.to_path_buf(),
        source,
    })?;

    log::debug!("Opened {} read-only", db_path.display());
    Ok(conn)
}
