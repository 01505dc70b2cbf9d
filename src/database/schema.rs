//! Minimal slice of the knowledgeC Core Data schema, enough to exercise the
//! usage query against a throwaway database.

use std::path::Path;

use anyhow::Result;
use rusqlite::{params, Connection};

pub fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS ZSTRUCTUREDMETADATA (
            Z_PK INTEGER PRIMARY KEY
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS ZSOURCE (
            Z_PK INTEGER PRIMARY KEY,
            ZDEVICEID TEXT
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS ZSYNCPEER (
            Z_PK INTEGER PRIMARY KEY,
            ZDEVICEID TEXT,
            ZMODEL TEXT
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS ZOBJECT (
            Z_PK INTEGER PRIMARY KEY,
            ZSTREAMNAME TEXT,
            ZVALUESTRING TEXT,
            ZSTARTDATE REAL,
            ZENDDATE REAL,
            ZCREATIONDATE REAL,
            ZSECONDSFROMGMT INTEGER,
            ZSTRUCTUREDMETADATA INTEGER,
            ZSOURCE INTEGER
        )",
        [],
    )?;

    Ok(())
}

/// Create an empty database file with the tables in place.
pub fn create_fixture(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path)?;
    create_tables(&conn)?;
    Ok(conn)
}

pub fn insert_peer(conn: &Connection, source_pk: i64, device_id: &str, model: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO ZSOURCE (Z_PK, ZDEVICEID) VALUES (?1, ?2)",
        params![source_pk, device_id],
    )?;
    conn.execute(
        "INSERT INTO ZSYNCPEER (ZDEVICEID, ZMODEL) VALUES (?1, ?2)",
        params![device_id, model],
    )?;
    Ok(())
}

pub fn insert_object(
    conn: &Connection,
    stream: &str,
    app: &str,
    start: f64,
    end: f64,
    created: f64,
    source_pk: Option<i64>,
) -> Result<()> {
    conn.execute(
        "INSERT INTO ZOBJECT
            (ZSTREAMNAME, ZVALUESTRING, ZSTARTDATE, ZENDDATE, ZCREATIONDATE,
             ZSECONDSFROMGMT, ZSOURCE)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![stream, app, start, end, created, 3600i64, source_pk],
    )?;
    Ok(())
}
