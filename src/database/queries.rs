use std::path::Path;

use rusqlite::Connection;

use crate::error::SourceError;
use crate::models::RawUsageRow;

// Adapted from https://rud.is/b/2019/10/28/spelunking-macos-screentime-app-usage-with-r/
const USAGE_QUERY: &str = "
    SELECT
        ZOBJECT.ZVALUESTRING,
        (ZOBJECT.ZENDDATE - ZOBJECT.ZSTARTDATE),
        ZOBJECT.ZSTARTDATE,
        ZOBJECT.ZENDDATE,
        ZOBJECT.ZCREATIONDATE,
        ZOBJECT.ZSECONDSFROMGMT,
        ZSOURCE.ZDEVICEID,
        ZMODEL
    FROM
        ZOBJECT
        LEFT JOIN ZSTRUCTUREDMETADATA
            ON ZOBJECT.ZSTRUCTUREDMETADATA = ZSTRUCTUREDMETADATA.Z_PK
        LEFT JOIN ZSOURCE
            ON ZOBJECT.ZSOURCE = ZSOURCE.Z_PK
        LEFT JOIN ZSYNCPEER
            ON ZSOURCE.ZDEVICEID = ZSYNCPEER.ZDEVICEID
    WHERE
        ZSTREAMNAME = '/app/usage'
    ORDER BY
        ZSTARTDATE DESC";

/// All app-usage rows, newest start first. Timestamps stay relative to the
/// source's reference epoch.
pub fn fetch_usage_rows(
    conn: &Connection,
    db_path: &Path,
) -> Result<Vec<RawUsageRow>, SourceError> {
    let query_err = |source: rusqlite::Error| SourceError::Query {
        path: db_path.to_path_buf(),
        source,
    };

    let mut stmt = conn.prepare(USAGE_QUERY).map_err(query_err)?;

    let rows = stmt
        .query_map([], |row| {
            Ok(RawUsageRow {
                app: row.get(0)?,
                usage: row.get(1)?,
                start_time: row.get(2)?,
                end_time: row.get(3)?,
                created_at: row.get(4)?,
                timezone: row.get(5)?,
                device_id: row.get(6)?,
                device_model: row.get(7)?,
            })
        })
        .map_err(query_err)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(query_err)?;

    Ok(rows)
}
