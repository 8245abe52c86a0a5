// src/db/mod.rs

use std::path::Path;
use std::sync::Mutex;

use rusqlite::{params, Connection};
use tracing::info;

use crate::error::ValidationError;
use crate::series::{DataRow, SeriesKind};

/// Fixed on-disk location of the time-series database.
pub const DEFAULT_DB_PATH: &str = "databases/timeseries.db";

/// Open the time-series database at `path`, creating the file if it doesn't
/// exist. Returns the connection or the reason it could not be opened;
/// callers see failures as `StorageUnavailable`, never as a validation error.
pub fn timeseries_connection<P: AsRef<Path>>(path: P) -> Result<Connection, ValidationError> {
    Connection::open(path.as_ref()).map_err(storage_err)
}

/// Sqlite mirror of the in-memory store.
///
/// Batches land here inside one transaction before the in-memory commit, so
/// a storage failure rejects the whole submission with nothing applied.
pub struct Db {
    conn: Mutex<Connection>,
}

impl Db {
    pub fn new(conn: Connection) -> Result<Self, ValidationError> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS observations (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                kind TEXT NOT NULL,
                province_state TEXT NOT NULL,
                country_region TEXT NOT NULL,
                lat REAL NOT NULL,
                long REAL NOT NULL,
                counts TEXT NOT NULL
            );",
            [],
        )
        .map_err(storage_err)?;
        info!("observations table ready");
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Insert a validated batch inside one transaction. Counts are stored as
    /// a JSON array string, one row per series kind.
    pub fn insert_batch(&self, rows: &[(SeriesKind, DataRow)]) -> Result<(), ValidationError> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction().map_err(storage_err)?;
        for (kind, row) in rows {
            let counts = serde_json::to_string(&row.counts)
                .map_err(|e| ValidationError::StorageUnavailable(e.to_string()))?;
            tx.execute(
                "INSERT INTO observations
                    (kind, province_state, country_region, lat, long, counts)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
                params![
                    kind.as_str(),
                    row.province_state,
                    row.country_region,
                    row.lat,
                    row.long,
                    counts
                ],
            )
            .map_err(storage_err)?;
        }
        tx.commit().map_err(storage_err)
    }

    /// Number of mirrored rows for `kind`.
    pub fn count(&self, kind: SeriesKind) -> Result<i64, ValidationError> {
        let conn = self.conn.lock().unwrap();
        conn.query_row(
            "SELECT COUNT(*) FROM observations WHERE kind = ?1;",
            params![kind.as_str()],
            |r| r.get(0),
        )
        .map_err(storage_err)
    }
}

fn storage_err(e: rusqlite::Error) -> ValidationError {
    ValidationError::StorageUnavailable(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn row(counts: Vec<i64>) -> DataRow {
        DataRow {
            province_state: String::new(),
            country_region: "Afghanistan".to_string(),
            lat: 33.93911,
            long: 67.709953,
            counts,
        }
    }

    #[test]
    fn opens_and_bootstraps_a_fresh_database() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("timeseries.db");
        let conn = timeseries_connection(&path).unwrap();
        let db = Db::new(conn).unwrap();
        assert_eq!(db.count(SeriesKind::Confirmed).unwrap(), 0);
    }

    #[test]
    fn open_failure_is_storage_unavailable() {
        let tmp = tempdir().unwrap();
        let missing_dir = tmp.path().join("no_such_dir").join("timeseries.db");
        let err = timeseries_connection(&missing_dir).unwrap_err();
        assert!(matches!(err, ValidationError::StorageUnavailable(_)));
    }

    #[test]
    fn batch_insert_mirrors_every_series() {
        let tmp = tempdir().unwrap();
        let conn = timeseries_connection(tmp.path().join("timeseries.db")).unwrap();
        let db = Db::new(conn).unwrap();

        db.insert_batch(&[
            (SeriesKind::Confirmed, row(vec![1, 2])),
            (SeriesKind::Death, row(vec![0, 0])),
            (SeriesKind::Recovered, row(vec![0, 1])),
        ])
        .unwrap();

        for kind in SeriesKind::CHECK_ORDER {
            assert_eq!(db.count(kind).unwrap(), 1);
        }
    }

    #[test]
    fn reopening_keeps_mirrored_rows() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("timeseries.db");
        {
            let db = Db::new(timeseries_connection(&path).unwrap()).unwrap();
            db.insert_batch(&[(SeriesKind::Confirmed, row(vec![7]))])
                .unwrap();
        }
        let db = Db::new(timeseries_connection(&path).unwrap()).unwrap();
        assert_eq!(db.count(SeriesKind::Confirmed).unwrap(), 1);
    }
}
