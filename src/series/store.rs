// src/series/store.rs

use std::collections::HashMap;
use std::sync::Mutex;

use tracing::debug;

use super::kind::SeriesKind;
use super::row::DataRow;

/// In-memory, append-only table per series kind.
///
/// One mutex guards all three kinds so a multi-series batch commits as a
/// unit; there is no delete or update, only process restart clears it.
pub struct SeriesStore {
    tables: Mutex<HashMap<SeriesKind, Vec<DataRow>>>,
}

impl SeriesStore {
    pub fn new() -> Self {
        Self {
            tables: Mutex::new(HashMap::new()),
        }
    }

    pub fn append(&self, kind: SeriesKind, row: DataRow) {
        let mut tables = self.tables.lock().unwrap();
        tables.entry(kind).or_default().push(row);
    }

    /// Commit a validated batch under a single lock acquisition, so readers
    /// never observe a partially applied multi-series submission.
    pub fn append_batch(&self, rows: Vec<(SeriesKind, DataRow)>) {
        let mut tables = self.tables.lock().unwrap();
        debug!(rows = rows.len(), "committing batch");
        for (kind, row) in rows {
            tables.entry(kind).or_default().push(row);
        }
    }

    /// Rows for `kind` in insertion order; empty if nothing stored yet.
    pub fn view_all(&self, kind: SeriesKind) -> Vec<DataRow> {
        let tables = self.tables.lock().unwrap();
        tables.get(&kind).cloned().unwrap_or_default()
    }
}

impl Default for SeriesStore {
    fn default() -> Self {
        Self::new()
    }
}
