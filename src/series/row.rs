// src/series/row.rs

use std::io::Cursor;

use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::kind::SeriesKind;
use crate::error::ValidationError;
use crate::schema::{HeaderSchema, IDENTITY_COLUMNS};

/// One validated observation row: the four identity fields plus one count
/// per date column of the schema it was validated against. Never mutated
/// after insertion.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DataRow {
    pub province_state: String,
    pub country_region: String,
    pub lat: f64,
    pub long: f64,
    pub counts: Vec<i64>,
}

impl DataRow {
    /// The flat mixed-type array shape the view endpoint serves:
    /// `[province, country, lat, long, count, count, ...]`.
    pub fn as_wire_row(&self) -> Vec<Value> {
        let mut row = Vec::with_capacity(IDENTITY_COLUMNS.len() + self.counts.len());
        row.push(Value::from(self.province_state.as_str()));
        row.push(Value::from(self.country_region.as_str()));
        row.push(Value::from(self.lat));
        row.push(Value::from(self.long));
        row.extend(self.counts.iter().map(|&c| Value::from(c)));
        row
    }
}

/// Validate a raw comma-delimited data row against the active schema.
///
/// The row must carry exactly the identity fields plus one count per axis
/// date (`ColumnCountMismatch` otherwise). Province may be empty; lat/long
/// must parse as floats; every count must be a non-negative integer, the
/// first violation aborting with `InvalidData` naming `kind`.
pub fn parse_row(
    kind: SeriesKind,
    raw: &str,
    schema: &HeaderSchema,
) -> Result<DataRow, ValidationError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(Cursor::new(raw.as_bytes()));

    let record = match rdr.records().next() {
        Some(Ok(record)) => record,
        Some(Err(e)) => {
            debug!(kind = kind.as_str(), error = %e, "unreadable data row");
            return Err(ValidationError::InvalidData(kind));
        }
        None => return Err(ValidationError::InvalidData(kind)),
    };

    let expected = IDENTITY_COLUMNS.len() + schema.axis_len();
    if record.len() != expected {
        debug!(
            kind = kind.as_str(),
            got = record.len(),
            expected,
            "row length does not match the date axis"
        );
        return Err(ValidationError::ColumnCountMismatch);
    }

    let province_state = record.get(0).unwrap_or("").trim().to_string();
    let country_region = record.get(1).unwrap_or("").trim().to_string();
    let lat: f64 = record
        .get(2)
        .unwrap_or("")
        .trim()
        .parse()
        .map_err(|_| ValidationError::InvalidData(kind))?;
    let long: f64 = record
        .get(3)
        .unwrap_or("")
        .trim()
        .parse()
        .map_err(|_| ValidationError::InvalidData(kind))?;

    let mut counts = Vec::with_capacity(schema.axis_len());
    for cell in record.iter().skip(IDENTITY_COLUMNS.len()) {
        let count: i64 = cell
            .trim()
            .parse()
            .map_err(|_| ValidationError::InvalidData(kind))?;
        if count < 0 {
            debug!(kind = kind.as_str(), count, "negative count");
            return Err(ValidationError::InvalidData(kind));
        }
        counts.push(count);
    }

    Ok(DataRow {
        province_state,
        country_region,
        lat,
        long,
        counts,
    })
}
