// src/schema/header.rs

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::date::{self, DateColumn};
use crate::error::ValidationError;

/// The four fixed identity columns every header must open with, in order.
pub const IDENTITY_COLUMNS: [&str; 4] = ["Province/State", "Country/Region", "Lat", "Long"];

/// A validated header: the fixed identity prefix plus an ordered date axis.
/// All axis entries share one calendar year and never step backwards.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct HeaderSchema {
    pub date_axis: Vec<DateColumn>,
}

impl HeaderSchema {
    /// Number of count columns every data row must carry.
    pub fn axis_len(&self) -> usize {
        self.date_axis.len()
    }

    /// The column list echoed back on acceptance: identity names plus each
    /// axis date in its normalized `MM/DD/YYYY` form, so 2- and 4-digit
    /// submissions of the same dates confirm identically.
    pub fn accepted_columns(&self) -> Vec<String> {
        IDENTITY_COLUMNS
            .iter()
            .map(|c| c.to_string())
            .chain(self.date_axis.iter().map(|d| d.to_string()))
            .collect()
    }
}

/// Split a raw comma-delimited header declaration into column tokens.
pub fn split_columns(raw: &str) -> Vec<String> {
    raw.split(',').map(|s| s.trim().to_string()).collect()
}

/// Validate an ordered column list into a `HeaderSchema`.
///
/// Check order: identity prefix (exact, case-sensitive), then each date
/// token left to right (first parser failure wins), then the axis rules:
/// every year equal to `canonical_year` and dates non-decreasing. Year and
/// ordering violations report as the one merged `InvalidDateSequence` kind,
/// matching what callers have always seen on the wire.
pub fn validate_header(
    columns: &[String],
    canonical_year: i32,
) -> Result<HeaderSchema, ValidationError> {
    // Identity prefix plus at least one date column.
    if columns.len() <= IDENTITY_COLUMNS.len() {
        return Err(ValidationError::MissingOrMisorderedIdentityColumns);
    }
    for (got, want) in columns.iter().zip(IDENTITY_COLUMNS.iter()) {
        if got != want {
            debug!(got = got.as_str(), want, "identity column mismatch");
            return Err(ValidationError::MissingOrMisorderedIdentityColumns);
        }
    }

    let tokens = &columns[IDENTITY_COLUMNS.len()..];
    let mut date_axis: Vec<DateColumn> = Vec::with_capacity(tokens.len());
    for token in tokens {
        let parsed = date::parse(token)?;
        if parsed.year != canonical_year {
            debug!(token = token.as_str(), canonical_year, "year off the canonical year");
            return Err(ValidationError::InvalidDateSequence);
        }
        if let Some(prev) = date_axis.last() {
            if parsed < *prev {
                debug!(token = token.as_str(), "date axis regressed");
                return Err(ValidationError::InvalidDateSequence);
            }
        }
        date_axis.push(parsed);
    }

    Ok(HeaderSchema { date_axis })
}
