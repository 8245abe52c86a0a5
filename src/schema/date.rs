// src/schema/date.rs

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;

/// One date column of a header, parsed from `M/D/YY` or `MM/DD/YYYY`.
/// Two-digit years are normalized to `20YY` at parse time.
///
/// Field order makes the derived `Ord` chronological.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateColumn {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl fmt::Display for DateColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}/{:04}", self.month, self.day, self.year)
    }
}

/// Parse a single header date token.
///
/// The token must be exactly three `/`-separated numeric fields; any other
/// shape (including `-`-delimited dates) is `MalformedToken`. Month range is
/// checked before day range so the reported reason names the first bad
/// component. The day bound is a flat 1–31: the feed never carried per-month
/// calendar validation, so `02/31` parses.
pub fn parse(token: &str) -> Result<DateColumn, ValidationError> {
    let token = token.trim();
    let mut fields = token.split('/');
    let (month, day, year) = match (fields.next(), fields.next(), fields.next(), fields.next()) {
        (Some(m), Some(d), Some(y), None) => (m, d, y),
        _ => return Err(ValidationError::MalformedToken),
    };

    let month = numeric_field(month)?;
    if !(1..=12).contains(&month) {
        return Err(ValidationError::InvalidMonth);
    }

    let day = numeric_field(day)?;
    if !(1..=31).contains(&day) {
        return Err(ValidationError::InvalidDay);
    }

    let year = match year.len() {
        2 => 2000 + numeric_field(year)? as i32,
        4 => numeric_field(year)? as i32,
        _ => return Err(ValidationError::MalformedToken),
    };

    Ok(DateColumn { year, month, day })
}

fn numeric_field(s: &str) -> Result<u32, ValidationError> {
    if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::MalformedToken);
    }
    s.parse().map_err(|_| ValidationError::MalformedToken)
}
