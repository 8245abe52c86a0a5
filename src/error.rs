// src/error.rs

use thiserror::Error;

use crate::series::SeriesKind;

/// Every reason a header or data submission can be rejected. Handlers map
/// each variant to the exact wire text the legacy clients branch on; the
/// validators themselves never format HTTP responses.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Date token was not two `/`-separated numeric fields of a known width.
    #[error("malformed date token")]
    MalformedToken,

    #[error("month out of range")]
    InvalidMonth,

    #[error("day out of range")]
    InvalidDay,

    /// Covers both a year off the canonical year and an out-of-order date.
    /// The legacy service reported these as one reason; keep them merged.
    #[error("date axis breaks year or ordering consistency")]
    InvalidDateSequence,

    #[error("identity columns missing or misordered")]
    MissingOrMisorderedIdentityColumns,

    #[error("no header established")]
    NoActiveSchema,

    #[error("row length does not match the date axis")]
    ColumnCountMismatch,

    #[error("invalid data for {0}")]
    InvalidData(SeriesKind),

    /// The sqlite mirror could not be reached or written. The only variant a
    /// caller may reasonably retry; never produced by validation itself.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
}
