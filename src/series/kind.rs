// src/series/kind.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which series a row belongs to. Purely a partition key into the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    Confirmed,
    Death,
    Recovered,
}

impl SeriesKind {
    /// Fixed check order for multi-series submissions: the first failing
    /// series in this order is the one named back to the caller.
    pub const CHECK_ORDER: [SeriesKind; 3] = [
        SeriesKind::Confirmed,
        SeriesKind::Death,
        SeriesKind::Recovered,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SeriesKind::Confirmed => "confirmed",
            SeriesKind::Death => "death",
            SeriesKind::Recovered => "recovered",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "confirmed" => Some(SeriesKind::Confirmed),
            "death" => Some(SeriesKind::Death),
            "recovered" => Some(SeriesKind::Recovered),
            _ => None,
        }
    }
}

impl fmt::Display for SeriesKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
