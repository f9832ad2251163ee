//! Chronological ordering of the September → January meeting cycle.
//!
//! The cycle crosses a calendar-year boundary, so January is ranked 13 rather
//! than 1. Sorting by [`Month::ordinal`] therefore yields calendar order
//! without tracking the year.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MeetingError;
use crate::models::MeetingRecord;

// ── Month ─────────────────────────────────────────────────────────────────────

/// One month of the meeting cycle.
///
/// Variants are declared in cycle order, so the derived `Ord` agrees with
/// [`Month::ordinal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Month {
    Septiembre,
    Octubre,
    Noviembre,
    Diciembre,
    Enero,
}

impl Month {
    /// The whole vocabulary, in chronological order.
    pub const ALL: [Month; 5] = [
        Month::Septiembre,
        Month::Octubre,
        Month::Noviembre,
        Month::Diciembre,
        Month::Enero,
    ];

    /// Normalised key as it appears in the source (`"enero"`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            Month::Septiembre => "septiembre",
            Month::Octubre => "octubre",
            Month::Noviembre => "noviembre",
            Month::Diciembre => "diciembre",
            Month::Enero => "enero",
        }
    }

    /// Sort key: 9 for September through 13 for January.
    pub fn ordinal(self) -> u8 {
        match self {
            Month::Septiembre => 9,
            Month::Octubre => 10,
            Month::Noviembre => 11,
            Month::Diciembre => 12,
            Month::Enero => 13,
        }
    }

    /// Look up a month by its normalised key. Surrounding whitespace and case
    /// are ignored.
    pub fn from_name(name: &str) -> Option<Month> {
        let key = name.trim().to_lowercase();
        Month::ALL.into_iter().find(|m| m.as_str() == key)
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordinal for a raw month string, `None` when it is outside the vocabulary.
pub fn month_ordinal(name: &str) -> Option<u8> {
    Month::from_name(name).map(Month::ordinal)
}

/// Sort `records` ascending by month ordinal. Ties keep their input order.
pub fn sequence(mut records: Vec<MeetingRecord>) -> Vec<MeetingRecord> {
    records.sort_by_key(|r| r.month.ordinal());
    records
}

// ── MonthFilter ───────────────────────────────────────────────────────────────

/// Sentinel accepted by [`MonthFilter::from_str`] for "no filter".
pub const ALL_MONTHS: &str = "all";

/// Labels also accepted for the sentinel.
const ALL_MONTHS_LABELS: [&str; 2] = ["all meetings", "todos los meses"];

/// Month selection applied before aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonthFilter {
    /// Every record, unmodified.
    #[default]
    All,
    /// Only records of one month.
    Only(Month),
}

impl MonthFilter {
    /// `true` when `month` passes the filter.
    pub fn matches(&self, month: Month) -> bool {
        match self {
            MonthFilter::All => true,
            MonthFilter::Only(m) => *m == month,
        }
    }

    /// Key used in export file names and persisted settings.
    pub fn as_str(&self) -> &'static str {
        match self {
            MonthFilter::All => ALL_MONTHS,
            MonthFilter::Only(m) => m.as_str(),
        }
    }
}

impl FromStr for MonthFilter {
    type Err = MeetingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        if key == ALL_MONTHS || ALL_MONTHS_LABELS.contains(&key.as_str()) {
            return Ok(MonthFilter::All);
        }
        Month::from_name(&key)
            .map(MonthFilter::Only)
            .ok_or_else(|| MeetingError::InvalidFilter(s.to_string()))
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
