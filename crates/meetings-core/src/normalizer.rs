use chrono::{NaiveDate, NaiveTime};
use tracing::debug;

use crate::error::{MeetingError, Result};
use crate::models::{MeetingRecord, RawMeetingRow, DATE_FORMAT, TIME_FORMAT};
use crate::sequencer::Month;

// ── FieldNormalizer ───────────────────────────────────────────────────────────

/// Turns raw source rows into typed [`MeetingRecord`]s.
///
/// `row` arguments are 1-based data row numbers (header excluded) and are
/// only used to identify the offending row in errors.
pub struct FieldNormalizer;

impl FieldNormalizer {
    /// Trim surrounding whitespace; a missing field becomes `""`.
    pub fn clean_text(raw: Option<&str>) -> String {
        raw.map(str::trim).unwrap_or_default().to_string()
    }

    /// Lower-case and trim a month, then resolve it against the vocabulary.
    pub fn normalize_month(raw: Option<&str>, row: usize) -> Result<Month> {
        let key = Self::clean_text(raw).to_lowercase();
        Month::from_name(&key).ok_or(MeetingError::UnknownMonth { row, value: key })
    }

    /// Parse `HH:MM:SS`.
    pub fn parse_time(raw: Option<&str>, row: usize) -> Result<NaiveTime> {
        let text = Self::clean_text(raw);
        NaiveTime::parse_from_str(&text, TIME_FORMAT)
            .map_err(|_| MeetingError::MalformedTime { row, value: text })
    }

    /// Parse `DD/MM/YYYY`.
    pub fn parse_date(raw: Option<&str>, row: usize) -> Result<NaiveDate> {
        let text = Self::clean_text(raw);
        NaiveDate::parse_from_str(&text, DATE_FORMAT)
            .map_err(|_| MeetingError::MalformedDate { row, value: text })
    }

    /// Normalise a single row.
    pub fn normalize(raw: &RawMeetingRow, row: usize) -> Result<MeetingRecord> {
        Ok(MeetingRecord {
            contact_name: Self::clean_text(raw.contact_name.as_deref()),
            clinic_name: Self::clean_text(raw.clinic_name.as_deref()),
            month: Self::normalize_month(raw.month.as_deref(), row)?,
            date: Self::parse_date(raw.date.as_deref(), row)?,
            time_of_day: Self::parse_time(raw.time_of_day.as_deref(), row)?,
            contact_email: raw.contact_email.clone().unwrap_or_default(),
        })
    }

    /// Normalise a whole table. The first bad row aborts the load.
    pub fn normalize_table(rows: &[RawMeetingRow]) -> Result<Vec<MeetingRecord>> {
        let records = rows
            .iter()
            .enumerate()
            .map(|(i, raw)| Self::normalize(raw, i + 1))
            .collect::<Result<Vec<_>>>()?;
        debug!(rows = records.len(), "normalised meeting table");
        Ok(records)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
