//! The immutable, chronologically ordered meeting table.

use std::path::Path;
use std::sync::Arc;

use meetings_core::error::Result;
use meetings_core::models::{MeetingRecord, RawMeetingRow};
use meetings_core::normalizer::FieldNormalizer;
use meetings_core::sequencer::{sequence, Month};

use crate::reader::load_raw_rows;

/// Normalised records sorted by month ordinal (stable).
///
/// Cloning is cheap; every clone shares the same records. Derived views are
/// built by the aggregator and never modify the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetingTable {
    records: Arc<[MeetingRecord]>,
}

impl MeetingTable {
    /// Normalise and sequence raw rows. Any bad row aborts the whole table.
    pub fn from_raw(rows: &[RawMeetingRow]) -> Result<Self> {
        let records = FieldNormalizer::normalize_table(rows)?;
        Ok(Self::from_records(records))
    }

    /// Sequence already-normalised records.
    pub fn from_records(records: Vec<MeetingRecord>) -> Self {
        Self {
            records: sequence(records).into(),
        }
    }

    /// Read, normalise and sequence the source at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let rows = load_raw_rows(path)?;
        Self::from_raw(&rows)
    }

    pub fn records(&self) -> &[MeetingRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct months present, in chronological order.
    pub fn months(&self) -> Vec<Month> {
        let mut months: Vec<Month> = Vec::new();
        for record in self.records.iter() {
            if months.last() != Some(&record.month) {
                months.push(record.month);
            }
        }
        months
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meetings_core::error::MeetingError;

    fn raw(contact: &str, month: &str) -> RawMeetingRow {
        RawMeetingRow {
            contact_name: Some(contact.to_string()),
            clinic_name: Some("Sol".to_string()),
            month: Some(month.to_string()),
            date: Some("01/10/2024".to_string()),
            time_of_day: Some("09:00:00".to_string()),
            contact_email: None,
        }
    }

    #[test]
    fn test_from_raw_sorts_chronologically() {
        let table = MeetingTable::from_raw(&[
            raw("a", "enero"),
            raw("b", "Septiembre"),
            raw("c", "diciembre"),
            raw("d", "enero"),
        ])
        .unwrap();

        let names: Vec<&str> = table
            .records()
            .iter()
            .map(|r| r.contact_name.as_str())
            .collect();
        assert_eq!(names, vec!["b", "c", "a", "d"]);
    }

    #[test]
    fn test_months_distinct_and_ordered() {
        let table = MeetingTable::from_raw(&[
            raw("a", "enero"),
            raw("b", "octubre"),
            raw("c", "enero"),
            raw("d", "octubre"),
        ])
        .unwrap();
        assert_eq!(table.months(), vec![Month::Octubre, Month::Enero]);
    }

    #[test]
    fn test_unknown_month_aborts_load() {
        let err = MeetingTable::from_raw(&[raw("a", "enero"), raw("b", "febrero")]).unwrap_err();
        assert!(matches!(err, MeetingError::UnknownMonth { row: 2, .. }));
    }

    #[test]
    fn test_empty_table() {
        let table = MeetingTable::from_raw(&[]).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
        assert!(table.months().is_empty());
    }

    #[test]
    fn test_clone_shares_records() {
        let table = MeetingTable::from_raw(&[raw("a", "enero")]).unwrap();
        let copy = table.clone();
        assert!(std::ptr::eq(table.records(), copy.records()));
    }
}
