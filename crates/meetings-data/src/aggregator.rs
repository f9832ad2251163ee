//! Grouped counts over a (possibly month-filtered) set of meetings.
//!
//! Every function is total: an empty input yields an empty result, and the
//! input slice is never modified.

use std::collections::{BTreeMap, HashMap};

use meetings_core::models::MeetingRecord;
use meetings_core::sequencer::{Month, MonthFilter};
use meetings_core::time_bands::TimeBand;
use serde::Serialize;

// ── Result rows ───────────────────────────────────────────────────────────────

/// Meetings held in one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthCount {
    pub month: Month,
    pub meetings: usize,
}

/// Meetings starting within one time band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BandCount {
    pub band: TimeBand,
    pub meetings: usize,
}

/// Meetings attributed to one CRM contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactCount {
    pub contact: String,
    pub meetings: usize,
}

/// Meetings on one day of the month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayCount {
    pub day: u32,
    pub meetings: usize,
}

/// Clinics met during one month, in table order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthClinics {
    pub month: Month,
    pub clinics: Vec<String>,
}

// ── MeetingAggregator ─────────────────────────────────────────────────────────

/// Stateless helper that groups meetings.
pub struct MeetingAggregator;

impl MeetingAggregator {
    /// One entry per month present, in chronological order.
    pub fn count_by_month(records: &[MeetingRecord]) -> Vec<MonthCount> {
        // `Month`'s ordering is the cycle order, so the map iterates
        // chronologically.
        let mut map: BTreeMap<Month, usize> = BTreeMap::new();
        for record in records {
            *map.entry(record.month).or_default() += 1;
        }
        map.into_iter()
            .map(|(month, meetings)| MonthCount { month, meetings })
            .collect()
    }

    /// One entry per non-empty band, in band order. Meetings outside every
    /// band are not counted here.
    pub fn count_by_time_band(records: &[MeetingRecord]) -> Vec<BandCount> {
        let mut map: BTreeMap<TimeBand, usize> = BTreeMap::new();
        for band in records.iter().filter_map(MeetingRecord::time_band) {
            *map.entry(band).or_default() += 1;
        }
        map.into_iter()
            .map(|(band, meetings)| BandCount { band, meetings })
            .collect()
    }

    /// The `limit` contacts with most meetings, descending. Ties keep the
    /// order in which contacts were first seen.
    pub fn top_contacts(records: &[MeetingRecord], limit: usize) -> Vec<ContactCount> {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut counts: Vec<ContactCount> = Vec::new();

        for record in records {
            let name = record.contact_name.as_str();
            match index.get(name) {
                Some(&i) => counts[i].meetings += 1,
                None => {
                    index.insert(name, counts.len());
                    counts.push(ContactCount {
                        contact: name.to_string(),
                        meetings: 1,
                    });
                }
            }
        }

        // Stable sort keeps first-seen order among equal counts.
        counts.sort_by(|a, b| b.meetings.cmp(&a.meetings));
        counts.truncate(limit);
        counts
    }

    /// One entry per day of the month present, ascending by day.
    pub fn count_by_day(records: &[MeetingRecord]) -> Vec<DayCount> {
        let mut map: BTreeMap<u32, usize> = BTreeMap::new();
        for record in records {
            *map.entry(record.day_of_month()).or_default() += 1;
        }
        map.into_iter()
            .map(|(day, meetings)| DayCount { day, meetings })
            .collect()
    }

    /// Clinic names per month, chronologically.
    pub fn clinics_by_month(records: &[MeetingRecord]) -> Vec<MonthClinics> {
        let mut map: BTreeMap<Month, Vec<String>> = BTreeMap::new();
        for record in records {
            map.entry(record.month)
                .or_default()
                .push(record.clinic_name.clone());
        }
        map.into_iter()
            .map(|(month, clinics)| MonthClinics { month, clinics })
            .collect()
    }

    /// Records passing `filter`, in input order. [`MonthFilter::All`] returns
    /// every record.
    pub fn filter_by_month(records: &[MeetingRecord], filter: &MonthFilter) -> Vec<MeetingRecord> {
        records
            .iter()
            .filter(|r| filter.matches(r.month))
            .cloned()
            .collect()
    }

    /// First band (in band order) holding the highest count.
    pub fn busiest_band(bands: &[BandCount]) -> Option<TimeBand> {
        let max = bands.iter().map(|b| b.meetings).max()?;
        bands.iter().find(|b| b.meetings == max).map(|b| b.band)
    }

    /// First band (in band order) holding the lowest non-zero count.
    pub fn quietest_band(bands: &[BandCount]) -> Option<TimeBand> {
        let min = bands.iter().map(|b| b.meetings).filter(|&n| n > 0).min()?;
        bands.iter().find(|b| b.meetings == min).map(|b| b.band)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn make_record(contact: &str, month: Month, day: u32, hour: u32) -> MeetingRecord {
        MeetingRecord {
            contact_name: contact.to_string(),
            clinic_name: format!("Clinica {contact}"),
            month,
            date: NaiveDate::from_ymd_opt(2024, 10, day).unwrap(),
            time_of_day: NaiveTime::from_hms_opt(hour, 15, 0).unwrap(),
            contact_email: String::new(),
        }
    }

    fn scenario() -> Vec<MeetingRecord> {
        vec![
            make_record("a", Month::Enero, 2, 9),
            make_record("b", Month::Septiembre, 3, 14),
            make_record("c", Month::Enero, 2, 9),
        ]
    }

    // ── count_by_month ────────────────────────────────────────────────────────

    #[test]
    fn test_count_by_month_chronological() {
        let counts = MeetingAggregator::count_by_month(&scenario());
        assert_eq!(
            counts,
            vec![
                MonthCount { month: Month::Septiembre, meetings: 1 },
                MonthCount { month: Month::Enero, meetings: 2 },
            ]
        );
    }

    #[test]
    fn test_count_by_month_preserves_total() {
        let records = vec![
            make_record("a", Month::Diciembre, 1, 9),
            make_record("b", Month::Octubre, 1, 9),
            make_record("c", Month::Noviembre, 1, 22),
            make_record("d", Month::Octubre, 1, 7),
        ];
        let total: usize = MeetingAggregator::count_by_month(&records)
            .iter()
            .map(|c| c.meetings)
            .sum();
        assert_eq!(total, records.len());
    }

    // ── count_by_time_band ────────────────────────────────────────────────────

    #[test]
    fn test_count_by_time_band_scenario() {
        let counts = MeetingAggregator::count_by_time_band(&scenario());
        assert_eq!(
            counts,
            vec![
                BandCount { band: TimeBand::H8To10, meetings: 2 },
                BandCount { band: TimeBand::H14To16, meetings: 1 },
            ]
        );
    }

    #[test]
    fn test_count_by_time_band_partition() {
        let records: Vec<MeetingRecord> = (0..24)
            .map(|h| make_record("a", Month::Octubre, 1, h))
            .collect();
        let banded: usize = MeetingAggregator::count_by_time_band(&records)
            .iter()
            .map(|b| b.meetings)
            .sum();
        let unbanded = records.iter().filter(|r| r.time_band().is_none()).count();
        assert_eq!(banded + unbanded, records.len());
        assert_eq!(banded, 12);
    }

    #[test]
    fn test_count_by_time_band_boundary_hour() {
        let counts = MeetingAggregator::count_by_time_band(&[make_record("a", Month::Enero, 1, 10)]);
        assert_eq!(counts[0].band, TimeBand::H10To12);
    }

    // ── top_contacts ──────────────────────────────────────────────────────────

    #[test]
    fn test_top_contacts_descending_with_first_seen_ties() {
        let records = vec![
            make_record("zoe", Month::Octubre, 1, 9),
            make_record("ana", Month::Octubre, 1, 9),
            make_record("luis", Month::Octubre, 1, 9),
            make_record("luis", Month::Octubre, 1, 9),
            make_record("ana", Month::Octubre, 1, 9),
            make_record("eva", Month::Octubre, 1, 9),
        ];
        let top = MeetingAggregator::top_contacts(&records, 5);
        let names: Vec<&str> = top.iter().map(|c| c.contact.as_str()).collect();
        assert_eq!(names, vec!["ana", "luis", "zoe", "eva"]);
        assert_eq!(top[0].meetings, 2);
    }

    #[test]
    fn test_top_contacts_limit() {
        let records: Vec<MeetingRecord> = (1..=8)
            .map(|i| make_record(&format!("c{i}"), Month::Octubre, 1, 9))
            .collect();
        let top = MeetingAggregator::top_contacts(&records, 5);
        assert_eq!(top.len(), 5);
        assert!(top.windows(2).all(|w| w[0].meetings >= w[1].meetings));
        assert!(MeetingAggregator::top_contacts(&records, 0).is_empty());
    }

    // ── count_by_day ──────────────────────────────────────────────────────────

    #[test]
    fn test_count_by_day_ascending() {
        let records = vec![
            make_record("a", Month::Octubre, 21, 9),
            make_record("b", Month::Octubre, 3, 9),
            make_record("c", Month::Octubre, 21, 9),
        ];
        assert_eq!(
            MeetingAggregator::count_by_day(&records),
            vec![
                DayCount { day: 3, meetings: 1 },
                DayCount { day: 21, meetings: 2 },
            ]
        );
    }

    // ── clinics_by_month ──────────────────────────────────────────────────────

    #[test]
    fn test_clinics_by_month() {
        let details = MeetingAggregator::clinics_by_month(&scenario());
        assert_eq!(details[0].month, Month::Septiembre);
        assert_eq!(details[0].clinics, vec!["Clinica b".to_string()]);
        assert_eq!(details[1].clinics.len(), 2);
    }

    // ── filter_by_month ───────────────────────────────────────────────────────

    #[test]
    fn test_filter_by_month_exact() {
        let records = scenario();
        let filtered = MeetingAggregator::filter_by_month(&records, &MonthFilter::Only(Month::Enero));
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|r| r.month == Month::Enero));
    }

    #[test]
    fn test_filter_by_month_all_is_unchanged() {
        let records = scenario();
        let filtered = MeetingAggregator::filter_by_month(&records, &MonthFilter::All);
        assert_eq!(filtered, records);
    }

    #[test]
    fn test_filter_by_month_absent_month() {
        let filtered =
            MeetingAggregator::filter_by_month(&scenario(), &MonthFilter::Only(Month::Noviembre));
        assert!(filtered.is_empty());
    }

    // ── band extremes ─────────────────────────────────────────────────────────

    #[test]
    fn test_busiest_and_quietest_band() {
        let bands = MeetingAggregator::count_by_time_band(&scenario());
        assert_eq!(MeetingAggregator::busiest_band(&bands), Some(TimeBand::H8To10));
        assert_eq!(MeetingAggregator::quietest_band(&bands), Some(TimeBand::H14To16));
    }

    #[test]
    fn test_band_extremes_tie_picks_earliest() {
        let records = vec![
            make_record("a", Month::Enero, 1, 16),
            make_record("b", Month::Enero, 1, 11),
        ];
        let bands = MeetingAggregator::count_by_time_band(&records);
        assert_eq!(MeetingAggregator::busiest_band(&bands), Some(TimeBand::H10To12));
        assert_eq!(MeetingAggregator::quietest_band(&bands), Some(TimeBand::H10To12));
    }

    // ── degenerate input ──────────────────────────────────────────────────────

    #[test]
    fn test_empty_input() {
        assert!(MeetingAggregator::count_by_month(&[]).is_empty());
        assert!(MeetingAggregator::count_by_time_band(&[]).is_empty());
        assert!(MeetingAggregator::top_contacts(&[], 5).is_empty());
        assert!(MeetingAggregator::count_by_day(&[]).is_empty());
        assert!(MeetingAggregator::clinics_by_month(&[]).is_empty());
        assert!(MeetingAggregator::filter_by_month(&[], &MonthFilter::All).is_empty());
        assert_eq!(MeetingAggregator::busiest_band(&[]), None);
        assert_eq!(MeetingAggregator::quietest_band(&[]), None);
    }
}
