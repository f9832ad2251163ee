//! Query pipeline for the presentation layer.
//!
//! Normalises and sequences the raw table, applies the month filter and runs
//! every aggregation, returning a [`QueryResult`] ready to render.

use meetings_core::error::Result;
use meetings_core::models::{MeetingRecord, RawMeetingRow};
use meetings_core::sequencer::MonthFilter;
use meetings_core::settings::DEFAULT_TOP_CONTACTS;
use meetings_core::time_bands::TimeBand;
use serde::Serialize;
use tracing::debug;

use crate::aggregator::{
    BandCount, ContactCount, DayCount, MeetingAggregator, MonthClinics, MonthCount,
};
use crate::table::MeetingTable;

// ── Public types ──────────────────────────────────────────────────────────────

/// Scalar metrics for the current filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryMetrics {
    /// Meetings passing the filter, banded or not.
    pub total_meetings: usize,
    /// Band with the most meetings, `None` when no meeting is banded.
    pub busiest_band: Option<TimeBand>,
    /// Band with the fewest (non-zero) meetings.
    pub quietest_band: Option<TimeBand>,
}

/// The complete output of [`query`].
#[derive(Debug, Clone, Serialize)]
pub struct QueryResult {
    /// Filter the result was computed for.
    pub filter: MonthFilter,
    pub counts_by_month: Vec<MonthCount>,
    pub counts_by_band: Vec<BandCount>,
    pub top_contacts: Vec<ContactCount>,
    pub counts_by_day: Vec<DayCount>,
    pub clinics_by_month: Vec<MonthClinics>,
    /// Records passing the filter, in chronological order.
    pub filtered_records: Vec<MeetingRecord>,
    pub metrics: SummaryMetrics,
}

// ── Public functions ──────────────────────────────────────────────────────────

/// Run the full pipeline over raw rows with the default top-contacts limit.
///
/// Fails only while normalising; aggregation never fails.
pub fn query(raw: &[RawMeetingRow], filter: &MonthFilter) -> Result<QueryResult> {
    let table = MeetingTable::from_raw(raw)?;
    Ok(query_table(&table, filter, DEFAULT_TOP_CONTACTS))
}

/// Filter and aggregate an already loaded table.
pub fn query_table(table: &MeetingTable, filter: &MonthFilter, top_limit: usize) -> QueryResult {
    let filtered = MeetingAggregator::filter_by_month(table.records(), filter);

    let counts_by_band = MeetingAggregator::count_by_time_band(&filtered);
    let metrics = SummaryMetrics {
        total_meetings: filtered.len(),
        busiest_band: MeetingAggregator::busiest_band(&counts_by_band),
        quietest_band: MeetingAggregator::quietest_band(&counts_by_band),
    };

    debug!(
        filter = %filter,
        table = table.len(),
        filtered = filtered.len(),
        "query computed"
    );

    QueryResult {
        filter: *filter,
        counts_by_month: MeetingAggregator::count_by_month(&filtered),
        counts_by_band,
        top_contacts: MeetingAggregator::top_contacts(&filtered, top_limit),
        counts_by_day: MeetingAggregator::count_by_day(&filtered),
        clinics_by_month: MeetingAggregator::clinics_by_month(&filtered),
        filtered_records: filtered,
        metrics,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
