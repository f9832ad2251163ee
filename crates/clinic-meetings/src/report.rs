//! Plain-text rendering of a [`QueryResult`].

use std::fmt::Write;
use std::path::Path;

use meetings_core::error::MeetingError;
use meetings_core::formatting::{capitalize, format_count, percentage, render_bar};
use meetings_core::sequencer::MonthFilter;
use meetings_data::query::QueryResult;

const BAR_WIDTH: usize = 30;

/// Render the summary for the terminal.
pub fn render(result: &QueryResult) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_report(&mut out, result);
    out
}

/// Headline for a failed load of `path`.
///
/// Bad rows get their own wording so the user knows to fix the file rather
/// than its location.
pub fn load_failure_message(err: &MeetingError, path: &Path) -> String {
    if err.is_data_error() {
        format!("invalid data in {}", path.display())
    } else {
        format!("could not load {}", path.display())
    }
}

fn write_report(out: &mut String, result: &QueryResult) -> std::fmt::Result {
    writeln!(out, "Reuniones por Mes")?;
    let max = result.counts_by_month.iter().map(|c| c.meetings).max().unwrap_or(0);
    for row in &result.counts_by_month {
        writeln!(
            out,
            "  {:<12} {:>5}  {}",
            capitalize(row.month.as_str()),
            format_count(row.meetings),
            render_bar(row.meetings, max, BAR_WIDTH)
        )?;
    }
    if result.counts_by_month.is_empty() {
        writeln!(out, "  (sin reuniones)")?;
    }

    writeln!(out)?;
    writeln!(out, "Franjas Horarias")?;
    let max = result.counts_by_band.iter().map(|b| b.meetings).max().unwrap_or(0);
    let total = result.metrics.total_meetings;
    for row in &result.counts_by_band {
        writeln!(
            out,
            "  {:<6} {:>5} {:>6.1}%  {}",
            row.band.label(),
            format_count(row.meetings),
            percentage(row.meetings, total, 1),
            render_bar(row.meetings, max, BAR_WIDTH)
        )?;
    }

    writeln!(out)?;
    writeln!(out, "Estadísticas")?;
    if let Some(band) = result.metrics.busiest_band {
        writeln!(out, "  Franja con más reuniones:   {band}")?;
    }
    if let Some(band) = result.metrics.quietest_band {
        writeln!(out, "  Franja con menos reuniones: {band}")?;
    }
    writeln!(out, "  Total reuniones:            {}", format_count(total))?;

    if let MonthFilter::Only(month) = result.filter {
        writeln!(out)?;
        writeln!(out, "Detalles de {}", capitalize(month.as_str()))?;
        writeln!(out, "  Top Contactos")?;
        for contact in &result.top_contacts {
            writeln!(out, "    - {}: {} reuniones", contact.contact, contact.meetings)?;
        }
        writeln!(out, "  Reuniones por Día")?;
        for day in &result.counts_by_day {
            writeln!(out, "    {:>2}: {}", day.day, day.meetings)?;
        }
        writeln!(out, "  Clínicas")?;
        for record in &result.filtered_records {
            writeln!(
                out,
                "    {} | {} | {} {} | {}",
                record.contact_name,
                record.clinic_name,
                record.date_text(),
                record.time_text(),
                record.contact_email
            )?;
        }
    }

    Ok(())
}
