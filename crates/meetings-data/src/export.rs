//! CSV export of a filtered meeting list.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use csv::WriterBuilder;
use meetings_core::error::Result;
use meetings_core::models::MeetingRecord;
use meetings_core::sequencer::MonthFilter;
use serde::Serialize;
use tracing::info;

/// Column headers shown to users, in [`ExportRow`] field order.
pub const EXPORT_HEADERS: [&str; 5] = ["Nombre Contacto", "Clínica", "Fecha", "Hora", "Email"];

/// Display projection of a record.
#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    contact_name: &'a str,
    clinic_name: &'a str,
    date: String,
    time: String,
    email: &'a str,
}

impl<'a> From<&'a MeetingRecord> for ExportRow<'a> {
    fn from(record: &'a MeetingRecord) -> Self {
        Self {
            contact_name: &record.contact_name,
            clinic_name: &record.clinic_name,
            date: record.date_text(),
            time: record.time_text(),
            email: &record.contact_email,
        }
    }
}

/// `clinicas_<month>.csv`, with `all` for the unfiltered view.
pub fn export_file_name(filter: &MonthFilter) -> String {
    format!("clinicas_{}.csv", filter.as_str())
}

/// Write `records` as UTF-8 CSV with a header row.
pub fn write_export<W: Write>(records: &[MeetingRecord], writer: W) -> Result<()> {
    // Written by hand so an empty list still gets its header.
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);
    wtr.write_record(EXPORT_HEADERS)?;
    for record in records {
        wtr.serialize(ExportRow::from(record))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Export into `dir` under [`export_file_name`]; returns the written path.
pub fn export_to_dir(records: &[MeetingRecord], filter: &MonthFilter, dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(export_file_name(filter));
    let file = File::create(&path)?;
    write_export(records, file)?;
    info!(rows = records.len(), path = %path.display(), "exported meetings");
    Ok(path)
}
