//! Source table loading.
//!
//! Reads the comma-separated meetings table (or a JSON array of row objects)
//! into [`RawMeetingRow`]s. No cleanup happens here; see
//! [`FieldNormalizer`](meetings_core::normalizer::FieldNormalizer).

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::ReaderBuilder;
use meetings_core::error::{MeetingError, Result};
use meetings_core::models::{RawMeetingRow, REQUIRED_COLUMNS};
use serde_json::Value;
use tracing::{debug, info};

// ── Public API ────────────────────────────────────────────────────────────────

/// Load raw rows from `path`.
///
/// Files ending in `.json` are read as a JSON array of row objects; anything
/// else is read as CSV with a header row.
pub fn load_raw_rows(path: &Path) -> Result<Vec<RawMeetingRow>> {
    let file = File::open(path).map_err(|source| MeetingError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);

    let is_json = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let rows = if is_json {
        read_json_rows(reader)?
    } else {
        read_csv_rows(reader)?
    };

    info!(rows = rows.len(), path = %path.display(), "loaded meetings source");
    Ok(rows)
}

/// Parse CSV with a header row. Every column in [`REQUIRED_COLUMNS`] must be
/// present; extra columns are ignored.
pub fn read_csv_rows<R: Read>(reader: R) -> Result<Vec<RawMeetingRow>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);

    let headers = rdr.headers()?.clone();
    if let Some(missing) = REQUIRED_COLUMNS
        .iter()
        .find(|col| !headers.iter().any(|h| h == **col))
    {
        return Err(MeetingError::MissingColumn((*missing).to_string()));
    }

    let rows = rdr
        .deserialize::<RawMeetingRow>()
        .collect::<std::result::Result<Vec<_>, csv::Error>>()?;

    debug!(rows = rows.len(), "parsed CSV rows");
    Ok(rows)
}

/// Parse a JSON array of row objects, coercing scalar values to strings.
pub fn read_json_rows<R: Read>(reader: R) -> Result<Vec<RawMeetingRow>> {
    let value: Value = serde_json::from_reader(reader)?;
    let Value::Array(items) = value else {
        return Err(MeetingError::Config(
            "JSON source must be an array of row objects".to_string(),
        ));
    };

    let rows: Vec<RawMeetingRow> = items.iter().map(RawMeetingRow::from_value).collect();
    debug!(rows = rows.len(), "parsed JSON rows");
    Ok(rows)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const HEADER: &str = "nombre_crm,clinica,mes,fecha,Hora,email_crm";

    fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_raw_rows_csv() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            dir.path(),
            "clinicas.csv",
            &format!(
                "{HEADER}\n Ana Ruiz ,Clinica Sol,Octubre,05/10/2024,09:15:00,ana@sol.es\n\
                 Luis Gil,Dental Mar,enero,02/01/2025,14:00:00,luis@mar.es\n"
            ),
        );

        let rows = load_raw_rows(&path).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].contact_name.as_deref(), Some(" Ana Ruiz "));
        assert_eq!(rows[0].month.as_deref(), Some("Octubre"));
        assert_eq!(rows[1].time_of_day.as_deref(), Some("14:00:00"));
    }

    #[test]
    fn test_empty_fields_are_none() {
        let rows = read_csv_rows(format!("{HEADER}\n,Clinica Sol,octubre,05/10/2024,09:15:00,\n").as_bytes())
            .unwrap();
        assert_eq!(rows[0].contact_name, None);
        assert_eq!(rows[0].contact_email, None);
    }

    #[test]
    fn test_quoted_fields() {
        let rows = read_csv_rows(
            format!("{HEADER}\n\"Ruiz, Ana\",\"Clinica \"\"Sol\"\"\",octubre,05/10/2024,09:15:00,a@b.es\n")
                .as_bytes(),
        )
        .unwrap();
        assert_eq!(rows[0].contact_name.as_deref(), Some("Ruiz, Ana"));
        assert_eq!(rows[0].clinic_name.as_deref(), Some("Clinica \"Sol\""));
    }

    #[test]
    fn test_columns_in_any_order() {
        let csv = "Hora,mes,fecha,clinica,nombre_crm,email_crm,extra\n\
                   10:00:00,enero,02/01/2025,Sol,Ana,a@b.es,x\n";
        let rows = read_csv_rows(csv.as_bytes()).unwrap();
        assert_eq!(rows[0].time_of_day.as_deref(), Some("10:00:00"));
        assert_eq!(rows[0].contact_name.as_deref(), Some("Ana"));
    }

    #[test]
    fn test_missing_column() {
        let csv = "nombre_crm,clinica,mes,fecha,email_crm\nAna,Sol,enero,02/01/2025,a@b.es\n";
        let err = read_csv_rows(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, MeetingError::MissingColumn(ref c) if c == "Hora"));
    }

    #[test]
    fn test_header_only() {
        let rows = read_csv_rows(format!("{HEADER}\n").as_bytes()).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_ragged_row_is_csv_error() {
        let csv = format!("{HEADER}\nAna,Sol,enero\n");
        let err = read_csv_rows(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, MeetingError::Csv(_)));
    }

    #[test]
    fn test_missing_file_is_source_unavailable() {
        let dir = TempDir::new().unwrap();
        let err = load_raw_rows(&dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, MeetingError::SourceUnavailable { .. }));
    }

    #[test]
    fn test_load_raw_rows_json() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            dir.path(),
            "clinicas.json",
            r#"[{"nombre_crm": 7, "clinica": "Sol", "mes": "enero",
                 "fecha": "02/01/2025", "Hora": "10:00:00", "email_crm": null}]"#,
        );
        let rows = load_raw_rows(&path).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].contact_name.as_deref(), Some("7"));
        assert_eq!(rows[0].contact_email, None);
    }

    #[test]
    fn test_json_not_array() {
        let err = read_json_rows(r#"{"mes": "enero"}"#.as_bytes()).unwrap_err();
        assert!(matches!(err, MeetingError::Config(_)));
    }
}
