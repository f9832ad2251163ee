use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::sequencer::Month;
use crate::time_bands::TimeBand;

/// Header names of the source table, in file order.
pub const COLUMN_CONTACT_NAME: &str = "nombre_crm";
pub const COLUMN_CLINIC_NAME: &str = "clinica";
pub const COLUMN_MONTH: &str = "mes";
pub const COLUMN_DATE: &str = "fecha";
pub const COLUMN_TIME: &str = "Hora";
pub const COLUMN_CONTACT_EMAIL: &str = "email_crm";

pub const REQUIRED_COLUMNS: [&str; 6] = [
    COLUMN_CONTACT_NAME,
    COLUMN_CLINIC_NAME,
    COLUMN_MONTH,
    COLUMN_DATE,
    COLUMN_TIME,
    COLUMN_CONTACT_EMAIL,
];

/// `DD/MM/YYYY`
pub const DATE_FORMAT: &str = "%d/%m/%Y";
/// `HH:MM:SS`, 24-hour clock.
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// One row exactly as it came from the source, before any cleanup.
///
/// Missing or empty fields are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMeetingRow {
    #[serde(rename = "nombre_crm", default)]
    pub contact_name: Option<String>,
    #[serde(rename = "clinica", default)]
    pub clinic_name: Option<String>,
    #[serde(rename = "mes", default)]
    pub month: Option<String>,
    #[serde(rename = "fecha", default)]
    pub date: Option<String>,
    #[serde(rename = "Hora", default)]
    pub time_of_day: Option<String>,
    #[serde(rename = "email_crm", default)]
    pub contact_email: Option<String>,
}

impl RawMeetingRow {
    /// Build a row from a loosely-typed JSON object.
    ///
    /// Numbers and booleans are rendered as strings; `null` and absent keys
    /// become `None`.
    pub fn from_value(value: &Value) -> Self {
        let field = |key: &str| value.get(key).and_then(coerce_to_string);
        Self {
            contact_name: field(COLUMN_CONTACT_NAME),
            clinic_name: field(COLUMN_CLINIC_NAME),
            month: field(COLUMN_MONTH),
            date: field(COLUMN_DATE),
            time_of_day: field(COLUMN_TIME),
            contact_email: field(COLUMN_CONTACT_EMAIL),
        }
    }
}

/// String form of a scalar JSON value. `null` has none.
pub fn coerce_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

/// A normalised meeting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingRecord {
    /// CRM contact, trimmed; empty when missing.
    pub contact_name: String,
    /// Clinic name, trimmed; empty when missing.
    pub clinic_name: String,
    pub month: Month,
    pub date: NaiveDate,
    pub time_of_day: NaiveTime,
    /// Contact e-mail as given; empty when missing.
    pub contact_email: String,
}

impl MeetingRecord {
    /// Chronological sort key of the record's month.
    pub fn month_ordinal(&self) -> u8 {
        self.month.ordinal()
    }

    pub fn hour_of_day(&self) -> u32 {
        self.time_of_day.hour()
    }

    /// Band of the meeting's hour, `None` outside `[8, 20)`.
    pub fn time_band(&self) -> Option<TimeBand> {
        TimeBand::from_hour(self.hour_of_day())
    }

    pub fn day_of_month(&self) -> u32 {
        self.date.day()
    }

    /// Date in source format (`DD/MM/YYYY`).
    pub fn date_text(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }

    /// Time in source format (`HH:MM:SS`).
    pub fn time_text(&self) -> String {
        self.time_of_day.format(TIME_FORMAT).to_string()
    }
}

impl From<&MeetingRecord> for RawMeetingRow {
    fn from(record: &MeetingRecord) -> Self {
        Self {
            contact_name: Some(record.contact_name.clone()),
            clinic_name: Some(record.clinic_name.clone()),
            month: Some(record.month.as_str().to_string()),
            date: Some(record.date_text()),
            time_of_day: Some(record.time_text()),
            contact_email: Some(record.contact_email.clone()),
        }
    }
}
