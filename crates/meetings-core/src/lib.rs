//! Core types for the clinic meetings pipeline.
//!
//! Holds the record model, the field normaliser, month sequencing, time
//! banding, the error taxonomy and CLI settings shared by the other crates.

pub mod error;
pub mod formatting;
pub mod models;
pub mod normalizer;
pub mod sequencer;
pub mod settings;
pub mod time_bands;

pub use error::{MeetingError, Result};
pub use models::{MeetingRecord, RawMeetingRow};
pub use sequencer::{Month, MonthFilter};
pub use time_bands::TimeBand;
