//! Runtime layer for the clinic meetings pipeline.
//!
//! Owns the TTL-cached meeting table that the presentation layer queries on
//! every interaction.

pub mod data_manager;

pub use meetings_core as core;
pub use meetings_data as data;
