//! Data layer for the clinic meetings pipeline.
//!
//! Reads the source table, builds the immutable [`table::MeetingTable`],
//! aggregates it, and exposes the single [`query::query`] entry point used by
//! the presentation layer.

pub mod aggregator;
pub mod export;
pub mod query;
pub mod reader;
pub mod table;

pub use meetings_core as core;
