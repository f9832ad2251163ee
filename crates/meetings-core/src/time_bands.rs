//! Two-hour time-of-day bands.
//!
//! Bands are left-closed and right-open: an hour of 10 belongs to `10-12`,
//! never to `8-10`. Hours before 8 or from 20 onward fall in no band.

use std::fmt;

use serde::{Serialize, Serializer};

/// Band edges in hours. Band `i` covers `[EDGES[i], EDGES[i + 1])`.
pub const BAND_EDGES: [u32; 7] = [8, 10, 12, 14, 16, 18, 20];

/// A fixed two-hour bucket of the working day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TimeBand {
    H8To10,
    H10To12,
    H12To14,
    H14To16,
    H16To18,
    H18To20,
}

impl TimeBand {
    /// Every band in display order.
    pub const ALL: [TimeBand; 6] = [
        TimeBand::H8To10,
        TimeBand::H10To12,
        TimeBand::H12To14,
        TimeBand::H14To16,
        TimeBand::H16To18,
        TimeBand::H18To20,
    ];

    /// Classify an hour of the day. Returns `None` outside `[8, 20)`.
    pub fn from_hour(hour: u32) -> Option<TimeBand> {
        BAND_EDGES
            .windows(2)
            .position(|edge| hour >= edge[0] && hour < edge[1])
            .map(|i| TimeBand::ALL[i])
    }

    /// Inclusive start hour.
    pub fn start_hour(self) -> u32 {
        BAND_EDGES[self as usize]
    }

    /// Exclusive end hour.
    pub fn end_hour(self) -> u32 {
        BAND_EDGES[self as usize + 1]
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeBand::H8To10 => "8-10",
            TimeBand::H10To12 => "10-12",
            TimeBand::H12To14 => "12-14",
            TimeBand::H14To16 => "14-16",
            TimeBand::H16To18 => "16-18",
            TimeBand::H18To20 => "18-20",
        }
    }
}

impl fmt::Display for TimeBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// Serialised by label so consumers see "8-10" rather than a variant name.
impl Serialize for TimeBand {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}
