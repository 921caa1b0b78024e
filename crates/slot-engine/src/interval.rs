//! Busy intervals reported by the upstream calendar.
//!
//! Intervals are opaque: they may overlap one another and arrive in any order.
//! The resolver checks every candidate against every interval, so no merging or
//! sorting is needed for correctness.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An occupied period that blocks new bookings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusyInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl BusyInterval {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Whether `[start, end)` genuinely overlaps this interval.
    ///
    /// Two intervals overlap iff `start < self.end && end > self.start`.
    /// Intervals that only share an endpoint do NOT overlap.
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        start < self.end && end > self.start
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 16, hour, min, 0).unwrap()
    }

    #[test]
    fn partial_overlap_detected() {
        let busy = BusyInterval::new(at(13, 0), at(15, 0));
        assert!(busy.overlaps(at(12, 0), at(13, 30)));
        assert!(busy.overlaps(at(14, 30), at(16, 0)));
    }

    #[test]
    fn containment_both_ways_detected() {
        let busy = BusyInterval::new(at(13, 0), at(15, 0));
        assert!(busy.overlaps(at(13, 30), at(14, 0)));
        assert!(busy.overlaps(at(12, 0), at(16, 0)));
    }

    #[test]
    fn touching_endpoints_do_not_overlap() {
        let busy = BusyInterval::new(at(13, 0), at(15, 0));
        assert!(!busy.overlaps(at(11, 0), at(13, 0)));
        assert!(!busy.overlaps(at(15, 0), at(17, 0)));
    }

    #[test]
    fn disjoint_do_not_overlap() {
        let busy = BusyInterval::new(at(13, 0), at(15, 0));
        assert!(!busy.overlaps(at(9, 0), at(11, 0)));
    }

    #[test]
    fn deserializes_from_rfc3339() {
        let json = r#"{"start":"2026-03-16T17:00:00Z","end":"2026-03-16T19:00:00-04:00"}"#;
        let busy: BusyInterval = serde_json::from_str(json).unwrap();
        assert_eq!(busy.start, at(17, 0));
        assert_eq!(busy.end, at(23, 0));
    }
}
