//! Deterministic schedule served when no calendar credential is configured.
//!
//! The table is fixed per weekday and never consults busy time, so the booking
//! UI stays usable (and testable) without live credentials. Responses built from
//! it are labelled `"mock"` by the server.

use chrono::{Datelike, Weekday};

use crate::config::SlotConfig;
use crate::range::DateRange;
use crate::resolver::DayAvailability;

const WEEKDAY_SLOTS: &[&str] = &["09:00", "11:00", "13:00", "15:00", "17:00"];
const SATURDAY_SLOTS: &[&str] = &["10:00", "12:00", "14:00"];
const SUNDAY_SLOTS: &[&str] = &["12:00", "14:00"];

/// Fixed start times for `weekday`.
pub fn mock_slots_for(weekday: Weekday) -> &'static [&'static str] {
    match weekday {
        Weekday::Sat => SATURDAY_SLOTS,
        Weekday::Sun => SUNDAY_SLOTS,
        _ => WEEKDAY_SLOTS,
    }
}

/// Build the mock schedule for `range`.
///
/// Excluded weekdays are omitted exactly as the resolver omits them.
pub fn mock_availability(range: &DateRange, config: &SlotConfig) -> Vec<DayAvailability> {
    range
        .days()
        .filter(|date| config.is_open_on(date.weekday()))
        .map(|date| DayAvailability {
            date,
            slots: mock_slots_for(date.weekday())
                .iter()
                .map(|s| s.to_string())
                .collect(),
        })
        .collect()
}
