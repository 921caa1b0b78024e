//! Availability resolution: business hours + busy intervals → open start times.
//!
//! For each date in the range, in order:
//!
//! 1. Dates whose weekday is excluded are skipped entirely (no entry at all).
//! 2. Candidates start at `day_start_hour:00` local time and step forward one
//!    wall-clock hour at a time, for as long as the whole slot still ends at or
//!    before `day_end_hour`. The step is one hour regardless of slot length, so
//!    consecutive candidates overlap.
//! 3. Each candidate is widened by `buffer_minutes` on both sides.
//! 4. A candidate survives iff its buffered window overlaps no busy interval
//!    (strict half-open test; touching an endpoint is fine).
//!
//! Dates with zero surviving candidates still produce an entry with an empty
//! list, so callers can tell "fully booked" from "closed that weekday".

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::config::SlotConfig;
use crate::format::{format_slot, TimeFormat};
use crate::interval::BusyInterval;
use crate::range::DateRange;

/// A potential appointment before availability filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateSlot {
    pub date: NaiveDate,
    pub start: DateTime<Utc>,
}

impl CandidateSlot {
    /// End of the appointment itself (no buffer).
    pub fn end(&self, config: &SlotConfig) -> DateTime<Utc> {
        self.start + Duration::hours(i64::from(config.slot_duration_hours))
    }

    /// `[start - buffer, end + buffer]`, the window checked against busy time.
    pub fn buffered_window(&self, config: &SlotConfig) -> (DateTime<Utc>, DateTime<Utc>) {
        let buffer = Duration::minutes(i64::from(config.buffer_minutes));
        (self.start - buffer, self.end(config) + buffer)
    }

    /// Whether no busy interval overlaps the buffered window.
    pub fn is_available(&self, busy: &[BusyInterval], config: &SlotConfig) -> bool {
        let (window_start, window_end) = self.buffered_window(config);
        !busy
            .iter()
            .any(|interval| interval.overlaps(window_start, window_end))
    }
}

/// Open start instants for one date, ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySlots {
    pub date: NaiveDate,
    pub starts: Vec<DateTime<Utc>>,
}

impl DaySlots {
    /// Render the start instants as wall-clock strings in `tz`.
    pub fn format(&self, tz: &Tz, format: TimeFormat) -> DayAvailability {
        DayAvailability {
            date: self.date,
            slots: self
                .starts
                .iter()
                .map(|start| format_slot(*start, tz, format))
                .collect(),
        }
    }
}

/// One date's bookable start times, ready to serve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayAvailability {
    /// Serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    pub slots: Vec<String>,
}

/// Generate the candidate starts for `date`, ascending.
///
/// Wall-clock hours that do not exist on `date` (skipped by a DST jump) produce
/// no candidate. Ambiguous hours (repeated by a DST fall-back) resolve to the
/// earlier instant.
pub fn candidate_slots(date: NaiveDate, config: &SlotConfig) -> Vec<CandidateSlot> {
    if config.slot_duration_hours == 0 {
        return Vec::new();
    }
    let tz = config.timezone;

    (config.day_start_hour..config.day_end_hour)
        .take_while(|hour| hour.saturating_add(config.slot_duration_hours) <= config.day_end_hour)
        .filter_map(|hour| local_instant(&tz, date, hour))
        .map(|start| CandidateSlot { date, start })
        .collect()
}

/// Compute the open start instants for every offered date in `range`.
pub fn available_slots(
    range: &DateRange,
    busy: &[BusyInterval],
    config: &SlotConfig,
) -> Vec<DaySlots> {
    range
        .days()
        .filter(|date| config.is_open_on(date.weekday()))
        .map(|date| DaySlots {
            date,
            starts: candidate_slots(date, config)
                .into_iter()
                .filter(|candidate| candidate.is_available(busy, config))
                .map(|candidate| candidate.start)
                .collect(),
        })
        .collect()
}

/// Compute per-day availability with start times formatted as `HH:MM` in the
/// configured timezone.
pub fn resolve_availability(
    range: &DateRange,
    busy: &[BusyInterval],
    config: &SlotConfig,
) -> Vec<DayAvailability> {
    available_slots(range, busy, config)
        .iter()
        .map(|day| day.format(&config.timezone, TimeFormat::Clock24))
        .collect()
}

fn local_instant(tz: &Tz, date: NaiveDate, hour: u32) -> Option<DateTime<Utc>> {
    let time = NaiveTime::from_hms_opt(hour, 0, 0)?;
    tz.from_local_datetime(&date.and_time(time))
        .earliest()
        .map(|local| local.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 16).unwrap()
    }

    #[test]
    fn candidates_step_hourly_and_fit_closing() {
        let config = SlotConfig::default();
        let candidates = candidate_slots(monday(), &config);
        // 09:00 through 18:00; 19:00 would end at 21:00.
        assert_eq!(candidates.len(), 10);
        for pair in candidates.windows(2) {
            assert_eq!(pair[1].start - pair[0].start, Duration::hours(1));
        }
    }

    #[test]
    fn buffered_window_pads_both_sides() {
        let config = SlotConfig::default();
        let candidate = candidate_slots(monday(), &config)[0];
        let (from, to) = candidate.buffered_window(&config);
        assert_eq!(candidate.start - from, Duration::minutes(30));
        assert_eq!(to - candidate.start, Duration::minutes(150));
    }

    #[test]
    fn zero_duration_generates_nothing() {
        let config = SlotConfig {
            slot_duration_hours: 0,
            ..SlotConfig::default()
        };
        assert!(candidate_slots(monday(), &config).is_empty());
    }

    #[test]
    fn inverted_hours_generate_nothing() {
        let config = SlotConfig {
            day_start_hour: 20,
            day_end_hour: 9,
            ..SlotConfig::default()
        };
        assert!(candidate_slots(monday(), &config).is_empty());
    }

    #[test]
    fn spring_forward_gap_hour_is_skipped() {
        // 2026-03-08 02:00 does not exist in New York.
        let date = NaiveDate::from_ymd_opt(2026, 3, 8).unwrap();
        let config = SlotConfig {
            day_start_hour: 0,
            day_end_hour: 5,
            slot_duration_hours: 1,
            excluded_weekdays: Default::default(),
            ..SlotConfig::default()
        };
        let hours: Vec<String> = candidate_slots(date, &config)
            .iter()
            .map(|c| format_slot(c.start, &config.timezone, TimeFormat::Clock24))
            .collect();
        assert_eq!(hours, vec!["00:00", "01:00", "03:00", "04:00"]);
    }

    #[test]
    fn fall_back_repeated_hour_uses_earlier_instant() {
        // 2026-11-01 01:00 happens twice in New York: EDT first, then EST.
        let date = NaiveDate::from_ymd_opt(2026, 11, 1).unwrap();
        let config = SlotConfig {
            day_start_hour: 0,
            day_end_hour: 3,
            slot_duration_hours: 1,
            excluded_weekdays: Default::default(),
            ..SlotConfig::default()
        };
        let starts: Vec<DateTime<Utc>> = candidate_slots(date, &config)
            .iter()
            .map(|c| c.start)
            .collect();
        assert_eq!(
            starts,
            vec![
                Utc.with_ymd_and_hms(2026, 11, 1, 4, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2026, 11, 1, 5, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2026, 11, 1, 7, 0, 0).unwrap(),
            ]
        );
    }
}
