//! Business-hour, slot-length, and buffer rules.
//!
//! A [`SlotConfig`] is built once at process start (from flags or environment)
//! and passed by reference into every resolver call. Nothing in this crate reads
//! configuration from ambient state.

use std::collections::HashSet;

use chrono::Weekday;
use chrono_tz::Tz;

use crate::error::{Result, SlotError};

/// Static rules for turning a calendar into bookable slots.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotConfig {
    /// First bookable wall-clock hour of the day (inclusive).
    pub day_start_hour: u32,
    /// Closing wall-clock hour; a slot must end at or before it.
    pub day_end_hour: u32,
    /// Length of one appointment in hours.
    pub slot_duration_hours: u32,
    /// Padding applied on both sides of a candidate before conflict checks.
    pub buffer_minutes: u32,
    /// Weekdays on which no appointments are offered at all.
    pub excluded_weekdays: HashSet<Weekday>,
    /// The studio's timezone. All hour-of-day arithmetic happens here.
    pub timezone: Tz,
}

impl Default for SlotConfig {
    fn default() -> Self {
        Self {
            day_start_hour: 9,
            day_end_hour: 20,
            slot_duration_hours: 2,
            buffer_minutes: 30,
            excluded_weekdays: HashSet::from([Weekday::Sun]),
            timezone: chrono_tz::America::New_York,
        }
    }
}

impl SlotConfig {
    /// Check the hour bounds and slot length.
    ///
    /// A business day shorter than one slot passes validation; see
    /// [`SlotConfig::produces_slots`].
    pub fn validate(&self) -> Result<()> {
        if self.day_end_hour > 24 {
            return Err(SlotError::InvalidConfig(format!(
                "day_end_hour must be at most 24, got {}",
                self.day_end_hour
            )));
        }
        if self.day_start_hour >= self.day_end_hour {
            return Err(SlotError::InvalidConfig(format!(
                "day_start_hour ({}) must be before day_end_hour ({})",
                self.day_start_hour, self.day_end_hour
            )));
        }
        if self.slot_duration_hours == 0 {
            return Err(SlotError::InvalidConfig(
                "slot_duration_hours must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Whether at least one slot fits between opening and closing.
    ///
    /// `false` is legal (every day resolves to an empty list) but almost always
    /// a misconfiguration.
    pub fn produces_slots(&self) -> bool {
        self.day_end_hour.saturating_sub(self.day_start_hour) >= self.slot_duration_hours
            && self.slot_duration_hours > 0
    }

    /// Whether appointments are offered on `weekday` at all.
    pub fn is_open_on(&self, weekday: Weekday) -> bool {
        !self.excluded_weekdays.contains(&weekday)
    }
}

/// Parse an IANA timezone name such as `America/New_York`.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.trim()
        .parse()
        .map_err(|_| SlotError::InvalidTimezone(name.to_string()))
}

/// Parse a comma-separated weekday list such as `"sun"` or `"sat,sun"`.
///
/// Accepts chrono's spellings (`mon`, `Monday`, ...), case-insensitively.
/// An empty string yields an empty set.
pub fn parse_weekday_list(raw: &str) -> Result<HashSet<Weekday>> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<Weekday>()
                .map_err(|_| SlotError::InvalidWeekday(part.to_string()))
        })
        .collect()
}
