//! Calendar date ranges and the booking horizon.

use chrono::{DateTime, Days, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::{Result, SlotError};

/// Longest range accepted, and how far ahead of today a range may reach.
pub const MAX_RANGE_DAYS: i64 = 365;

/// An inclusive range of calendar dates in the studio's timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Build a range, rejecting `start > end` and spans longer than a year.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(SlotError::InvalidRange { start, end });
        }
        let days = (end - start).num_days();
        if days > MAX_RANGE_DAYS {
            return Err(SlotError::RangeTooLong {
                days,
                max: MAX_RANGE_DAYS,
            });
        }
        Ok(Self { start, end })
    }

    /// A range covering exactly one date.
    pub fn single(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// Parse `YYYY-MM-DD` bounds and build the range.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Self::new(parse_date(start)?, parse_date(end)?)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Reject ranges that reach more than a year past `today`.
    pub fn ensure_within_horizon(&self, today: NaiveDate) -> Result<()> {
        let limit = today
            .checked_add_days(Days::new(MAX_RANGE_DAYS as u64))
            .unwrap_or(NaiveDate::MAX);
        if self.end > limit {
            return Err(SlotError::BeyondHorizon {
                end: self.end,
                limit,
            });
        }
        Ok(())
    }

    /// Every date in the range, in order, both ends included.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }

    /// UTC instants spanning the whole range as observed in `tz`: local
    /// midnight on `start` up to local midnight after `end`.
    pub fn instant_bounds(&self, tz: &Tz) -> (DateTime<Utc>, DateTime<Utc>) {
        let after_end = self.end.succ_opt().unwrap_or(self.end);
        (local_midnight(tz, self.start), local_midnight(tz, after_end))
    }
}

/// Parse a strict `YYYY-MM-DD` date.
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| SlotError::InvalidDate(raw.to_string()))
}

fn local_midnight(tz: &Tz, date: NaiveDate) -> DateTime<Utc> {
    let naive = date.and_time(NaiveTime::MIN);
    // Where a DST jump skips midnight, the day starts at the first wall-clock
    // hour that exists.
    tz.from_local_datetime(&naive)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(naive + Duration::hours(1))).earliest())
        .map(|local| local.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&naive))
}
