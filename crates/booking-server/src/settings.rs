//! Process configuration, read once at startup from flags or environment.
//!
//! Every setting has an environment variable so the server can be configured
//! the same way on a laptop and in a container. The parsed values are turned
//! into an immutable [`SlotConfig`] that is shared read-only with every request.

use std::collections::HashSet;

use chrono::Weekday;
use chrono_tz::Tz;
use clap::Args;
use slot_engine::config::{parse_timezone, parse_weekday_list};
use slot_engine::{SlotConfig, TimeFormat};

/// Production Google API endpoint.
pub const DEFAULT_API_BASE: &str = "https://www.googleapis.com";

/// Business-hour and buffer rules.
#[derive(Args, Debug, Clone)]
pub struct SlotArgs {
    /// IANA timezone the studio operates in
    #[arg(long, env = "BOOKING_TIMEZONE", default_value = "America/New_York", value_parser = parse_timezone)]
    pub timezone: Tz,

    /// First bookable hour of the day (local time)
    #[arg(long, env = "DAY_START_HOUR", default_value_t = 9)]
    pub day_start_hour: u32,

    /// Closing hour; appointments must end by then (local time)
    #[arg(long, env = "DAY_END_HOUR", default_value_t = 20)]
    pub day_end_hour: u32,

    /// Appointment length in hours
    #[arg(long, env = "SLOT_DURATION_HOURS", default_value_t = 2)]
    pub slot_duration_hours: u32,

    /// Gap kept clear before and after every appointment
    #[arg(long, env = "BUFFER_MINUTES", default_value_t = 30)]
    pub buffer_minutes: u32,

    /// Comma-separated weekdays with no appointments (e.g. "sun" or "sat,sun")
    #[arg(long, env = "EXCLUDED_WEEKDAYS", default_value = "sun", value_parser = parse_weekday_list)]
    pub excluded_weekdays: HashSet<Weekday>,

    /// Slot label style: "24h" (09:00) or "12h" (9:00 AM)
    #[arg(long, env = "TIME_FORMAT", default_value = "24h")]
    pub time_format: TimeFormat,
}

impl SlotArgs {
    /// Build and validate the slot rules.
    pub fn to_config(&self) -> slot_engine::error::Result<SlotConfig> {
        let config = SlotConfig {
            day_start_hour: self.day_start_hour,
            day_end_hour: self.day_end_hour,
            slot_duration_hours: self.slot_duration_hours,
            buffer_minutes: self.buffer_minutes,
            excluded_weekdays: self.excluded_weekdays.clone(),
            timezone: self.timezone,
        };
        config.validate()?;
        if !config.produces_slots() {
            tracing::warn!(
                day_start_hour = config.day_start_hour,
                day_end_hour = config.day_end_hour,
                slot_duration_hours = config.slot_duration_hours,
                "business day is shorter than one slot; every day will have zero availability"
            );
        }
        Ok(config)
    }
}

/// Upstream calendar connection. Leaving either value unset selects mock mode.
#[derive(Args, Debug, Clone)]
pub struct CalendarArgs {
    /// Google Calendar ID to read busy time from
    #[arg(long, env = "GOOGLE_CALENDAR_ID")]
    pub calendar_id: Option<String>,

    /// Service-account key JSON (the whole blob, not a path)
    #[arg(long, env = "GOOGLE_SERVICE_ACCOUNT_KEY", hide_env_values = true)]
    pub service_account_key: Option<String>,

    /// Base URL of the Google APIs
    #[arg(long, env = "GOOGLE_API_BASE", default_value = DEFAULT_API_BASE)]
    pub api_base: String,
}
