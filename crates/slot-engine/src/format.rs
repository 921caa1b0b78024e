//! Wall-clock presentation of slot start times.
//!
//! The resolver works purely on UTC instants; this module is the only place
//! where an instant becomes a display string.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// How slot start times are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeFormat {
    /// `"09:00"`, `"13:00"`
    #[default]
    Clock24,
    /// `"9:00 AM"`, `"1:00 PM"`
    Clock12,
}

impl std::str::FromStr for TimeFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "24" | "24h" | "clock24" => Ok(TimeFormat::Clock24),
            "12" | "12h" | "clock12" => Ok(TimeFormat::Clock12),
            other => Err(format!("unknown time format '{other}' (expected 24h or 12h)")),
        }
    }
}

/// Render `instant` as wall-clock time in `tz`.
pub fn format_slot(instant: DateTime<Utc>, tz: &Tz, format: TimeFormat) -> String {
    let local = instant.with_timezone(tz);
    match format {
        TimeFormat::Clock24 => local.format("%H:%M").to_string(),
        TimeFormat::Clock12 => local.format("%-I:%M %p").to_string(),
    }
}
