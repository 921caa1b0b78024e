//! # slot-engine
//!
//! Bookable appointment slots for a studio calendar.
//!
//! Given a date range, the busy periods reported by an external calendar, and a
//! [`SlotConfig`] (business hours, slot length, buffer, closed weekdays), the
//! engine computes which appointment start times are still open on each day.
//! Everything here is pure and synchronous: no I/O, no clocks, no shared state.
//!
//! ## Modules
//!
//! - [`config`] — Business-hour and buffer rules, validated once at startup
//! - [`range`] — Date ranges and the one-year booking horizon
//! - [`interval`] — Busy intervals and the half-open overlap test
//! - [`resolver`] — Candidate generation and availability filtering
//! - [`format`] — Wall-clock presentation of slot start times
//! - [`fallback`] — Deterministic schedule served when no calendar is connected
//! - [`error`] — Error types

pub mod config;
pub mod error;
pub mod fallback;
pub mod format;
pub mod interval;
pub mod range;
pub mod resolver;

pub use config::SlotConfig;
pub use error::SlotError;
pub use fallback::mock_availability;
pub use format::TimeFormat;
pub use interval::BusyInterval;
pub use range::DateRange;
pub use resolver::{available_slots, resolve_availability, DayAvailability};
