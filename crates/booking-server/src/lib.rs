//! # booking-server
//!
//! HTTP front end for the studio's booking availability.
//!
//! Loads a [`slot_engine::SlotConfig`] once at startup, fetches busy periods
//! from Google Calendar per request, and serves the resolved slots at
//! `GET /api/availability`. Without calendar credentials it serves the fixed
//! mock schedule instead, labelled `"mock"`.
//!
//! ## Modules
//!
//! - [`settings`] — Flags and environment variables, read once at startup
//! - [`logging`] — `tracing` subscriber setup
//! - [`auth`] — Service-account JWT → OAuth access token exchange
//! - [`source`] — Busy-interval sources (Google free/busy, or none)
//! - [`api`] — Routes, handlers, CORS, and response shapes
//! - [`error`] — Error types

pub mod api;
pub mod auth;
pub mod error;
pub mod logging;
pub mod settings;
pub mod source;

pub use api::{AppState, AvailabilityResponse, Source};
pub use error::{ApiError, SourceError};
pub use source::{Availability, BusySource, GoogleFreeBusy};
