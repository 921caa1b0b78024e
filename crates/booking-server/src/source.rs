//! Busy-interval sources.
//!
//! The resolver only needs a list of busy intervals. [`BusySource`] is the seam
//! between it and the outside world; [`GoogleFreeBusy`] is the production
//! implementation. Calls are made once per request with no timeout and no
//! retry: a slow or failing upstream surfaces as a failed request.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use slot_engine::BusyInterval;

use crate::auth::{self, ServiceAccountKey};
use crate::error::SourceError;
use crate::settings::CalendarArgs;

/// Anything that can report busy time in a window.
#[async_trait]
pub trait BusySource: Send + Sync {
    async fn busy_intervals(
        &self,
        time_min: DateTime<Utc>,
        time_max: DateTime<Utc>,
    ) -> Result<Vec<BusyInterval>, SourceError>;
}

/// Google Calendar `freeBusy` query for a single calendar.
pub struct GoogleFreeBusy {
    client: reqwest::Client,
    calendar_id: String,
    key: ServiceAccountKey,
    api_base: String,
    timezone: Tz,
}

impl GoogleFreeBusy {
    pub fn new(
        calendar_id: impl Into<String>,
        key: ServiceAccountKey,
        api_base: impl Into<String>,
        timezone: Tz,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            calendar_id: calendar_id.into(),
            key,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            timezone,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/calendar/v3/freeBusy", self.api_base)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FreeBusyRequest<'a> {
    time_min: DateTime<Utc>,
    time_max: DateTime<Utc>,
    time_zone: &'a str,
    items: [CalendarItem<'a>; 1],
}

#[derive(Serialize)]
struct CalendarItem<'a> {
    id: &'a str,
}

#[derive(Deserialize)]
struct FreeBusyResponse {
    #[serde(default)]
    calendars: HashMap<String, CalendarBusy>,
}

#[derive(Deserialize)]
struct CalendarBusy {
    #[serde(default)]
    busy: Vec<BusyInterval>,
    #[serde(default)]
    errors: Vec<CalendarFault>,
}

#[derive(Deserialize)]
struct CalendarFault {
    #[serde(default)]
    domain: String,
    #[serde(default)]
    reason: String,
}

#[async_trait]
impl BusySource for GoogleFreeBusy {
    async fn busy_intervals(
        &self,
        time_min: DateTime<Utc>,
        time_max: DateTime<Utc>,
    ) -> Result<Vec<BusyInterval>, SourceError> {
        let token = auth::fetch_access_token(&self.client, &self.key).await?;

        let body = FreeBusyRequest {
            time_min,
            time_max,
            time_zone: self.timezone.name(),
            items: [CalendarItem {
                id: &self.calendar_id,
            }],
        };

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let mut parsed: FreeBusyResponse = response.json().await?;
        let calendar = parsed
            .calendars
            .remove(&self.calendar_id)
            .ok_or_else(|| SourceError::Calendar {
                calendar: self.calendar_id.clone(),
                reasons: "calendar missing from response".to_string(),
            })?;

        if !calendar.errors.is_empty() {
            let reasons = calendar
                .errors
                .iter()
                .map(|f| format!("{}:{}", f.domain, f.reason))
                .collect::<Vec<_>>()
                .join(", ");
            return Err(SourceError::Calendar {
                calendar: self.calendar_id.clone(),
                reasons,
            });
        }

        tracing::debug!(
            calendar = %self.calendar_id,
            busy = calendar.busy.len(),
            "fetched free/busy"
        );
        Ok(calendar.busy)
    }
}

/// Where availability comes from, fixed at startup.
#[derive(Clone)]
pub enum Availability {
    /// Resolve against busy time from a live calendar.
    Live(Arc<dyn BusySource>),
    /// Serve the fixed fallback schedule.
    Mock,
}

impl Availability {
    /// Pick live or mock mode from the calendar settings.
    ///
    /// Mock mode is chosen when either the calendar ID or the key is absent
    /// or blank.
    /// A key that is present but unparseable is an error, not a silent
    /// downgrade.
    pub fn from_args(args: &CalendarArgs, timezone: Tz) -> Result<Self, SourceError> {
        match (&args.calendar_id, &args.service_account_key) {
            (Some(calendar_id), Some(raw_key))
                if !calendar_id.trim().is_empty() && !raw_key.trim().is_empty() =>
            {
                let key = ServiceAccountKey::from_json(raw_key)?;
                tracing::info!(
                    calendar = %calendar_id,
                    service_account = %key.client_email,
                    "using live Google Calendar availability"
                );
                Ok(Availability::Live(Arc::new(GoogleFreeBusy::new(
                    calendar_id.trim(),
                    key,
                    args.api_base.clone(),
                    timezone,
                ))))
            }
            (calendar_id, key) => {
                tracing::warn!(
                    calendar_id_set = calendar_id.is_some(),
                    key_set = key.is_some(),
                    "calendar credentials not configured; serving mock availability"
                );
                Ok(Availability::Mock)
            }
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, Availability::Live(_))
    }
}
