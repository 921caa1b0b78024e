//! HTTP surface consumed by the booking UI.
//!
//! | Method    | Path                                         | Response                         |
//! |-----------|----------------------------------------------|----------------------------------|
//! | `GET`     | `/api/availability?start=YYYY-MM-DD&end=...` | `200 {days, source}`             |
//! | `OPTIONS` | `/api/availability`                          | `200`, empty body (CORS preflight) |
//! | other     | `/api/availability`                          | `405 {error}`                    |
//! | `GET`     | `/healthz`                                   | `200 {status, source}`           |
//!
//! Validation failures, including query strings that cannot be decoded, are
//! `400 {error}`; upstream calendar failures are
//! `500 {error, detail}`. Every response allows any origin.

use actix_web::http::Method;
use actix_web::middleware::DefaultHeaders;
use actix_web::{web, HttpResponse};
use chrono::{Duration, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use slot_engine::resolver::{available_slots, DayAvailability};
use slot_engine::{mock_availability, DateRange, SlotConfig, TimeFormat};

use crate::error::ApiError;
use crate::source::Availability;

/// Shared, read-only state for every request.
pub struct AppState {
    pub config: SlotConfig,
    pub time_format: TimeFormat,
    pub availability: Availability,
}

/// Whether slots were computed from live calendar data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Live,
    Mock,
}

#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub start: Option<String>,
    pub end: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    pub days: Vec<DayAvailability>,
    pub source: Source,
}

/// Register routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/availability")
            .app_data(web::QueryConfig::default().error_handler(|err, _req| {
                ApiError::InvalidQuery(err.to_string()).into()
            }))
            .route(web::get().to(get_availability))
            .route(web::method(Method::OPTIONS).to(preflight))
            .default_service(web::to(method_not_allowed)),
    )
    .service(web::resource("/healthz").route(web::get().to(healthz)));
}

/// Headers that let any origin call the API.
pub fn cors_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("Access-Control-Allow-Origin", "*"))
        .add(("Access-Control-Allow-Methods", "GET, OPTIONS"))
        .add(("Access-Control-Allow-Headers", "Content-Type"))
}

/// Today's date at the studio.
pub fn studio_today(tz: &Tz) -> NaiveDate {
    Utc::now().with_timezone(tz).date_naive()
}

/// Turn raw query parameters into a range the resolver may run on.
pub fn validate_query(query: &AvailabilityQuery, today: NaiveDate) -> Result<DateRange, ApiError> {
    let start = query
        .start
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .ok_or(ApiError::MissingParam("start"))?;
    let end = query
        .end
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .ok_or(ApiError::MissingParam("end"))?;

    let range = DateRange::parse(start, end)?;
    range.ensure_within_horizon(today)?;
    Ok(range)
}

async fn get_availability(
    state: web::Data<AppState>,
    query: web::Query<AvailabilityQuery>,
) -> Result<HttpResponse, ApiError> {
    let tz = state.config.timezone;
    let range = validate_query(&query, studio_today(&tz)).inspect_err(|e| {
        tracing::info!(error = %e, "rejected availability query");
    })?;

    let response = match &state.availability {
        Availability::Mock => AvailabilityResponse {
            days: mock_availability(&range, &state.config),
            source: Source::Mock,
        },
        Availability::Live(source) => {
            // Widen by the buffer so busy time just outside the range still
            // blocks the first and last slots.
            let buffer = Duration::minutes(i64::from(state.config.buffer_minutes));
            let (time_min, time_max) = range.instant_bounds(&tz);
            let busy = source
                .busy_intervals(time_min - buffer, time_max + buffer)
                .await
                .map_err(|e| {
                    tracing::error!(error = %e, "busy-interval source failed");
                    ApiError::Upstream(e)
                })?;

            AvailabilityResponse {
                days: available_slots(&range, &busy, &state.config)
                    .iter()
                    .map(|day| day.format(&tz, state.time_format))
                    .collect(),
                source: Source::Live,
            }
        }
    };

    tracing::info!(
        start = %range.start(),
        end = %range.end(),
        days = response.days.len(),
        source = ?response.source,
        "served availability"
    );
    Ok(HttpResponse::Ok().json(response))
}

async fn preflight() -> HttpResponse {
    HttpResponse::Ok().finish()
}

async fn method_not_allowed() -> Result<HttpResponse, ApiError> {
    Err(ApiError::MethodNotAllowed)
}

async fn healthz(state: web::Data<AppState>) -> HttpResponse {
    let source = if state.availability.is_live() {
        Source::Live
    } else {
        Source::Mock
    };
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok", "source": source }))
}
