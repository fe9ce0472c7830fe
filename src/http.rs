use crate::availability::{bookable_window, merge_availability, DayAvailability};
use crate::backend::BookingBackend;
use crate::booking_service::{self, BookingRequest, SlotOverrideRequest};
use crate::error::BookingError;
use crate::notification::BookingNotifier;
use crate::slots::SlotConfig;
use crate::types::{Booking, OverrideOutcome};
use axum::extract::{Path, Query, Request, State};
use axum::http::{header, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use chrono::{Duration, NaiveDate, Utc};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::error;

#[derive(Clone)]
pub struct AppState<T: BookingBackend, N: BookingNotifier> {
    pub backend: T,
    pub notifier: N,
    pub slots: Arc<SlotConfig>,
    pub admin_token: Arc<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct AvailabilityQuery {
    start: Option<String>,
    days: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RangeQuery {
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
}

pub fn create_app<T: BookingBackend, N: BookingNotifier>(state: AppState<T, N>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let public = Router::new()
        .route("/availability", get(get_availability))
        .route("/book", post(book_slot));

    let admin = Router::new()
        .route("/admin/api/bookings", get(list_bookings))
        .route("/admin/api/bookings.csv", get(list_bookings_csv))
        .route("/admin/api/slot", post(set_slot))
        .route("/admin/api/booking/:id", delete(remove_booking))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            admin_auth::<T, N>,
        ));

    Router::new()
        .merge(public)
        .merge(admin)
        .with_state(state)
        .layer(cors)
}

impl IntoResponse for BookingError {
    fn into_response(self) -> Response {
        let status = match &self {
            BookingError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            BookingError::Conflict(_) => StatusCode::CONFLICT,
            BookingError::NotFound => StatusCode::NOT_FOUND,
            BookingError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if matches!(self, BookingError::Persistence(_)) {
            error!(error = %self, "request failed on the persistence layer");
        }
        (status, self.to_string()).into_response()
    }
}

/// Shared-secret bearer token, compared for exact equality. No sessions.
async fn admin_auth<T: BookingBackend, N: BookingNotifier>(
    State(state): State<AppState<T, N>>,
    request: Request,
    next: Next,
) -> Result<Response, (StatusCode, String)> {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));
    match token {
        Some(token) if token == state.admin_token.as_str() => Ok(next.run(request).await),
        Some(_) => Err((StatusCode::UNAUTHORIZED, "Unauthorized".to_string())),
        None => Err((StatusCode::UNAUTHORIZED, "Missing credentials".to_string())),
    }
}

async fn get_availability<T: BookingBackend, N: BookingNotifier>(
    State(state): State<AppState<T, N>>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<Vec<DayAvailability>>, BookingError> {
    // A malformed start date falls back to today, it is not an error.
    let start = query
        .start
        .as_deref()
        .and_then(|text| NaiveDate::parse_from_str(text, "%Y-%m-%d").ok());
    let days = query.days.unwrap_or(state.slots.window_days);

    let window = bookable_window(start, days, state.slots.max_window_days);
    let (Some(&first), Some(&last)) = (window.first(), window.last()) else {
        return Ok(Json(vec![]));
    };

    let bookings = state.backend.bookings_in_range(first, last)?;
    let overrides = state.backend.overrides_in_range(first, last)?;
    Ok(Json(merge_availability(
        &window,
        &bookings,
        &overrides,
        &state.slots,
    )))
}

async fn book_slot<T: BookingBackend, N: BookingNotifier>(
    State(state): State<AppState<T, N>>,
    Json(request): Json<BookingRequest>,
) -> Result<Json<Booking>, BookingError> {
    let booking = booking_service::create_booking(&state.backend, &state.slots, request)?;

    // Post-commit, fire and forget. A failing notification never fails
    // the booking response.
    let notifier = state.notifier.clone();
    let committed = booking.clone();
    tokio::spawn(async move { notifier.booking_created(&committed) });

    Ok(Json(booking))
}

fn range_or_default(slots: &SlotConfig, query: RangeQuery) -> (NaiveDate, NaiveDate) {
    let today = Utc::now().date_naive();
    let from = query.from.unwrap_or(today);
    let to = query
        .to
        .unwrap_or(from + Duration::days(i64::from(slots.window_days) - 1));
    (from, to)
}

async fn list_bookings<T: BookingBackend, N: BookingNotifier>(
    State(state): State<AppState<T, N>>,
    Query(query): Query<RangeQuery>,
) -> Result<Json<Vec<Booking>>, BookingError> {
    let (from, to) = range_or_default(&state.slots, query);
    Ok(Json(state.backend.bookings_in_range(from, to)?))
}

async fn list_bookings_csv<T: BookingBackend, N: BookingNotifier>(
    State(state): State<AppState<T, N>>,
    Query(query): Query<RangeQuery>,
) -> Result<Response, BookingError> {
    let (from, to) = range_or_default(&state.slots, query);
    let bookings = state.backend.bookings_in_range(from, to)?;

    let mut csv = String::from("id,date,slot,name,phone,social,email,created_at\n");
    for booking in &bookings {
        csv.push_str(&format!(
            "{},{},{},{},{},{},{},{}\n",
            booking.id,
            booking.date,
            csv_field(&booking.slot),
            csv_field(&booking.name),
            csv_field(&booking.phone),
            csv_field(&booking.social),
            csv_field(booking.email.as_deref().unwrap_or("")),
            booking.created_at.to_rfc3339(),
        ));
    }

    Ok(([(header::CONTENT_TYPE, "text/csv; charset=utf-8")], csv).into_response())
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

async fn set_slot<T: BookingBackend, N: BookingNotifier>(
    State(state): State<AppState<T, N>>,
    Json(request): Json<SlotOverrideRequest>,
) -> Result<Json<OverrideOutcome>, BookingError> {
    let outcome = booking_service::set_slot_override(&state.backend, &state.slots, request)?;
    Ok(Json(outcome))
}

async fn remove_booking<T: BookingBackend, N: BookingNotifier>(
    State(state): State<AppState<T, N>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, BookingError> {
    booking_service::cancel_booking(&state.backend, id)?;
    Ok(StatusCode::NO_CONTENT)
}
