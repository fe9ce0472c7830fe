use crate::availability::bookable_window;
use crate::backend::BookingBackend;
use crate::error::BookingError;
use crate::slots::SlotConfig;
use crate::types::{Booking, NewBooking, OverrideOutcome};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BookingRequest {
    pub name: String,
    pub phone: String,
    pub social: String,
    pub email: Option<String>,
    pub date: Option<NaiveDate>,
    pub slot: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SlotOverrideRequest {
    pub date: Option<NaiveDate>,
    pub slot: String,
    pub is_open: Option<bool>,
}

/// Validate a booking request and hand it to the backend's transactional
/// create. Validation runs before any transaction is opened so rejected
/// requests never touch persistence or contend for the row lock. The
/// date is re-checked against the server-side window; clients cannot
/// book outside it by crafting their own dates.
pub fn create_booking<T: BookingBackend>(
    backend: &T,
    config: &SlotConfig,
    request: BookingRequest,
) -> Result<Booking, BookingError> {
    let date = validate_pair(config, request.date, &request.slot)?;
    for (field, value) in [
        ("name", &request.name),
        ("phone", &request.phone),
        ("social", &request.social),
    ] {
        if value.trim().is_empty() {
            return Err(BookingError::Validation(format!("{field} is required")));
        }
    }

    let window = bookable_window(None, config.window_days, config.max_window_days);
    if !window.contains(&date) {
        return Err(BookingError::Validation(
            "date is outside the bookable window".into(),
        ));
    }

    backend.create_booking(NewBooking {
        name: request.name,
        phone: request.phone,
        social: request.social,
        email: request.email.filter(|email| !email.trim().is_empty()),
        date,
        slot: request.slot,
    })
}

pub fn set_slot_override<T: BookingBackend>(
    backend: &T,
    config: &SlotConfig,
    request: SlotOverrideRequest,
) -> Result<OverrideOutcome, BookingError> {
    let date = validate_pair(config, request.date, &request.slot)?;
    let is_open = request
        .is_open
        .ok_or_else(|| BookingError::Validation("is_open is required".into()))?;
    backend.set_slot_override(date, &request.slot, is_open)
}

pub fn cancel_booking<T: BookingBackend>(backend: &T, id: i64) -> Result<(), BookingError> {
    backend.cancel_booking(id)
}

fn validate_pair(
    config: &SlotConfig,
    date: Option<NaiveDate>,
    slot: &str,
) -> Result<NaiveDate, BookingError> {
    let date = date.ok_or_else(|| BookingError::Validation("date is required".into()))?;
    if !config.is_known(slot) {
        return Err(BookingError::Validation(format!("unknown slot '{slot}'")));
    }
    Ok(date)
}
