use crate::backend::BookingBackend;
use crate::error::{BookingError, ConflictReason};
use crate::notification::BookingNotifier;
use crate::types::{Booking, NewBooking, OverrideOutcome, SlotOverride};
use chrono::{NaiveDate, Utc};
use std::sync::{
    atomic::{AtomicBool, AtomicU64, Ordering},
    Arc, Mutex,
};

pub struct MockBookingBackendInner {
    pub success: AtomicBool,
    pub calls_to_bookings_in_range: AtomicU64,
    pub calls_to_overrides_in_range: AtomicU64,
    pub calls_to_create_booking: AtomicU64,
    pub calls_to_set_slot_override: AtomicU64,
    pub calls_to_cancel_booking: AtomicU64,
    pub bookings: Mutex<Vec<Booking>>,
    pub overrides: Mutex<Vec<SlotOverride>>,
}

#[derive(Clone)]
pub struct MockBookingBackend(pub Arc<MockBookingBackendInner>);

impl MockBookingBackend {
    pub fn new() -> Self {
        Self(Arc::new(MockBookingBackendInner {
            success: AtomicBool::new(true),
            calls_to_bookings_in_range: AtomicU64::default(),
            calls_to_overrides_in_range: AtomicU64::default(),
            calls_to_create_booking: AtomicU64::default(),
            calls_to_set_slot_override: AtomicU64::default(),
            calls_to_cancel_booking: AtomicU64::default(),
            bookings: Mutex::default(),
            overrides: Mutex::default(),
        }))
    }

    fn succeeds(&self) -> bool {
        self.0.success.load(Ordering::SeqCst)
    }
}

impl BookingBackend for MockBookingBackend {
    fn bookings_in_range(
        &self,
        _from: NaiveDate,
        _to: NaiveDate,
    ) -> Result<Vec<Booking>, BookingError> {
        self.0
            .calls_to_bookings_in_range
            .fetch_add(1, Ordering::SeqCst);
        Ok(self.0.bookings.lock().unwrap().clone())
    }

    fn overrides_in_range(
        &self,
        _from: NaiveDate,
        _to: NaiveDate,
    ) -> Result<Vec<SlotOverride>, BookingError> {
        self.0
            .calls_to_overrides_in_range
            .fetch_add(1, Ordering::SeqCst);
        Ok(self.0.overrides.lock().unwrap().clone())
    }

    fn create_booking(&self, new: NewBooking) -> Result<Booking, BookingError> {
        self.0.calls_to_create_booking.fetch_add(1, Ordering::SeqCst);
        if !self.succeeds() {
            return Err(BookingError::Conflict(ConflictReason::AlreadyBooked));
        }
        Ok(Booking {
            id: 1,
            name: new.name,
            phone: new.phone,
            social: new.social,
            email: new.email,
            date: new.date,
            slot: new.slot,
            created_at: Utc::now(),
        })
    }

    fn set_slot_override(
        &self,
        _date: NaiveDate,
        _slot: &str,
        is_open: bool,
    ) -> Result<OverrideOutcome, BookingError> {
        self.0
            .calls_to_set_slot_override
            .fetch_add(1, Ordering::SeqCst);
        if !self.succeeds() {
            return Err(BookingError::Persistence("supposed to fail".into()));
        }
        Ok(OverrideOutcome {
            block_created: !is_open,
            block_removed: is_open,
        })
    }

    fn cancel_booking(&self, _id: i64) -> Result<(), BookingError> {
        self.0.calls_to_cancel_booking.fetch_add(1, Ordering::SeqCst);
        if !self.succeeds() {
            return Err(BookingError::NotFound);
        }
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct MockNotifier {
    pub notified: Arc<AtomicU64>,
}

impl BookingNotifier for MockNotifier {
    fn booking_created(&self, _booking: &Booking) {
        self.notified.fetch_add(1, Ordering::SeqCst);
    }
}
