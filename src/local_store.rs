use crate::backend::BookingBackend;
use crate::error::{BookingError, ConflictReason};
use crate::types::{Booking, NewBooking, OverrideOutcome, SlotOverride};
use chrono::{NaiveDate, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// In-memory backend used when no database is configured, and by tests.
/// The single mutex plays the role of the database's row lock: every
/// multi-step operation holds it from first read to last write, so the
/// transactional semantics match the Postgres backend observably.
#[derive(Debug, Clone, Default)]
pub struct LocalStore {
    inner: Arc<Mutex<LocalStoreInner>>,
}

#[derive(Debug, Default)]
struct LocalStoreInner {
    next_booking_id: i64,
    next_override_id: i64,
    bookings: HashMap<(NaiveDate, String), Booking>,
    overrides: HashMap<(NaiveDate, String), SlotOverride>,
}

impl LocalStoreInner {
    fn insert_booking(&mut self, new: NewBooking) -> Booking {
        self.next_booking_id += 1;
        let booking = Booking {
            id: self.next_booking_id,
            name: new.name,
            phone: new.phone,
            social: new.social,
            email: new.email,
            date: new.date,
            slot: new.slot,
            created_at: Utc::now(),
        };
        self.bookings
            .insert((booking.date, booking.slot.clone()), booking.clone());
        booking
    }
}

impl BookingBackend for LocalStore {
    fn bookings_in_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Booking>, BookingError> {
        let inner = self.inner.lock().unwrap();
        let mut bookings: Vec<Booking> = inner
            .bookings
            .values()
            .filter(|booking| booking.date >= from && booking.date <= to)
            .cloned()
            .collect();
        bookings.sort_by(|a, b| (a.date, &a.slot).cmp(&(b.date, &b.slot)));
        Ok(bookings)
    }

    fn overrides_in_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<SlotOverride>, BookingError> {
        let inner = self.inner.lock().unwrap();
        let mut overrides: Vec<SlotOverride> = inner
            .overrides
            .values()
            .filter(|entry| entry.date >= from && entry.date <= to)
            .cloned()
            .collect();
        overrides.sort_by(|a, b| (a.date, &a.slot).cmp(&(b.date, &b.slot)));
        Ok(overrides)
    }

    fn create_booking(&self, new: NewBooking) -> Result<Booking, BookingError> {
        let mut inner = self.inner.lock().unwrap();
        let pair = (new.date, new.slot.clone());
        if inner.bookings.contains_key(&pair) {
            return Err(BookingError::Conflict(ConflictReason::AlreadyBooked));
        }
        if let Some(entry) = inner.overrides.get(&pair) {
            if !entry.is_open {
                return Err(BookingError::Conflict(ConflictReason::SlotClosed));
            }
        }
        Ok(inner.insert_booking(new))
    }

    fn set_slot_override(
        &self,
        date: NaiveDate,
        slot: &str,
        is_open: bool,
    ) -> Result<OverrideOutcome, BookingError> {
        let mut guard = self.inner.lock().unwrap();
        let inner = &mut *guard;
        let pair = (date, slot.to_string());

        inner.next_override_id += 1;
        let id_if_new = inner.next_override_id;
        let entry = inner
            .overrides
            .entry(pair.clone())
            .or_insert_with(|| SlotOverride {
                id: id_if_new,
                date,
                slot: slot.to_string(),
                is_open,
                created_at: Utc::now(),
            });
        entry.is_open = is_open;

        if is_open {
            let removable = inner
                .bookings
                .get(&pair)
                .map(Booking::is_admin_block)
                .unwrap_or(false);
            if removable {
                inner.bookings.remove(&pair);
            }
            Ok(OverrideOutcome {
                block_created: false,
                block_removed: removable,
            })
        } else if inner.bookings.contains_key(&pair) {
            Ok(OverrideOutcome {
                block_created: false,
                block_removed: false,
            })
        } else {
            inner.insert_booking(NewBooking::admin_block(date, slot));
            Ok(OverrideOutcome {
                block_created: true,
                block_removed: false,
            })
        }
    }

    fn cancel_booking(&self, id: i64) -> Result<(), BookingError> {
        let mut inner = self.inner.lock().unwrap();
        let pair = inner
            .bookings
            .values()
            .find(|booking| booking.id == id)
            .map(|booking| (booking.date, booking.slot.clone()));
        match pair {
            Some(pair) => {
                inner.bookings.remove(&pair);
                Ok(())
            }
            None => Err(BookingError::NotFound),
        }
    }
}
