use crate::error::BookingError;
use crate::types::{Booking, NewBooking, OverrideOutcome, SlotOverride};
use chrono::NaiveDate;

/// Persistence collaborator. Implementations must guarantee at most one
/// booking per (date, slot): a row lock serializes concurrent creates
/// for the same pair, and a storage-level unique constraint backs the
/// lock up. All multi-step operations are transactional; nothing written
/// inside a failed operation is ever visible.
pub trait BookingBackend: Clone + Send + Sync + 'static {
    fn bookings_in_range(&self, from: NaiveDate, to: NaiveDate)
        -> Result<Vec<Booking>, BookingError>;

    fn overrides_in_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<SlotOverride>, BookingError>;

    /// Insert a booking unless the pair is already booked or forced
    /// closed by an override. Returns the stored row with its generated
    /// id and creation timestamp.
    fn create_booking(&self, booking: NewBooking) -> Result<Booking, BookingError>;

    /// Upsert the override for (date, slot) and reconcile the sentinel
    /// booking: reopening removes a sentinel (never a customer booking),
    /// closing inserts one if the pair is unbooked. One transaction.
    fn set_slot_override(
        &self,
        date: NaiveDate,
        slot: &str,
        is_open: bool,
    ) -> Result<OverrideOutcome, BookingError>;

    fn cancel_booking(&self, id: i64) -> Result<(), BookingError>;
}
