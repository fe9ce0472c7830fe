use crate::types::Booking;
use tracing::{debug, info};

/// Post-commit collaborator. Implementations are best-effort: they run
/// in a spawned task after the booking transaction committed and must
/// never surface failures into the booking path.
pub trait BookingNotifier: Clone + Send + Sync + 'static {
    fn booking_created(&self, booking: &Booking);
}

/// Default notifier: structured log lines stand in for the admin
/// notification and the client confirmation mail.
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

impl BookingNotifier for LogNotifier {
    fn booking_created(&self, booking: &Booking) {
        info!(
            id = booking.id,
            date = %booking.date,
            slot = %booking.slot,
            name = %booking.name,
            "booking confirmed"
        );
        match &booking.email {
            Some(email) => info!(id = booking.id, %email, "client confirmation queued"),
            None => debug!(id = booking.id, "no client email supplied, skipping confirmation"),
        }
    }
}
