use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConflictReason {
    #[error("slot is already booked")]
    AlreadyBooked,
    #[error("slot is administratively closed")]
    SlotClosed,
}

/// Everything a booking operation can fail with. Validation errors are
/// raised before any transaction is opened; conflicts are reported only
/// after the transaction rolled back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingError {
    #[error("invalid request: {0}")]
    Validation(String),
    #[error("{0}")]
    Conflict(ConflictReason),
    #[error("booking not found")]
    NotFound,
    #[error("persistence failure: {0}")]
    Persistence(String),
}
