use chrono::{DateTime, NaiveDate, Utc};
use diesel::Queryable;
use serde::{Deserialize, Serialize};

/// Contact values of the synthetic booking row the admin "close slot"
/// action inserts. Reopening deletes a booking only when all three match.
pub const ADMIN_BLOCK_NAME: &str = "admin-block";
pub const ADMIN_BLOCK_PHONE: &str = "-";
pub const ADMIN_BLOCK_SOCIAL: &str = "-";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Queryable)]
pub struct Booking {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub social: String,
    pub email: Option<String>,
    pub date: NaiveDate,
    pub slot: String,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    pub fn is_admin_block(&self) -> bool {
        self.name == ADMIN_BLOCK_NAME
            && self.phone == ADMIN_BLOCK_PHONE
            && self.social == ADMIN_BLOCK_SOCIAL
    }
}

/// A validated booking waiting to be inserted. Id and creation timestamp
/// are assigned by the backend.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub name: String,
    pub phone: String,
    pub social: String,
    pub email: Option<String>,
    pub date: NaiveDate,
    pub slot: String,
}

impl NewBooking {
    pub fn admin_block(date: NaiveDate, slot: &str) -> Self {
        Self {
            name: ADMIN_BLOCK_NAME.into(),
            phone: ADMIN_BLOCK_PHONE.into(),
            social: ADMIN_BLOCK_SOCIAL.into(),
            email: None,
            date,
            slot: slot.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Queryable)]
pub struct SlotOverride {
    pub id: i64,
    pub date: NaiveDate,
    pub slot: String,
    pub is_open: bool,
    pub created_at: DateTime<Utc>,
}

/// What an override upsert did to the sentinel booking for its pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideOutcome {
    pub block_created: bool,
    pub block_removed: bool,
}
