use crate::slots::SlotConfig;
use crate::types::{Booking, SlotOverride};
use chrono::{Datelike, Duration, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayAvailability {
    pub date: NaiveDate,
    pub slots: Vec<SlotAvailability>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotAvailability {
    pub slot: String,
    pub label: String,
    pub open: bool,
    pub booked: bool,
}

/// The ordered sequence of bookable dates: scan exactly `days` raw
/// calendar days from `start`, then drop Saturdays and Sundays. The
/// result can be shorter than `days`; it is never reordered. Day
/// boundaries are pinned to UTC so the weekday classification does not
/// depend on the server's local timezone.
pub fn bookable_window(start: Option<NaiveDate>, days: u32, max_days: u32) -> Vec<NaiveDate> {
    let start = start.unwrap_or_else(|| Utc::now().date_naive());
    let days = days.clamp(1, max_days);
    (0..i64::from(days))
        .map(|offset| start + Duration::days(offset))
        .filter(|date| !matches!(date.weekday(), Weekday::Sat | Weekday::Sun))
        .collect()
}

/// Merge persisted state into the per-date, per-slot view. A booked slot
/// is never open, whatever the override says; an absent override means
/// open.
pub fn merge_availability(
    dates: &[NaiveDate],
    bookings: &[Booking],
    overrides: &[SlotOverride],
    config: &SlotConfig,
) -> Vec<DayAvailability> {
    let booked: HashSet<(NaiveDate, &str)> = bookings
        .iter()
        .map(|booking| (booking.date, booking.slot.as_str()))
        .collect();
    let forced: HashMap<(NaiveDate, &str), bool> = overrides
        .iter()
        .map(|entry| ((entry.date, entry.slot.as_str()), entry.is_open))
        .collect();

    dates
        .iter()
        .map(|&date| DayAvailability {
            date,
            slots: config
                .slots()
                .iter()
                .map(|def| {
                    let is_booked = booked.contains(&(date, def.code));
                    let forced_open = forced.get(&(date, def.code)).copied().unwrap_or(true);
                    SlotAvailability {
                        slot: def.code.to_string(),
                        label: def.label(),
                        open: !is_booked && forced_open,
                        booked: is_booked,
                    }
                })
                .collect(),
        })
        .collect()
}
