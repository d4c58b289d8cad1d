//! Persisted form of a booked slot and the day-slot key rules.
//!
//! A trainer's calendar is split into one-hour slots. Every booking is stored
//! under `(trainer_id, day_slot_key)` where the day slot key has the form
//! `YYYY-MM-DD-SS` and `SS` is the zero-based slot index within the day.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{BookingError, BookingResult};

/// Length of one bookable slot.
pub const SLOT_DURATION_HOURS: i64 = 1;

/// Number of slots in a calendar day.
pub const SLOTS_PER_DAY: u32 = 24;

const KEY_SEPARATOR: char = '-';
const DAY_FORMAT: &str = "%Y-%m-%d";
const DAY_LEN: usize = "YYYY-MM-DD".len();

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotRecord {
    pub trainer_id: String,
    pub day_slot_key: String,
    pub client_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl SlotRecord {
    pub fn new(
        trainer_id: impl Into<String>,
        day_slot_key: impl Into<String>,
        client_id: impl Into<String>,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Self {
        Self {
            trainer_id: trainer_id.into(),
            day_slot_key: day_slot_key.into(),
            client_id: client_id.into(),
            start_time,
            end_time,
        }
    }

    /// Slot index encoded in this record's day slot key.
    pub fn slot_index(&self) -> BookingResult<u32> {
        decode_slot_index(&self.day_slot_key)
    }
}

/// Builds the `YYYY-MM-DD-HH` day slot key for a local date and hour.
///
/// Callers are expected to have validated the date; the formatting itself
/// never fails.
pub fn encode_key(year: i32, month: u32, day: u32, hour: u32) -> String {
    format!("{year:04}-{month:02}-{day:02}-{hour:02}")
}

/// Extracts the slot index from the suffix after the last `-` of a day slot key.
///
/// This is the only integrity check applied to keys read back from the store,
/// so it rejects anything [`encode_key`] could not have produced:
///
/// - a missing separator or an empty suffix
/// - a suffix with anything other than ASCII digits (`"01BLAH"`, `"+1"`)
/// - a day prefix that is not a `YYYY-MM-DD` calendar date
/// - an index of [`SLOTS_PER_DAY`] or more
///
/// # Errors
///
/// Returns [`BookingError::MalformedKey`] naming the offending key.
pub fn decode_slot_index(day_slot_key: &str) -> BookingResult<u32> {
    let malformed =
        |reason: &str| BookingError::MalformedKey(format!("{day_slot_key:?} ({reason})"));

    let (day, slot) = day_slot_key
        .rsplit_once(KEY_SEPARATOR)
        .ok_or_else(|| malformed("missing slot separator"))?;

    if slot.is_empty() || !slot.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed("slot suffix is not a non-negative integer"));
    }

    if !has_day_shape(day) || NaiveDate::parse_from_str(day, DAY_FORMAT).is_err() {
        return Err(malformed("day prefix is not a YYYY-MM-DD date"));
    }

    let index: u32 = slot
        .parse()
        .map_err(|_| malformed("slot index does not fit in u32"))?;
    if index >= SLOTS_PER_DAY {
        return Err(malformed("slot index past the end of the day"));
    }

    Ok(index)
}

/// `YYYY-MM-DD` with ASCII digits only; chrono alone would accept signs and padding.
fn has_day_shape(day: &str) -> bool {
    day.len() == DAY_LEN
        && day.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        })
}
