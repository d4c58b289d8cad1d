use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{BookingError, BookingResult};
use crate::models::slot_record::SlotRecord;

/// A booked slot as handed to callers. Rebuilt from a [`SlotRecord`] on every
/// query and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotView {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub slot_index: u32,
}

impl SlotView {
    pub fn new(start_time: DateTime<Utc>, end_time: DateTime<Utc>, slot_index: u32) -> Self {
        Self {
            start_time,
            end_time,
            slot_index,
        }
    }

    /// Decodes the slot index of `record`; a malformed key is an error.
    pub fn from_record(record: &SlotRecord) -> BookingResult<Self> {
        let slot_index = record.slot_index()?;
        Ok(Self::new(record.start_time, record.end_time, slot_index))
    }
}

impl TryFrom<&SlotRecord> for SlotView {
    type Error = BookingError;

    fn try_from(record: &SlotRecord) -> BookingResult<Self> {
        Self::from_record(record)
    }
}
