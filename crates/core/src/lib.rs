//! # Slotbook Core
//!
//! Domain types shared by every slotbook crate: the persisted [`SlotRecord`],
//! the caller-facing [`SlotView`] and the [`BookingError`] returned by
//! booking and listing operations.
//!
//! [`SlotRecord`]: models::slot_record::SlotRecord
//! [`SlotView`]: models::slot_view::SlotView
//! [`BookingError`]: errors::BookingError

pub mod errors;
pub mod models;
