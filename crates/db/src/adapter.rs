//! # Booked Slot Adapter
//!
//! Books trainer slots and lists the slots booked within a time window.
//!
//! ## Booking
//!
//! A slot is identified by the trainer and a local date and hour in the
//! trainer's time zone. The local time is converted to an absolute instant
//! and the record is written with a conditional save that only succeeds if
//! the slot is free or already held by the same client. The store evaluates
//! that condition atomically, so concurrent bookings of one slot by different
//! clients end with exactly one winner and one [`BookingError::SlotConflict`].
//!
//! ## Listing
//!
//! The whole partition of the trainer is read and filtered in memory on the
//! absolute start instant. Every matching record must carry a well-formed day
//! slot key; a malformed one fails the whole call with
//! [`BookingError::MalformedKey`].

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use slotbook_core::{
    errors::{BookingError, BookingResult},
    models::{
        slot_record::{SLOT_DURATION_HOURS, SLOTS_PER_DAY, SlotRecord, encode_key},
        slot_view::SlotView,
    },
};
use tracing::{debug, warn};

use crate::store::{Precondition, SlotStore, StoreError};

const MAX_KEY_YEAR: i32 = 9999;

pub struct BookedSlotAdapter<S> {
    store: S,
}

impl<S: SlotStore> BookedSlotAdapter<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Books the one-hour slot starting at `hour:00` local time on the given
    /// date in `time_zone` for `client_id`.
    ///
    /// Booking a slot the same client already holds succeeds without changing
    /// anything.
    ///
    /// # Errors
    ///
    /// * `BookingError::InvalidInput` - Empty ids, an impossible date, an hour
    ///   outside `0..=23`, an unknown time zone or a local time skipped by a
    ///   DST transition. The store is not touched.
    /// * `BookingError::SlotConflict` - Another client holds the slot.
    /// * `BookingError::Store` - The store failed.
    #[allow(clippy::too_many_arguments)]
    pub async fn book_slot(
        &self,
        trainer_id: &str,
        client_id: &str,
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        time_zone: &str,
    ) -> BookingResult<()> {
        require_non_empty("trainer_id", trainer_id)?;
        require_non_empty("client_id", client_id)?;
        let date = slot_date(year, month, day, hour)?;
        let tz = parse_time_zone(time_zone)?;

        let start_time = slot_start(tz, date, hour)?;
        let end_time = start_time + Duration::hours(SLOT_DURATION_HOURS);
        let day_slot_key = encode_key(year, month, day, hour);

        debug!(
            "Booking slot: trainer_id={}, client_id={}, day_slot_key={}, start_time={}",
            trainer_id, client_id, day_slot_key, start_time
        );

        let record = SlotRecord::new(trainer_id, day_slot_key, client_id, start_time, end_time);
        let precondition = Precondition::absent_or_owned_by(client_id);

        match self.store.conditional_save(&record, &precondition).await {
            Ok(()) => Ok(()),
            Err(StoreError::PreconditionFailed) => {
                warn!(
                    "Slot already booked by another client: trainer_id={}, day_slot_key={}",
                    record.trainer_id, record.day_slot_key
                );
                Err(BookingError::SlotConflict {
                    trainer_id: record.trainer_id,
                    day_slot_key: record.day_slot_key,
                })
            }
            Err(StoreError::Unavailable(report)) => Err(BookingError::Store(report)),
        }
    }

    /// Lists the slots of `trainer_id` whose start instant lies in
    /// `[interval_start, interval_end)`.
    ///
    /// `time_zone` is validated but plays no part in the filter since stored
    /// instants are absolute. The order of the returned slots is unspecified.
    ///
    /// # Errors
    ///
    /// * `BookingError::InvalidInput` - Empty trainer id, an empty or inverted
    ///   interval, or an unknown time zone.
    /// * `BookingError::MalformedKey` - A matching record has a corrupt day
    ///   slot key.
    /// * `BookingError::Store` - The store failed.
    pub async fn list_booked_slots(
        &self,
        trainer_id: &str,
        interval_start: DateTime<Utc>,
        interval_end: DateTime<Utc>,
        time_zone: &str,
    ) -> BookingResult<Vec<SlotView>> {
        require_non_empty("trainer_id", trainer_id)?;
        if interval_start >= interval_end {
            return Err(BookingError::InvalidInput(format!(
                "interval start {interval_start} must be before interval end {interval_end}"
            )));
        }
        parse_time_zone(time_zone)?;

        let records = self
            .store
            .query_by_partition(trainer_id)
            .await
            .map_err(into_booking_error)?;

        debug!(
            "Filtering {} slots for trainer_id={} to [{}, {})",
            records.len(),
            trainer_id,
            interval_start,
            interval_end
        );

        records
            .iter()
            .filter(|record| {
                record.start_time >= interval_start && record.start_time < interval_end
            })
            .map(|record| {
                SlotView::from_record(record).inspect_err(|err| {
                    warn!(
                        "Corrupt slot record: trainer_id={}, error={}",
                        record.trainer_id, err
                    );
                })
            })
            .collect()
    }

    /// Loads the stored record for a local date and hour, if any.
    ///
    /// # Errors
    ///
    /// * `BookingError::InvalidInput` - Empty trainer id, an impossible date or
    ///   an hour outside `0..=23`.
    /// * `BookingError::Store` - The store failed.
    pub async fn load_slot(
        &self,
        trainer_id: &str,
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
    ) -> BookingResult<Option<SlotRecord>> {
        require_non_empty("trainer_id", trainer_id)?;
        slot_date(year, month, day, hour)?;

        let day_slot_key = encode_key(year, month, day, hour);
        self.store
            .load(trainer_id, &day_slot_key)
            .await
            .map_err(into_booking_error)
    }
}

fn into_booking_error(err: StoreError) -> BookingError {
    match err {
        StoreError::Unavailable(report) => BookingError::Store(report),
        StoreError::PreconditionFailed => {
            BookingError::Store(eyre::eyre!("unexpected precondition failure"))
        }
    }
}

fn require_non_empty(name: &str, value: &str) -> BookingResult<()> {
    if value.trim().is_empty() {
        return Err(BookingError::InvalidInput(format!("{name} must not be empty")));
    }
    Ok(())
}

fn slot_date(year: i32, month: u32, day: u32, hour: u32) -> BookingResult<NaiveDate> {
    if hour >= SLOTS_PER_DAY {
        return Err(BookingError::InvalidInput(format!(
            "hour {hour} is outside 0..={}",
            SLOTS_PER_DAY - 1
        )));
    }
    if !(0..=MAX_KEY_YEAR).contains(&year) {
        return Err(BookingError::InvalidInput(format!(
            "year {year} is outside 0..={MAX_KEY_YEAR}"
        )));
    }
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        BookingError::InvalidInput(format!("{year:04}-{month:02}-{day:02} is not a calendar date"))
    })
}

fn parse_time_zone(time_zone: &str) -> BookingResult<Tz> {
    time_zone
        .parse::<Tz>()
        .map_err(|_| BookingError::InvalidInput(format!("unknown time zone {time_zone:?}")))
}

/// Absolute instant of `hour:00` on `date` in `tz`.
///
/// A wall-clock time that occurs twice resolves to the earlier instant; one
/// skipped by a DST transition is rejected.
fn slot_start(tz: Tz, date: NaiveDate, hour: u32) -> BookingResult<DateTime<Utc>> {
    let local = date
        .and_hms_opt(hour, 0, 0)
        .ok_or_else(|| BookingError::InvalidInput(format!("hour {hour} is not a valid time")))?;

    tz.from_local_datetime(&local)
        .earliest()
        .map(|start| start.with_timezone(&Utc))
        .ok_or_else(|| {
            BookingError::InvalidInput(format!("{local} does not exist in time zone {}", tz.name()))
        })
}
