use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Malformed day slot key: {0}")]
    MalformedKey(String),

    #[error("Slot {day_slot_key} of trainer {trainer_id} is already booked by another client")]
    SlotConflict {
        trainer_id: String,
        day_slot_key: String,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Store error: {0}")]
    Store(#[from] eyre::Report),
}

pub type BookingResult<T> = Result<T, BookingError>;
