//! Contract between the slot adapter and whatever key-value store holds the
//! booked slots.
//!
//! Items are keyed by `(trainer_id, day_slot_key)`. Implementations must make
//! [`SlotStore::conditional_save`] atomic: the precondition is checked and the
//! item written as one step, never as a read followed by a write.

use async_trait::async_trait;
use slotbook_core::models::slot_record::SlotRecord;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Precondition failed for the stored item")]
    PreconditionFailed,

    #[error("Store unavailable: {0}")]
    Unavailable(#[from] eyre::Report),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        Self::Unavailable(eyre::Report::new(err))
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Condition evaluated against the item currently stored under a record's key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Precondition {
    /// No item is stored under the key.
    Absent,
    /// The stored item belongs to this client.
    ClientIs(String),
    /// At least one of the conditions holds.
    AnyOf(Vec<Precondition>),
}

impl Precondition {
    /// Holds when the slot is free or already booked by `client_id`.
    pub fn absent_or_owned_by(client_id: impl Into<String>) -> Self {
        Self::AnyOf(vec![Self::Absent, Self::ClientIs(client_id.into())])
    }

    pub fn holds(&self, current: Option<&SlotRecord>) -> bool {
        match self {
            Self::Absent => current.is_none(),
            Self::ClientIs(client_id) => {
                current.is_some_and(|record| &record.client_id == client_id)
            }
            Self::AnyOf(conditions) => conditions.iter().any(|c| c.holds(current)),
        }
    }
}

#[async_trait]
pub trait SlotStore: Send + Sync {
    /// Unconditional upsert by primary key.
    async fn save(&self, record: &SlotRecord) -> StoreResult<()>;

    /// Saves `record` only if `precondition` holds for the currently stored
    /// item, failing with [`StoreError::PreconditionFailed`] otherwise.
    async fn conditional_save(
        &self,
        record: &SlotRecord,
        precondition: &Precondition,
    ) -> StoreResult<()>;

    async fn load(&self, trainer_id: &str, day_slot_key: &str) -> StoreResult<Option<SlotRecord>>;

    /// Every item stored for `trainer_id`, in no guaranteed order.
    async fn query_by_partition(&self, trainer_id: &str) -> StoreResult<Vec<SlotRecord>>;
}
