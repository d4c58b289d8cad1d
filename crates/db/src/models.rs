use chrono::{DateTime, Utc};
use slotbook_core::models::slot_record::SlotRecord;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct DbSlotRecord {
    pub trainer_id: String,
    pub day_slot_key: String,
    pub client_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl From<DbSlotRecord> for SlotRecord {
    fn from(row: DbSlotRecord) -> Self {
        SlotRecord {
            trainer_id: row.trainer_id,
            day_slot_key: row.day_slot_key,
            client_id: row.client_id,
            start_time: row.start_time,
            end_time: row.end_time,
        }
    }
}
