use async_trait::async_trait;
use mockall::mock;
use slotbook_core::models::slot_record::SlotRecord;

use crate::store::{Precondition, SlotStore, StoreResult};

// Mock slot store for adapter tests
mock! {
    pub SlotStore {}

    #[async_trait]
    impl SlotStore for SlotStore {
        async fn save(&self, record: &SlotRecord) -> StoreResult<()>;

        async fn conditional_save(
            &self,
            record: &SlotRecord,
            precondition: &Precondition,
        ) -> StoreResult<()>;

        async fn load(
            &self,
            trainer_id: &str,
            day_slot_key: &str,
        ) -> StoreResult<Option<SlotRecord>>;

        async fn query_by_partition(&self, trainer_id: &str) -> StoreResult<Vec<SlotRecord>>;
    }
}
