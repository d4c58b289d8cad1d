use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use slotbook_core::models::slot_record::SlotRecord;
use tokio::sync::Mutex;

use crate::store::{Precondition, SlotStore, StoreError, StoreResult};

type SlotKey = (String, String);

/// Process-local slot store. Clones share the same items.
#[derive(Debug, Clone, Default)]
pub struct InMemorySlotStore {
    items: Arc<Mutex<BTreeMap<SlotKey, SlotRecord>>>,
}

impl InMemorySlotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.items.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.lock().await.is_empty()
    }
}

fn key_of(record: &SlotRecord) -> SlotKey {
    (record.trainer_id.clone(), record.day_slot_key.clone())
}

#[async_trait]
impl SlotStore for InMemorySlotStore {
    async fn save(&self, record: &SlotRecord) -> StoreResult<()> {
        self.items.lock().await.insert(key_of(record), record.clone());
        Ok(())
    }

    async fn conditional_save(
        &self,
        record: &SlotRecord,
        precondition: &Precondition,
    ) -> StoreResult<()> {
        let key = key_of(record);
        // Held across check and insert.
        let mut items = self.items.lock().await;

        if !precondition.holds(items.get(&key)) {
            return Err(StoreError::PreconditionFailed);
        }

        items.insert(key, record.clone());
        Ok(())
    }

    async fn load(&self, trainer_id: &str, day_slot_key: &str) -> StoreResult<Option<SlotRecord>> {
        let items = self.items.lock().await;
        Ok(items
            .get(&(trainer_id.to_string(), day_slot_key.to_string()))
            .cloned())
    }

    async fn query_by_partition(&self, trainer_id: &str) -> StoreResult<Vec<SlotRecord>> {
        let items = self.items.lock().await;
        Ok(items
            .values()
            .filter(|record| record.trainer_id == trainer_id)
            .cloned()
            .collect())
    }
}
