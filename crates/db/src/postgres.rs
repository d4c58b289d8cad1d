//! PostgreSQL implementation of [`SlotStore`].
//!
//! Conditional saves are a single statement, so the precondition is evaluated
//! by PostgreSQL under the row lock taken for the primary key:
//!
//! - free slot or listed owner: `INSERT ... ON CONFLICT DO UPDATE ... WHERE`
//! - free slot only: `INSERT ... ON CONFLICT DO NOTHING`
//! - listed owner only: guarded `UPDATE`
//!
//! Zero affected rows means the precondition did not hold.

use async_trait::async_trait;
use slotbook_core::models::slot_record::SlotRecord;
use tracing::debug;

use crate::DbPool;
use crate::models::DbSlotRecord;
use crate::store::{Precondition, SlotStore, StoreError, StoreResult};

#[derive(Debug, Clone)]
pub struct PgSlotStore {
    pool: DbPool,
}

impl PgSlotStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

/// A [`Precondition`] flattened into what a single SQL statement can check.
#[derive(Debug, Default, PartialEq, Eq)]
struct WriteGuard {
    allows_absent: bool,
    owners: Vec<String>,
}

impl WriteGuard {
    fn from_precondition(precondition: &Precondition) -> Self {
        let mut guard = Self::default();
        guard.collect(precondition);
        guard
    }

    fn collect(&mut self, precondition: &Precondition) {
        match precondition {
            Precondition::Absent => self.allows_absent = true,
            Precondition::ClientIs(client_id) => {
                if !self.owners.contains(client_id) {
                    self.owners.push(client_id.clone());
                }
            }
            Precondition::AnyOf(conditions) => {
                for condition in conditions {
                    self.collect(condition);
                }
            }
        }
    }
}

#[async_trait]
impl SlotStore for PgSlotStore {
    async fn save(&self, record: &SlotRecord) -> StoreResult<()> {
        debug!(
            "Saving slot: trainer_id={}, day_slot_key={}",
            record.trainer_id, record.day_slot_key
        );

        sqlx::query(
            r#"
            INSERT INTO booked_slots (trainer_id, day_slot_key, client_id, start_time, end_time)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (trainer_id, day_slot_key) DO UPDATE
            SET client_id = EXCLUDED.client_id,
                start_time = EXCLUDED.start_time,
                end_time = EXCLUDED.end_time
            "#,
        )
        .bind(&record.trainer_id)
        .bind(&record.day_slot_key)
        .bind(&record.client_id)
        .bind(record.start_time)
        .bind(record.end_time)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn conditional_save(
        &self,
        record: &SlotRecord,
        precondition: &Precondition,
    ) -> StoreResult<()> {
        let guard = WriteGuard::from_precondition(precondition);
        debug!(
            "Conditionally saving slot: trainer_id={}, day_slot_key={}, guard={:?}",
            record.trainer_id, record.day_slot_key, guard
        );

        let query = match (guard.allows_absent, guard.owners.is_empty()) {
            (true, false) => sqlx::query(
                r#"
                INSERT INTO booked_slots (trainer_id, day_slot_key, client_id, start_time, end_time)
                VALUES ($1, $2, $3, $4, $5)
                ON CONFLICT (trainer_id, day_slot_key) DO UPDATE
                SET client_id = EXCLUDED.client_id,
                    start_time = EXCLUDED.start_time,
                    end_time = EXCLUDED.end_time
                WHERE booked_slots.client_id = ANY($6)
                "#,
            ),
            (true, true) => sqlx::query(
                r#"
                INSERT INTO booked_slots (trainer_id, day_slot_key, client_id, start_time, end_time)
                VALUES ($1, $2, $3, $4, $5)
                ON CONFLICT (trainer_id, day_slot_key) DO NOTHING
                "#,
            ),
            (false, false) => sqlx::query(
                r#"
                UPDATE booked_slots
                SET client_id = $3, start_time = $4, end_time = $5
                WHERE trainer_id = $1 AND day_slot_key = $2 AND client_id = ANY($6)
                "#,
            ),
            (false, true) => return Err(StoreError::PreconditionFailed),
        };

        let mut query = query
            .bind(&record.trainer_id)
            .bind(&record.day_slot_key)
            .bind(&record.client_id)
            .bind(record.start_time)
            .bind(record.end_time);
        if !guard.owners.is_empty() {
            query = query.bind(guard.owners.clone());
        }

        let result = query.execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::PreconditionFailed);
        }

        Ok(())
    }

    async fn load(&self, trainer_id: &str, day_slot_key: &str) -> StoreResult<Option<SlotRecord>> {
        let row = sqlx::query_as::<_, DbSlotRecord>(
            r#"
            SELECT trainer_id, day_slot_key, client_id, start_time, end_time, created_at
            FROM booked_slots
            WHERE trainer_id = $1 AND day_slot_key = $2
            "#,
        )
        .bind(trainer_id)
        .bind(day_slot_key)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(SlotRecord::from))
    }

    async fn query_by_partition(&self, trainer_id: &str) -> StoreResult<Vec<SlotRecord>> {
        let rows = sqlx::query_as::<_, DbSlotRecord>(
            r#"
            SELECT trainer_id, day_slot_key, client_id, start_time, end_time, created_at
            FROM booked_slots
            WHERE trainer_id = $1
            ORDER BY day_slot_key ASC
            "#,
        )
        .bind(trainer_id)
        .fetch_all(&self.pool)
        .await?;

        debug!("Loaded {} slots for trainer_id={}", rows.len(), trainer_id);
        Ok(rows.into_iter().map(SlotRecord::from).collect())
    }
}
