pub mod adapter;
pub mod config;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod schema;
pub mod store;

pub mod mock;

use eyre::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};

use crate::config::StoreConfig;

pub type DbPool = Pool<Postgres>;

pub async fn create_pool(config: &StoreConfig) -> Result<DbPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;

    Ok(pool)
}
