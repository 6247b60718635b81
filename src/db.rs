use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::config::Config;

// The database grants this application at most 20 connections.
pub const POOL_MIN_CONNECTIONS: u32 = 1;
pub const POOL_MAX_CONNECTIONS: u32 = 20;

pub async fn init_db(config: &Config) -> PgPool {
    PgPoolOptions::new()
        .min_connections(POOL_MIN_CONNECTIONS)
        .max_connections(config.db_max_connections)
        .connect(&config.database_url)
        .await
        .expect("Failed to connect to database")
}
