use dotenvy::dotenv;
use std::env;

use crate::db::{POOL_MAX_CONNECTIONS, POOL_MIN_CONNECTIONS};

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub server_addr: String,

    // Bounded by the pool limits in db.rs no matter what the env says.
    pub db_max_connections: u32,

    pub api_prefix: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            server_addr: env::var("SERVER_ADDR")
                .unwrap_or_else(|_| "127.0.0.1:8080".to_string()),
            db_max_connections: clamp_pool_size(
                env::var("DB_MAX_CONNECTIONS")
                    .unwrap_or_else(|_| POOL_MAX_CONNECTIONS.to_string())
                    .parse()
                    .unwrap(),
            ),
            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| "/api".to_string()),
        }
    }
}

pub fn clamp_pool_size(requested: u32) -> u32 {
    requested.clamp(POOL_MIN_CONNECTIONS, POOL_MAX_CONNECTIONS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_size_stays_within_bounds() {
        assert_eq!(clamp_pool_size(0), POOL_MIN_CONNECTIONS);
        assert_eq!(clamp_pool_size(5), 5);
        assert_eq!(clamp_pool_size(500), POOL_MAX_CONNECTIONS);
    }
}
