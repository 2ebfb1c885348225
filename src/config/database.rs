use anyhow::{Context, Result};
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::env;
use std::sync::Arc;
use std::time::Duration;

use crate::store::{ExerciseStore, MemoryStore, PgStore};

/// `DATABASE_URL` value selecting the in-memory store.
pub const MEMORY_URL_SCHEME: &str = "memory://";

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub connect_timeout: Duration,
}

impl DatabaseConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// `DATABASE_URL` is required; starting without it is a configuration fault.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .context("DATABASE_URL must be set")?;

        let max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(value) => value
                .parse::<u32>()
                .with_context(|| format!("DB_MAX_CONNECTIONS must be a number, got {value:?}"))?,
            None => 10,
        };

        let connect_timeout_secs = match lookup("DB_CONNECT_TIMEOUT") {
            Some(value) => value
                .parse::<u64>()
                .with_context(|| format!("DB_CONNECT_TIMEOUT must be a number, got {value:?}"))?,
            None => 30,
        };

        Ok(DatabaseConfig {
            url,
            max_connections,
            connect_timeout: Duration::from_secs(connect_timeout_secs),
        })
    }

    pub fn is_memory(&self) -> bool {
        self.url.starts_with(MEMORY_URL_SCHEME)
    }

    pub async fn create_pool(&self) -> Result<PgPool> {
        let pool = PgPoolOptions::new()
            .max_connections(self.max_connections)
            .acquire_timeout(self.connect_timeout)
            .connect(&self.url)
            .await?;

        Ok(pool)
    }

    /// Open the store named by `url`, running migrations for PostgreSQL.
    pub async fn open_store(&self) -> Result<Arc<dyn ExerciseStore>> {
        if self.is_memory() {
            tracing::warn!("using in-memory store, data will not survive a restart");
            return Ok(Arc::new(MemoryStore::new()));
        }

        let pool = self
            .create_pool()
            .await
            .context("failed to connect to database")?;
        let store = PgStore::new(pool);
        store
            .run_migrations()
            .await
            .context("failed to run database migrations")?;

        tracing::info!("database connection established");
        Ok(Arc::new(store))
    }
}
