use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;

use crate::config::{ConnectionSettings, Setting};
use crate::env::EnvSnapshot;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolConfig {
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_connections: 4,
            acquire_timeout: Duration::from_secs(10),
        }
    }
}

impl PoolConfig {
    pub fn from_snapshot(env: &EnvSnapshot) -> Self {
        let max_connections = env
            .non_empty("SUPABASE_DB_MAX_CONNECTIONS")
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(4)
            .clamp(1, 32);

        let acquire_timeout_secs = env
            .non_empty("SUPABASE_DB_ACQUIRE_TIMEOUT_SECS")
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(10)
            .clamp(1, 60);

        Self {
            max_connections,
            acquire_timeout: Duration::from_secs(acquire_timeout_secs),
        }
    }

    fn options(&self) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .acquire_timeout(self.acquire_timeout)
    }
}

// never hand the placeholder connection string to sqlx
fn database_url(settings: &ConnectionSettings) -> anyhow::Result<&str> {
    if settings.is_placeholder(Setting::DatabaseUrl) {
        anyhow::bail!(
            "{} is not configured (still the placeholder connection string)",
            Setting::DatabaseUrl.env_var()
        );
    }
    Ok(&settings.database_url)
}

pub async fn make_pool(settings: &ConnectionSettings, cfg: &PoolConfig) -> anyhow::Result<PgPool> {
    let url = database_url(settings)?;

    let pool = cfg.options().connect(url).await?;

    Ok(pool)
}

/// Same guard as `make_pool`, but no connection is opened until the pool is
/// first used.
pub fn make_lazy_pool(settings: &ConnectionSettings, cfg: &PoolConfig) -> anyhow::Result<PgPool> {
    let url = database_url(settings)?;

    let pool = cfg.options().connect_lazy(url)?;

    Ok(pool)
}
