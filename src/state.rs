use crate::config::AppConfig;
use crate::db;
use sqlx::SqlitePool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();
        Self::with_config(config).await
    }

    pub async fn with_config(config: AppConfig) -> anyhow::Result<Self> {
        let db = db::connect(&config).await?;
        Ok(Self::from_parts(db, Arc::new(config)))
    }

    pub fn from_parts(db: SqlitePool, config: Arc<AppConfig>) -> Self {
        Self { db, config }
    }

    /// Fresh in-memory store with no schema, default settings.
    pub async fn ephemeral() -> anyhow::Result<Self> {
        let config = AppConfig::from_lookup(|_| None);
        Self::with_config(config).await
    }
}
