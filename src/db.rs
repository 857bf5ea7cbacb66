use std::str::FromStr;

use anyhow::Context;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqliteConnection, SqlitePool,
};
use tracing::{debug, info};

use crate::config::AppConfig;

/// Tables owned by the model with their DDL, in creation order.
pub const TABLES: &[(&str, &str)] = &[(
    "users",
    r#"
    CREATE TABLE users (
        id     INTEGER PRIMARY KEY AUTOINCREMENT,
        email  VARCHAR(120) NOT NULL UNIQUE CHECK (length(email) <= 120),
        active BOOLEAN NOT NULL DEFAULT 1
    )
    "#,
)];

pub async fn connect(config: &AppConfig) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&config.database_url)
        .with_context(|| format!("parse DATABASE_URL {}", config.database_url))?
        .create_if_missing(true);

    // An in-memory database dies with its connection, so pin exactly one.
    let pool_options = if config.is_ephemeral() {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(5)
    };
    let pool = pool_options
        .connect_with(options)
        .await
        .context("connect to database")?;

    info!(ephemeral = config.is_ephemeral(), "database connected");
    Ok(pool)
}

pub async fn drop_all(conn: &mut SqliteConnection) -> Result<(), sqlx::Error> {
    for (table, _) in TABLES.iter().rev() {
        sqlx::query(&format!("DROP TABLE IF EXISTS {table}"))
            .execute(&mut *conn)
            .await?;
        debug!(table = %table, "dropped table");
    }
    Ok(())
}

pub async fn create_all(conn: &mut SqliteConnection) -> Result<(), sqlx::Error> {
    for (table, ddl) in TABLES {
        sqlx::query(ddl).execute(&mut *conn).await?;
        debug!(table = %table, "created table");
    }
    Ok(())
}

/// Drop and recreate the whole schema in one transaction.
pub async fn reset_schema(db: &SqlitePool) -> Result<(), sqlx::Error> {
    let mut tx = db.begin().await?;
    drop_all(&mut tx).await?;
    create_all(&mut tx).await?;
    tx.commit().await?;
    Ok(())
}
