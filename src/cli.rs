use anyhow::Context;
use clap::{Parser, Subcommand};
use sqlx::SqlitePool;
use tracing::info;

use crate::{
    app, db,
    state::AppState,
    users::{repo, NewUser},
};

/// Fixed rows inserted by `seed_db`, in insertion order.
pub const SEED_EMAILS: [&str; 2] = ["michael@mherman.org", "test@example.com"];

#[derive(Debug, Parser)]
#[command(name = "users-service", version, about = "User listing service and admin commands")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Serve the HTTP API.
    Run,
    /// Drop all tables and recreate the schema. Destroys existing rows.
    #[command(name = "create_db")]
    CreateDb,
    /// Insert the fixed seed users.
    #[command(name = "seed_db")]
    SeedDb,
}

pub async fn execute(command: Command, state: AppState) -> anyhow::Result<()> {
    match command {
        Command::Run => run(state).await,
        Command::CreateDb => create_db(&state.db).await,
        Command::SeedDb => seed_db(&state.db, state.config.track_modifications).await,
    }
}

async fn run(state: AppState) -> anyhow::Result<()> {
    if state.config.is_ephemeral() {
        // Nothing else can ever reach this store, so give it a schema here.
        db::reset_schema(&state.db)
            .await
            .context("create schema for in-memory store")?;
        info!("in-memory store initialised; data will not persist");
    }
    let (host, port) = (state.config.host.clone(), state.config.port.clone());
    app::serve(app::build_app(state), &host, &port).await
}

pub async fn create_db(db: &SqlitePool) -> anyhow::Result<()> {
    db::reset_schema(db).await.context("create_db")?;
    info!("schema recreated");
    Ok(())
}

/// Inserts every seed row or none of them.
pub async fn seed_db(db: &SqlitePool, track_modifications: bool) -> anyhow::Result<()> {
    let mut tx = db.begin().await.context("seed_db: begin")?;
    for email in SEED_EMAILS {
        repo::insert_tracked(&mut *tx, &NewUser::new(email), track_modifications)
            .await
            .with_context(|| format!("seed_db: insert {email}"))?;
    }
    tx.commit().await.context("seed_db: commit")?;
    info!(count = SEED_EMAILS.len(), "seed users inserted");
    Ok(())
}
