use clap::Parser;

use users_service::{
    cli::{self, Cli},
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "users_service=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let args = Cli::parse();
    let app_state = AppState::init().await?;
    tracing::debug!(
        command = ?args.command,
        track_modifications = app_state.config.track_modifications,
        "starting"
    );

    cli::execute(args.command, app_state).await
}
