use axum::{extract::State, routing::get, Json, Router};
use tracing::{debug, instrument};

use crate::{
    error::AppError,
    state::AppState,
    users::{repo, repo_types::User},
};

pub fn users_routes() -> Router<AppState> {
    Router::new().route("/", get(list_users))
}

#[instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, AppError> {
    let users = repo::list_all(&state.db).await?;
    debug!(count = users.len(), "listed users");
    Ok(Json(users))
}
