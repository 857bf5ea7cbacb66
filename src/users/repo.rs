use sqlx::{SqliteExecutor, SqlitePool};
use tracing::debug;

use crate::users::repo_types::{NewUser, User};

/// All users in insertion order.
pub async fn list_all(db: &SqlitePool) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, email, active
          FROM users
         ORDER BY id
        "#,
    )
    .fetch_all(db)
    .await
}

/// Insert one user; a duplicate email surfaces as a unique violation.
pub async fn insert<'e, E>(db: E, user: &NewUser) -> Result<User, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (email, active)
        VALUES ($1, $2)
        RETURNING id, email, active
        "#,
    )
    .bind(&user.email)
    .bind(user.active)
    .fetch_one(db)
    .await
}

/// Same as [`insert`], logging the written row when modification tracking is on.
pub async fn insert_tracked<'e, E>(db: E, user: &NewUser, track: bool) -> Result<User, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let created = insert(db, user).await?;
    if track {
        debug!(user_id = created.id, email = %created.email, active = created.active, "user inserted");
    }
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::AppConfig, db, error::AppError, state::AppState};

    async fn fresh_db() -> SqlitePool {
        let state = AppState::ephemeral().await.expect("state");
        db::reset_schema(&state.db).await.expect("schema");
        state.db
    }

    #[tokio::test]
    async fn list_all_on_empty_store() {
        let db = fresh_db().await;
        assert!(list_all(&db).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn insert_assigns_id_and_defaults_active() {
        let db = fresh_db().await;
        let a = insert(&db, &NewUser::new("a@example.com")).await.unwrap();
        let b = insert(&db, &NewUser::new("b@example.com")).await.unwrap();
        assert!(a.active);
        assert!(b.id > a.id);

        let all = list_all(&db).await.unwrap();
        assert_eq!(all, vec![a, b]);
    }

    #[tokio::test]
    async fn insert_keeps_explicit_inactive_flag() {
        let db = fresh_db().await;
        let mut user = NewUser::new("off@example.com");
        user.active = false;
        let created = insert_tracked(&db, &user, true).await.unwrap();
        assert!(!created.active);
    }

    #[tokio::test]
    async fn duplicate_email_is_unique_violation() {
        let db = fresh_db().await;
        insert(&db, &NewUser::new("dup@example.com")).await.unwrap();
        let err = insert(&db, &NewUser::new("dup@example.com"))
            .await
            .unwrap_err();
        assert!(AppError::from(err).is_unique_violation());

        let all = list_all(&db).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].email, "dup@example.com");
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_failed_insert() {
        let db = fresh_db().await;
        let first = insert(&db, &NewUser::new("x@example.com")).await.unwrap();
        let _ = insert(&db, &NewUser::new("x@example.com")).await;
        let second = insert(&db, &NewUser::new("y@example.com")).await.unwrap();
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn scheme_only_url_shares_one_store() {
        let config =
            AppConfig::from_lookup(|k| (k == "DATABASE_URL").then(|| "sqlite://".to_string()));
        let state = AppState::with_config(config).await.unwrap();
        db::reset_schema(&state.db).await.unwrap();
        insert(&state.db, &NewUser::new("a@example.com")).await.unwrap();

        for _ in 0..20 {
            assert_eq!(list_all(&state.db).await.unwrap().len(), 1);
        }
    }
}
