use chrono::Utc;
use sqlx::{SqliteExecutor, SqlitePool};

pub const ACCESS_TOKEN_KEY: &str = "accessToken";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";

pub async fn fetch_value(db: &SqlitePool, name: &str) -> Result<Option<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>("SELECT value FROM session_tokens WHERE name = ?1")
        .bind(name)
        .fetch_optional(db)
        .await
}

pub async fn upsert_value(db: impl SqliteExecutor<'_>, name: &str, value: &str) -> Result<(), sqlx::Error> {
    let now = Utc::now().to_rfc3339();

    sqlx::query(
        r#"
        INSERT INTO session_tokens (name, value, updated_at)
        VALUES (?1, ?2, ?3)
        ON CONFLICT(name) DO UPDATE SET
            value = excluded.value,
            updated_at = excluded.updated_at
        "#,
    )
    .bind(name)
    .bind(value)
    .bind(now)
    .execute(db)
    .await?;

    Ok(())
}

pub async fn delete_value(db: impl SqliteExecutor<'_>, name: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM session_tokens WHERE name = ?1")
        .bind(name)
        .execute(db)
        .await?;

    Ok(result.rows_affected() > 0)
}
