use chrono::{DateTime, Utc};

use crate::{db::DbPool, models::user::User};

const COLUMNS: &str =
    "id, username, email, password_hash, role, email_confirmed, reset_code, reset_code_expires";

pub async fn find_by_email(pool: &DbPool, email: &str) -> Result<Option<User>, sqlx::Error> {
    let sql = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
    sqlx::query_as(&sql).bind(email).fetch_optional(pool).await
}

pub async fn find_by_id(pool: &DbPool, id: i64) -> Result<Option<User>, sqlx::Error> {
    let sql = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
    sqlx::query_as(&sql).bind(id).fetch_optional(pool).await
}

pub async fn insert(
    pool: &DbPool,
    username: &str,
    email: &str,
    password_hash: &str,
    role: &str,
) -> Result<User, sqlx::Error> {
    let sql = format!(
        "INSERT INTO users (username, email, password_hash, role, email_confirmed) \
         VALUES ($1, $2, $3, $4, TRUE) \
         RETURNING {COLUMNS}"
    );
    sqlx::query_as(&sql)
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .bind(role)
        .fetch_one(pool)
        .await
}

pub async fn list(pool: &DbPool) -> Result<Vec<User>, sqlx::Error> {
    let sql = format!("SELECT {COLUMNS} FROM users ORDER BY id ASC");
    sqlx::query_as(&sql).fetch_all(pool).await
}

pub async fn delete(pool: &DbPool, id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

pub async fn count(pool: &DbPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await
}

pub async fn set_reset_code(
    pool: &DbPool,
    id: i64,
    code: &str,
    expires: DateTime<Utc>,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE users SET reset_code = $1, reset_code_expires = $2 WHERE id = $3")
        .bind(code)
        .bind(expires)
        .bind(id)
        .execute(pool)
        .await?;

    Ok(())
}

/// Cambia la contraseña y consume el código de restablecimiento (un solo uso).
pub async fn update_password(
    pool: &DbPool,
    id: i64,
    password_hash: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE users SET password_hash = $1, reset_code = NULL, reset_code_expires = NULL \
         WHERE id = $2",
    )
    .bind(password_hash)
    .bind(id)
    .execute(pool)
    .await?;

    Ok(())
}
