use sqlx::{FromRow, Postgres, Transaction};

use crate::{db::DbPool, models::wedding::Wedding};

#[derive(FromRow)]
struct WeddingRow {
    id: i64,
    title: String,
    description: String,
    cover_image: String,
}

impl From<WeddingRow> for Wedding {
    fn from(row: WeddingRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            cover_image: row.cover_image,
        }
    }
}

pub async fn insert(
    tx: &mut Transaction<'_, Postgres>,
    wedding: &Wedding,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        "INSERT INTO weddings (title, description, cover_image) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(&wedding.title)
    .bind(&wedding.description)
    .bind(&wedding.cover_image)
    .fetch_one(&mut **tx)
    .await
}

pub async fn update(
    tx: &mut Transaction<'_, Postgres>,
    wedding: &Wedding,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE weddings SET title = $1, description = $2, cover_image = $3 WHERE id = $4")
        .bind(&wedding.title)
        .bind(&wedding.description)
        .bind(&wedding.cover_image)
        .bind(wedding.id)
        .execute(&mut **tx)
        .await?;

    Ok(())
}

pub async fn delete(tx: &mut Transaction<'_, Postgres>, id: i64) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM weddings WHERE id = $1")
        .bind(id)
        .execute(&mut **tx)
        .await?;

    Ok(())
}

pub async fn get_by_id(pool: &DbPool, id: i64) -> Result<Option<Wedding>, sqlx::Error> {
    let row: Option<WeddingRow> =
        sqlx::query_as("SELECT id, title, description, cover_image FROM weddings WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(row.map(Into::into))
}

pub async fn list(pool: &DbPool) -> Result<Vec<Wedding>, sqlx::Error> {
    let rows: Vec<WeddingRow> =
        sqlx::query_as("SELECT id, title, description, cover_image FROM weddings ORDER BY id ASC")
            .fetch_all(pool)
            .await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

pub async fn count(pool: &DbPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM weddings")
        .fetch_one(pool)
        .await
}
