use sqlx::{FromRow, Postgres, Transaction};

use crate::{db::DbPool, models::event::Event};

#[derive(FromRow)]
struct EventRow {
    id: i64,
    title: String,
    description: String,
    cover_image: String,
}

impl From<EventRow> for Event {
    fn from(row: EventRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            cover_image: row.cover_image,
        }
    }
}

pub async fn insert(tx: &mut Transaction<'_, Postgres>, event: &Event) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        "INSERT INTO events (title, description, cover_image) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(&event.title)
    .bind(&event.description)
    .bind(&event.cover_image)
    .fetch_one(&mut **tx)
    .await
}

pub async fn update(tx: &mut Transaction<'_, Postgres>, event: &Event) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE events SET title = $1, description = $2, cover_image = $3 WHERE id = $4")
        .bind(&event.title)
        .bind(&event.description)
        .bind(&event.cover_image)
        .bind(event.id)
        .execute(&mut **tx)
        .await?;

    Ok(())
}

pub async fn delete(tx: &mut Transaction<'_, Postgres>, id: i64) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM events WHERE id = $1")
        .bind(id)
        .execute(&mut **tx)
        .await?;

    Ok(())
}

pub async fn get_by_id(pool: &DbPool, id: i64) -> Result<Option<Event>, sqlx::Error> {
    let row: Option<EventRow> =
        sqlx::query_as("SELECT id, title, description, cover_image FROM events WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(row.map(Into::into))
}

pub async fn list(pool: &DbPool) -> Result<Vec<Event>, sqlx::Error> {
    let rows: Vec<EventRow> =
        sqlx::query_as("SELECT id, title, description, cover_image FROM events ORDER BY id ASC")
            .fetch_all(pool)
            .await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

pub async fn count(pool: &DbPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM events")
        .fetch_one(pool)
        .await
}
