use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Transaction};

use crate::{db::DbPool, models::activity::Activity};

#[derive(FromRow)]
struct ActivityRow {
    id: i64,
    title: String,
    description: String,
    cover_image: String,
    price: Decimal,
}

impl From<ActivityRow> for Activity {
    fn from(row: ActivityRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            cover_image: row.cover_image,
            price: row.price,
        }
    }
}

pub async fn insert(
    tx: &mut Transaction<'_, Postgres>,
    activity: &Activity,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        "INSERT INTO activities (title, description, cover_image, price) \
         VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(&activity.title)
    .bind(&activity.description)
    .bind(&activity.cover_image)
    .bind(activity.price)
    .fetch_one(&mut **tx)
    .await
}

pub async fn update(
    tx: &mut Transaction<'_, Postgres>,
    activity: &Activity,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE activities SET title = $1, description = $2, cover_image = $3, price = $4 \
         WHERE id = $5",
    )
    .bind(&activity.title)
    .bind(&activity.description)
    .bind(&activity.cover_image)
    .bind(activity.price)
    .bind(activity.id)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

pub async fn delete(tx: &mut Transaction<'_, Postgres>, id: i64) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM activities WHERE id = $1")
        .bind(id)
        .execute(&mut **tx)
        .await?;

    Ok(())
}

pub async fn get_by_id(pool: &DbPool, id: i64) -> Result<Option<Activity>, sqlx::Error> {
    let row: Option<ActivityRow> = sqlx::query_as(
        "SELECT id, title, description, cover_image, price FROM activities WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(Into::into))
}

pub async fn list(pool: &DbPool) -> Result<Vec<Activity>, sqlx::Error> {
    let rows: Vec<ActivityRow> = sqlx::query_as(
        "SELECT id, title, description, cover_image, price FROM activities ORDER BY id ASC",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

pub async fn count(pool: &DbPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM activities")
        .fetch_one(pool)
        .await
}
