use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Transaction};

use crate::{db::DbPool, models::service::Service};

#[derive(FromRow)]
struct ServiceRow {
    id: i64,
    title: String,
    description: String,
    cover_image: String,
    price: Decimal,
}

impl From<ServiceRow> for Service {
    fn from(row: ServiceRow) -> Self {
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
    service: &Service,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        "INSERT INTO services (title, description, cover_image, price) \
         VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(&service.title)
    .bind(&service.description)
    .bind(&service.cover_image)
    .bind(service.price)
    .fetch_one(&mut **tx)
    .await
}

pub async fn update(
    tx: &mut Transaction<'_, Postgres>,
    service: &Service,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE services SET title = $1, description = $2, cover_image = $3, price = $4 \
         WHERE id = $5",
    )
    .bind(&service.title)
    .bind(&service.description)
    .bind(&service.cover_image)
    .bind(service.price)
    .bind(service.id)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

pub async fn delete(tx: &mut Transaction<'_, Postgres>, id: i64) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM services WHERE id = $1")
        .bind(id)
        .execute(&mut **tx)
        .await?;

    Ok(())
}

pub async fn get_by_id(pool: &DbPool, id: i64) -> Result<Option<Service>, sqlx::Error> {
    let row: Option<ServiceRow> = sqlx::query_as(
        "SELECT id, title, description, cover_image, price FROM services WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(Into::into))
}

pub async fn list(pool: &DbPool) -> Result<Vec<Service>, sqlx::Error> {
    let rows: Vec<ServiceRow> = sqlx::query_as(
        "SELECT id, title, description, cover_image, price FROM services ORDER BY id ASC",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

pub async fn count(pool: &DbPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM services")
        .fetch_one(pool)
        .await
}
