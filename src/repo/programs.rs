use std::collections::HashMap;

use rust_decimal::Decimal;
use sqlx::{types::Json, FromRow, Postgres, Transaction};

use crate::{db::DbPool, models::program::TravelProgram};

const COLUMNS: &str = "id, title, description, location, location_url, images, cover_image, \
                       included, price_per_person, is_main, itinerary";

// Fila tal cual sale de Postgres; las columnas JSONB llegan envueltas en Json
#[derive(FromRow)]
struct TravelProgramRow {
    id: i64,
    title: String,
    description: String,
    location: String,
    location_url: String,
    images: Json<Vec<String>>,
    cover_image: String,
    included: Json<Vec<String>>,
    price_per_person: Decimal,
    is_main: bool,
    itinerary: Json<HashMap<String, String>>,
}

impl From<TravelProgramRow> for TravelProgram {
    fn from(row: TravelProgramRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            location: row.location,
            location_url: row.location_url,
            images: row.images.0,
            cover_image: row.cover_image,
            included: row.included.0,
            price_per_person: row.price_per_person,
            is_main: row.is_main,
            itinerary: row.itinerary.0,
        }
    }
}

pub async fn insert(
    tx: &mut Transaction<'_, Postgres>,
    program: &TravelProgram,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        "INSERT INTO travel_programs \
         (title, description, location, location_url, images, cover_image, included, \
          price_per_person, is_main, itinerary) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
         RETURNING id",
    )
    .bind(&program.title)
    .bind(&program.description)
    .bind(&program.location)
    .bind(&program.location_url)
    .bind(Json(&program.images))
    .bind(&program.cover_image)
    .bind(Json(&program.included))
    .bind(program.price_per_person)
    .bind(program.is_main)
    .bind(Json(&program.itinerary))
    .fetch_one(&mut **tx)
    .await
}

pub async fn update(
    tx: &mut Transaction<'_, Postgres>,
    program: &TravelProgram,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE travel_programs SET \
         title = $1, description = $2, location = $3, location_url = $4, images = $5, \
         cover_image = $6, included = $7, price_per_person = $8, is_main = $9, itinerary = $10 \
         WHERE id = $11",
    )
    .bind(&program.title)
    .bind(&program.description)
    .bind(&program.location)
    .bind(&program.location_url)
    .bind(Json(&program.images))
    .bind(&program.cover_image)
    .bind(Json(&program.included))
    .bind(program.price_per_person)
    .bind(program.is_main)
    .bind(Json(&program.itinerary))
    .bind(program.id)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

pub async fn delete(tx: &mut Transaction<'_, Postgres>, id: i64) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM travel_programs WHERE id = $1")
        .bind(id)
        .execute(&mut **tx)
        .await?;

    Ok(())
}

pub async fn get_by_id(pool: &DbPool, id: i64) -> Result<Option<TravelProgram>, sqlx::Error> {
    let sql = format!("SELECT {COLUMNS} FROM travel_programs WHERE id = $1");
    let row: Option<TravelProgramRow> = sqlx::query_as(&sql).bind(id).fetch_optional(pool).await?;
    Ok(row.map(Into::into))
}

pub async fn list(pool: &DbPool) -> Result<Vec<TravelProgram>, sqlx::Error> {
    let sql = format!("SELECT {COLUMNS} FROM travel_programs ORDER BY id ASC");
    let rows: Vec<TravelProgramRow> = sqlx::query_as(&sql).fetch_all(pool).await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

pub async fn list_main(pool: &DbPool) -> Result<Vec<TravelProgram>, sqlx::Error> {
    let sql = format!("SELECT {COLUMNS} FROM travel_programs WHERE is_main = TRUE ORDER BY id ASC");
    let rows: Vec<TravelProgramRow> = sqlx::query_as(&sql).fetch_all(pool).await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

pub async fn count(pool: &DbPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM travel_programs")
        .fetch_one(pool)
        .await
}
