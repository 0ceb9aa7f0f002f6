use std::collections::HashMap;

use rust_decimal::Decimal;
use sqlx::{types::Json, FromRow, Postgres, Transaction};

use crate::{db::DbPool, models::day_trip::DayTrip};

const COLUMNS: &str = "id, title, description, location, location_url, images, cover_image, \
                       included, price_per_person, is_main, itinerary, city";

#[derive(FromRow)]
struct DayTripRow {
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
    city: String,
}

impl From<DayTripRow> for DayTrip {
    fn from(row: DayTripRow) -> Self {
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
            city: row.city,
        }
    }
}

pub async fn insert(
    tx: &mut Transaction<'_, Postgres>,
    day_trip: &DayTrip,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        "INSERT INTO day_trips \
         (title, description, location, location_url, images, cover_image, included, \
          price_per_person, is_main, itinerary, city) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
         RETURNING id",
    )
    .bind(&day_trip.title)
    .bind(&day_trip.description)
    .bind(&day_trip.location)
    .bind(&day_trip.location_url)
    .bind(Json(&day_trip.images))
    .bind(&day_trip.cover_image)
    .bind(Json(&day_trip.included))
    .bind(day_trip.price_per_person)
    .bind(day_trip.is_main)
    .bind(Json(&day_trip.itinerary))
    .bind(&day_trip.city)
    .fetch_one(&mut **tx)
    .await
}

pub async fn update(
    tx: &mut Transaction<'_, Postgres>,
    day_trip: &DayTrip,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE day_trips SET \
         title = $1, description = $2, location = $3, location_url = $4, images = $5, \
         cover_image = $6, included = $7, price_per_person = $8, is_main = $9, \
         itinerary = $10, city = $11 \
         WHERE id = $12",
    )
    .bind(&day_trip.title)
    .bind(&day_trip.description)
    .bind(&day_trip.location)
    .bind(&day_trip.location_url)
    .bind(Json(&day_trip.images))
    .bind(&day_trip.cover_image)
    .bind(Json(&day_trip.included))
    .bind(day_trip.price_per_person)
    .bind(day_trip.is_main)
    .bind(Json(&day_trip.itinerary))
    .bind(&day_trip.city)
    .bind(day_trip.id)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

pub async fn delete(tx: &mut Transaction<'_, Postgres>, id: i64) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM day_trips WHERE id = $1")
        .bind(id)
        .execute(&mut **tx)
        .await?;

    Ok(())
}

pub async fn get_by_id(pool: &DbPool, id: i64) -> Result<Option<DayTrip>, sqlx::Error> {
    let sql = format!("SELECT {COLUMNS} FROM day_trips WHERE id = $1");
    let row: Option<DayTripRow> = sqlx::query_as(&sql).bind(id).fetch_optional(pool).await?;
    Ok(row.map(Into::into))
}

pub async fn list(pool: &DbPool) -> Result<Vec<DayTrip>, sqlx::Error> {
    let sql = format!("SELECT {COLUMNS} FROM day_trips ORDER BY id ASC");
    let rows: Vec<DayTripRow> = sqlx::query_as(&sql).fetch_all(pool).await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

pub async fn list_by_city(pool: &DbPool, city: &str) -> Result<Vec<DayTrip>, sqlx::Error> {
    let sql = format!("SELECT {COLUMNS} FROM day_trips WHERE city = $1 ORDER BY id ASC");
    let rows: Vec<DayTripRow> = sqlx::query_as(&sql).bind(city).fetch_all(pool).await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

pub async fn count(pool: &DbPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM day_trips")
        .fetch_one(pool)
        .await
}
