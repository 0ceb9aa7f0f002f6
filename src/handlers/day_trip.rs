use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use serde_json::json;

use crate::{
    error::ApiError,
    handlers::{
        forms::{collect_content_form, non_blank},
        resolve_caller,
    },
    models::{day_trip::DayTrip, user::Claims},
    repo,
    state::AppState,
    utils::{files::folders, itinerary::parse_itinerary},
};

// POST /api/dashboard/addDayTrip
pub async fn add_day_trip_handler(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let form = collect_content_form(&mut multipart).await?;
    tracing::info!(
        "Petición addDayTrip recibida. ItineraryJson: '{}'",
        form.itinerary_json.as_deref().unwrap_or("null")
    );

    let title = non_blank(&form.title)
        .ok_or_else(|| ApiError::Validation("Title is required".to_string()))?;
    let description = non_blank(&form.description)
        .ok_or_else(|| ApiError::Validation("Description is required".to_string()))?;
    let location = non_blank(&form.location)
        .ok_or_else(|| ApiError::Validation("Location is required".to_string()))?;
    let location_url = non_blank(&form.location_url)
        .ok_or_else(|| ApiError::Validation("Location URL is required".to_string()))?;
    let city = non_blank(&form.city)
        .ok_or_else(|| ApiError::Validation("City is required".to_string()))?;

    let price = form
        .price
        .ok_or_else(|| ApiError::Validation("Price per person is required".to_string()))?;

    let included = form.included.clone().unwrap_or_default();
    if included.is_empty() {
        return Err(ApiError::Validation(
            "Included items are required".to_string(),
        ));
    }

    let raw_itinerary = form.itinerary_json.as_deref().unwrap_or("");
    if raw_itinerary.trim().is_empty() {
        return Err(ApiError::Validation("Itinerary JSON is required".to_string()));
    }
    let itinerary = parse_itinerary(raw_itinerary)?;
    if itinerary.is_empty() {
        return Err(ApiError::Validation(
            "Itinerary is required and cannot be empty".to_string(),
        ));
    }

    resolve_caller(&state.pool, &claims).await?;

    let cover_file = form
        .cover_image
        .ok_or_else(|| ApiError::Validation("Cover image is required".to_string()))?;
    let gallery = form.images.unwrap_or_default();
    if gallery.is_empty() {
        return Err(ApiError::Validation("Images are required".to_string()));
    }

    let mut tx = state.pool.begin().await?;
    let mut uploaded: Vec<String> = Vec::new();

    let result = async {
        let cover = state
            .files
            .upload(folders::DAY_TRIPS_COVER, &cover_file)
            .await
            .map_err(|_| ApiError::Upload("Failed to upload cover image".to_string()))?;
        uploaded.push(cover.clone());

        let mut image_urls = Vec::new();
        for image in &gallery {
            if image.bytes.is_empty() {
                continue;
            }
            match state.files.upload(folders::DAY_TRIPS, image).await {
                Ok(url) => {
                    uploaded.push(url.clone());
                    image_urls.push(url);
                }
                Err(e) => tracing::warn!("Fallo subiendo una imagen de galería: {:?}", e),
            }
        }
        if image_urls.is_empty() {
            return Err(ApiError::Upload("Failed to upload images".to_string()));
        }

        let day_trip = DayTrip {
            id: 0,
            title,
            description,
            location,
            location_url,
            images: image_urls,
            cover_image: cover,
            included,
            price_per_person: price,
            is_main: form.is_main.unwrap_or(false),
            itinerary,
            city,
        };

        let id = repo::day_trips::insert(&mut tx, &day_trip).await?;
        if id <= 0 {
            return Err(ApiError::Internal(
                "Failed to generate DayTrip Id".to_string(),
            ));
        }

        Ok(id)
    }
    .await;

    match result {
        Ok(id) => match tx.commit().await {
            Ok(()) => {
                tracing::info!("DayTrip creado con Id: {}", id);
                Ok((
                    StatusCode::OK,
                    Json(json!({ "message": "DayTrip created successfully", "dayTripId": id })),
                ))
            }
            Err(e) => {
                state.files.cleanup(&uploaded).await;
                Err(e.into())
            }
        },
        Err(err) => {
            if let Err(e) = tx.rollback().await {
                tracing::error!("Error al revertir la transacción: {:?}", e);
            }
            state.files.cleanup(&uploaded).await;
            tracing::error!("Fallo creando la excursión: {:?}", err);
            Err(err)
        }
    }
}

// PUT /api/dashboard/updateDayTrip/:id
pub async fn update_day_trip_handler(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let form = collect_content_form(&mut multipart).await?;
    tracing::info!(
        "Petición updateDayTrip para Id: {}. ItineraryJson: '{}'",
        id,
        form.itinerary_json.as_deref().unwrap_or("null")
    );

    let mut day_trip = repo::day_trips::get_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Excursión {} no encontrada", id);
            ApiError::NotFound("DayTrip not found".to_string())
        })?;

    let mut new_itinerary = None;
    if let Some(raw) = form.itinerary_json.as_deref() {
        if !raw.trim().is_empty() {
            new_itinerary = Some(parse_itinerary(raw)?);
        }
    }

    resolve_caller(&state.pool, &claims).await?;

    let mut tx = state.pool.begin().await?;
    let mut uploaded: Vec<String> = Vec::new();

    let result = async {
        if let Some(title) = non_blank(&form.title) {
            day_trip.title = title;
        }
        if let Some(description) = non_blank(&form.description) {
            day_trip.description = description;
        }
        if let Some(location) = non_blank(&form.location) {
            day_trip.location = location;
        }
        if let Some(location_url) = non_blank(&form.location_url) {
            day_trip.location_url = location_url;
        }
        if let Some(city) = non_blank(&form.city) {
            day_trip.city = city;
        }
        if let Some(price) = form.price {
            day_trip.price_per_person = price;
        }
        if let Some(is_main) = form.is_main {
            day_trip.is_main = is_main;
        }
        if let Some(included) = form.included.clone() {
            day_trip.included = included;
        }
        if let Some(itinerary) = new_itinerary.take() {
            day_trip.itinerary = itinerary;
        }

        if let Some(cover_file) = &form.cover_image {
            if !day_trip.cover_image.is_empty() {
                state.files.delete(&day_trip.cover_image).await;
            }
            let cover = state
                .files
                .upload(folders::DAY_TRIPS_COVER, cover_file)
                .await
                .map_err(|_| ApiError::Upload("Failed to upload cover image".to_string()))?;
            uploaded.push(cover.clone());
            day_trip.cover_image = cover;
        }

        if let Some(gallery) = &form.images {
            if !gallery.is_empty() {
                for old in &day_trip.images {
                    state.files.delete(old).await;
                }

                let mut image_urls = Vec::new();
                for image in gallery {
                    if image.bytes.is_empty() {
                        continue;
                    }
                    match state.files.upload(folders::DAY_TRIPS, image).await {
                        Ok(url) => {
                            uploaded.push(url.clone());
                            image_urls.push(url);
                        }
                        Err(e) => tracing::warn!("Fallo subiendo una imagen de galería: {:?}", e),
                    }
                }
                if image_urls.is_empty() {
                    return Err(ApiError::Upload("Failed to upload images".to_string()));
                }
                day_trip.images = image_urls;
            }
        }

        repo::day_trips::update(&mut tx, &day_trip).await?;
        Ok(day_trip.id)
    }
    .await;

    match result {
        Ok(id) => match tx.commit().await {
            Ok(()) => {
                tracing::info!("DayTrip actualizado con Id: {}", id);
                Ok((
                    StatusCode::OK,
                    Json(json!({ "message": "DayTrip updated successfully", "dayTripId": id })),
                ))
            }
            Err(e) => {
                state.files.cleanup(&uploaded).await;
                Err(e.into())
            }
        },
        Err(err) => {
            if let Err(e) = tx.rollback().await {
                tracing::error!("Error al revertir la transacción: {:?}", e);
            }
            state.files.cleanup(&uploaded).await;
            tracing::error!("Fallo actualizando la excursión: {:?}", err);
            Err(err)
        }
    }
}

// DELETE /api/dashboard/deleteDayTrip/:id
pub async fn delete_day_trip_handler(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    tracing::info!("Petición deleteDayTrip para Id: {}", id);

    let day_trip = repo::day_trips::get_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Excursión {} no encontrada", id);
            ApiError::NotFound("DayTrip not found".to_string())
        })?;

    resolve_caller(&state.pool, &claims).await?;

    let mut tx = state.pool.begin().await?;

    let result = async {
        if !day_trip.cover_image.is_empty() {
            state.files.delete(&day_trip.cover_image).await;
        }
        for image in &day_trip.images {
            state.files.delete(image).await;
        }

        repo::day_trips::delete(&mut tx, day_trip.id).await?;
        Ok(())
    }
    .await;

    match result {
        Ok(()) => {
            tx.commit().await?;
            tracing::info!("DayTrip eliminado con Id: {}", day_trip.id);
            Ok((
                StatusCode::OK,
                Json(
                    json!({ "message": "DayTrip deleted successfully", "dayTripId": day_trip.id }),
                ),
            ))
        }
        Err(err) => {
            if let Err(e) = tx.rollback().await {
                tracing::error!("Error al revertir la transacción: {:?}", e);
            }
            tracing::error!("Fallo eliminando la excursión: {:?}", err);
            Err(err)
        }
    }
}

// GET /api/dashboard/getAllDayTrips
pub async fn get_all_day_trips_handler(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    resolve_caller(&state.pool, &claims).await?;

    let day_trips = repo::day_trips::list(&state.pool).await?;
    let result: Vec<_> = day_trips
        .iter()
        .map(|dt| dt.to_returned_dto(&state.config.base_api_url))
        .collect();

    tracing::info!("Devueltas {} excursiones", result.len());
    Ok(Json(result))
}

// GET /api/dashboard/getDayTripById/:id
pub async fn get_day_trip_by_id_handler(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    resolve_caller(&state.pool, &claims).await?;

    let day_trip = repo::day_trips::get_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Excursión {} no encontrada", id);
            ApiError::NotFound("DayTrip not found".to_string())
        })?;

    Ok(Json(day_trip.to_returned_dto(&state.config.base_api_url)))
}
