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
    models::{event::Event, user::Claims},
    repo,
    state::AppState,
    utils::files::folders,
};

// POST /api/dashboard/addEvent
pub async fn add_event_handler(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let form = collect_content_form(&mut multipart).await?;
    tracing::info!("Petición addEvent recibida");

    let title = non_blank(&form.title)
        .ok_or_else(|| ApiError::Validation("Title is required".to_string()))?;
    let description = non_blank(&form.description)
        .ok_or_else(|| ApiError::Validation("Description is required".to_string()))?;
    let cover_file = form
        .cover_image
        .ok_or_else(|| ApiError::Validation("Cover image is required".to_string()))?;

    resolve_caller(&state.pool, &claims).await?;

    let mut tx = state.pool.begin().await?;
    let mut uploaded: Vec<String> = Vec::new();

    let result = async {
        let cover = state
            .files
            .upload(folders::EVENTS_COVER, &cover_file)
            .await
            .map_err(|_| ApiError::Upload("Failed to upload cover image".to_string()))?;
        uploaded.push(cover.clone());

        let event = Event {
            id: 0,
            title,
            description,
            cover_image: cover,
        };

        let id = repo::events::insert(&mut tx, &event).await?;
        if id <= 0 {
            return Err(ApiError::Internal("Failed to generate Event Id".to_string()));
        }

        Ok(id)
    }
    .await;

    match result {
        Ok(id) => match tx.commit().await {
            Ok(()) => {
                tracing::info!("Event creado con Id: {}", id);
                Ok((
                    StatusCode::OK,
                    Json(json!({ "message": "Event created successfully", "eventId": id })),
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
            tracing::error!("Fallo creando el evento: {:?}", err);
            Err(err)
        }
    }
}

// PUT /api/dashboard/updateEvent/:id
pub async fn update_event_handler(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let form = collect_content_form(&mut multipart).await?;
    tracing::info!("Petición updateEvent para Id: {}", id);

    let mut event = repo::events::get_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Evento {} no encontrado", id);
            ApiError::NotFound("Event not found".to_string())
        })?;

    resolve_caller(&state.pool, &claims).await?;

    let mut tx = state.pool.begin().await?;
    let mut uploaded: Vec<String> = Vec::new();

    let result = async {
        if let Some(title) = non_blank(&form.title) {
            event.title = title;
        }
        if let Some(description) = non_blank(&form.description) {
            event.description = description;
        }

        if let Some(cover_file) = &form.cover_image {
            if !event.cover_image.is_empty() {
                state.files.delete(&event.cover_image).await;
            }
            let cover = state
                .files
                .upload(folders::EVENTS_COVER, cover_file)
                .await
                .map_err(|_| ApiError::Upload("Failed to upload cover image".to_string()))?;
            uploaded.push(cover.clone());
            event.cover_image = cover;
        }

        repo::events::update(&mut tx, &event).await?;
        Ok(event.id)
    }
    .await;

    match result {
        Ok(id) => match tx.commit().await {
            Ok(()) => {
                tracing::info!("Event actualizado con Id: {}", id);
                Ok((
                    StatusCode::OK,
                    Json(json!({ "message": "Event updated successfully", "eventId": id })),
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
            tracing::error!("Fallo actualizando el evento: {:?}", err);
            Err(err)
        }
    }
}

// DELETE /api/dashboard/deleteEvent/:id
pub async fn delete_event_handler(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    tracing::info!("Petición deleteEvent para Id: {}", id);

    let event = repo::events::get_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Evento {} no encontrado", id);
            ApiError::NotFound("Event not found".to_string())
        })?;

    resolve_caller(&state.pool, &claims).await?;

    let mut tx = state.pool.begin().await?;

    let result = async {
        if !event.cover_image.is_empty() {
            state.files.delete(&event.cover_image).await;
        }

        repo::events::delete(&mut tx, event.id).await?;
        Ok(())
    }
    .await;

    match result {
        Ok(()) => {
            tx.commit().await?;
            tracing::info!("Event eliminado con Id: {}", event.id);
            Ok((
                StatusCode::OK,
                Json(json!({ "message": "Event deleted successfully", "eventId": event.id })),
            ))
        }
        Err(err) => {
            if let Err(e) = tx.rollback().await {
                tracing::error!("Error al revertir la transacción: {:?}", e);
            }
            tracing::error!("Fallo eliminando el evento: {:?}", err);
            Err(err)
        }
    }
}

// GET /api/dashboard/getAllEvents
pub async fn get_all_events_handler(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    resolve_caller(&state.pool, &claims).await?;

    let events = repo::events::list(&state.pool).await?;
    let result: Vec<_> = events
        .iter()
        .map(|e| e.to_returned_dto(&state.config.base_api_url))
        .collect();

    tracing::info!("Devueltos {} eventos", result.len());
    Ok(Json(result))
}

// GET /api/dashboard/getEventById/:id
pub async fn get_event_by_id_handler(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    resolve_caller(&state.pool, &claims).await?;

    let event = repo::events::get_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Evento {} no encontrado", id);
            ApiError::NotFound("Event not found".to_string())
        })?;

    Ok(Json(event.to_returned_dto(&state.config.base_api_url)))
}
