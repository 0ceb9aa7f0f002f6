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
    models::{user::Claims, wedding::Wedding},
    repo,
    state::AppState,
    utils::files::folders,
};

// POST /api/dashboard/addWedding
pub async fn add_wedding_handler(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let form = collect_content_form(&mut multipart).await?;
    tracing::info!("Petición addWedding recibida");

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
            .upload(folders::WEDDINGS_COVER, &cover_file)
            .await
            .map_err(|_| ApiError::Upload("Failed to upload cover image".to_string()))?;
        uploaded.push(cover.clone());

        let wedding = Wedding {
            id: 0,
            title,
            description,
            cover_image: cover,
        };

        let id = repo::weddings::insert(&mut tx, &wedding).await?;
        if id <= 0 {
            return Err(ApiError::Internal(
                "Failed to generate Wedding Id".to_string(),
            ));
        }

        Ok(id)
    }
    .await;

    match result {
        Ok(id) => match tx.commit().await {
            Ok(()) => {
                tracing::info!("Wedding creada con Id: {}", id);
                Ok((
                    StatusCode::OK,
                    Json(json!({ "message": "Wedding created successfully", "weddingId": id })),
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
            tracing::error!("Fallo creando la boda: {:?}", err);
            Err(err)
        }
    }
}

// PUT /api/dashboard/updateWedding/:id
pub async fn update_wedding_handler(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let form = collect_content_form(&mut multipart).await?;
    tracing::info!("Petición updateWedding para Id: {}", id);

    let mut wedding = repo::weddings::get_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Boda {} no encontrada", id);
            ApiError::NotFound("Wedding not found".to_string())
        })?;

    resolve_caller(&state.pool, &claims).await?;

    let mut tx = state.pool.begin().await?;
    let mut uploaded: Vec<String> = Vec::new();

    let result = async {
        if let Some(title) = non_blank(&form.title) {
            wedding.title = title;
        }
        if let Some(description) = non_blank(&form.description) {
            wedding.description = description;
        }

        if let Some(cover_file) = &form.cover_image {
            if !wedding.cover_image.is_empty() {
                state.files.delete(&wedding.cover_image).await;
            }
            let cover = state
                .files
                .upload(folders::WEDDINGS_COVER, cover_file)
                .await
                .map_err(|_| ApiError::Upload("Failed to upload cover image".to_string()))?;
            uploaded.push(cover.clone());
            wedding.cover_image = cover;
        }

        repo::weddings::update(&mut tx, &wedding).await?;
        Ok(wedding.id)
    }
    .await;

    match result {
        Ok(id) => match tx.commit().await {
            Ok(()) => {
                tracing::info!("Wedding actualizada con Id: {}", id);
                Ok((
                    StatusCode::OK,
                    Json(json!({ "message": "Wedding updated successfully", "weddingId": id })),
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
            tracing::error!("Fallo actualizando la boda: {:?}", err);
            Err(err)
        }
    }
}

// DELETE /api/dashboard/deleteWedding/:id
pub async fn delete_wedding_handler(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    tracing::info!("Petición deleteWedding para Id: {}", id);

    let wedding = repo::weddings::get_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Boda {} no encontrada", id);
            ApiError::NotFound("Wedding not found".to_string())
        })?;

    resolve_caller(&state.pool, &claims).await?;

    let mut tx = state.pool.begin().await?;

    let result = async {
        if !wedding.cover_image.is_empty() {
            state.files.delete(&wedding.cover_image).await;
        }

        repo::weddings::delete(&mut tx, wedding.id).await?;
        Ok(())
    }
    .await;

    match result {
        Ok(()) => {
            tx.commit().await?;
            tracing::info!("Wedding eliminada con Id: {}", wedding.id);
            Ok((
                StatusCode::OK,
                Json(json!({ "message": "Wedding deleted successfully", "weddingId": wedding.id })),
            ))
        }
        Err(err) => {
            if let Err(e) = tx.rollback().await {
                tracing::error!("Error al revertir la transacción: {:?}", e);
            }
            tracing::error!("Fallo eliminando la boda: {:?}", err);
            Err(err)
        }
    }
}

// GET /api/dashboard/getAllWeddings
pub async fn get_all_weddings_handler(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    resolve_caller(&state.pool, &claims).await?;

    let weddings = repo::weddings::list(&state.pool).await?;
    let result: Vec<_> = weddings
        .iter()
        .map(|w| w.to_returned_dto(&state.config.base_api_url))
        .collect();

    tracing::info!("Devueltas {} bodas", result.len());
    Ok(Json(result))
}

// GET /api/dashboard/getWeddingById/:id
pub async fn get_wedding_by_id_handler(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    resolve_caller(&state.pool, &claims).await?;

    let wedding = repo::weddings::get_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Boda {} no encontrada", id);
            ApiError::NotFound("Wedding not found".to_string())
        })?;

    Ok(Json(wedding.to_returned_dto(&state.config.base_api_url)))
}
