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
    models::{activity::Activity, user::Claims},
    repo,
    state::AppState,
    utils::files::folders,
};

// POST /api/dashboard/addActivity
pub async fn add_activity_handler(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let form = collect_content_form(&mut multipart).await?;
    tracing::info!("Petición addActivity recibida");

    let title = non_blank(&form.title)
        .ok_or_else(|| ApiError::Validation("Title is required".to_string()))?;
    let description = non_blank(&form.description)
        .ok_or_else(|| ApiError::Validation("Description is required".to_string()))?;
    let price = form
        .price
        .ok_or_else(|| ApiError::Validation("Price is required".to_string()))?;

    resolve_caller(&state.pool, &claims).await?;

    let mut tx = state.pool.begin().await?;
    let mut uploaded: Vec<String> = Vec::new();

    // El cover es opcional para las actividades
    let cover_file = form.cover_image;

    let result = async {
        let mut cover = String::new();
        if let Some(file) = &cover_file {
            cover = state
                .files
                .upload(folders::ACTIVITIES_COVER, file)
                .await
                .map_err(|_| ApiError::Upload("Failed to upload cover image".to_string()))?;
            uploaded.push(cover.clone());
        }

        let activity = Activity {
            id: 0,
            title,
            description,
            cover_image: cover,
            price,
        };

        let id = repo::activities::insert(&mut tx, &activity).await?;
        if id <= 0 {
            return Err(ApiError::Internal(
                "Failed to generate Activity Id".to_string(),
            ));
        }

        Ok(id)
    }
    .await;

    match result {
        Ok(id) => match tx.commit().await {
            Ok(()) => {
                tracing::info!("Activity creada con Id: {}", id);
                Ok((
                    StatusCode::OK,
                    Json(json!({ "message": "Activity created successfully", "activityId": id })),
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
            tracing::error!("Fallo creando la actividad: {:?}", err);
            Err(err)
        }
    }
}

// PUT /api/dashboard/updateActivity/:id
pub async fn update_activity_handler(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let form = collect_content_form(&mut multipart).await?;
    tracing::info!("Petición updateActivity para Id: {}", id);

    let mut activity = repo::activities::get_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Actividad {} no encontrada", id);
            ApiError::NotFound("Activity not found".to_string())
        })?;

    resolve_caller(&state.pool, &claims).await?;

    let mut tx = state.pool.begin().await?;
    let mut uploaded: Vec<String> = Vec::new();

    let result = async {
        if let Some(title) = non_blank(&form.title) {
            activity.title = title;
        }
        if let Some(description) = non_blank(&form.description) {
            activity.description = description;
        }
        if let Some(price) = form.price {
            activity.price = price;
        }

        if let Some(cover_file) = &form.cover_image {
            if !activity.cover_image.is_empty() {
                state.files.delete(&activity.cover_image).await;
            }
            let cover = state
                .files
                .upload(folders::ACTIVITIES_COVER, cover_file)
                .await
                .map_err(|_| ApiError::Upload("Failed to upload cover image".to_string()))?;
            uploaded.push(cover.clone());
            activity.cover_image = cover;
        }

        repo::activities::update(&mut tx, &activity).await?;
        Ok(activity.id)
    }
    .await;

    match result {
        Ok(id) => match tx.commit().await {
            Ok(()) => {
                tracing::info!("Activity actualizada con Id: {}", id);
                Ok((
                    StatusCode::OK,
                    Json(json!({ "message": "Activity updated successfully", "activityId": id })),
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
            tracing::error!("Fallo actualizando la actividad: {:?}", err);
            Err(err)
        }
    }
}

// DELETE /api/dashboard/deleteActivity/:id
pub async fn delete_activity_handler(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    tracing::info!("Petición deleteActivity para Id: {}", id);

    let activity = repo::activities::get_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Actividad {} no encontrada", id);
            ApiError::NotFound("Activity not found".to_string())
        })?;

    resolve_caller(&state.pool, &claims).await?;

    let mut tx = state.pool.begin().await?;

    let result = async {
        if !activity.cover_image.is_empty() {
            state.files.delete(&activity.cover_image).await;
        }

        repo::activities::delete(&mut tx, activity.id).await?;
        Ok(())
    }
    .await;

    match result {
        Ok(()) => {
            tx.commit().await?;
            tracing::info!("Activity eliminada con Id: {}", activity.id);
            Ok((
                StatusCode::OK,
                Json(
                    json!({ "message": "Activity deleted successfully", "activityId": activity.id }),
                ),
            ))
        }
        Err(err) => {
            if let Err(e) = tx.rollback().await {
                tracing::error!("Error al revertir la transacción: {:?}", e);
            }
            tracing::error!("Fallo eliminando la actividad: {:?}", err);
            Err(err)
        }
    }
}

// GET /api/dashboard/getAllActivities
pub async fn get_all_activities_handler(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    resolve_caller(&state.pool, &claims).await?;

    let activities = repo::activities::list(&state.pool).await?;
    let result: Vec<_> = activities
        .iter()
        .map(|a| a.to_returned_dto(&state.config.base_api_url))
        .collect();

    tracing::info!("Devueltas {} actividades", result.len());
    Ok(Json(result))
}

// GET /api/dashboard/getActivityById/:id
pub async fn get_activity_by_id_handler(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    resolve_caller(&state.pool, &claims).await?;

    let activity = repo::activities::get_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Actividad {} no encontrada", id);
            ApiError::NotFound("Activity not found".to_string())
        })?;

    Ok(Json(activity.to_returned_dto(&state.config.base_api_url)))
}
