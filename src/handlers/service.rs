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
    models::{service::Service, user::Claims},
    repo,
    state::AppState,
    utils::files::folders,
};

// POST /api/dashboard/addService
pub async fn add_service_handler(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let form = collect_content_form(&mut multipart).await?;
    tracing::info!("Petición addService recibida");

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

    // El cover es opcional para los servicios
    let cover_file = form.cover_image;

    let result = async {
        let mut cover = String::new();
        if let Some(file) = &cover_file {
            cover = state
                .files
                .upload(folders::SERVICES_COVER, file)
                .await
                .map_err(|_| ApiError::Upload("Failed to upload cover image".to_string()))?;
            uploaded.push(cover.clone());
        }

        let service = Service {
            id: 0,
            title,
            description,
            cover_image: cover,
            price,
        };

        let id = repo::services::insert(&mut tx, &service).await?;
        if id <= 0 {
            return Err(ApiError::Internal(
                "Failed to generate Service Id".to_string(),
            ));
        }

        Ok(id)
    }
    .await;

    match result {
        Ok(id) => match tx.commit().await {
            Ok(()) => {
                tracing::info!("Service creado con Id: {}", id);
                Ok((
                    StatusCode::OK,
                    Json(json!({ "message": "Service created successfully", "serviceId": id })),
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
            tracing::error!("Fallo creando el servicio: {:?}", err);
            Err(err)
        }
    }
}

// PUT /api/dashboard/updateService/:id
pub async fn update_service_handler(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let form = collect_content_form(&mut multipart).await?;
    tracing::info!("Petición updateService para Id: {}", id);

    let mut service = repo::services::get_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Servicio {} no encontrado", id);
            ApiError::NotFound("Service not found".to_string())
        })?;

    resolve_caller(&state.pool, &claims).await?;

    let mut tx = state.pool.begin().await?;
    let mut uploaded: Vec<String> = Vec::new();

    let result = async {
        if let Some(title) = non_blank(&form.title) {
            service.title = title;
        }
        if let Some(description) = non_blank(&form.description) {
            service.description = description;
        }
        if let Some(price) = form.price {
            service.price = price;
        }

        if let Some(cover_file) = &form.cover_image {
            if !service.cover_image.is_empty() {
                state.files.delete(&service.cover_image).await;
            }
            let cover = state
                .files
                .upload(folders::SERVICES_COVER, cover_file)
                .await
                .map_err(|_| ApiError::Upload("Failed to upload cover image".to_string()))?;
            uploaded.push(cover.clone());
            service.cover_image = cover;
        }

        repo::services::update(&mut tx, &service).await?;
        Ok(service.id)
    }
    .await;

    match result {
        Ok(id) => match tx.commit().await {
            Ok(()) => {
                tracing::info!("Service actualizado con Id: {}", id);
                Ok((
                    StatusCode::OK,
                    Json(json!({ "message": "Service updated successfully", "serviceId": id })),
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
            tracing::error!("Fallo actualizando el servicio: {:?}", err);
            Err(err)
        }
    }
}

// DELETE /api/dashboard/deleteService/:id
pub async fn delete_service_handler(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    tracing::info!("Petición deleteService para Id: {}", id);

    let service = repo::services::get_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Servicio {} no encontrado", id);
            ApiError::NotFound("Service not found".to_string())
        })?;

    resolve_caller(&state.pool, &claims).await?;

    let mut tx = state.pool.begin().await?;

    let result = async {
        if !service.cover_image.is_empty() {
            state.files.delete(&service.cover_image).await;
        }

        repo::services::delete(&mut tx, service.id).await?;
        Ok(())
    }
    .await;

    match result {
        Ok(()) => {
            tx.commit().await?;
            tracing::info!("Service eliminado con Id: {}", service.id);
            Ok((
                StatusCode::OK,
                Json(
                    json!({ "message": "Service deleted successfully", "serviceId": service.id }),
                ),
            ))
        }
        Err(err) => {
            if let Err(e) = tx.rollback().await {
                tracing::error!("Error al revertir la transacción: {:?}", e);
            }
            tracing::error!("Fallo eliminando el servicio: {:?}", err);
            Err(err)
        }
    }
}

// GET /api/dashboard/getAllServices
pub async fn get_all_services_handler(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    resolve_caller(&state.pool, &claims).await?;

    let services = repo::services::list(&state.pool).await?;
    let result: Vec<_> = services
        .iter()
        .map(|s| s.to_returned_dto(&state.config.base_api_url))
        .collect();

    tracing::info!("Devueltos {} servicios", result.len());
    Ok(Json(result))
}

// GET /api/dashboard/getServiceById/:id
pub async fn get_service_by_id_handler(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    resolve_caller(&state.pool, &claims).await?;

    let service = repo::services::get_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Servicio {} no encontrado", id);
            ApiError::NotFound("Service not found".to_string())
        })?;

    Ok(Json(service.to_returned_dto(&state.config.base_api_url)))
}
