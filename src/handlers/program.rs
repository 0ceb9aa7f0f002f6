use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use rust_decimal::Decimal;
use serde_json::json;

use crate::{
    error::ApiError,
    handlers::{
        forms::{collect_content_form, non_blank},
        resolve_caller,
    },
    models::{program::TravelProgram, user::Claims},
    repo,
    state::AppState,
    utils::{files::folders, itinerary::parse_itinerary},
};

// POST /api/dashboard/addProgram
pub async fn add_program_handler(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let form = collect_content_form(&mut multipart).await?;
    tracing::info!(
        "Petición addProgram recibida. ItineraryJson: '{}'",
        form.itinerary_json.as_deref().unwrap_or("null")
    );

    // Validación de campos obligatorios
    let title = non_blank(&form.title)
        .ok_or_else(|| ApiError::Validation("Title is Required".to_string()))?;
    let description = non_blank(&form.description)
        .ok_or_else(|| ApiError::Validation("Description is Required".to_string()))?;
    let location = non_blank(&form.location)
        .ok_or_else(|| ApiError::Validation("Location is Required".to_string()))?;
    let location_url = non_blank(&form.location_url)
        .ok_or_else(|| ApiError::Validation("LocationUrl is Required".to_string()))?;

    let price = form.price.ok_or_else(|| {
        ApiError::Validation("Price Per Person is Required & Cannot Be 0".to_string())
    })?;
    if price <= Decimal::ZERO {
        return Err(ApiError::Validation(
            "Price Per Person is Required & Cannot Be 0".to_string(),
        ));
    }

    let included = form.included.clone().unwrap_or_default();
    if included.is_empty() {
        return Err(ApiError::Validation("Included is Required".to_string()));
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
        .ok_or_else(|| ApiError::Validation("Cover Image is Required".to_string()))?;
    let gallery = form.images.unwrap_or_default();
    if gallery.is_empty() {
        return Err(ApiError::Validation("Images is Required".to_string()));
    }

    let mut tx = state.pool.begin().await?;
    let mut uploaded: Vec<String> = Vec::new();

    let result = async {
        let cover = state
            .files
            .upload(folders::PROGRAMS_COVER, &cover_file)
            .await
            .map_err(|_| ApiError::Upload("Failed to upload cover image".to_string()))?;
        uploaded.push(cover.clone());

        let mut image_urls = Vec::new();
        for image in &gallery {
            if image.bytes.is_empty() {
                continue;
            }
            match state.files.upload(folders::PROGRAMS, image).await {
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

        let program = TravelProgram {
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
        };

        let id = repo::programs::insert(&mut tx, &program).await?;
        if id <= 0 {
            // El insert reportó éxito sin generar id: defecto, no error de usuario
            return Err(ApiError::Internal(
                "Failed to generate TravelProgram Id".to_string(),
            ));
        }

        Ok(id)
    }
    .await;

    match result {
        Ok(id) => match tx.commit().await {
            Ok(()) => {
                tracing::info!("TravelProgram creado con Id: {}", id);
                Ok((
                    StatusCode::OK,
                    Json(json!({ "message": "Program created successfully", "programId": id })),
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
            tracing::error!("Fallo creando el programa: {:?}", err);
            Err(err)
        }
    }
}

// PUT /api/dashboard/updateProgram/:id
pub async fn update_program_handler(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let form = collect_content_form(&mut multipart).await?;
    tracing::info!(
        "Petición updateProgram para Id: {}. ItineraryJson: '{}'",
        id,
        form.itinerary_json.as_deref().unwrap_or("null")
    );

    let mut program = repo::programs::get_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Programa {} no encontrado", id);
            ApiError::NotFound("Program not found".to_string())
        })?;

    // El itinerario solo se toca si el campo vino en el formulario;
    // un campo presente pero en blanco deja el existente tal cual
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
        // Solo sobrescribimos los campos presentes y con contenido
        if let Some(title) = non_blank(&form.title) {
            program.title = title;
        }
        if let Some(description) = non_blank(&form.description) {
            program.description = description;
        }
        if let Some(location) = non_blank(&form.location) {
            program.location = location;
        }
        if let Some(location_url) = non_blank(&form.location_url) {
            program.location_url = location_url;
        }
        if let Some(price) = form.price {
            program.price_per_person = price;
        }
        if let Some(is_main) = form.is_main {
            program.is_main = is_main;
        }
        if let Some(included) = form.included.clone() {
            program.included = included;
        }
        if let Some(itinerary) = new_itinerary.take() {
            program.itinerary = itinerary;
        }

        // Reemplazo del cover: el anterior se borra antes de subir el nuevo
        if let Some(cover_file) = &form.cover_image {
            if !program.cover_image.is_empty() {
                state.files.delete(&program.cover_image).await;
            }
            let cover = state
                .files
                .upload(folders::PROGRAMS_COVER, cover_file)
                .await
                .map_err(|_| ApiError::Upload("Failed to upload cover image".to_string()))?;
            uploaded.push(cover.clone());
            program.cover_image = cover;
        }

        // Reemplazo de la galería completa
        if let Some(gallery) = &form.images {
            if !gallery.is_empty() {
                for old in &program.images {
                    state.files.delete(old).await;
                }

                let mut image_urls = Vec::new();
                for image in gallery {
                    if image.bytes.is_empty() {
                        continue;
                    }
                    match state.files.upload(folders::PROGRAMS, image).await {
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
                program.images = image_urls;
            }
        }

        repo::programs::update(&mut tx, &program).await?;
        Ok(program.id)
    }
    .await;

    match result {
        Ok(id) => match tx.commit().await {
            Ok(()) => {
                tracing::info!("TravelProgram actualizado con Id: {}", id);
                Ok((
                    StatusCode::OK,
                    Json(json!({ "message": "Program updated successfully", "programId": id })),
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
            // Solo se limpian los archivos nuevos; los viejos ya borrados
            // no se pueden restaurar
            state.files.cleanup(&uploaded).await;
            tracing::error!("Fallo actualizando el programa: {:?}", err);
            Err(err)
        }
    }
}

// DELETE /api/dashboard/deleteProgram/:id
pub async fn delete_program_handler(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    tracing::info!("Petición deleteProgram para Id: {}", id);

    let program = repo::programs::get_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Programa {} no encontrado", id);
            ApiError::NotFound("Program not found".to_string())
        })?;

    resolve_caller(&state.pool, &claims).await?;

    let mut tx = state.pool.begin().await?;

    let result = async {
        if !program.cover_image.is_empty() {
            state.files.delete(&program.cover_image).await;
        }
        for image in &program.images {
            state.files.delete(image).await;
        }

        repo::programs::delete(&mut tx, program.id).await?;
        Ok(())
    }
    .await;

    match result {
        Ok(()) => {
            tx.commit().await?;
            tracing::info!("TravelProgram eliminado con Id: {}", program.id);
            Ok((
                StatusCode::OK,
                Json(json!({ "message": "Program deleted successfully", "programId": program.id })),
            ))
        }
        Err(err) => {
            if let Err(e) = tx.rollback().await {
                tracing::error!("Error al revertir la transacción: {:?}", e);
            }
            tracing::error!("Fallo eliminando el programa: {:?}", err);
            Err(err)
        }
    }
}

// GET /api/dashboard/getAllPrograms
pub async fn get_all_programs_handler(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    resolve_caller(&state.pool, &claims).await?;

    let programs = repo::programs::list(&state.pool).await?;
    let result: Vec<_> = programs
        .iter()
        .map(|p| p.to_returned_dto(&state.config.base_api_url))
        .collect();

    tracing::info!("Devueltos {} programas", result.len());
    Ok(Json(result))
}

// GET /api/dashboard/getProgramById/:id
pub async fn get_program_by_id_handler(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    resolve_caller(&state.pool, &claims).await?;

    let program = repo::programs::get_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Programa {} no encontrado", id);
            ApiError::NotFound("Program not found".to_string())
        })?;

    Ok(Json(program.to_returned_dto(&state.config.base_api_url)))
}
