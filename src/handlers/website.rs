use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::{
    error::ApiError,
    models::{
        day_trip::{CityDto, DayTrip},
        email::{ContactFormDto, Email},
        program::TravelProgram,
    },
    repo,
    state::AppState,
    utils::urls::absolute_url,
};

#[derive(Debug, Deserialize)]
pub struct IdQuery {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
pub struct CityQuery {
    pub city: String,
}

// POST /api/website/send — reenvía el formulario de contacto a la agencia
pub async fn send_contact_email_handler(
    State(state): State<AppState>,
    Json(dto): Json<ContactFormDto>,
) -> Result<impl IntoResponse, ApiError> {
    if dto.name.trim().is_empty() {
        return Err(ApiError::Validation("Name is required".to_string()));
    }
    if dto.email_address.trim().is_empty() || !dto.email_address.contains('@') {
        return Err(ApiError::Validation("Invalid email address".to_string()));
    }
    if dto.phone.trim().is_empty() {
        return Err(ApiError::Validation("Phone number is required".to_string()));
    }

    let mut body = format!(
        "Name: {}\nEmail: {}\nPhone: {}",
        dto.name, dto.email_address, dto.phone
    );
    if let Some(nationality) = dto.nationality.as_deref().filter(|n| !n.is_empty()) {
        body.push_str(&format!("\nNationality: {nationality}"));
    }
    body.push_str(&format!("\nNumber of People: {}", dto.number_of_people));
    if let Some(title) = dto.title.as_deref().filter(|t| !t.is_empty()) {
        body.push_str(&format!("\nTitle: {title}"));
    }
    if let Some(message) = dto.message.as_deref().filter(|m| !m.is_empty()) {
        body.push_str(&format!("\nMessage: {message}"));
    }

    let email = Email {
        to: state.config.mail_email.clone(),
        subject: dto
            .title
            .clone()
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| "New Contact Form Submission".to_string()),
        body,
    };

    state.mailer.send(&email).await?;
    Ok(Json(json!({ "message": "Email sent successfully" })))
}

// GET /api/website/getMainProgram — solo los programas destacados
pub async fn get_main_program_handler(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    tracing::info!("Petición getMainProgram recibida");

    let programs = repo::programs::list_main(&state.pool).await?;
    let result: Vec<_> = programs
        .iter()
        .map(|p| p.to_returned_dto(&state.config.base_api_url))
        .collect();

    Ok(Json(result))
}

// GET /api/website/getAllPrograms
pub async fn get_all_programs_handler(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let programs = repo::programs::list(&state.pool).await?;
    let result: Vec<_> = programs
        .iter()
        .map(|p| p.to_returned_dto(&state.config.base_api_url))
        .collect();

    tracing::info!("Devueltos {} programas", result.len());
    Ok(Json(result))
}

// GET /api/website/getAllProgramSummaries
pub async fn get_all_program_summaries_handler(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let programs = repo::programs::list(&state.pool).await?;
    let result: Vec<_> = programs
        .iter()
        .map(|p| p.to_summary_dto(&state.config.base_api_url))
        .collect();

    tracing::info!("Devueltos {} resúmenes de programas", result.len());
    Ok(Json(result))
}

// GET /api/website/getProgramById/:id
pub async fn get_program_by_id_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let program = repo::programs::get_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Programa {} no encontrado", id);
            ApiError::NotFound("Program not found".to_string())
        })?;

    Ok(Json(program.to_returned_dto(&state.config.base_api_url)))
}

// GET /api/website/getSimilarPrograms?id=N — los 3 de precio más cercano
pub async fn get_similar_programs_handler(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let selected = repo::programs::get_by_id(&state.pool, query.id)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Programa {} no encontrado", query.id);
            ApiError::NotFound("Selected program not found".to_string())
        })?;

    let all = repo::programs::list(&state.pool).await?;
    let similar = similar_programs(all, &selected);

    let result: Vec<_> = similar
        .iter()
        .map(|p| p.to_summary_dto(&state.config.base_api_url))
        .collect();

    tracing::info!(
        "Devueltos {} programas similares para el Id: {}",
        result.len(),
        query.id
    );
    Ok(Json(result))
}

// GET /api/website/getAllDayTrips
pub async fn get_all_day_trips_handler(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let day_trips = repo::day_trips::list(&state.pool).await?;
    let result: Vec<_> = day_trips
        .iter()
        .map(|dt| dt.to_returned_dto(&state.config.base_api_url))
        .collect();

    tracing::info!("Devueltas {} excursiones", result.len());
    Ok(Json(result))
}

// GET /api/website/getDayTripSummaries
pub async fn get_day_trip_summaries_handler(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let day_trips = repo::day_trips::list(&state.pool).await?;
    let result: Vec<_> = day_trips
        .iter()
        .map(|dt| dt.to_summary_dto(&state.config.base_api_url))
        .collect();

    tracing::info!("Devueltos {} resúmenes de excursiones", result.len());
    Ok(Json(result))
}

// GET /api/website/getDayTripById/:id
pub async fn get_day_trip_by_id_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let day_trip = repo::day_trips::get_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Excursión {} no encontrada", id);
            ApiError::NotFound("DayTrip not found".to_string())
        })?;

    Ok(Json(day_trip.to_returned_dto(&state.config.base_api_url)))
}

// GET /api/website/getSimilarDayTrips?id=N
pub async fn get_similar_day_trips_handler(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let selected = repo::day_trips::get_by_id(&state.pool, query.id)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Excursión {} no encontrada", query.id);
            ApiError::NotFound("Selected day trip not found".to_string())
        })?;

    let all = repo::day_trips::list(&state.pool).await?;
    let similar = similar_day_trips(all, &selected);

    let result: Vec<_> = similar
        .iter()
        .map(|dt| dt.to_summary_dto(&state.config.base_api_url))
        .collect();

    tracing::info!(
        "Devueltas {} excursiones similares para el Id: {}",
        result.len(),
        query.id
    );
    Ok(Json(result))
}

// GET /api/website/getAllDayTripCities
pub async fn get_all_day_trip_cities_handler(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let day_trips = repo::day_trips::list(&state.pool).await?;

    let cities: Vec<CityDto> = day_trip_cities(&day_trips)
        .into_iter()
        .map(|(city, image)| CityDto {
            city,
            image_url: absolute_url(&state.config.base_api_url, &image),
        })
        .collect();

    tracing::info!("Devueltas {} ciudades con excursiones", cities.len());
    Ok(Json(cities))
}

// GET /api/website/getDayTripsByCity?city=X
pub async fn get_day_trips_by_city_handler(
    State(state): State<AppState>,
    Query(query): Query<CityQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let day_trips = repo::day_trips::list_by_city(&state.pool, &query.city).await?;
    if day_trips.is_empty() {
        tracing::warn!("Sin excursiones para la ciudad: {}", query.city);
        return Err(ApiError::NotFound(format!(
            "No day trips found for city: {}",
            query.city
        )));
    }

    let result: Vec<_> = day_trips
        .iter()
        .map(|dt| dt.to_summary_dto(&state.config.base_api_url))
        .collect();

    tracing::info!(
        "Devueltas {} excursiones para la ciudad: {}",
        result.len(),
        query.city
    );
    Ok(Json(result))
}

// GET /api/website/getAllServices
pub async fn get_all_services_handler(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let services = repo::services::list(&state.pool).await?;
    let result: Vec<_> = services
        .iter()
        .map(|s| s.to_returned_dto(&state.config.base_api_url))
        .collect();

    tracing::info!("Devueltos {} servicios", result.len());
    Ok(Json(result))
}

// GET /api/website/getAllActivities
pub async fn get_all_activities_handler(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let activities = repo::activities::list(&state.pool).await?;
    let result: Vec<_> = activities
        .iter()
        .map(|a| a.to_returned_dto(&state.config.base_api_url))
        .collect();

    tracing::info!("Devueltas {} actividades", result.len());
    Ok(Json(result))
}

// GET /api/website/getAllEvents
pub async fn get_all_events_handler(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let events = repo::events::list(&state.pool).await?;
    let result: Vec<_> = events
        .iter()
        .map(|e| e.to_returned_dto(&state.config.base_api_url))
        .collect();

    tracing::info!("Devueltos {} eventos", result.len());
    Ok(Json(result))
}

// GET /api/website/getAllWeddings
pub async fn get_all_weddings_handler(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let weddings = repo::weddings::list(&state.pool).await?;
    let result: Vec<_> = weddings
        .iter()
        .map(|w| w.to_returned_dto(&state.config.base_api_url))
        .collect();

    tracing::info!("Devueltas {} bodas", result.len());
    Ok(Json(result))
}

/// Los 3 programas con el precio más cercano al seleccionado, excluyéndolo.
/// El empate lo resuelve el orden de almacenamiento (orden estable).
fn similar_programs(all: Vec<TravelProgram>, selected: &TravelProgram) -> Vec<TravelProgram> {
    let mut others: Vec<TravelProgram> = all.into_iter().filter(|p| p.id != selected.id).collect();
    others.sort_by_key(|p| (p.price_per_person - selected.price_per_person).abs());
    others.truncate(3);
    others
}

/// Para las excursiones primero se agrupa por ciudad (en orden de aparición)
/// y dentro de cada grupo se ordena por cercanía de precio.
fn similar_day_trips(all: Vec<DayTrip>, selected: &DayTrip) -> Vec<DayTrip> {
    let others: Vec<DayTrip> = all.into_iter().filter(|dt| dt.id != selected.id).collect();

    let mut city_order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<DayTrip>> = HashMap::new();
    for trip in others {
        if !groups.contains_key(&trip.city) {
            city_order.push(trip.city.clone());
        }
        groups.entry(trip.city.clone()).or_default().push(trip);
    }

    let mut result = Vec::new();
    for city in &city_order {
        if let Some(mut group) = groups.remove(city) {
            group.sort_by_key(|dt| (dt.price_per_person - selected.price_per_person).abs());
            result.extend(group);
        }
    }
    result.truncate(3);
    result
}

/// Una entrada por ciudad, con la primera imagen de galería de la primera
/// excursión como representativa; si no hay, el cover; si tampoco, "".
fn day_trip_cities(day_trips: &[DayTrip]) -> Vec<(String, String)> {
    let mut seen: Vec<String> = Vec::new();
    let mut result = Vec::new();

    for trip in day_trips {
        if seen.contains(&trip.city) {
            continue;
        }
        seen.push(trip.city.clone());

        let image = trip
            .images
            .first()
            .cloned()
            .unwrap_or_else(|| trip.cover_image.clone());
        result.push((trip.city.clone(), image));
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn program(id: i64, price: &str) -> TravelProgram {
        TravelProgram {
            id,
            title: format!("Programa {id}"),
            description: String::new(),
            location: String::new(),
            location_url: String::new(),
            images: Vec::new(),
            cover_image: String::new(),
            included: Vec::new(),
            price_per_person: price.parse::<Decimal>().unwrap(),
            is_main: false,
            itinerary: Default::default(),
        }
    }

    fn day_trip(id: i64, city: &str, price: &str) -> DayTrip {
        DayTrip {
            id,
            title: format!("Excursión {id}"),
            description: String::new(),
            location: String::new(),
            location_url: String::new(),
            images: Vec::new(),
            cover_image: String::new(),
            included: Vec::new(),
            price_per_person: price.parse::<Decimal>().unwrap(),
            is_main: false,
            itinerary: Default::default(),
            city: city.to_string(),
        }
    }

    #[test]
    fn similares_excluye_al_seleccionado_y_ordena_por_precio() {
        let selected = program(1, "100");
        let all = vec![
            program(1, "100"),
            program(2, "500"),
            program(3, "110"),
            program(4, "90"),
            program(5, "300"),
        ];

        let similar = similar_programs(all, &selected);
        let ids: Vec<i64> = similar.iter().map(|p| p.id).collect();

        // diferencias: 3 → 10, 4 → 10, 5 → 200, 2 → 400
        assert_eq!(ids, vec![3, 4, 5]);
    }

    #[test]
    fn similares_empata_por_orden_de_almacenamiento() {
        let selected = program(1, "100");
        let all = vec![program(1, "100"), program(2, "110"), program(3, "90")];

        let similar = similar_programs(all, &selected);
        let ids: Vec<i64> = similar.iter().map(|p| p.id).collect();

        // Misma diferencia (10): gana el que aparece primero
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn similares_devuelve_como_maximo_tres() {
        let selected = program(1, "100");
        let all = (1..=10).map(|id| program(id, "100")).collect();

        assert_eq!(similar_programs(all, &selected).len(), 3);
    }

    #[test]
    fn excursiones_similares_agrupan_primero_por_ciudad() {
        let selected = day_trip(1, "Cairo", "100");
        let all = vec![
            day_trip(1, "Cairo", "100"),
            day_trip(2, "Luxor", "500"),
            day_trip(3, "Aswan", "100"),
            day_trip(4, "Luxor", "110"),
        ];

        let similar = similar_day_trips(all, &selected);
        let ids: Vec<i64> = similar.iter().map(|dt| dt.id).collect();

        // Luxor aparece primero: su grupo ordenado (4, 2) va antes que Aswan (3)
        assert_eq!(ids, vec![4, 2, 3]);
    }

    #[test]
    fn ciudades_sin_duplicados_y_en_orden_de_aparicion() {
        let mut a = day_trip(1, "Cairo", "100");
        a.images = vec!["uploads/DayTrips/a.jpg".to_string()];
        let b = day_trip(2, "Luxor", "200");
        let c = day_trip(3, "Cairo", "300");

        let cities = day_trip_cities(&[a, b, c]);
        let names: Vec<&str> = cities.iter().map(|(city, _)| city.as_str()).collect();

        assert_eq!(names, vec!["Cairo", "Luxor"]);
    }

    #[test]
    fn la_imagen_representativa_cae_en_cascada() {
        // Primera imagen de galería si existe
        let mut with_gallery = day_trip(1, "Cairo", "100");
        with_gallery.images = vec!["uploads/DayTrips/a.jpg".to_string()];
        with_gallery.cover_image = "uploads/DayTripsCover/c.jpg".to_string();

        // Si no, el cover
        let mut with_cover = day_trip(2, "Luxor", "100");
        with_cover.cover_image = "uploads/DayTripsCover/l.jpg".to_string();

        // Si tampoco, cadena vacía
        let bare = day_trip(3, "Aswan", "100");

        let cities = day_trip_cities(&[with_gallery, with_cover, bare]);

        assert_eq!(cities[0].1, "uploads/DayTrips/a.jpg");
        assert_eq!(cities[1].1, "uploads/DayTripsCover/l.jpg");
        assert_eq!(cities[2].1, "");
    }
}
