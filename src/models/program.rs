use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::utils::urls::{absolute_url, absolute_urls};

// 1. Estructura que representa una fila completa en la Base de Datos
#[derive(Debug, Clone)]
pub struct TravelProgram {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub location: String,
    pub location_url: String,
    pub images: Vec<String>,
    pub cover_image: String,
    pub included: Vec<String>,
    pub price_per_person: Decimal,
    pub is_main: bool,
    pub itinerary: HashMap<String, String>,
}

// 2. Lo que devolvemos al frontend (rutas de archivo ya absolutas)
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnedProgramDto {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub location: String,
    pub location_url: String,
    pub images: Vec<String>,
    pub cover_image: String,
    pub included: Vec<String>,
    pub price_per_person: Decimal,
    pub is_main: bool,
    pub itinerary: HashMap<String, String>,
}

// 3. Versión resumida para listados públicos
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelProgramSummaryDto {
    pub id: i64,
    pub title: String,
    pub cover_image: String,
    pub location: String,
    pub price_per_person: Decimal,
}

impl TravelProgram {
    pub fn to_returned_dto(&self, base_url: &str) -> ReturnedProgramDto {
        ReturnedProgramDto {
            id: self.id,
            title: self.title.clone(),
            description: self.description.clone(),
            location: self.location.clone(),
            location_url: self.location_url.clone(),
            images: absolute_urls(base_url, &self.images),
            cover_image: absolute_url(base_url, &self.cover_image),
            included: self.included.clone(),
            price_per_person: self.price_per_person,
            is_main: self.is_main,
            itinerary: self.itinerary.clone(),
        }
    }

    pub fn to_summary_dto(&self, base_url: &str) -> TravelProgramSummaryDto {
        TravelProgramSummaryDto {
            id: self.id,
            title: self.title.clone(),
            cover_image: absolute_url(base_url, &self.cover_image),
            location: self.location.clone(),
            price_per_person: self.price_per_person,
        }
    }
}
