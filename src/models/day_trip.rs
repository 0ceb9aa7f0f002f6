use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::utils::urls::{absolute_url, absolute_urls};

#[derive(Debug, Clone)]
pub struct DayTrip {
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
    /// Ciudad usada para agrupar las excursiones en el sitio público.
    pub city: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayTripReturnedDto {
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
    pub city: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayTripSummaryDto {
    pub id: i64,
    pub title: String,
    pub cover_image: String,
    pub location: String,
    pub city: String,
    pub price_per_person: Decimal,
}

// Una entrada por ciudad, con una imagen representativa
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CityDto {
    pub city: String,
    pub image_url: String,
}

impl DayTrip {
    pub fn to_returned_dto(&self, base_url: &str) -> DayTripReturnedDto {
        DayTripReturnedDto {
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
            city: self.city.clone(),
        }
    }

    pub fn to_summary_dto(&self, base_url: &str) -> DayTripSummaryDto {
        DayTripSummaryDto {
            id: self.id,
            title: self.title.clone(),
            cover_image: absolute_url(base_url, &self.cover_image),
            location: self.location.clone(),
            city: self.city.clone(),
            price_per_person: self.price_per_person,
        }
    }
}
