use rust_decimal::Decimal;
use serde::Serialize;

use crate::utils::urls::absolute_url;

#[derive(Debug, Clone)]
pub struct Activity {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub cover_image: String,
    pub price: Decimal,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityReturnedDto {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub cover_image: String,
    pub price: Decimal,
}

impl Activity {
    pub fn to_returned_dto(&self, base_url: &str) -> ActivityReturnedDto {
        ActivityReturnedDto {
            id: self.id,
            title: self.title.clone(),
            description: self.description.clone(),
            cover_image: absolute_url(base_url, &self.cover_image),
            price: self.price,
        }
    }
}
