use serde::Serialize;

use crate::utils::urls::absolute_url;

#[derive(Debug, Clone)]
pub struct Wedding {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub cover_image: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeddingReturnedDto {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub cover_image: String,
}

impl Wedding {
    pub fn to_returned_dto(&self, base_url: &str) -> WeddingReturnedDto {
        WeddingReturnedDto {
            id: self.id,
            title: self.title.clone(),
            description: self.description.clone(),
            cover_image: absolute_url(base_url, &self.cover_image),
        }
    }
}
