use serde::Serialize;

use crate::utils::urls::absolute_url;

#[derive(Debug, Clone)]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub cover_image: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventReturnedDto {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub cover_image: String,
}

impl Event {
    pub fn to_returned_dto(&self, base_url: &str) -> EventReturnedDto {
        EventReturnedDto {
            id: self.id,
            title: self.title.clone(),
            description: self.description.clone(),
            cover_image: absolute_url(base_url, &self.cover_image),
        }
    }
}
