use axum::extract::multipart::{Field, Multipart};
use rust_decimal::Decimal;

use crate::{error::ApiError, utils::files::UploadedImage};

/// Campos del formulario multipart compartido por los seis tipos de
/// contenido. Todo es opcional aquí: cada handler de creación valida su
/// propio subconjunto obligatorio, y los de actualización distinguen
/// "campo ausente" de "campo enviado".
#[derive(Debug, Default)]
pub struct ContentForm {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub location_url: Option<String>,
    pub city: Option<String>,
    pub price: Option<Decimal>,
    pub is_main: Option<bool>,
    pub included: Option<Vec<String>>,
    pub itinerary_json: Option<String>,
    pub cover_image: Option<UploadedImage>,
    pub images: Option<Vec<UploadedImage>>,
}

pub async fn collect_content_form(multipart: &mut Multipart) -> Result<ContentForm, ApiError> {
    let mut form = ContentForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Validation(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "title" => form.title = Some(read_text(field).await?),
            "description" => form.description = Some(read_text(field).await?),
            "location" => form.location = Some(read_text(field).await?),
            "locationUrl" => form.location_url = Some(read_text(field).await?),
            "city" => form.city = Some(read_text(field).await?),
            "pricePerPerson" | "price" => {
                form.price = Some(parse_price(&read_text(field).await?)?)
            }
            "isMain" => form.is_main = Some(parse_bool(&read_text(field).await?)?),
            "included" => form
                .included
                .get_or_insert_with(Vec::new)
                .push(read_text(field).await?),
            "itineraryJson" => form.itinerary_json = Some(read_text(field).await?),
            "coverImage" => form.cover_image = Some(read_file(field).await?),
            "images" => form
                .images
                .get_or_insert_with(Vec::new)
                .push(read_file(field).await?),
            _ => {
                // Campo desconocido: lo consumimos y seguimos
                let _ = field.bytes().await;
            }
        }
    }

    Ok(form)
}

async fn read_text(field: Field<'_>) -> Result<String, ApiError> {
    field
        .text()
        .await
        .map_err(|e| ApiError::Validation(format!("Invalid form field: {e}")))
}

async fn read_file(field: Field<'_>) -> Result<UploadedImage, ApiError> {
    let file_name = field.file_name().unwrap_or("unknown.jpg").to_string();
    let content_type = field.content_type().map(|ct| ct.to_string());

    let bytes = field
        .bytes()
        .await
        .map_err(|_| ApiError::Upload("Failed to read the uploaded file".to_string()))?;

    Ok(UploadedImage {
        file_name,
        content_type,
        bytes,
    })
}

pub fn parse_price(raw: &str) -> Result<Decimal, ApiError> {
    raw.trim()
        .parse()
        .map_err(|_| ApiError::Validation("Invalid price value".to_string()))
}

pub fn parse_bool(raw: &str) -> Result<bool, ApiError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "on" => Ok(true),
        "false" | "0" | "" => Ok(false),
        _ => Err(ApiError::Validation("Invalid boolean value".to_string())),
    }
}

/// Un texto enviado pero en blanco cuenta como "sin cambio".
pub fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parsea_precios_con_decimales() {
        assert_eq!(parse_price(" 1250.50 ").unwrap().to_string(), "1250.50");
    }

    #[test]
    fn rechaza_precios_que_no_son_numeros() {
        assert!(matches!(parse_price("caro"), Err(ApiError::Validation(_))));
    }

    #[test]
    fn parsea_booleanos_de_formulario() {
        assert!(parse_bool("true").unwrap());
        assert!(parse_bool("1").unwrap());
        assert!(parse_bool("on").unwrap());
        assert!(!parse_bool("false").unwrap());
        assert!(!parse_bool("0").unwrap());
        assert!(matches!(parse_bool("quizás"), Err(ApiError::Validation(_))));
    }

    #[test]
    fn texto_en_blanco_cuenta_como_ausente() {
        assert_eq!(non_blank(&Some("  ".to_string())), None);
        assert_eq!(non_blank(&None), None);
        assert_eq!(
            non_blank(&Some("  Cairo  ".to_string())),
            Some("Cairo".to_string())
        );
    }
}
