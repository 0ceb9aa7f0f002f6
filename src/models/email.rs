use serde::Deserialize;

/// Valor transitorio: nunca se persiste, solo se entrega al servicio de correo.
#[derive(Debug, Clone)]
pub struct Email {
    pub to: String,
    pub subject: String,
    pub body: String,
}

// Formulario de contacto del sitio público
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactFormDto {
    pub name: String,
    pub email_address: String,
    pub phone: String,
    pub nationality: Option<String>,
    pub title: Option<String>,
    #[serde(default = "default_number_of_people")]
    pub number_of_people: i32,
    pub message: Option<String>,
}

fn default_number_of_people() -> i32 {
    1
}
