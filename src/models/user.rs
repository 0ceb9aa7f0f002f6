use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// Lo que guardamos en la base de datos
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip)] // ¡Jamás envíes el hash de la contraseña en el JSON!
    pub password_hash: String,
    pub role: String,
    #[serde(skip)]
    pub email_confirmed: bool,
    #[serde(skip)]
    pub reset_code: Option<String>,
    #[serde(skip)]
    pub reset_code_expires: Option<DateTime<Utc>>,
}

// Lo que recibimos para hacer Login
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginPayload {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub remember_me: bool,
}

// Alta de usuario desde el panel (solo Admin)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPayload {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForgotPasswordPayload {
    pub email: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordPayload {
    pub email: String,
    pub code: String,
    pub new_password: String,
}

// Lo que devolvemos cuando el login es exitoso
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponseDto {
    pub email: String,
    pub user_name: String,
    pub roles: Vec<String>,
    pub token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummaryDto {
    pub id: i64,
    pub email: String,
    pub role: String,
}

// Lo que viaja DENTRO del token firmado (Claims)
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,  // Email del usuario
    pub name: String, // Nombre de usuario
    pub uid: i64,
    pub role: String,
    pub iat: usize,
    pub exp: usize,
}
