use std::{env, fmt::Display, str::FromStr};

use tracing::info;

/// Configuración leída del entorno (archivo .env en desarrollo).
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_duration_days: i64,
    pub jwt_remember_me_duration_days: i64,
    /// Prefijo público con el que se reescriben las rutas de archivos.
    pub base_api_url: String,
    pub upload_dir: String,
    pub mail_host: String,
    pub mail_port: u16,
    pub mail_email: String,
    pub mail_password: String,
    pub mail_display_name: String,
    pub admin_email: String,
    pub admin_password: String,
}

impl Config {
    pub fn load() -> Self {
        Self {
            port: try_load("PORT", "3000"),
            database_url: require("DATABASE_URL"),
            jwt_secret: require("JWT_SECRET"),
            jwt_duration_days: try_load("JWT_DURATION_DAYS", "1"),
            jwt_remember_me_duration_days: try_load("JWT_REMEMBER_ME_DURATION_DAYS", "7"),
            base_api_url: try_load("BASE_API_URL", "http://localhost:3000"),
            upload_dir: try_load("UPLOAD_DIR", "uploads"),
            mail_host: try_load("MAIL_HOST", "localhost"),
            mail_port: try_load("MAIL_PORT", "587"),
            mail_email: try_load("MAIL_EMAIL", "contacto@turavia.local"),
            mail_password: env::var("MAIL_PASSWORD").unwrap_or_default(),
            mail_display_name: try_load("MAIL_DISPLAY_NAME", "Turavia"),
            admin_email: try_load("ADMIN_EMAIL", "admin@turavia.local"),
            admin_password: env::var("ADMIN_PASSWORD").unwrap_or_default(),
        }
    }
}

fn require(key: &str) -> String {
    env::var(key).unwrap_or_else(|_| panic!("{key} no está definido en .env"))
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    env::var(key)
        .unwrap_or_else(|_| {
            info!("{key} no definido, usando valor por defecto: {default}");
            default.to_string()
        })
        .parse()
        .unwrap_or_else(|e| panic!("Valor inválido para {key}: {e}"))
}
