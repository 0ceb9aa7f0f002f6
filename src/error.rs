use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errores de la API. Cada variante se traduce a un status HTTP estable;
/// los detalles internos solo se exponen en builds de desarrollo.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Upload(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("Access Denied: You do not have the required permissions to access this resource.")]
    Forbidden,

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    /// Errores con lista de detalles (validación de contraseñas, etc.).
    #[error("{message}")]
    ValidationList { message: String, errors: Vec<String> },

    #[error("Database error")]
    Database(#[from] sqlx::Error),

    #[error("Mail error")]
    Mail(#[from] lettre::transport::smtp::Error),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::Upload(_) | ApiError::ValidationList { .. } => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Database(_) | ApiError::Mail(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("Error interno procesando la petición: {:?}", self);

            // En producción no filtramos detalles internos
            let body = if cfg!(debug_assertions) {
                json!({ "message": "Internal Server Error", "details": format!("{:?}", self) })
            } else {
                json!({ "message": "An unexpected error occurred. Please try again later." })
            };
            return (status, Json(body)).into_response();
        }

        let body = match self {
            ApiError::ValidationList { message, errors } => {
                json!({ "message": message, "errors": errors })
            }
            other => json!({ "message": other.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}
