pub mod activity;
pub mod auth;
pub mod day_trip;
pub mod event;
pub mod forms;
pub mod program;
pub mod service;
pub mod statistics;
pub mod website;
pub mod wedding;

use crate::{
    db::DbPool,
    error::ApiError,
    models::user::{Claims, User},
    repo,
};

/// Resuelve al usuario autenticado a partir de los claims del token.
/// El token puede ser válido y aun así referir a un usuario ya borrado.
pub async fn resolve_caller(pool: &DbPool, claims: &Claims) -> Result<User, ApiError> {
    if claims.sub.trim().is_empty() {
        return Err(ApiError::Unauthorized("Invalid user data".to_string()));
    }

    repo::users::find_by_email(pool, &claims.sub)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))
}
