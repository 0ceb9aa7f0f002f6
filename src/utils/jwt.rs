use axum::{extract::Request, middleware::Next, response::Response};
use axum_extra::extract::cookie::CookieJar;
use axum_extra::headers::{authorization::Bearer, Authorization};
use axum_extra::TypedHeader;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::{
    error::ApiError,
    models::user::{Claims, User},
};

/// Cookie HTTP-only que refleja el token emitido en el login.
pub const AUTH_COOKIE: &str = "auth_token";

const UNAUTHORIZED_MESSAGE: &str = "Unauthorized: Please log in to access this resource.";

/// Emite el token firmado. Devuelve también los días de vigencia para que el
/// handler de login cree la cookie con la misma expiración.
pub fn create_token(
    user: &User,
    remember_me: bool,
    secret: &str,
    duration_days: i64,
    remember_me_duration_days: i64,
) -> Result<(String, i64), ApiError> {
    let days = if remember_me {
        remember_me_duration_days
    } else {
        duration_days
    };

    let now = Utc::now();
    let expiration = now
        .checked_add_signed(Duration::days(days))
        .ok_or_else(|| ApiError::Internal("Fecha de expiración inválida".to_string()))?;

    let claims = Claims {
        sub: user.email.clone(),
        name: user.username.clone(),
        uid: user.id,
        role: user.role.clone(),
        iat: now.timestamp() as usize,
        exp: expiration.timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| ApiError::Internal("Error generando token".to_string()))?;

    Ok((token, days))
}

pub fn decode_token(token: &str, secret: &str) -> Result<Claims, ApiError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    // Token falso, expirado o manipulado
    .map_err(|_| ApiError::Unauthorized(UNAUTHORIZED_MESSAGE.to_string()))
}

fn request_claims(
    jar: &CookieJar,
    maybe_auth: Option<&TypedHeader<Authorization<Bearer>>>,
) -> Result<Claims, ApiError> {
    // La cookie tiene prioridad; si no viene, usamos el header Authorization
    let token = jar
        .get(AUTH_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .or_else(|| maybe_auth.map(|header| header.token().to_string()))
        .ok_or_else(|| ApiError::Unauthorized(UNAUTHORIZED_MESSAGE.to_string()))?;

    let secret = std::env::var("JWT_SECRET")
        .map_err(|_| ApiError::Internal("JWT_SECRET debe estar en .env".to_string()))?;

    decode_token(&token, &secret)
}

// Esta función se ejecutará ANTES de llegar a los handlers del panel
pub async fn auth_middleware(
    jar: CookieJar,
    maybe_auth: Option<TypedHeader<Authorization<Bearer>>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let claims = request_claims(&jar, maybe_auth.as_ref())?;

    // Adjuntamos claims para que los handlers sepan quién es el usuario
    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

pub async fn admin_middleware(
    jar: CookieJar,
    maybe_auth: Option<TypedHeader<Authorization<Bearer>>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let claims = request_claims(&jar, maybe_auth.as_ref())?;

    // VERIFICACIÓN EXTRA: ¿Es Admin?
    if claims.role != "Admin" {
        return Err(ApiError::Forbidden);
    }

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: 7,
            username: "ana".to_string(),
            email: "ana@turavia.local".to_string(),
            password_hash: String::new(),
            role: "Admin".to_string(),
            email_confirmed: true,
            reset_code: None,
            reset_code_expires: None,
        }
    }

    #[test]
    fn el_token_lleva_los_claims_del_usuario() {
        let (token, _) = create_token(&user(), false, "secreto", 1, 7).unwrap();
        let claims = decode_token(&token, "secreto").unwrap();

        assert_eq!(claims.sub, "ana@turavia.local");
        assert_eq!(claims.name, "ana");
        assert_eq!(claims.uid, 7);
        assert_eq!(claims.role, "Admin");
    }

    #[test]
    fn sin_remember_me_expira_con_la_duracion_corta() {
        let (token, days) = create_token(&user(), false, "secreto", 1, 7).unwrap();
        let claims = decode_token(&token, "secreto").unwrap();

        assert_eq!(days, 1);
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
    }

    #[test]
    fn con_remember_me_expira_con_la_duracion_larga() {
        let (token, days) = create_token(&user(), true, "secreto", 1, 7).unwrap();
        let claims = decode_token(&token, "secreto").unwrap();

        assert_eq!(days, 7);
        assert_eq!(claims.exp - claims.iat, 7 * 24 * 60 * 60);
    }

    #[test]
    fn rechaza_un_token_firmado_con_otro_secreto() {
        let (token, _) = create_token(&user(), false, "secreto", 1, 7).unwrap();
        assert!(matches!(
            decode_token(&token, "otro-secreto"),
            Err(ApiError::Unauthorized(_))
        ));
    }
}
