use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use chrono::{Duration, Utc};
use serde_json::json;
use uuid::Uuid;

use crate::{
    error::{is_unique_violation, ApiError},
    handlers::resolve_caller,
    models::{
        email::Email,
        user::{
            Claims, ForgotPasswordPayload, LoginPayload, LoginResponseDto, RegisterPayload,
            ResetPasswordPayload, UserSummaryDto,
        },
    },
    repo,
    state::AppState,
    utils::{
        jwt::{create_token, AUTH_COOKIE},
        security::{hash_password, validate_password, verify_password},
    },
};

// POST /api/dashboard/login
pub async fn login_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<LoginPayload>,
) -> Result<(CookieJar, Json<LoginResponseDto>), ApiError> {
    // 1. Buscar usuario por email (sin revelar qué parte falló)
    let user = repo::users::find_by_email(&state.pool, &payload.email)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid email or password.".to_string()))?;

    // 2. Verificar contraseña (Argon2)
    if !verify_password(&payload.password, &user.password_hash) {
        return Err(ApiError::Unauthorized("Invalid email or password.".to_string()));
    }

    // 3. Generar JWT y reflejarlo en una cookie HTTP-only con la misma vigencia
    let (token, days) = create_token(
        &user,
        payload.remember_me,
        &state.config.jwt_secret,
        state.config.jwt_duration_days,
        state.config.jwt_remember_me_duration_days,
    )?;

    let mut cookie = Cookie::new(AUTH_COOKIE, token.clone());
    cookie.set_http_only(true);
    cookie.set_secure(true);
    cookie.set_path("/");
    cookie.set_max_age(time::Duration::days(days));

    let response = LoginResponseDto {
        email: user.email.clone(),
        user_name: user.username.clone(),
        roles: vec![user.role.clone()],
        token,
    };

    Ok((jar.add(cookie), Json(response)))
}

// POST /api/dashboard/logout — siempre responde 200
pub async fn logout_handler(jar: CookieJar) -> (CookieJar, Json<serde_json::Value>) {
    let mut cookie = Cookie::from(AUTH_COOKIE);
    cookie.set_path("/");

    (
        jar.remove(cookie),
        Json(json!({ "message": "Logged out successfully" })),
    )
}

// POST /api/dashboard/addUser (solo Admin)
pub async fn add_user_handler(
    State(state): State<AppState>,
    Json(payload): Json<RegisterPayload>,
) -> Result<impl IntoResponse, ApiError> {
    tracing::info!("Alta de usuario solicitada para: {}", payload.email);

    let email = payload.email.trim().to_string();

    // El nombre de usuario se deriva de la parte local del email
    let username = match email.split_once('@') {
        Some((local, _)) if !local.is_empty() => local.to_string(),
        _ => return Err(ApiError::Validation("Invalid email address".to_string())),
    };

    let errors = validate_password(&payload.password);
    if !errors.is_empty() {
        tracing::warn!("Alta de usuario rechazada para {}: {:?}", email, errors);
        return Err(ApiError::ValidationList {
            message: "Failed to create user".to_string(),
            errors,
        });
    }

    let hashed = hash_password(&payload.password)?;

    // El panel solo crea administradores
    match repo::users::insert(&state.pool, &username, &email, &hashed, "Admin").await {
        Ok(_) => {
            tracing::info!("Usuario creado correctamente: {}", email);
            Ok((
                StatusCode::OK,
                Json(json!({ "message": "User added successfully" })),
            ))
        }
        Err(e) if is_unique_violation(&e) => Err(ApiError::Conflict(
            "A user with this email already exists".to_string(),
        )),
        Err(e) => Err(e.into()),
    }
}

// GET /api/dashboard/getAllUsers (solo Admin)
pub async fn get_all_users_handler(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let users = repo::users::list(&state.pool).await?;

    let users: Vec<UserSummaryDto> = users
        .into_iter()
        .map(|user| UserSummaryDto {
            id: user.id,
            email: user.email,
            role: user.role,
        })
        .collect();

    Ok(Json(json!({
        "message": "Users retrieved successfully",
        "users": users,
    })))
}

// DELETE /api/dashboard/deleteUser/:id (solo Admin)
pub async fn delete_user_handler(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    tracing::info!("Petición deleteUser para Id: {}", id);

    // Primero el que llama, después el objetivo
    resolve_caller(&state.pool, &claims).await?;

    let target = repo::users::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Usuario {} no encontrado", id);
            ApiError::NotFound("User not found".to_string())
        })?;

    repo::users::delete(&state.pool, target.id).await?;

    tracing::info!("Usuario eliminado con Id: {}", id);
    Ok(Json(json!({ "message": "User deleted successfully" })))
}

// POST /api/dashboard/forgotpasswordOwner
pub async fn forgot_password_handler(
    State(state): State<AppState>,
    Json(payload): Json<ForgotPasswordPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let user = repo::users::find_by_email(&state.pool, &payload.email)
        .await?
        .ok_or_else(|| ApiError::Validation("Email is not exist".to_string()))?;

    // Código de un solo uso, vigente una hora
    let code = Uuid::new_v4().to_string();
    let expires = Utc::now() + Duration::hours(1);
    repo::users::set_reset_code(&state.pool, user.id, &code, expires).await?;

    let email = Email {
        to: payload.email.clone(),
        subject: "Reset Password".to_string(),
        body: urlencoding::encode(&code).into_owned(),
    };
    state.mailer.send(&email).await?;

    Ok(Json(json!({
        "message": "Check your inbox, you have received a reset password code"
    })))
}

// POST /api/dashboard/resetpasswordOwner
pub async fn reset_password_handler(
    State(state): State<AppState>,
    Json(payload): Json<ResetPasswordPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let user = repo::users::find_by_email(&state.pool, &payload.email)
        .await?
        .ok_or_else(|| ApiError::Validation("Email is not exist".to_string()))?;

    // El código viaja URL-encoded en el correo
    let code = urlencoding::decode(&payload.code)
        .map_err(|_| ApiError::Validation("Invalid reset code".to_string()))?;

    let code_is_valid = match (&user.reset_code, &user.reset_code_expires) {
        (Some(stored), Some(expires)) => stored.as_str() == code.as_ref() && *expires > Utc::now(),
        _ => false,
    };

    if !code_is_valid {
        return Err(ApiError::ValidationList {
            message: "Failed to Change Password".to_string(),
            errors: vec!["Invalid or expired reset code".to_string()],
        });
    }

    let errors = validate_password(&payload.new_password);
    if !errors.is_empty() {
        return Err(ApiError::ValidationList {
            message: "Failed to Change Password".to_string(),
            errors,
        });
    }

    let hashed = hash_password(&payload.new_password)?;
    repo::users::update_password(&state.pool, user.id, &hashed).await?;

    Ok(Json(json!({ "message": "Password changed successfully" })))
}
