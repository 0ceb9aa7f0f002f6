use crate::{config::Config, db::DbPool, error::ApiError, repo, utils::security::hash_password};

/// Garantiza que exista la cuenta de administrador configurada.
/// Se ejecuta en el arranque; un fallo se registra pero no tumba el servidor.
pub async fn seed_admin(pool: &DbPool, config: &Config) -> Result<(), ApiError> {
    let admin_email = config.admin_email.trim();
    if admin_email.is_empty() || config.admin_password.is_empty() {
        tracing::warn!("ADMIN_EMAIL/ADMIN_PASSWORD sin configurar; se omite el seeding");
        return Ok(());
    }

    if repo::users::find_by_email(pool, admin_email).await?.is_some() {
        return Ok(());
    }

    let username = admin_email.split('@').next().unwrap_or(admin_email);
    let hashed = hash_password(&config.admin_password)?;

    repo::users::insert(pool, username, admin_email, &hashed, "Admin").await?;
    tracing::info!("Cuenta de administrador creada: {}", admin_email);

    Ok(())
}
