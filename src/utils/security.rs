use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::ApiError;

// Hashear contraseña
pub fn hash_password(password: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| ApiError::Internal("Error al encriptar contraseña".to_string()))
}

// Verificar contraseña
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(password_hash) {
        Ok(h) => h,
        Err(_) => return false,
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

/// Política de contraseñas del panel. Devuelve la lista de reglas incumplidas
/// para poder mostrarlas todas juntas en la respuesta.
pub fn validate_password(password: &str) -> Vec<String> {
    let mut errors = Vec::new();

    if password.len() < 6 {
        errors.push("Passwords must be at least 6 characters.".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Passwords must have at least one digit ('0'-'9').".to_string());
    }
    if !password.chars().any(|c| c.is_lowercase()) {
        errors.push("Passwords must have at least one lowercase ('a'-'z').".to_string());
    }
    if !password.chars().any(|c| c.is_uppercase()) {
        errors.push("Passwords must have at least one uppercase ('A'-'Z').".to_string());
    }
    if password.chars().all(|c| c.is_alphanumeric()) {
        errors.push("Passwords must have at least one non alphanumeric character.".to_string());
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_y_verificacion_de_ida_y_vuelta() {
        let hash = hash_password("S3creta!").unwrap();
        assert!(verify_password("S3creta!", &hash));
        assert!(!verify_password("otra", &hash));
    }

    #[test]
    fn verificar_contra_hash_corrupto_no_explota() {
        assert!(!verify_password("S3creta!", "no-es-un-hash"));
    }

    #[test]
    fn politica_acepta_contrasena_fuerte() {
        assert!(validate_password("S3creta!").is_empty());
    }

    #[test]
    fn politica_reporta_todas_las_reglas_incumplidas() {
        let errors = validate_password("abc");
        // corta, sin dígito, sin mayúscula, sin símbolo
        assert_eq!(errors.len(), 4);
    }
}
