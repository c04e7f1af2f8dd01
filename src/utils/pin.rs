//! Hash de PIN de conductores
//!
//! Los PIN se guardan como hash bcrypt; nunca en texto plano.

use bcrypt::{hash, verify};

use crate::utils::errors::AppResult;

/// Generar el hash bcrypt de un PIN
pub fn hash_pin(pin: &str, cost: u32) -> AppResult<String> {
    Ok(hash(pin, cost)?)
}

/// Comparar un PIN con su hash almacenado.
///
/// Un hash mal formado cuenta como "no coincide" en lugar de error.
pub fn verify_pin(pin: &str, stored_hash: &str) -> bool {
    verify(pin, stored_hash).unwrap_or(false)
}

/// ¿El valor almacenado ya es un hash bcrypt?
pub fn is_pin_hash(value: &str) -> bool {
    value.len() == 60
        && (value.starts_with("$2a$")
            || value.starts_with("$2b$")
            || value.starts_with("$2x$")
            || value.starts_with("$2y$"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_pin() {
        let hashed = hash_pin("1234", crate::config::MIN_PIN_HASH_COST).unwrap();
        assert!(is_pin_hash(&hashed));
        assert!(verify_pin("1234", &hashed));
        assert!(!verify_pin("4321", &hashed));
    }

    #[test]
    fn test_plaintext_is_not_a_hash() {
        assert!(!is_pin_hash("1234"));
        assert!(!verify_pin("1234", "1234"));
    }
}
