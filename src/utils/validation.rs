//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! recibidos por la API que `validator` no cubre.

use base64::Engine;
use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    static ref IMAGE_DATA_URI: Regex =
        Regex::new(r"^data:image/[a-zA-Z0-9.+-]+;base64,([A-Za-z0-9+/=\s]+)$")
            .expect("data URI pattern is valid");
}

/// Validar un data URI de imagen (`data:image/<tipo>;base64,<datos>`)
///
/// Sólo se comprueba la forma y que la carga útil sea base64 válido;
/// el contenido se guarda tal cual.
pub fn validate_image_data_uri(value: &str) -> Result<(), ValidationError> {
    let payload = IMAGE_DATA_URI
        .captures(value)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| {
            let mut error = ValidationError::new("data_uri");
            error.message = Some("Bilddaten müssen ein data:image/...;base64 URI sein".into());
            error
        })?;

    let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
    base64::engine::general_purpose::STANDARD
        .decode(compact.as_bytes())
        .map_err(|_| {
            let mut error = ValidationError::new("base64");
            error.message = Some("Bilddaten sind kein gültiges Base64".into());
            error
        })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_image_data_uri() {
        assert!(validate_image_data_uri("data:image/png;base64,iVBORw0KGgo=").is_ok());
        assert!(validate_image_data_uri("data:image/svg+xml;base64,PHN2Zz4=").is_ok());
        assert!(validate_image_data_uri("https://example.com/car.png").is_err());
        assert!(validate_image_data_uri("data:text/plain;base64,aGFsbG8=").is_err());
        assert!(validate_image_data_uri("data:image/png;base64,@@@").is_err());
    }
}
