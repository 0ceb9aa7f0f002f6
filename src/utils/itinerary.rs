use std::collections::HashMap;

use serde_json::Value;

use crate::error::ApiError;

/// Normaliza el texto JSON del itinerario a un mapa plano clave → descripción.
///
/// Se aceptan dos formas: un objeto (`{"día 1": "..."}`) o un arreglo cuyo
/// primer elemento es un objeto (`[{"día 1": "..."}]`). Cualquier otra forma
/// es un error de validación. La obligatoriedad (crear vs actualizar) la
/// decide el handler, no este parser.
pub fn parse_itinerary(raw: &str) -> Result<HashMap<String, String>, ApiError> {
    let cleaned = raw.trim();

    let value: Value = serde_json::from_str(cleaned).map_err(|_| {
        ApiError::Validation(
            "Invalid itinerary JSON format. Use {\"key\": \"value\", ...} or [{\"key\": \"value\", ...}]"
                .to_string(),
        )
    })?;

    match value {
        Value::Object(_) => serde_json::from_value(value).map_err(|_| {
            ApiError::Validation("Itinerary JSON values must be strings".to_string())
        }),
        Value::Array(items) => {
            let first = items.into_iter().next().ok_or_else(|| {
                ApiError::Validation(
                    "Itinerary JSON array must contain at least one object (e.g., [{\"key\": \"value\"}])"
                        .to_string(),
                )
            })?;
            if !first.is_object() {
                return Err(ApiError::Validation(
                    "Itinerary JSON array must contain at least one object (e.g., [{\"key\": \"value\"}])"
                        .to_string(),
                ));
            }
            serde_json::from_value(first).map_err(|_| {
                ApiError::Validation("Itinerary JSON values must be strings".to_string())
            })
        }
        _ => Err(ApiError::Validation(
            "Itinerary JSON must be an object or array of objects (e.g., {\"key\": \"value\"} or [{\"key\": \"value\"}])"
                .to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acepta_un_objeto_plano() {
        let map = parse_itinerary(r#"{"day1": "Llegada", "day2": "Museo"}"#).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["day1"], "Llegada");
    }

    #[test]
    fn acepta_un_arreglo_con_primer_objeto() {
        let map = parse_itinerary(r#"[{"day1": "Playa"}, {"ignored": "x"}]"#).unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map["day1"], "Playa");
    }

    #[test]
    fn recorta_espacios_alrededor() {
        let map = parse_itinerary("   {\"day1\": \"Tour\"}  \n").unwrap();
        assert_eq!(map["day1"], "Tour");
    }

    #[test]
    fn objeto_vacio_produce_mapa_vacio() {
        // La obligatoriedad de "no vacío" en creación la impone el handler
        let map = parse_itinerary("{}").unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn rechaza_arreglo_vacio() {
        assert!(matches!(
            parse_itinerary("[]"),
            Err(ApiError::Validation(_))
        ));
    }

    #[test]
    fn rechaza_arreglo_de_no_objetos() {
        assert!(matches!(
            parse_itinerary(r#"["day1", "day2"]"#),
            Err(ApiError::Validation(_))
        ));
    }

    #[test]
    fn rechaza_escalares() {
        assert!(matches!(parse_itinerary("42"), Err(ApiError::Validation(_))));
        assert!(matches!(
            parse_itinerary("\"texto\""),
            Err(ApiError::Validation(_))
        ));
    }

    #[test]
    fn rechaza_json_malformado() {
        assert!(matches!(
            parse_itinerary("{day1: sin comillas}"),
            Err(ApiError::Validation(_))
        ));
    }

    #[test]
    fn rechaza_valores_que_no_son_texto() {
        assert!(matches!(
            parse_itinerary(r#"{"day1": 5}"#),
            Err(ApiError::Validation(_))
        ));
    }
}
