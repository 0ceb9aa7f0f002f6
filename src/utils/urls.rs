/// Convierte la ruta relativa guardada en la entidad en una URL navegable.
/// Una ruta ausente se devuelve como cadena vacía, nunca como null.
pub fn absolute_url(base_url: &str, relative: &str) -> String {
    if relative.is_empty() {
        return String::new();
    }
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        relative.trim_start_matches('/')
    )
}

pub fn absolute_urls(base_url: &str, relatives: &[String]) -> Vec<String> {
    relatives
        .iter()
        .map(|rel| absolute_url(base_url, rel))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefija_la_ruta_con_la_base() {
        assert_eq!(
            absolute_url("http://localhost:3000", "uploads/ProgramsCover/a.jpg"),
            "http://localhost:3000/uploads/ProgramsCover/a.jpg"
        );
    }

    #[test]
    fn tolera_barras_sobrantes() {
        assert_eq!(
            absolute_url("http://localhost:3000/", "/uploads/Programs/b.png"),
            "http://localhost:3000/uploads/Programs/b.png"
        );
    }

    #[test]
    fn ruta_ausente_devuelve_cadena_vacia() {
        assert_eq!(absolute_url("http://localhost:3000", ""), "");
    }

    #[test]
    fn mapea_listas_preservando_el_orden() {
        let imgs = vec!["uploads/Programs/1.jpg".to_string(), "uploads/Programs/2.jpg".to_string()];
        assert_eq!(
            absolute_urls("http://x", &imgs),
            vec!["http://x/uploads/Programs/1.jpg", "http://x/uploads/Programs/2.jpg"]
        );
    }
}
