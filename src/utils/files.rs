use std::path::{Path, PathBuf};

use axum::body::Bytes;
use mime::Mime;
use tokio::fs; // Usamos el sistema de archivos asíncrono
use uuid::Uuid;

use crate::error::ApiError;

const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024; // 5MB

/// Carpetas por tipo de entidad dentro de la raíz de archivos.
pub mod folders {
    pub const PROGRAMS_COVER: &str = "ProgramsCover";
    pub const PROGRAMS: &str = "Programs";
    pub const DAY_TRIPS_COVER: &str = "DayTripsCover";
    pub const DAY_TRIPS: &str = "DayTrips";
    pub const WEDDINGS_COVER: &str = "WeddingsCover";
    pub const EVENTS_COVER: &str = "EventsCover";
    pub const ACTIVITIES_COVER: &str = "ActivitiesCover";
    pub const SERVICES_COVER: &str = "ServicesCover";
}

/// Archivo recibido en un formulario multipart, ya leído en memoria.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Guarda el archivo bajo `<root>/<folder>/` con un nombre único y
    /// devuelve la ruta relativa que se persiste tal cual en la entidad.
    pub async fn upload(&self, folder: &str, file: &UploadedImage) -> Result<String, ApiError> {
        if file.bytes.is_empty() {
            return Err(ApiError::Upload("Uploaded file is empty".to_string()));
        }

        if file.bytes.len() > MAX_IMAGE_BYTES {
            return Err(ApiError::Upload(
                "Image exceeds the maximum size of 5MB".to_string(),
            ));
        }

        // Obtener extensión (jpg, png)
        let extension = Path::new(&file.file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("jpg")
            .to_lowercase();

        if !matches!(extension.as_str(), "jpg" | "jpeg" | "png" | "webp" | "gif") {
            return Err(ApiError::Upload(
                "Only images are allowed (jpg, png, webp, gif)".to_string(),
            ));
        }

        // Validar MIME cuando el navegador lo envía
        if let Some(ct) = file.content_type.as_deref().and_then(|s| s.parse::<Mime>().ok()) {
            let allowed = matches!(
                (ct.type_().as_str(), ct.subtype().as_str()),
                ("image", "jpeg") | ("image", "png") | ("image", "webp") | ("image", "gif")
            );
            if !allowed {
                return Err(ApiError::Upload(
                    "Only images are allowed (jpg, png, webp, gif)".to_string(),
                ));
            }
        }

        // Nombre único (Ej: 550e8400-e29b....jpg)
        let new_filename = format!("{}.{}", Uuid::new_v4(), extension);
        let dir = self.root.join(folder);

        if let Err(e) = fs::create_dir_all(&dir).await {
            tracing::error!("Error creando la carpeta {:?}: {:?}", dir, e);
            return Err(ApiError::Upload("Failed to store the uploaded file".to_string()));
        }

        if let Err(e) = fs::write(dir.join(&new_filename), &file.bytes).await {
            tracing::error!("Error guardando imagen: {:?}", e);
            return Err(ApiError::Upload("Failed to store the uploaded file".to_string()));
        }

        Ok(format!("uploads/{}/{}", folder, new_filename))
    }

    /// Borra el archivo referido por una ruta relativa guardada.
    /// Idempotente: borrar un archivo inexistente no es un error.
    pub async fn delete(&self, relative: &str) {
        let trimmed = relative.trim_start_matches('/');
        let Some(rel) = trimmed.strip_prefix("uploads/") else {
            return;
        };

        match fs::remove_file(self.root.join(rel)).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!("No se pudo borrar el archivo {}: {:?}", relative, e),
        }
    }

    /// Limpieza compensatoria de los archivos subidos en una petición fallida.
    pub async fn cleanup(&self, relatives: &[String]) {
        for relative in relatives {
            self.delete(relative).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(name: &str, content_type: Option<&str>, bytes: Vec<u8>) -> UploadedImage {
        UploadedImage {
            file_name: name.to_string(),
            content_type: content_type.map(|s| s.to_string()),
            bytes: Bytes::from(bytes),
        }
    }

    #[tokio::test]
    async fn sube_y_borra_un_archivo() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        let file = image("foto.jpg", Some("image/jpeg"), vec![1, 2, 3]);
        let path = store.upload(folders::PROGRAMS_COVER, &file).await.unwrap();

        assert!(path.starts_with("uploads/ProgramsCover/"));
        assert!(path.ends_with(".jpg"));

        let physical = dir.path().join(path.strip_prefix("uploads/").unwrap());
        assert!(physical.exists());

        store.delete(&path).await;
        assert!(!physical.exists());

        // Borrar dos veces no falla
        store.delete(&path).await;
    }

    #[tokio::test]
    async fn rechaza_archivo_vacio() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        let file = image("foto.png", Some("image/png"), vec![]);
        assert!(matches!(
            store.upload(folders::PROGRAMS, &file).await,
            Err(ApiError::Upload(_))
        ));
    }

    #[tokio::test]
    async fn rechaza_archivo_demasiado_grande() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        let file = image("foto.png", Some("image/png"), vec![0; MAX_IMAGE_BYTES + 1]);
        assert!(matches!(
            store.upload(folders::PROGRAMS, &file).await,
            Err(ApiError::Upload(_))
        ));
    }

    #[tokio::test]
    async fn rechaza_extensiones_que_no_son_imagen() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        let file = image("contrato.pdf", Some("application/pdf"), vec![1]);
        assert!(matches!(
            store.upload(folders::SERVICES_COVER, &file).await,
            Err(ApiError::Upload(_))
        ));
    }

    #[tokio::test]
    async fn rechaza_mime_que_no_coincide() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        let file = image("foto.jpg", Some("text/plain"), vec![1]);
        assert!(matches!(
            store.upload(folders::EVENTS_COVER, &file).await,
            Err(ApiError::Upload(_))
        ));
    }
}
