//! Handlers HTTP pour le magasin de médias (upload et diffusion)

use crate::item::MediaKind;
use crate::MediaStore;
use axum::{
    body::Body,
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tokio_util::io::ReaderStream;
use tracing::warn;
use utoipa::ToSchema;

/// Taille maximale d'un envoi multipart (couvre les vidéos)
const MAX_UPLOAD_BYTES: usize = 256 * 1024 * 1024;

/// Réponse à un upload : les noms sous lesquels les fichiers sont stockés
#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    pub stored: Vec<String>,
}

/// Réponse d'erreur REST générique
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// Router API à monter sous `/api/media`
pub fn media_api_router(store: Arc<MediaStore>) -> Router {
    Router::new()
        .route("/upload", post(upload_media))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(store)
}

/// Router de diffusion des fichiers, à monter sous `/media`
pub fn media_file_router(store: Arc<MediaStore>) -> Router {
    Router::new()
        .route("/{name}", get(serve_media))
        .with_state(store)
}

/// Handler POST /api/media/upload
///
/// Accepte une ou plusieurs parts fichier ; chaque part est stockée sous
/// un nom horodaté. Les parts sans nom de fichier ou d'un type non média
/// sont ignorées (entrée client normalisée, pas une erreur) ; seul un
/// échec d'écriture produit une réponse d'erreur.
#[utoipa::path(
    post,
    path = "/api/media/upload",
    tag = "media",
    responses(
        (status = 201, description = "Fichiers stockés", body = UploadResponse),
        (status = 500, description = "Échec d'écriture sur disque", body = ErrorResponse)
    )
)]
pub async fn upload_media(
    State(store): State<Arc<MediaStore>>,
    mut multipart: Multipart,
) -> Response {
    let mut stored = Vec::new();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                warn!("Malformed multipart body: {}", e);
                break;
            }
        };

        let Some(file_name) = field.file_name().map(|s| s.to_string()) else {
            continue;
        };

        let bytes = match field.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(file = %file_name, "Failed to read upload part: {}", e);
                continue;
            }
        };

        match store.store(&file_name, &bytes).await {
            Ok(name) => stored.push(name),
            Err(crate::Error::Storage(e)) => {
                // Perte de données potentielle : la seule erreur qui remonte
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: "STORAGE_ERROR".to_string(),
                        message: format!("Cannot store {}: {}", file_name, e),
                    }),
                )
                    .into_response();
            }
            Err(e) => {
                warn!(file = %file_name, "Upload part skipped: {}", e);
            }
        }
    }

    (StatusCode::CREATED, Json(UploadResponse { stored })).into_response()
}

/// Handler GET /media/{name}
///
/// Streame le fichier avec le Content-Type déduit de l'extension.
/// Noms invalides et fichiers absents répondent 404.
pub async fn serve_media(
    State(store): State<Arc<MediaStore>>,
    Path(name): Path<String>,
) -> Response {
    let Some(path) = store.path_of(&name) else {
        return (StatusCode::NOT_FOUND, "Media not found").into_response();
    };

    match tokio::fs::File::open(&path).await {
        Ok(file) => {
            let stream = ReaderStream::new(file);
            let body = Body::from_stream(stream);
            (
                StatusCode::OK,
                [("content-type", MediaKind::content_type_for(&name))],
                body,
            )
                .into_response()
        }
        Err(e) => {
            warn!(name = %name, "Error reading media file: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error reading file").into_response()
        }
    }
}
