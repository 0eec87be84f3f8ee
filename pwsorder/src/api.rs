//! API REST admin : liste réconciliée, réordonnancement, suppression

use crate::OrderStore;
use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use pwsmedia::api::ErrorResponse;
use pwsmedia::MediaStore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use utoipa::ToSchema;

/// État partagé des handlers admin : les deux niveaux du magasin
///
/// Le répertoire de médias fait autorité sur l'existence ; le fichier
/// d'ordre n'est qu'une séquence consultative. La réconciliation est la
/// seule opération de fusion entre les deux.
#[derive(Clone)]
pub struct AdminState {
    pub media: Arc<MediaStore>,
    pub orders: Arc<OrderStore>,
}

/// Requête de réordonnancement
#[derive(Debug, Deserialize, ToSchema)]
pub struct ReorderRequest {
    pub order: Vec<String>,
}

/// Réponse de réordonnancement : l'ordre effectivement persisté
#[derive(Debug, Serialize, ToSchema)]
pub struct ReorderResponse {
    pub order: Vec<String>,
}

/// Requête de suppression (formulaire du tableau de bord)
#[derive(Debug, Deserialize, ToSchema)]
pub struct DeleteRequest {
    pub file: String,
}

/// Réponse de suppression
#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteResponse {
    pub removed: String,
}

/// Router `/api/images` combinant les endpoints admin
pub fn images_api_router(state: AdminState) -> Router {
    Router::new()
        .route("/", get(list_images))
        .route("/order", post(reorder_images))
        .route("/delete", post(delete_media))
        .with_state(state)
}

/// Handler GET /api/images
///
/// Retourne la liste réconciliée : exactement les fichiers présents, dans
/// l'ordre choisi par l'admin, les nouveaux venus à la suite. Chaque
/// lecture répare l'ordre stocké (read-repair).
#[utoipa::path(
    get,
    path = "/api/images",
    tag = "images",
    responses(
        (status = 200, description = "Noms de fichiers dans l'ordre d'affichage", body = [String])
    )
)]
pub async fn list_images(State(state): State<AdminState>) -> Response {
    let present = state.media.names();
    let order = state.orders.reconciled_with(&present);
    (StatusCode::OK, Json(order)).into_response()
}

/// Handler POST /api/images/order
///
/// Applique l'ordre glissé-déposé par l'admin. Une requête ne couvrant
/// qu'un sous-ensemble des fichiers n'est jamais une erreur : les noms
/// inconnus sont abandonnés en silence, les fichiers omis ajoutés en fin.
#[utoipa::path(
    post,
    path = "/api/images/order",
    tag = "images",
    request_body = ReorderRequest,
    responses(
        (status = 200, description = "Ordre nettoyé et persisté", body = ReorderResponse),
        (status = 500, description = "Échec d'écriture du fichier d'ordre", body = ErrorResponse)
    )
)]
pub async fn reorder_images(
    State(state): State<AdminState>,
    Json(req): Json<ReorderRequest>,
) -> Response {
    let present = state.media.names();

    match state.orders.apply_reorder(&req.order, &present) {
        Ok(order) => {
            info!(count = order.len(), "Display order updated");
            (StatusCode::OK, Json(ReorderResponse { order })).into_response()
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "PERSISTENCE_ERROR".to_string(),
                message: e.to_string(),
            }),
        )
            .into_response(),
    }
}

/// Handler POST /api/images/delete
///
/// Supprime le fichier du magasin et retire son nom de l'ordre stocké.
/// Supprimer un fichier déjà absent est un no-op ; seule une traversée de
/// chemin est rejetée.
#[utoipa::path(
    post,
    path = "/api/images/delete",
    tag = "images",
    responses(
        (status = 200, description = "Fichier supprimé (ou déjà absent)", body = DeleteResponse),
        (status = 400, description = "Nom de fichier invalide", body = ErrorResponse),
        (status = 500, description = "Échec de suppression", body = ErrorResponse)
    )
)]
pub async fn delete_media(
    State(state): State<AdminState>,
    Form(req): Form<DeleteRequest>,
) -> Response {
    if let Err(e) = state.media.remove(&req.file) {
        let (status, code) = match e {
            pwsmedia::Error::InvalidName(_) => (StatusCode::BAD_REQUEST, "INVALID_NAME"),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR"),
        };
        return (
            status,
            Json(ErrorResponse {
                error: code.to_string(),
                message: e.to_string(),
            }),
        )
            .into_response();
    }

    if let Err(e) = state.orders.remove_name(&req.file) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "PERSISTENCE_ERROR".to_string(),
                message: e.to_string(),
            }),
        )
            .into_response();
    }

    info!(file = %req.file, "Media file deleted");
    (StatusCode::OK, Json(DeleteResponse { removed: req.file })).into_response()
}
