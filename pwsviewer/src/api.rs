//! API REST et SSE du viewer
//!
//! Routes type : `GET /api/viewer/current`, `GET /api/viewer/events`,
//! `POST /api/viewer/ended`, `POST /api/viewer/error`.

use crate::{Scheduler, Slide};
use axum::{
    extract::State,
    http::StatusCode,
    response::sse::{Event, KeepAlive, Sse},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Slide courant tel qu'exposé à la page viewer
#[derive(Debug, Serialize, ToSchema)]
pub struct SlidePayload {
    pub name: String,
    pub kind: String,
    /// URL de diffusion du média
    pub url: String,
    pub timestamp: DateTime<Utc>,
}

impl SlidePayload {
    fn new(slide: &Slide, timestamp: DateTime<Utc>) -> Self {
        Self {
            name: slide.name.clone(),
            kind: format!("{:?}", slide.kind).to_lowercase(),
            url: format!("/media/{}", slide.name),
            timestamp,
        }
    }
}

/// Rapport de la page viewer (fin de lecture ou erreur)
#[derive(Debug, Deserialize, ToSchema)]
pub struct MediaReport {
    pub name: String,
}

/// Router `/api/viewer` combinant les endpoints du viewer
pub fn viewer_api_router(scheduler: Scheduler) -> Router {
    Router::new()
        .route("/current", get(current_slide))
        .route("/events", get(slide_events_sse))
        .route("/ended", post(media_ended))
        .route("/error", post(media_error))
        .with_state(scheduler)
}

/// Handler GET /api/viewer/current
///
/// Le slide courant, ou `null` tant que le séquenceur est inactif.
#[utoipa::path(
    get,
    path = "/api/viewer/current",
    tag = "viewer",
    responses(
        (status = 200, description = "Slide courant, ou null si inactif", body = SlidePayload)
    )
)]
pub async fn current_slide(State(scheduler): State<Scheduler>) -> Response {
    let payload = scheduler
        .current()
        .map(|slide| SlidePayload::new(&slide, Utc::now()));
    (StatusCode::OK, Json(payload)).into_response()
}

/// Handler SSE : diffuse chaque transition de slide
///
/// Le slide courant est envoyé immédiatement à la connexion, pour qu'une
/// page qui (re)charge affiche quelque chose sans attendre la prochaine
/// avance.
#[utoipa::path(
    get,
    path = "/api/viewer/events",
    tag = "viewer",
    responses(
        (status = 200, description = "Flux SSE des transitions de slide", content_type = "text/event-stream")
    )
)]
pub async fn slide_events_sse(State(scheduler): State<Scheduler>) -> impl IntoResponse {
    let mut rx = scheduler.subscribe();
    let current = scheduler.current();

    let stream = async_stream::stream! {
        if let Some(slide) = current {
            let payload = SlidePayload::new(&slide, Utc::now());
            if let Ok(json) = serde_json::to_string(&payload) {
                yield Ok::<_, axum::Error>(Event::default().event("slide").data(json));
            }
        }

        while let Ok(event) = rx.recv().await {
            let payload = SlidePayload::new(&event.slide, event.timestamp);
            if let Ok(json) = serde_json::to_string(&payload) {
                yield Ok::<_, axum::Error>(Event::default().event("slide").data(json));
            }
        }
    };

    Sse::new(stream).keep_alive(KeepAlive::default())
}

/// Handler POST /api/viewer/ended
///
/// Fin naturelle d'une lecture vidéo. Un rapport périmé (le slide a déjà
/// changé) est ignoré sans erreur.
#[utoipa::path(
    post,
    path = "/api/viewer/ended",
    tag = "viewer",
    request_body = MediaReport,
    responses(
        (status = 204, description = "Rapport pris en compte (ou périmé)")
    )
)]
pub async fn media_ended(
    State(scheduler): State<Scheduler>,
    Json(report): Json<MediaReport>,
) -> StatusCode {
    scheduler.on_media_ended(&report.name);
    StatusCode::NO_CONTENT
}

/// Handler POST /api/viewer/error
///
/// Échec de chargement ou de lecture : le séquenceur saute au suivant.
#[utoipa::path(
    post,
    path = "/api/viewer/error",
    tag = "viewer",
    request_body = MediaReport,
    responses(
        (status = 204, description = "Rapport pris en compte (ou périmé)")
    )
)]
pub async fn media_error(
    State(scheduler): State<Scheduler>,
    Json(report): Json<MediaReport>,
) -> StatusCode {
    scheduler.on_media_error(&report.name);
    StatusCode::NO_CONTENT
}
