//! Documentation OpenAPI pour l'API viewer

use utoipa::OpenApi;

/// Documentation OpenAPI de l'API viewer (slide courant, SSE, rapports)
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::current_slide,
        crate::api::slide_events_sse,
        crate::api::media_ended,
        crate::api::media_error,
    ),
    components(
        schemas(
            crate::api::SlidePayload,
            crate::api::MediaReport,
        )
    ),
    tags(
        (name = "viewer", description = "Pilotage de la page d'affichage")
    ),
    info(
        title = "PWSlideshow Viewer API",
        version = "0.1.0",
        description = r#"
# Séquencement du diaporama

Le séquenceur tourne côté serveur ; la page viewer ne fait qu'afficher le
flux SSE des transitions et rapporter la fin (ou l'échec) des lectures
vidéo. Les images avancent d'elles-mêmes après la durée d'affichage
configurée.
        "#
    )
)]
pub struct ApiDoc;
