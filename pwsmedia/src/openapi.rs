//! Documentation OpenAPI pour l'API média

use utoipa::OpenApi;

/// Documentation OpenAPI de l'upload de médias
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::upload_media,
    ),
    components(
        schemas(
            crate::api::UploadResponse,
            crate::api::ErrorResponse,
        )
    ),
    tags(
        (name = "media", description = "Gestion des fichiers médias partagés")
    ),
    info(
        title = "PWSlideshow Media API",
        version = "0.1.0",
        description = "Upload de médias ; les nouveaux fichiers sont pris en compte par la réconciliation d'ordre au prochain affichage."
    )
)]
pub struct ApiDoc;
