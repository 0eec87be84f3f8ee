//! Documentation OpenAPI pour l'API admin des images

use utoipa::OpenApi;

/// Documentation OpenAPI de l'API images (liste, ordre, suppression)
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::list_images,
        crate::api::reorder_images,
        crate::api::delete_media,
    ),
    components(
        schemas(
            crate::api::ReorderRequest,
            crate::api::ReorderResponse,
            crate::api::DeleteRequest,
            crate::api::DeleteResponse,
            pwsmedia::api::ErrorResponse,
        )
    ),
    tags(
        (name = "images", description = "Ordre d'affichage et contenu du diaporama")
    ),
    info(
        title = "PWSlideshow Images API",
        version = "0.1.0",
        description = r#"
# Ordre d'affichage

L'ordre stocké est consultatif : il est réparé à chaque lecture contre le
contenu réel du répertoire de médias. Un réordonnancement partiel n'est
jamais une erreur : les noms inconnus sont ignorés et les fichiers omis
replacés en fin de liste.
        "#
    )
)]
pub struct ApiDoc;
