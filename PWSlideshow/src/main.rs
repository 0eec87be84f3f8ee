use std::sync::Arc;

use pwsmedia::MediaStore;
use pwsmedia::config_ext::MediaConfigExt;
use pwsorder::OrderStore;
use pwsorder::api::AdminState;
use pwsorder::config_ext::OrderConfigExt;
use pwsserver::ServerBuilder;
use pwsviewer::config_ext::ViewerConfigExt;
use pwsviewer::{ListSource, Scheduler, SyncPoller};
use rust_embed::RustEmbed;
use tracing::info;
use utoipa::OpenApi;

/// Tableau de bord admin embarqué
#[derive(RustEmbed, Clone)]
#[folder = "assets/admin"]
struct AdminApp;

/// Page d'affichage embarquée
#[derive(RustEmbed, Clone)]
#[folder = "assets/viewer"]
struct ViewerApp;

/// Source de liste du viewer : lecture directe du magasin de médias
///
/// Le viewer joue mélangé, seul l'ensemble des noms compte ; il ne passe
/// jamais par le fichier d'ordre (réservé en écriture au chemin admin).
struct StoreListSource {
    media: Arc<MediaStore>,
}

#[async_trait::async_trait]
impl ListSource for StoreListSource {
    async fn list_names(&self) -> anyhow::Result<Vec<String>> {
        Ok(self.media.names())
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ========== PHASE 1 : Infrastructure ==========

    let config = pwsconfig::get_config();
    let mut server = ServerBuilder::new_configured().build();
    server.init_logging().await;

    info!("📂 Opening media and order stores...");
    let media = Arc::new(MediaStore::new(config.media_dir()));
    let orders = Arc::new(OrderStore::new(config.order_file_path()));
    info!(
        "✅ {} media file(s) present in {}",
        media.list().len(),
        media.root().display()
    );

    // ========== PHASE 2 : Surfaces HTTP ==========

    // API admin : liste réconciliée, réordonnancement, suppression
    let admin_state = AdminState {
        media: media.clone(),
        orders: orders.clone(),
    };
    server
        .add_openapi(
            pwsorder::api::images_api_router(admin_state),
            pwsorder::openapi::ApiDoc::openapi(),
            "images",
        )
        .await;

    // API média : upload multipart
    server
        .add_openapi(
            pwsmedia::api::media_api_router(media.clone()),
            pwsmedia::openapi::ApiDoc::openapi(),
            "media",
        )
        .await;

    // Séquenceur et API viewer
    let scheduler = Scheduler::new(config.slideshow_dwell());
    server
        .add_openapi(
            pwsviewer::api::viewer_api_router(scheduler.clone()),
            pwsviewer::openapi::ApiDoc::openapi(),
            "viewer",
        )
        .await;

    // Diffusion des fichiers médias
    server
        .add_router("/media", pwsmedia::api::media_file_router(media.clone()))
        .await;

    // Pages embarquées
    info!("📡 Registering web applications...");
    server.add_spa::<AdminApp>("/admin").await;
    server.add_spa::<ViewerApp>("/viewer").await;
    server.add_redirect("/", "/viewer").await;

    server
        .add_route("/info", || async {
            serde_json::json!({ "version": env!("CARGO_PKG_VERSION") })
        })
        .await;

    // ========== PHASE 3 : Synchronisation et démarrage ==========

    let source = Arc::new(StoreListSource {
        media: media.clone(),
    });
    SyncPoller::new(scheduler, source, config.slideshow_poll_period()).spawn();

    info!("🌐 Starting HTTP server...");
    server.start().await;

    info!("✅ PWSlideshow is ready!");
    info!("Press Ctrl+C to stop...");
    server.wait().await;

    Ok(())
}
