//! SyncPoller : rafraîchissement périodique de la liste faisant foi

use crate::Scheduler;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::warn;

/// Source de la liste de fichiers faisant foi
///
/// L'application l'implémente au-dessus des magasins de médias et
/// d'ordre ; les tests injectent une liste synthétique.
#[async_trait]
pub trait ListSource: Send + Sync {
    async fn list_names(&self) -> anyhow::Result<Vec<String>>;
}

/// Poller périodique alimentant le séquenceur
///
/// À chaque tick, la liste est récupérée et transmise à
/// [`Scheduler::on_sync_tick`], qui ne retient que les changements
/// d'ensemble. Un échec de récupération est journalisé et réessayé au
/// tick suivant, sans autre forme de résilience.
pub struct SyncPoller {
    scheduler: Scheduler,
    source: Arc<dyn ListSource>,
    period: Duration,
}

impl SyncPoller {
    pub fn new(scheduler: Scheduler, source: Arc<dyn ListSource>, period: Duration) -> Self {
        Self {
            scheduler,
            source,
            period,
        }
    }

    /// Un cycle de synchronisation (exposé pour les tests)
    pub async fn tick(&self) {
        match self.source.list_names().await {
            Ok(names) => self.scheduler.on_sync_tick(names),
            Err(e) => warn!("Failed to refresh media list: {}", e),
        }
    }

    /// Lance la boucle de polling en tâche de fond
    ///
    /// Le premier tick part immédiatement : le viewer démarre sans
    /// attendre la première période.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(self.period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                self.tick().await;
            }
        })
    }
}
