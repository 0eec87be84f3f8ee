//! # pwsviewer - Séquenceur de lecture du diaporama
//!
//! Cette crate pilote ce que le viewer affiche :
//!
//! - **Scheduler** : machine à états `Idle` → `Playing` consommant une
//!   file de lecture mélangée (permutation uniforme de la liste connue,
//!   reconstruite à l'épuisement ou au changement d'ensemble). Les images
//!   avancent sur une minuterie fixe ; les vidéos avancent sur leur fin
//!   réelle de lecture rapportée par la page viewer.
//! - **SyncPoller** : rafraîchissement périodique de la liste de fichiers
//!   faisant foi, avec comparaison d'ensembles insensible à l'ordre.
//! - API HTTP du viewer : slide courant, flux SSE des transitions,
//!   remontée des évènements de fin et d'erreur de lecture.
//!
//! Anti-répétition : variante stricte. Chaque recharge est un mélange
//! complet du pool, et le nom qui vient d'être affiché n'est jamais
//! replacé en tête (dès que le pool compte plus d'un élément). Un nom ne
//! peut donc jamais apparaître deux fois de suite, même à la frontière
//! entre deux passes.
//!
//! # Exemple
//!
//! ```no_run
//! use pwsviewer::Scheduler;
//! use std::time::Duration;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let scheduler = Scheduler::new(Duration::from_secs(10));
//! let mut events = scheduler.subscribe();
//!
//! scheduler.on_list_changed(vec!["a.png".into(), "b.mp4".into()]);
//!
//! while let Ok(event) = events.recv().await {
//!     println!("Now showing: {}", event.slide.name);
//! }
//! # }
//! ```

mod poller;
mod scheduler;

pub mod api;
pub mod config_ext;
pub mod openapi;

pub use poller::{ListSource, SyncPoller};
pub use scheduler::{Scheduler, Slide, SlideEvent};
