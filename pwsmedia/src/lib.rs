//! # pwsmedia - Magasin de fichiers médias
//!
//! Cette crate gère le répertoire de médias partagé de PWSlideshow :
//! - Énumération des fichiers présents (source de vérité de l'existence)
//! - Classification image/vidéo par extension
//! - Stockage sous un nom résistant aux collisions (préfixe horodaté)
//! - Suppression restreinte aux noms de base (pas de traversée de chemin)
//! - Handlers HTTP : upload multipart et streaming des fichiers
//!
//! Le répertoire est la **seule** autorité sur "ce qui existe" ; l'ordre
//! d'affichage est une préoccupation séparée, portée par `pwsorder`.
//!
//! # Exemple
//!
//! ```no_run
//! use pwsmedia::MediaStore;
//!
//! # #[tokio::main]
//! # async fn main() -> pwsmedia::Result<()> {
//! let store = MediaStore::new("/var/lib/pwslideshow/media");
//!
//! let stored = store.store("Vacances à la mer.jpg", b"...").await?;
//! for item in store.list() {
//!     println!("{} ({:?})", item.name, item.kind);
//! }
//! store.remove(&stored)?;
//! # Ok(())
//! # }
//! ```

mod error;
mod item;
mod store;

pub mod api;
pub mod config_ext;
pub mod openapi;

pub use error::{Error, Result};
pub use item::{MediaItem, MediaKind};
pub use store::MediaStore;
