//! # pwsorder - Ordre d'affichage persistant et réconciliation
//!
//! Cette crate maintient l'ordre d'affichage choisi par l'admin face au
//! contenu réel (et non ordonné) du magasin de médias :
//!
//! - **reconcile** : fonction pure réparant un ordre stocké contre
//!   l'ensemble des fichiers présents (préfixe conservé, nouveaux noms
//!   ajoutés en fin, indicateur `dirty` quand une réécriture s'impose)
//! - **OrderStore** : persistance de l'ordre en JSON (fichier absent ou
//!   corrompu = ordre vide, écriture atomique par renommage)
//! - API admin : liste réconciliée, réordonnancement, suppression
//!
//! L'ordre stocké peut référencer des noms disparus ou ignorer des noms
//! nouveaux : ces états sont transitoires et se résorbent à la lecture
//! suivante, jamais des erreurs.
//!
//! # Exemple
//!
//! ```
//! use pwsorder::reconcile;
//!
//! let present = vec!["c.mp4".to_string(), "a.png".to_string(), "b.png".to_string()];
//! let stored = vec!["c.mp4".to_string(), "z.png".to_string()];
//!
//! let result = reconcile(&present, &stored);
//! assert_eq!(result.order, vec!["c.mp4", "a.png", "b.png"]);
//! assert!(result.dirty);
//! ```

mod error;
mod reconcile;
mod store;

pub mod api;
pub mod config_ext;
pub mod openapi;

pub use error::{Error, Result};
pub use reconcile::{reconcile, Reconciled};
pub use store::OrderStore;
