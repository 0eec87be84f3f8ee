//! Utilitaires partagés de PWSlideshow.
//!
//! Pour l'instant : détection de l'adresse IP locale, utilisée par
//! `pwsconfig` pour déterminer l'URL de base du serveur HTTP.

mod ip_utils;

pub use ip_utils::guess_local_ip;
