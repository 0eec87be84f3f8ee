//! Extension de pwsconfig pour le magasin de médias

use std::path::PathBuf;

/// Trait d'extension pour pwsconfig::Config
pub trait MediaConfigExt {
    /// Retourne le répertoire des fichiers médias (créé si nécessaire)
    fn media_dir(&self) -> PathBuf;
}

impl MediaConfigExt for pwsconfig::Config {
    fn media_dir(&self) -> PathBuf {
        let dir = self
            .get_managed_dir(&["media", "directory"], "media")
            .expect("Failed to get or create media directory");

        PathBuf::from(dir)
    }
}
