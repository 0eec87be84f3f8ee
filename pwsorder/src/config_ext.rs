//! Extension de pwsconfig pour l'ordre d'affichage

use std::path::PathBuf;

/// Trait d'extension pour pwsconfig::Config
pub trait OrderConfigExt {
    /// Retourne le chemin du fichier d'ordre (répertoire parent créé)
    fn order_file_path(&self) -> PathBuf;
}

impl OrderConfigExt for pwsconfig::Config {
    fn order_file_path(&self) -> PathBuf {
        let path = self
            .get_managed_file(&["order", "file"], "order.json")
            .expect("Failed to resolve order file path");

        PathBuf::from(path)
    }
}
