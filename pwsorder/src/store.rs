//! OrderStore : persistance JSON de l'ordre d'affichage

use crate::reconcile::reconcile;
use crate::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Persistance de l'ordre d'affichage
///
/// L'ordre est un simple tableau JSON de noms de fichiers, sans version.
/// Le fichier appartient exclusivement au processus admin ; le viewer ne
/// lit que la projection réconciliée.
pub struct OrderStore {
    path: PathBuf,
}

impl OrderStore {
    /// Crée un magasin sur le fichier donné
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Chemin du fichier d'ordre
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Charge l'ordre stocké
    ///
    /// Fichier absent, JSON malformé ou d'un autre type : ordre vide.
    /// La corruption est avalée, jamais fatale ; la réconciliation
    /// reconstruira un ordre valide à partir des fichiers présents.
    pub fn load(&self) -> Vec<String> {
        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(e) => {
                debug!("Order file not readable ({}), starting empty", e);
                return Vec::new();
            }
        };

        match serde_json::from_slice::<Vec<String>>(&raw) {
            Ok(order) => order,
            Err(e) => {
                warn!("Order file is corrupt ({}), starting empty", e);
                Vec::new()
            }
        }
    }

    /// Persiste un ordre
    ///
    /// Écrit dans un fichier temporaire voisin puis renomme : un lecteur
    /// concurrent voit toujours soit l'ancien contenu complet, soit le
    /// nouveau, jamais un fichier tronqué.
    pub fn save(&self, order: &[String]) -> Result<()> {
        let json = serde_json::to_vec_pretty(order)
            .map_err(|e| Error::Persistence(format!("Failed to encode order: {}", e)))?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Persistence(format!("Failed to create order directory: {}", e))
            })?;
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, &json)
            .map_err(|e| Error::Persistence(format!("Failed to write order file: {}", e)))?;
        fs::rename(&tmp, &self.path)
            .map_err(|e| Error::Persistence(format!("Failed to replace order file: {}", e)))?;

        Ok(())
    }

    /// Lecture-réparation : l'ordre réconcilié avec les noms présents
    ///
    /// C'est le chemin emprunté à chaque affichage sans action de
    /// réordonnancement explicite. Quand l'ordre réparé diffère du stocké
    /// il est re-persisté ; un échec de cette écriture incidente est
    /// journalisé mais ne prive pas le lecteur du résultat (la prochaine
    /// lecture réparera de nouveau).
    pub fn reconciled_with(&self, present: &[String]) -> Vec<String> {
        let stored = self.load();
        let result = reconcile(present, &stored);

        if result.dirty {
            if let Err(e) = self.save(&result.order) {
                warn!("Failed to persist repaired order: {}", e);
            }
        }

        result.order
    }

    /// Applique un ordre proposé par l'admin
    ///
    /// Les noms inconnus sont abandonnés, les doublons réduits, les noms
    /// présents mais omis ajoutés en fin (chaque fichier présent est
    /// toujours placé quelque part). L'ordre nettoyé est persisté puis
    /// retourné ; ici un échec d'écriture remonte à l'action admin.
    pub fn apply_reorder(&self, proposed: &[String], present: &[String]) -> Result<Vec<String>> {
        let cleaned = reconcile(present, proposed).order;
        self.save(&cleaned)?;
        Ok(cleaned)
    }

    /// Retire un nom de l'ordre stocké (après une suppression de média)
    ///
    /// Sans occurrence du nom, le fichier n'est pas réécrit.
    pub fn remove_name(&self, name: &str) -> Result<()> {
        let stored = self.load();
        let filtered: Vec<String> = stored.iter().filter(|n| *n != name).cloned().collect();

        if filtered.len() != stored.len() {
            self.save(&filtered)?;
        }
        Ok(())
    }
}
