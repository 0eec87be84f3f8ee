//! MediaStore : répertoire de médias sur disque

use crate::item::{MediaItem, MediaKind};
use crate::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};

/// Magasin de fichiers médias
///
/// Enveloppe un répertoire sur disque, source de vérité de "ce qui
/// existe". Toutes les opérations acceptent uniquement des noms de base ;
/// toute tentative de traversée de chemin est rejetée avant de toucher le
/// système de fichiers.
pub struct MediaStore {
    root: PathBuf,
}

impl MediaStore {
    /// Crée un magasin sur le répertoire donné
    ///
    /// Le répertoire n'a pas besoin d'exister : un répertoire absent se
    /// lit comme un magasin vide, et il est créé au premier stockage.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Répertoire racine du magasin
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Énumère les médias présents
    ///
    /// Les fichiers cachés, les sous-répertoires et les extensions non
    /// reconnues sont ignorés. Le résultat est trié du plus récemment
    /// modifié au plus ancien (nom décroissant à égalité, pour rester
    /// déterministe).
    ///
    /// Un répertoire absent ou illisible retourne la liste vide : c'est
    /// un état transitoire, jamais une erreur.
    pub fn list(&self) -> Vec<MediaItem> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) => {
                debug!("Media directory not readable ({}), treating as empty", e);
                return Vec::new();
            }
        };

        let mut items: Vec<MediaItem> = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let name = entry.file_name().to_str()?.to_string();
                if name.starts_with('.') {
                    return None;
                }
                let kind = MediaKind::from_name(&name)?;
                let metadata = entry.metadata().ok()?;
                if !metadata.is_file() {
                    return None;
                }
                Some(MediaItem {
                    name,
                    mtime: metadata.modified().unwrap_or(UNIX_EPOCH),
                    size: metadata.len(),
                    kind,
                })
            })
            .collect();

        items.sort_by(|a, b| b.mtime.cmp(&a.mtime).then_with(|| b.name.cmp(&a.name)));
        items
    }

    /// Noms des médias présents, dans l'ordre d'énumération
    pub fn names(&self) -> Vec<String> {
        self.list().into_iter().map(|item| item.name).collect()
    }

    /// Vérifie qu'un média est présent
    pub fn contains(&self, name: &str) -> bool {
        self.path_of(name).is_some()
    }

    /// Stocke un fichier sous un nom résistant aux collisions
    ///
    /// Le nom d'origine est assaini (seuls `[A-Za-z0-9._-]` survivent)
    /// puis préfixé du timestamp Unix en millisecondes :
    /// `1714138459123_photo.jpg`. Retourne le nom stocké.
    ///
    /// C'est la seule classe d'erreur qui remonte jusqu'à l'admin : un
    /// échec d'écriture (disque plein, permissions) serait une perte de
    /// données silencieuse s'il était avalé.
    pub async fn store(&self, original_name: &str, bytes: &[u8]) -> Result<String> {
        let sanitized = sanitize_file_name(original_name);
        if sanitized.is_empty() || sanitized.chars().all(|c| c == '.' || c == '_') {
            return Err(Error::InvalidName(original_name.to_string()));
        }
        if MediaKind::from_name(&sanitized).is_none() {
            return Err(Error::UnsupportedMedia(sanitized));
        }

        tokio::fs::create_dir_all(&self.root).await?;

        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        let stored_name = format!("{}_{}", millis, sanitized);

        let path = self.root.join(&stored_name);
        tokio::fs::write(&path, bytes).await?;

        debug!(name = %stored_name, size = bytes.len(), "Stored media file");
        Ok(stored_name)
    }

    /// Supprime un média par son nom
    ///
    /// Le nom est restreint à un basename ; supprimer un fichier absent
    /// est un no-op (l'état final demandé est déjà atteint).
    pub fn remove(&self, name: &str) -> Result<()> {
        let base = safe_basename(name).ok_or_else(|| Error::InvalidName(name.to_string()))?;

        let path = self.root.join(base);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(name = %base, "Delete of absent file ignored");
                Ok(())
            }
            Err(e) => {
                warn!(name = %base, "Failed to remove media file: {}", e);
                Err(e.into())
            }
        }
    }

    /// Chemin d'un média présent, ou `None` si absent ou nom invalide
    pub fn path_of(&self, name: &str) -> Option<PathBuf> {
        let base = safe_basename(name)?;
        MediaKind::from_name(base)?;
        let path = self.root.join(base);
        path.is_file().then_some(path)
    }
}

/// Assainit un nom de fichier soumis par un client
///
/// Même politique que le tableau de bord d'origine : tout caractère hors
/// `[A-Za-z0-9._-]` devient `_`.
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Restreint un nom client à un basename sûr
///
/// Rejette les chaînes vides, les séparateurs de chemin, `..` et les
/// fichiers cachés.
fn safe_basename(name: &str) -> Option<&str> {
    if name.is_empty()
        || name.contains('/')
        || name.contains('\\')
        || name.contains("..")
        || name.starts_with('.')
    {
        return None;
    }
    Some(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_keeps_safe_characters() {
        assert_eq!(sanitize_file_name("photo_2024-01.jpg"), "photo_2024-01.jpg");
    }

    #[test]
    fn test_sanitize_replaces_others() {
        assert_eq!(
            sanitize_file_name("Vacances à la mer.jpg"),
            "Vacances___la_mer.jpg"
        );
        assert_eq!(sanitize_file_name("a/b\\c.png"), "a_b_c.png");
    }

    #[test]
    fn test_safe_basename_rejects_traversal() {
        assert!(safe_basename("../etc/passwd").is_none());
        assert!(safe_basename("a/b.png").is_none());
        assert!(safe_basename("..").is_none());
        assert!(safe_basename(".hidden").is_none());
        assert!(safe_basename("").is_none());
        assert_eq!(safe_basename("ok.png"), Some("ok.png"));
    }
}
