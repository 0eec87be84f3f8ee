//! MediaItem : un fichier média présent dans le magasin

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::SystemTime;

/// Extensions reconnues comme images
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif", "avif"];

/// Extensions reconnues comme vidéos
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "mov", "m4v"];

/// Nature d'un média, déduite de l'extension du nom de fichier
///
/// La classification ne regarde jamais le contenu : un fichier `.mp4`
/// corrompu reste une vidéo du point de vue du séquenceur (le viewer
/// sautera au suivant sur erreur de lecture).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Classifie un nom de fichier par son extension
    ///
    /// Retourne `None` pour toute extension inconnue : le fichier n'est
    /// alors pas un média et reste invisible pour toutes les listes.
    pub fn from_name(name: &str) -> Option<MediaKind> {
        let ext = Path::new(name).extension()?.to_str()?.to_lowercase();
        if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            Some(MediaKind::Image)
        } else if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
            Some(MediaKind::Video)
        } else {
            None
        }
    }

    /// Content-Type HTTP associé à un nom de fichier média
    pub fn content_type_for(name: &str) -> &'static str {
        let ext = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "jpg" | "jpeg" => "image/jpeg",
            "png" => "image/png",
            "webp" => "image/webp",
            "gif" => "image/gif",
            "avif" => "image/avif",
            "mp4" => "video/mp4",
            "webm" => "video/webm",
            "mov" => "video/quicktime",
            "m4v" => "video/x-m4v",
            _ => "application/octet-stream",
        }
    }
}

/// Un fichier média présent dans le magasin
///
/// L'identité d'un média est son nom (basename, unique dans le
/// répertoire). L'item est créé à l'arrivée du fichier sur disque et
/// disparaît avec lui.
#[derive(Debug, Clone)]
pub struct MediaItem {
    /// Nom de fichier (basename uniquement, sans séparateur de chemin)
    pub name: String,

    /// Date de dernière modification
    pub mtime: SystemTime,

    /// Taille en octets
    pub size: u64,

    /// Image ou vidéo
    pub kind: MediaKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_extensions() {
        assert_eq!(MediaKind::from_name("photo.jpg"), Some(MediaKind::Image));
        assert_eq!(MediaKind::from_name("photo.JPEG"), Some(MediaKind::Image));
        assert_eq!(MediaKind::from_name("anim.gif"), Some(MediaKind::Image));
        assert_eq!(MediaKind::from_name("modern.avif"), Some(MediaKind::Image));
    }

    #[test]
    fn test_video_extensions() {
        assert_eq!(MediaKind::from_name("clip.mp4"), Some(MediaKind::Video));
        assert_eq!(MediaKind::from_name("clip.WebM"), Some(MediaKind::Video));
        assert_eq!(MediaKind::from_name("clip.mov"), Some(MediaKind::Video));
    }

    #[test]
    fn test_non_media_extensions() {
        assert_eq!(MediaKind::from_name("notes.txt"), None);
        assert_eq!(MediaKind::from_name("archive.zip"), None);
        assert_eq!(MediaKind::from_name("no_extension"), None);
    }

    #[test]
    fn test_content_types() {
        assert_eq!(MediaKind::content_type_for("a.jpg"), "image/jpeg");
        assert_eq!(MediaKind::content_type_for("a.mp4"), "video/mp4");
        assert_eq!(MediaKind::content_type_for("a.mov"), "video/quicktime");
    }
}
