//! Types d'erreurs pour pwsmedia

/// Erreurs du magasin de médias
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid media name: {0}")]
    InvalidName(String),

    #[error("Unsupported media type: {0}")]
    UnsupportedMedia(String),

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),
}

/// Type Result spécialisé pour pwsmedia
pub type Result<T> = std::result::Result<T, Error>;
