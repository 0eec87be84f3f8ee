//! Types d'erreurs pour pwsorder

/// Erreurs de gestion de l'ordre d'affichage
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to persist order file: {0}")]
    Persistence(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Type Result spécialisé pour pwsorder
pub type Result<T> = std::result::Result<T, Error>;
