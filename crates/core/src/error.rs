//! Types d'erreurs pour la bibliothèque gene2pic

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PicError {
    #[error("Aucune base valide dans la séquence d'entrée")]
    EmptyInput,

    #[error("Impossible d'allouer le tampon d'image ({bytes} octets)")]
    Allocation { bytes: u128 },

    #[error("Erreur d'encodage de l'image: {0}")]
    Encode(String),

    #[error("Facteur d'échelle invalide: {0} (doit être >= 1)")]
    InvalidScale(u32),

    #[error("Couleur hexadécimale invalide: {0}")]
    InvalidColour(String),

    #[error("Impossible de créer le pool de threads: {0}")]
    ThreadPool(String),

    #[error("Erreur IO: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PicError>;

impl From<png::EncodingError> for PicError {
    fn from(err: png::EncodingError) -> Self {
        PicError::Encode(err.to_string())
    }
}
