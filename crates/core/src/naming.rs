//! Choix d'un nom de fichier de sortie libre

use std::path::{Path, PathBuf};

/// Nom de base par défaut des images
pub const DEFAULT_BASE_NAME: &str = "GenePic";

/// Nom de base utilisé si l'écriture sous le nom choisi échoue
pub const FALLBACK_BASE_NAME: &str = "gene2pic_backupName";

/// Extension des images produites
pub const IMAGE_EXTENSION: &str = "png";

/// Premier chemin libre parmi `base.ext`, `base2.ext`, `base3.ext`, ...
///
/// Le nom n'est qu'un candidat: l'encodeur crée le fichier en mode exclusif
/// et échoue si un autre processus l'a pris entre-temps.
pub fn next_available_path(dir: &Path, base: &str, extension: &str) -> PathBuf {
    let candidate = dir.join(format!("{base}.{extension}"));
    if !candidate.exists() {
        return candidate;
    }

    let mut suffix: u64 = 2;
    loop {
        let candidate = dir.join(format!("{base}{suffix}.{extension}"));
        if !candidate.exists() {
            return candidate;
        }
        suffix += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_free_base_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = next_available_path(dir.path(), DEFAULT_BASE_NAME, IMAGE_EXTENSION);
        assert_eq!(path, dir.path().join("GenePic.png"));
    }

    #[test]
    fn test_suffix_starts_at_two() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("GenePic.png"), b"").unwrap();

        let path = next_available_path(dir.path(), DEFAULT_BASE_NAME, IMAGE_EXTENSION);
        assert_eq!(path, dir.path().join("GenePic2.png"));
    }

    #[test]
    fn test_smallest_free_suffix() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["GenePic.png", "GenePic2.png", "GenePic3.png", "GenePic5.png"] {
            fs::write(dir.path().join(name), b"").unwrap();
        }

        let path = next_available_path(dir.path(), DEFAULT_BASE_NAME, IMAGE_EXTENSION);
        assert_eq!(path, dir.path().join("GenePic4.png"));
    }
}
