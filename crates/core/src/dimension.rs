//! Dimensionnement de la grille carrée

use serde::Serialize;

/// Plus petit côté `d` tel que `d * d >= count`
///
/// Calcul entier exact sur 64 bits (pas d'erreur d'arrondi flottant pour les
/// génomes de plusieurs milliards de bases). `count == 0` donne 0.
pub fn square_side(count: u64) -> u64 {
    let root = isqrt(count);
    if root * root == count {
        root
    } else {
        root + 1
    }
}

/// Racine carrée entière par défaut
fn isqrt(n: u64) -> u64 {
    let mut root = (n as f64).sqrt() as u64;

    // Corrige l'estimation flottante d'une ou deux unités
    while root.checked_mul(root).map_or(true, |sq| sq > n) {
        root -= 1;
    }
    while (root + 1).checked_mul(root + 1).is_some_and(|sq| sq <= n) {
        root += 1;
    }

    root
}

/// Disposition d'une séquence de `count` bases dans une grille `side x side`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridLayout {
    /// Nombre de bases valides (N)
    pub count: u64,
    /// Côté de la grille
    pub side: u64,
}

impl GridLayout {
    pub fn for_count(count: u64) -> Self {
        Self {
            count,
            side: square_side(count),
        }
    }

    /// Lignes entièrement remplies: `N / side`
    pub fn filled_rows(&self) -> u64 {
        if self.side == 0 {
            0
        } else {
            self.count / self.side
        }
    }

    /// Bases de la ligne incomplète (0 si aucune)
    pub fn partial_len(&self) -> u64 {
        if self.side == 0 {
            0
        } else {
            self.count % self.side
        }
    }

    /// Nombre total de cellules, `None` en cas de dépassement
    pub fn cells(&self) -> Option<u64> {
        self.side.checked_mul(self.side)
    }

    /// Cellules noires de remplissage en fin d'image
    pub fn padding(&self) -> u64 {
        self.cells().map_or(0, |cells| cells - self.count)
    }
}
