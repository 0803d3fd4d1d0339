//! Ordre serpentin (boustrophédon)
//!
//! Au lieu de lire chaque ligne de gauche à droite:
//!
//! ```text
//! 1 -> 2 -> 3
//! 4 -> 5 -> 6
//! 7 -> 8 -> 9
//! ```
//!
//! les lignes impaires sont inversées, et le brin se parcourt sans lever le crayon:
//!
//! ```text
//! 1 -> 2 -> 3
//!           |
//! 6 <- 5 <- 4
//! |
//! 7 -> 8 -> 9
//! ```
//!
//! La ligne incomplète ne peut pas être inversée ici: la séquence ne contient
//! rien pour ses cellules vides. Son inversion est déléguée au mappage de
//! couleurs, qui connaît la largeur finale remplie de noir.

use crate::dimension::GridLayout;
use crate::sequence::NucleotideSequence;
use rayon::prelude::*;

/// Inverse les lignes complètes d'indice impair
///
/// Renvoie `true` si la ligne incomplète (qui suit les lignes complètes) est
/// d'indice impair et doit donc être inversée par le mappage de couleurs.
pub fn apply_serpentine(sequence: &mut NucleotideSequence, layout: GridLayout) -> bool {
    reverse_odd_rows(sequence.as_bytes_mut(), layout.side as usize, layout.filled_rows() as usize);
    last_row_needs_flip(layout)
}

/// Vrai si `filled_rows` est impair et qu'une ligne incomplète existe
pub fn last_row_needs_flip(layout: GridLayout) -> bool {
    layout.filled_rows() % 2 == 1 && layout.partial_len() != 0
}

/// Inverse sur place les lignes 1, 3, 5, ... parmi les `filled_rows` premières
pub(crate) fn reverse_odd_rows<T: Send>(cells: &mut [T], width: usize, filled_rows: usize) {
    if width < 2 || filled_rows < 2 {
        return;
    }

    cells[..filled_rows * width]
        .par_chunks_exact_mut(width)
        .enumerate()
        .filter(|(row, _)| row % 2 == 1)
        .for_each(|(_, row)| row.reverse());
}
