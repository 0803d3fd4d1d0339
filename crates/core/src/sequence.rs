//! Bases nucléotidiques et normalisation des séquences d'entrée

use crate::error::{PicError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Read;

/// Base nucléotidique normalisée
///
/// L'ordre des variantes fixe l'index dans la table de couleurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Base {
    C, // Cytosine
    G, // Guanine
    A, // Adénine
    T, // Thymine (et Uracile)
}

impl Base {
    /// Toutes les bases, dans l'ordre de la table de couleurs
    pub const ALL: [Base; 4] = [Base::C, Base::G, Base::A, Base::T];

    /// Normalise un octet brut en base
    ///
    /// Insensible à la casse, U est traité comme T. Renvoie `None` pour tout
    /// autre octet (espaces, en-têtes, chiffres, codes IUPAC ambigus).
    #[inline]
    pub fn from_byte(byte: u8) -> Option<Self> {
        match fold(byte) {
            b'C' => Some(Base::C),
            b'G' => Some(Base::G),
            b'A' => Some(Base::A),
            b'T' => Some(Base::T),
            _ => None,
        }
    }

    /// Convertit un octet déjà normalisé (C, G, A ou T majuscule)
    #[inline]
    pub(crate) fn from_normalized(byte: u8) -> Self {
        debug_assert!(is_valid(byte), "octet non normalisé: {byte:#04x}");
        match byte {
            b'C' => Base::C,
            b'G' => Base::G,
            b'A' => Base::A,
            _ => Base::T,
        }
    }

    /// Index dans la table de couleurs
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_byte(self) -> u8 {
        match self {
            Base::C => b'C',
            Base::G => b'G',
            Base::A => b'A',
            Base::T => b'T',
        }
    }

    pub fn as_char(self) -> char {
        self.as_byte() as char
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Majuscule puis U -> T
#[inline]
fn fold(byte: u8) -> u8 {
    let upper = byte.to_ascii_uppercase();
    if upper == b'U' {
        b'T'
    } else {
        upper
    }
}

#[inline]
fn is_valid(byte: u8) -> bool {
    matches!(byte, b'C' | b'G' | b'A' | b'T')
}

/// Séquence de bases validées
///
/// Chaque octet est l'un de `C`, `G`, `A`, `T`. Les seules mutations possibles
/// après construction sont des permutations (ordre serpentin).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NucleotideSequence {
    bases: Vec<u8>,
    input_len: u64,
}

impl NucleotideSequence {
    /// Normalise un tampon brut en le compactant sur place
    ///
    /// Les octets valides gardent leur ordre d'origine; tous les autres sont
    /// ignorés. Échoue avec `EmptyInput` si aucune base ne subsiste.
    pub fn normalize(mut raw: Vec<u8>) -> Result<Self> {
        let input_len = raw.len() as u64;

        raw.retain_mut(|byte| {
            *byte = fold(*byte);
            is_valid(*byte)
        });

        if raw.is_empty() {
            return Err(PicError::EmptyInput);
        }

        tracing::debug!(
            "{} bases valides sur {} octets lus",
            raw.len(),
            input_len
        );

        Ok(Self {
            bases: raw,
            input_len,
        })
    }

    /// Normalise une copie d'une tranche d'octets
    pub fn from_bytes(raw: &[u8]) -> Result<Self> {
        Self::normalize(raw.to_vec())
    }

    /// Lit entièrement une source puis la normalise
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut raw = Vec::new();
        reader.read_to_end(&mut raw)?;
        Self::normalize(raw)
    }

    /// Nombre de bases valides (N)
    pub fn len(&self) -> usize {
        self.bases.len()
    }

    /// Toujours faux pour une séquence construite par `normalize`
    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }

    /// Nombre de bases valides sur 64 bits
    pub fn base_count(&self) -> u64 {
        self.bases.len() as u64
    }

    /// Taille de l'entrée brute, octets ignorés compris
    pub fn input_len(&self) -> u64 {
        self.input_len
    }

    /// Nombre d'octets ignorés lors de la normalisation
    pub fn discarded(&self) -> u64 {
        self.input_len - self.base_count()
    }

    /// Octets ASCII normalisés
    pub fn as_bytes(&self) -> &[u8] {
        &self.bases
    }

    pub(crate) fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bases
    }

    /// Base à la position `index`
    pub fn base(&self, index: usize) -> Base {
        Base::from_normalized(self.bases[index])
    }

    pub fn iter(&self) -> impl Iterator<Item = Base> + '_ {
        self.bases.iter().map(|&b| Base::from_normalized(b))
    }
}

impl fmt::Display for NucleotideSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Uniquement de l'ASCII par construction
        f.write_str(&String::from_utf8_lossy(&self.bases))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_from_byte() {
        assert_eq!(Base::from_byte(b'A'), Some(Base::A));
        assert_eq!(Base::from_byte(b'c'), Some(Base::C));
        assert_eq!(Base::from_byte(b'u'), Some(Base::T));
        assert_eq!(Base::from_byte(b'U'), Some(Base::T));
        assert_eq!(Base::from_byte(b'N'), None);
        assert_eq!(Base::from_byte(b'\n'), None);
        assert_eq!(Base::from_byte(0xC3), None);
    }

    #[test]
    fn test_table_order() {
        let indices: Vec<usize> = Base::ALL.iter().map(|b| b.index()).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_normalize_mixed_input() {
        let seq = NucleotideSequence::from_bytes(b"acgtACGT\nuuuu").unwrap();

        assert_eq!(seq.as_bytes(), b"ACGTACGTTTTT");
        assert_eq!(seq.len(), 12);
        assert_eq!(seq.input_len(), 13);
        assert_eq!(seq.discarded(), 1);
    }

    #[test]
    fn test_normalize_drops_fasta_header_letters_only_if_invalid() {
        // Les lettres valides d'un en-tête sont conservées, le reste est ignoré
        let seq = NucleotideSequence::from_bytes(b">chr1 x\nGATTACA\r\n").unwrap();
        assert_eq!(seq.to_string(), "CGATTACA");
    }

    #[test]
    fn test_normalize_empty() {
        assert!(matches!(
            NucleotideSequence::from_bytes(b" \n\t1234 NNN xyz"),
            Err(PicError::EmptyInput)
        ));
        assert!(matches!(
            NucleotideSequence::normalize(Vec::new()),
            Err(PicError::EmptyInput)
        ));
    }

    #[test]
    fn test_from_reader() {
        let seq = NucleotideSequence::from_reader(&b"gg\ncc"[..]).unwrap();
        assert_eq!(seq.iter().collect::<Vec<_>>(), vec![Base::G, Base::G, Base::C, Base::C]);
        assert_eq!(seq.base(2), Base::C);
    }
}
