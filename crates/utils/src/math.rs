//! Statistiques de composition d'une séquence

use gene2pic_core::{Base, NucleotideSequence};
use serde::Serialize;

/// Nombre d'occurrences de chaque base
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BaseComposition {
    pub count_c: u64,
    pub count_g: u64,
    pub count_a: u64,
    pub count_t: u64,
}

impl BaseComposition {
    /// Compte les bases d'une séquence normalisée
    pub fn from_sequence(sequence: &NucleotideSequence) -> Self {
        Self::from_bytes(sequence.as_bytes())
    }

    /// Compte les bases d'une entrée brute, octets invalides ignorés
    pub fn from_bytes(raw: &[u8]) -> Self {
        let mut freq = [0u64; 4];
        for &byte in raw {
            if let Some(base) = Base::from_byte(byte) {
                freq[base.index()] += 1;
            }
        }

        Self {
            count_c: freq[Base::C.index()],
            count_g: freq[Base::G.index()],
            count_a: freq[Base::A.index()],
            count_t: freq[Base::T.index()],
        }
    }

    pub fn total(&self) -> u64 {
        self.count_c + self.count_g + self.count_a + self.count_t
    }

    fn counts(&self) -> [u64; 4] {
        [self.count_c, self.count_g, self.count_a, self.count_t]
    }
}

/// Calcule le contenu GC (0-1)
pub fn gc_content(composition: &BaseComposition) -> f64 {
    let total = composition.total();
    if total == 0 {
        return 0.0;
    }

    (composition.count_g + composition.count_c) as f64 / total as f64
}

/// Calcule l'entropie de Shannon en bits par base
pub fn entropy(composition: &BaseComposition) -> f64 {
    let total = composition.total();
    if total == 0 {
        return 0.0;
    }

    let len = total as f64;
    let mut entropy = 0.0;

    for count in composition.counts() {
        if count > 0 {
            let p = count as f64 / len;
            entropy -= p * p.log2();
        }
    }

    entropy
}

#[cfg(test)]
mod tests {
    use super::*;

    fn composition(s: &str) -> BaseComposition {
        BaseComposition::from_sequence(&NucleotideSequence::from_bytes(s.as_bytes()).unwrap())
    }

    #[test]
    fn test_composition() {
        let c = composition("ACGTTTu\nn");
        assert_eq!(c.count_a, 1);
        assert_eq!(c.count_c, 1);
        assert_eq!(c.count_g, 1);
        assert_eq!(c.count_t, 4);
        assert_eq!(c.total(), 7);
    }

    #[test]
    fn test_raw_matches_normalized() {
        let raw = b">seq1\nacgtNNuu\r\nGG";
        assert_eq!(
            BaseComposition::from_bytes(raw),
            composition(std::str::from_utf8(raw).unwrap())
        );
    }

    #[test]
    fn test_entropy() {
        // Entropie minimale (toutes les mêmes bases)
        let e = entropy(&composition("AAAA"));
        assert!((e - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_entropy_max() {
        // Entropie maximale (distribution uniforme)
        let e = entropy(&composition("ACGT"));
        assert!((e - 2.0).abs() < 1e-9); // log2(4) = 2
    }

    #[test]
    fn test_gc_content() {
        let gc = gc_content(&composition("ACGT"));
        assert!((gc - 0.5).abs() < 1e-9);

        assert_eq!(gc_content(&BaseComposition::default()), 0.0);
    }
}
