//! Table de couleurs et mappage base -> pixel

use crate::dimension::GridLayout;
use crate::error::{PicError, Result};
use crate::pixels::{PixelBuffer, CHANNELS};
use crate::sequence::{Base, NucleotideSequence};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Couleur RGB 8 bits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    pub const BLACK: Rgb = Rgb([0, 0, 0]);

    /// Parse un code hexadécimal `#RRGGBB` ou `RRGGBB`
    pub fn from_hex(code: &str) -> Result<Self> {
        let digits = code.trim().strip_prefix('#').unwrap_or(code.trim());

        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(PicError::InvalidColour(code.to_string()));
        }

        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| PicError::InvalidColour(code.to_string()))
        };

        Ok(Rgb([channel(0)?, channel(2)?, channel(4)?]))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.0[0], self.0[1], self.0[2])
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl TryFrom<String> for Rgb {
    type Error = PicError;

    fn try_from(code: String) -> Result<Self> {
        Rgb::from_hex(&code)
    }
}

impl From<Rgb> for String {
    fn from(colour: Rgb) -> Self {
        colour.to_hex()
    }
}

/// Couleur associée à chaque base
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColourTable {
    pub cytosine: Rgb,
    pub guanine: Rgb,
    pub adenine: Rgb,
    pub thymine: Rgb,
}

impl Default for ColourTable {
    fn default() -> Self {
        Self {
            cytosine: Rgb([6, 201, 150]),
            guanine: Rgb([17, 138, 178]),
            adenine: Rgb([239, 71, 111]),
            thymine: Rgb([255, 209, 102]),
        }
    }
}

impl ColourTable {
    /// Couleur d'une base
    pub fn get(&self, base: Base) -> Rgb {
        match base {
            Base::C => self.cytosine,
            Base::G => self.guanine,
            Base::A => self.adenine,
            Base::T => self.thymine,
        }
    }

    /// Remplace la couleur d'une base
    pub fn with(mut self, base: Base, colour: Rgb) -> Self {
        match base {
            Base::C => self.cytosine = colour,
            Base::G => self.guanine = colour,
            Base::A => self.adenine = colour,
            Base::T => self.thymine = colour,
        }
        self
    }

    /// Table indexée par `Base::index`
    pub fn palette(&self) -> [[u8; 3]; 4] {
        Base::ALL.map(|base| self.get(base).0)
    }
}

/// Attribue une couleur à chaque base dans une image `side x side`
///
/// Les cellules au-delà de la séquence restent noires. Si `flip_last_row`
/// est vrai, la ligne incomplète (index `N / side`) est inversée après coup,
/// ce qui termine l'ordre serpentin.
pub fn map_colours(
    sequence: &NucleotideSequence,
    layout: GridLayout,
    table: &ColourTable,
    flip_last_row: bool,
) -> Result<PixelBuffer> {
    debug_assert_eq!(layout.count, sequence.base_count());

    let mut pixels = PixelBuffer::black(layout.side)?;
    let palette = table.palette();
    let used = sequence.len() * CHANNELS;

    pixels.as_bytes_mut()[..used]
        .par_chunks_exact_mut(CHANNELS)
        .zip(sequence.as_bytes().par_iter())
        .for_each(|(pixel, &byte)| {
            pixel.copy_from_slice(&palette[Base::from_normalized(byte).index()]);
        });

    // Pas de ligne incomplète pour un multiple exact du côté
    if flip_last_row && layout.partial_len() != 0 {
        pixels.reverse_row(layout.filled_rows());
    }

    Ok(pixels)
}
