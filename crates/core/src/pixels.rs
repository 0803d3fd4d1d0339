//! Tampon de pixels RGB carré

use crate::error::{PicError, Result};

/// Octets par pixel (R, G, B)
pub const CHANNELS: usize = 3;

/// Image RGB 8 bits carrée, stockée ligne par ligne
///
/// La ligne `r` occupe les octets `[r * side * 3, (r + 1) * side * 3)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    side: u64,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Alloue une image noire de `side x side` pixels
    ///
    /// Échoue avec `Allocation` si la taille déborde ou ne peut être réservée.
    pub fn black(side: u64) -> Result<Self> {
        let len = byte_len(side)?;

        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| PicError::Allocation { bytes: len as u128 })?;
        data.resize(len, 0);

        Ok(Self { side, data })
    }

    /// Construit une image depuis des octets RGB bruts
    ///
    /// Renvoie `None` si la longueur ne vaut pas `side * side * 3`.
    pub fn from_raw(side: u64, data: Vec<u8>) -> Option<Self> {
        match byte_len(side) {
            Ok(len) if len == data.len() => Some(Self { side, data }),
            _ => None,
        }
    }

    /// Côté de l'image en pixels
    pub fn side(&self) -> u64 {
        self.side
    }

    /// Nombre de pixels
    pub fn pixel_count(&self) -> usize {
        self.data.len() / CHANNELS
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Octets d'une ligne
    pub fn row_bytes(&self) -> usize {
        self.side as usize * CHANNELS
    }

    /// Pixel à l'index linéaire `index`
    pub fn pixel(&self, index: usize) -> [u8; 3] {
        let start = index * CHANNELS;
        [self.data[start], self.data[start + 1], self.data[start + 2]]
    }

    /// Pixel en colonne `x`, ligne `y`
    pub fn pixel_at(&self, x: u64, y: u64) -> [u8; 3] {
        self.pixel((y * self.side + x) as usize)
    }

    /// Inverse l'ordre des pixels d'une ligne, canaux conservés
    pub fn reverse_row(&mut self, row: u64) {
        let width = self.side as usize;
        let len = self.row_bytes();
        let start = row as usize * len;
        reverse_pixels(&mut self.data[start..start + len], width);
    }
}

/// Échange le pixel `j` avec le pixel `width - 1 - j` pour `j < width / 2`
fn reverse_pixels(row: &mut [u8], width: usize) {
    for j in 0..width / 2 {
        let mirror = width - 1 - j;
        let (left, right) = row.split_at_mut(mirror * CHANNELS);
        left[j * CHANNELS..(j + 1) * CHANNELS].swap_with_slice(&mut right[..CHANNELS]);
    }
}

/// `side * side * 3` en octets adressables
pub(crate) fn byte_len(side: u64) -> Result<usize> {
    let bytes = (side as u128)
        .checked_mul(side as u128)
        .and_then(|cells| cells.checked_mul(CHANNELS as u128))
        .unwrap_or(u128::MAX);
    usize::try_from(bytes)
        .ok()
        .filter(|&len| len <= isize::MAX as usize)
        .ok_or(PicError::Allocation { bytes })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_black_buffer() {
        let buffer = PixelBuffer::black(4).unwrap();
        assert_eq!(buffer.side(), 4);
        assert_eq!(buffer.pixel_count(), 16);
        assert_eq!(buffer.as_bytes().len(), 48);
        assert!(buffer.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_oversized_buffer_is_allocation_error() {
        assert!(matches!(
            PixelBuffer::black(1u64 << 40),
            Err(PicError::Allocation { .. })
        ));
        assert!(matches!(
            PixelBuffer::black(u64::MAX),
            Err(PicError::Allocation { .. })
        ));
    }

    #[test]
    fn test_from_raw_checks_length() {
        assert!(PixelBuffer::from_raw(2, vec![0; 12]).is_some());
        assert!(PixelBuffer::from_raw(2, vec![0; 11]).is_none());
    }

    #[test]
    fn test_reverse_row_keeps_channels() {
        let data: Vec<u8> = (0..27).collect();
        let mut buffer = PixelBuffer::from_raw(3, data).unwrap();

        buffer.reverse_row(1);

        assert_eq!(buffer.pixel_at(0, 1), [15, 16, 17]);
        assert_eq!(buffer.pixel_at(1, 1), [12, 13, 14]);
        assert_eq!(buffer.pixel_at(2, 1), [9, 10, 11]);
        // Les autres lignes sont intactes
        assert_eq!(buffer.pixel_at(0, 0), [0, 1, 2]);
        assert_eq!(buffer.pixel_at(2, 2), [24, 25, 26]);
    }

    #[test]
    fn test_reverse_single_pixel_row() {
        let mut buffer = PixelBuffer::from_raw(1, vec![7, 8, 9]).unwrap();
        buffer.reverse_row(0);
        assert_eq!(buffer.as_bytes(), &[7, 8, 9]);
    }

    #[test]
    fn test_reverse_row_even_width() {
        let data: Vec<u8> = (0..48).collect();
        let mut buffer = PixelBuffer::from_raw(4, data).unwrap();

        buffer.reverse_row(3);

        assert_eq!(buffer.pixel_at(0, 3), [45, 46, 47]);
        assert_eq!(buffer.pixel_at(1, 3), [42, 43, 44]);
        assert_eq!(buffer.pixel_at(2, 3), [39, 40, 41]);
        assert_eq!(buffer.pixel_at(3, 3), [36, 37, 38]);
    }
}
