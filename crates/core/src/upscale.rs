//! Agrandissement au plus proche voisin

use crate::error::{PicError, Result};
use crate::pixels::{PixelBuffer, CHANNELS};
use rayon::prelude::*;

/// Agrandit l'image d'un facteur entier
///
/// Chaque pixel source `(x, y)` remplit le bloc
/// `[x * scale, (x + 1) * scale) x [y * scale, (y + 1) * scale)`.
/// Un facteur de 1 renvoie l'image telle quelle, sans copie. L'image source est
/// consommée et libérée une fois l'agrandissement terminé.
pub fn upscale(source: PixelBuffer, scale: u32) -> Result<PixelBuffer> {
    match scale {
        0 => return Err(PicError::InvalidScale(scale)),
        1 => return Ok(source),
        _ => {}
    }

    let side = source
        .side()
        .checked_mul(u64::from(scale))
        .ok_or(PicError::Allocation { bytes: u128::MAX })?;
    let mut target = PixelBuffer::black(side)?;

    let scale = scale as usize;
    let source_row_bytes = source.row_bytes();
    let target_row_bytes = target.row_bytes();
    let source_bytes = source.as_bytes();

    target
        .as_bytes_mut()
        .par_chunks_exact_mut(target_row_bytes)
        .enumerate()
        .for_each(|(y, row)| {
            let start = (y / scale) * source_row_bytes;
            let source_row = &source_bytes[start..start + source_row_bytes];

            for (pixel, block) in source_row
                .chunks_exact(CHANNELS)
                .zip(row.chunks_exact_mut(CHANNELS * scale))
            {
                for out in block.chunks_exact_mut(CHANNELS) {
                    out.copy_from_slice(pixel);
                }
            }
        });

    Ok(target)
}
