//! Encodage PNG de l'image finale

use crate::error::{PicError, Result};
use crate::pixels::{PixelBuffer, CHANNELS};
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::BufWriter;
use std::path::Path;

/// Niveau de compression du fichier PNG
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompressionPreset {
    /// Fichier le plus petit possible
    #[default]
    Best,
    /// Écriture rapide, fichier plus gros
    Fast,
}

impl From<CompressionPreset> for png::Compression {
    fn from(preset: CompressionPreset) -> Self {
        match preset {
            CompressionPreset::Best => png::Compression::Best,
            CompressionPreset::Fast => png::Compression::Fast,
        }
    }
}

/// Écriture d'une image RGB 24 bits dans un fichier
pub trait ImageEncoder {
    /// Encode `pixels` (RGB, ligne par ligne) de taille `width x height` vers `path`
    fn encode(&self, path: &Path, pixels: &[u8], width: u32, height: u32) -> Result<()>;

    /// Encode une image carrée
    fn encode_buffer(&self, path: &Path, buffer: &PixelBuffer) -> Result<()> {
        let side = u32::try_from(buffer.side()).map_err(|_| {
            PicError::Encode(format!(
                "image trop grande pour PNG: {0}x{0} pixels",
                buffer.side()
            ))
        })?;
        self.encode(path, buffer.as_bytes(), side, side)
    }
}

/// Encodeur PNG sur disque
#[derive(Debug, Clone, Copy, Default)]
pub struct PngFileEncoder {
    compression: CompressionPreset,
}

impl PngFileEncoder {
    pub fn new(compression: CompressionPreset) -> Self {
        Self { compression }
    }

    pub fn compression(&self) -> CompressionPreset {
        self.compression
    }
}

impl ImageEncoder for PngFileEncoder {
    fn encode(&self, path: &Path, pixels: &[u8], width: u32, height: u32) -> Result<()> {
        let expected = width as u128 * height as u128 * CHANNELS as u128;
        if pixels.len() as u128 != expected {
            return Err(PicError::Encode(format!(
                "taille du tampon incohérente: {} octets pour {}x{} pixels",
                pixels.len(),
                width,
                height
            )));
        }

        // Jamais d'écrasement, même si le fichier apparaît après le choix du nom
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(|e| PicError::Encode(format!("{}: {}", path.display(), e)))?;

        let mut encoder = png::Encoder::new(BufWriter::new(file), width, height);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(self.compression.into());

        let mut writer = encoder.write_header()?;
        writer.write_image_data(pixels)?;
        writer.finish()?;

        tracing::debug!("PNG {}x{} écrit dans {}", width, height, path.display());
        Ok(())
    }
}
