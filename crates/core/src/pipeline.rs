//! Pipeline séquence -> image
//!
//! Les phases s'exécutent strictement l'une après l'autre: normalisation,
//! dimensionnement, ordre serpentin, couleurs, agrandissement. Chaque phase
//! parallélise son propre travail sur des plages disjointes.

use crate::colour::{map_colours, ColourTable};
use crate::dimension::GridLayout;
use crate::error::{PicError, Result};
use crate::pixels::PixelBuffer;
use crate::sequence::NucleotideSequence;
use crate::serpentine::apply_serpentine;
use crate::upscale::upscale;
use crate::{log_error, log_operation};
use serde::{Deserialize, Serialize};
use std::io::Read;

/// Paramètres d'un rendu
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Facteur d'agrandissement (>= 1)
    pub scale: u32,
    /// Ordre serpentin des lignes
    pub serpentine: bool,
    /// Couleur de chaque base
    pub colours: ColourTable,
    /// Taille du pool de threads (`None` ou 0: pool global)
    pub threads: Option<usize>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            scale: 1,
            serpentine: false,
            colours: ColourTable::default(),
            threads: None,
        }
    }
}

impl RenderConfig {
    /// Vérifie les paramètres avant tout calcul
    pub fn validate(&self) -> Result<()> {
        if self.scale < 1 {
            return Err(PicError::InvalidScale(self.scale));
        }
        Ok(())
    }
}

/// Durée de chaque phase, en secondes
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PhaseTimings {
    pub normalize: Option<f64>,
    pub serpentine: Option<f64>,
    pub colour: f64,
    pub upscale: Option<f64>,
}

/// Résumé d'un rendu
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderReport {
    /// Octets lus, y compris ceux ignorés
    pub input_bytes: u64,
    /// Bases valides (N)
    pub valid_bases: u64,
    /// Octets ignorés par la normalisation
    pub discarded_bytes: u64,
    /// Côté de la grille avant agrandissement
    pub side: u64,
    /// Côté de l'image finale
    pub image_side: u64,
    /// Cellules noires de remplissage
    pub padding: u64,
    pub scale: u32,
    pub serpentine: bool,
    pub timings: PhaseTimings,
}

/// Image produite et son résumé
#[derive(Debug)]
pub struct RenderedImage {
    pub pixels: PixelBuffer,
    pub report: RenderReport,
}

/// Exécute le pipeline selon une configuration
#[derive(Debug, Clone)]
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    /// Crée un moteur de rendu après validation de la configuration
    pub fn new(config: RenderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Rend une source lue entièrement en mémoire
    pub fn render_reader<R: Read>(&self, mut reader: R) -> Result<RenderedImage> {
        let mut raw = Vec::new();
        reader.read_to_end(&mut raw)?;
        self.render_bytes(raw)
    }

    /// Normalise puis rend un tampon brut
    pub fn render_bytes(&self, raw: Vec<u8>) -> Result<RenderedImage> {
        tracing::info!("Entrée de {} octets", raw.len());

        let (sequence, elapsed) = log_operation!("normalisation", {
            NucleotideSequence::normalize(raw)
        });
        let sequence = sequence.map_err(|e| log_error!(e))?;

        let mut image = self.render(sequence)?;
        image.report.timings.normalize = Some(elapsed);
        Ok(image)
    }

    /// Rend une séquence déjà normalisée
    ///
    /// La séquence est consommée: elle est libérée dès la fin du mappage de
    /// couleurs.
    pub fn render(&self, sequence: NucleotideSequence) -> Result<RenderedImage> {
        match self.config.threads {
            Some(threads) if threads > 0 => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()
                    .map_err(|e| PicError::ThreadPool(e.to_string()))?;
                pool.install(|| self.run_phases(sequence))
            }
            _ => self.run_phases(sequence),
        }
    }

    fn run_phases(&self, mut sequence: NucleotideSequence) -> Result<RenderedImage> {
        let layout = GridLayout::for_count(sequence.base_count());
        tracing::info!(
            "{} bases valides, grille de {}x{}",
            layout.count,
            layout.side,
            layout.side
        );

        let mut timings = PhaseTimings::default();

        let flip_last_row = if self.config.serpentine {
            let (flip, elapsed) = log_operation!("serpentin", {
                apply_serpentine(&mut sequence, layout)
            });
            timings.serpentine = Some(elapsed);
            flip
        } else {
            false
        };

        let (pixels, elapsed) = log_operation!("couleurs", {
            map_colours(&sequence, layout, &self.config.colours, flip_last_row)
        });
        let pixels = pixels.map_err(|e| log_error!(e))?;
        timings.colour = elapsed;

        let input_bytes = sequence.input_len();
        let discarded_bytes = sequence.discarded();
        drop(sequence);

        let pixels = if self.config.scale > 1 {
            let (scaled, elapsed) = log_operation!("agrandissement", {
                upscale(pixels, self.config.scale)
            });
            timings.upscale = Some(elapsed);
            scaled.map_err(|e| log_error!(e))?
        } else {
            pixels
        };

        let report = RenderReport {
            input_bytes,
            valid_bases: layout.count,
            discarded_bytes,
            side: layout.side,
            image_side: pixels.side(),
            padding: layout.padding(),
            scale: self.config.scale,
            serpentine: self.config.serpentine,
            timings,
        };

        Ok(RenderedImage { pixels, report })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RenderConfig::default();
        assert_eq!(config.scale, 1);
        assert!(!config.serpentine);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_scale() {
        let config = RenderConfig {
            scale: 0,
            ..Default::default()
        };
        assert!(matches!(
            Renderer::new(config),
            Err(PicError::InvalidScale(0))
        ));
    }

    #[test]
    fn test_report() {
        let renderer = Renderer::new(RenderConfig {
            scale: 2,
            serpentine: true,
            ..Default::default()
        })
        .unwrap();

        let image = renderer.render_bytes(b"acgtACGT\nuuuu".to_vec()).unwrap();
        let report = &image.report;

        assert_eq!(report.input_bytes, 13);
        assert_eq!(report.valid_bases, 12);
        assert_eq!(report.discarded_bytes, 1);
        assert_eq!(report.side, 4);
        assert_eq!(report.image_side, 8);
        assert_eq!(report.padding, 4);
        assert!(report.timings.normalize.is_some());
        assert!(report.timings.serpentine.is_some());
        assert!(report.timings.upscale.is_some());
        assert_eq!(image.pixels.side(), 8);
    }

    #[test]
    fn test_dedicated_pool_matches_global() {
        let raw = b"GATTACA".repeat(50);
        let global = Renderer::new(RenderConfig::default()).unwrap();
        let pooled = Renderer::new(RenderConfig {
            threads: Some(2),
            ..Default::default()
        })
        .unwrap();

        let a = global.render_bytes(raw.clone()).unwrap();
        let b = pooled.render_bytes(raw).unwrap();
        assert_eq!(a.pixels, b.pixels);
    }

    #[test]
    fn test_empty_input() {
        let renderer = Renderer::new(RenderConfig::default()).unwrap();
        assert!(matches!(
            renderer.render_reader(&b"\n\n  >>\n"[..]),
            Err(PicError::EmptyInput)
        ));
    }
}
