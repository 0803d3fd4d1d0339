//! gene2pic Core Library
//!
//! Transforme une séquence génétique en image carrée: un pixel par base
//! valide, coloré selon la base.

pub mod colour;
pub mod dimension;
pub mod encoder;
pub mod error;
pub mod logging;
pub mod naming;
pub mod pipeline;
pub mod pixels;
pub mod sequence;
pub mod serpentine;
pub mod upscale;

// Réexportations principales
pub use colour::{map_colours, ColourTable, Rgb};
pub use dimension::{square_side, GridLayout};
pub use encoder::{CompressionPreset, ImageEncoder, PngFileEncoder};
pub use error::{PicError, Result};
pub use logging::init_logging;
// Les macros log_operation et log_error sont automatiquement exportées à la racine du crate
pub use naming::{next_available_path, DEFAULT_BASE_NAME, FALLBACK_BASE_NAME, IMAGE_EXTENSION};
pub use pipeline::{PhaseTimings, RenderConfig, RenderReport, RenderedImage, Renderer};
pub use pixels::PixelBuffer;
pub use sequence::{Base, NucleotideSequence};
pub use serpentine::{apply_serpentine, last_row_needs_flip};
pub use upscale::upscale;
