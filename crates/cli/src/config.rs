//! Configuration de l'application
//!
//! Ordre de priorité: valeurs par défaut, fichier TOML, puis options de la
//! ligne de commande.

use crate::Cli;
use gene2pic_core::{Base, CompressionPreset, RenderConfig, Rgb, DEFAULT_BASE_NAME};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration de la sortie
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Répertoire où les images sont écrites
    pub directory: PathBuf,
    /// Nom de base des images
    pub base_name: String,
    /// Niveau de compression PNG
    pub compression: CompressionPreset,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            base_name: DEFAULT_BASE_NAME.to_string(),
            compression: CompressionPreset::Best,
        }
    }
}

/// Configuration complète de l'application
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub render: RenderConfig,
    pub output: OutputConfig,
}

impl AppConfig {
    /// Charge la configuration depuis un fichier, ou les valeurs par défaut
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let settings = config::Config::builder()
            .add_source(config::File::from(path).required(true))
            .build()?;

        settings.try_deserialize::<AppConfig>()
    }

    /// Applique les options de la ligne de commande
    pub fn apply_cli(&mut self, cli: &Cli) -> gene2pic_core::Result<()> {
        if let Some(scale) = cli.scale {
            self.render.scale = scale;
        }
        if cli.serpentine {
            self.render.serpentine = true;
        }
        if cli.threads.is_some() {
            self.render.threads = cli.threads;
        }

        let overrides = [
            (Base::A, &cli.adenine),
            (Base::C, &cli.cytosine),
            (Base::G, &cli.guanine),
            (Base::T, &cli.thymine),
        ];
        for (base, code) in overrides {
            if let Some(code) = code {
                self.render.colours = self.render.colours.with(base, Rgb::from_hex(code)?);
            }
        }

        if cli.no_optimize {
            self.output.compression = CompressionPreset::Fast;
        }
        if let Some(dir) = &cli.output_dir {
            self.output.directory = dir.clone();
        }
        if let Some(name) = &cli.name {
            self.output.base_name = name.clone();
        }

        self.render.validate()
    }
}
