//! CLI gene2pic: image d'une séquence génétique

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Duration;

mod commands;
mod config;
mod display;

use commands::render;

#[derive(Parser)]
#[command(name = "gene2pic")]
#[command(about = "Crée une image à partir d'une séquence génétique", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Fichier de séquence (texte brut, FASTA...). Les caractères autres que ACGTU sont ignorés.
    /// Absent ou `-`: lecture sur l'entrée standard
    pub input: Option<PathBuf>,

    /// Facteur d'agrandissement (1 = 1 pixel par base, 2 = 4 pixels, ...)
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub scale: Option<u32>,

    /// Parcourt les lignes en serpentin (une ligne sur deux de droite à gauche)
    #[arg(long)]
    pub serpentine: bool,

    /// Couleur hexadécimale de l'adénine
    #[arg(short = 'A', long, value_name = "HEX")]
    pub adenine: Option<String>,

    /// Couleur hexadécimale de la cytosine
    #[arg(short = 'C', long, value_name = "HEX")]
    pub cytosine: Option<String>,

    /// Couleur hexadécimale de la guanine
    #[arg(short = 'G', long, value_name = "HEX")]
    pub guanine: Option<String>,

    /// Couleur hexadécimale de la thymine (et de l'uracile)
    #[arg(short = 'T', long, value_name = "HEX")]
    pub thymine: Option<String>,

    /// Nombre de threads (par défaut: tous les cœurs)
    #[arg(short = 'j', long, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
    pub threads: Option<usize>,

    /// Ne pas optimiser la compression du PNG (plus rapide, fichier plus gros)
    #[arg(long)]
    pub no_optimize: bool,

    /// Répertoire de sortie
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Nom de base de l'image (un numéro est ajouté s'il est déjà pris)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Fichier de configuration TOML
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Format du résumé
    #[arg(short, long, value_enum, default_value = "table")]
    pub report: ReportFormat,

    /// Niveau de verbosité
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Fichier à lire, `None` pour l'entrée standard
    pub fn input_file(&self) -> Option<&Path> {
        self.input.as_deref().filter(|path| *path != Path::new("-"))
    }
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportFormat {
    Table,
    Json,
    Quiet,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    gene2pic_core::init_logging(level);

    render::run(&cli)
}

/// Crée une barre de progression spinner
pub fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
