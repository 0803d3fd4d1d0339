//! Commande de rendu: séquence -> PNG

use crate::config::AppConfig;
use crate::display::report::{print_report, RunSummary};
use crate::{create_spinner, Cli};
use anyhow::{Context, Result};
use console::style;
use gene2pic_core::{
    next_available_path, ImageEncoder, PicError, PixelBuffer, PngFileEncoder, Renderer,
    FALLBACK_BASE_NAME, IMAGE_EXTENSION,
};
use gene2pic_utils::BaseComposition;
use std::io::{IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::time::Instant;

pub fn run(cli: &Cli) -> Result<()> {
    let started = Instant::now();

    // 1. Configuration
    let mut config = AppConfig::load(cli.config.as_deref()).with_context(|| match &cli.config {
        Some(path) => format!("Configuration invalide: {}", path.display()),
        None => "Configuration invalide".to_string(),
    })?;
    config.apply_cli(cli)?;
    tracing::debug!("Configuration: {:?}", config);

    let renderer = Renderer::new(config.render.clone())?;

    // 2. Lire la séquence
    let input = cli.input_file();
    let label = input.unwrap_or(Path::new("<stdin>"));
    let raw = read_input(input)?;
    let composition = BaseComposition::from_bytes(&raw);

    // 3. Normaliser et rendre
    let spinner = create_spinner("Attribution des couleurs...");
    let image = match renderer.render_bytes(raw) {
        Ok(image) => image,
        Err(PicError::EmptyInput) => {
            spinner.finish_and_clear();
            anyhow::bail!("{} ne contient aucune base valide", label.display())
        }
        Err(e) => return Err(e.into()),
    };
    spinner.finish_with_message(format!(
        "Image de {0}x{0} pixels ({1} bases)",
        image.report.image_side, image.report.valid_bases
    ));

    // 4. Enregistrer
    let encoder = PngFileEncoder::new(config.output.compression);
    std::fs::create_dir_all(&config.output.directory).with_context(|| {
        format!(
            "Impossible de créer le répertoire {}",
            config.output.directory.display()
        )
    })?;

    let spinner = create_spinner("Écriture de l'image...");
    let save_started = Instant::now();
    let output = save_image(
        &encoder,
        &image.pixels,
        &config.output.directory,
        &config.output.base_name,
    )?;
    let save_secs = save_started.elapsed().as_secs_f64();
    spinner.finish_with_message(format!("Image écrite dans {}", output.display()));

    // 5. Résumé
    let summary = RunSummary::new(
        label,
        &output,
        &image.report,
        composition,
        save_secs,
        started.elapsed().as_secs_f64(),
    );
    print_report(&summary, cli.report)?;

    println!(
        "\n{} {}",
        style("✅ Terminé:").green().bold(),
        output.display()
    );

    Ok(())
}

/// Lit le fichier, ou l'entrée standard jusqu'à la fin du flux
fn read_input(file: Option<&Path>) -> Result<Vec<u8>> {
    if let Some(path) = file {
        let spinner = create_spinner("Lecture du fichier...");
        let raw = std::fs::read(path)
            .with_context(|| format!("Impossible de lire {}", path.display()))?;
        spinner.finish_with_message(format!("Fichier lu ({} octets)", raw.len()));
        return Ok(raw);
    }

    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        eprintln!("Entrez la séquence, puis Ctrl-D pour terminer:");
    }

    let mut raw = Vec::new();
    stdin
        .lock()
        .read_to_end(&mut raw)
        .context("Impossible de lire l'entrée standard")?;
    tracing::info!("{} octets lus sur l'entrée standard", raw.len());
    Ok(raw)
}

/// Enregistre l'image sous un nom libre, puis sous le nom de secours en cas d'échec
///
/// L'image calculée n'est jamais perdue avant que l'erreur ne soit signalée.
fn save_image(
    encoder: &dyn ImageEncoder,
    pixels: &PixelBuffer,
    directory: &Path,
    base_name: &str,
) -> Result<PathBuf> {
    let path = next_available_path(directory, base_name, IMAGE_EXTENSION);

    let error = match encoder.encode_buffer(&path, pixels) {
        Ok(()) => return Ok(path),
        Err(e) => e,
    };

    tracing::error!("Échec de l'écriture de {}: {}", path.display(), error);
    eprintln!(
        "{} impossible d'enregistrer {} ({}). Nouvel essai sous {}.{}",
        style("⚠").yellow(),
        path.display(),
        error,
        FALLBACK_BASE_NAME,
        IMAGE_EXTENSION
    );

    let fallback = next_available_path(Path::new("."), FALLBACK_BASE_NAME, IMAGE_EXTENSION);
    encoder
        .encode_buffer(&fallback, pixels)
        .with_context(|| format!("Impossible d'enregistrer l'image ({})", fallback.display()))?;

    Ok(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Encodeur qui échoue sur les chemins contenant `fail_on`
    struct RecordingEncoder {
        fail_on: &'static str,
        attempts: RefCell<Vec<PathBuf>>,
    }

    impl ImageEncoder for RecordingEncoder {
        fn encode(&self, path: &Path, _: &[u8], _: u32, _: u32) -> gene2pic_core::Result<()> {
            self.attempts.borrow_mut().push(path.to_path_buf());
            if path.to_string_lossy().contains(self.fail_on) {
                Err(PicError::Encode("disque plein".to_string()))
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn test_read_input_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seq.fa");
        std::fs::write(&path, b">x\nGATTACA\n").unwrap();

        let raw = read_input(Some(&path)).unwrap();
        assert_eq!(raw, b">x\nGATTACA\n");
        assert!(read_input(Some(&dir.path().join("absent.fa"))).is_err());
    }

    #[test]
    fn test_save_uses_next_free_name() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("GenePic.png"), b"").unwrap();
        let encoder = RecordingEncoder {
            fail_on: "\u{0}",
            attempts: RefCell::new(Vec::new()),
        };

        let pixels = PixelBuffer::black(2).unwrap();
        let path = save_image(&encoder, &pixels, dir.path(), "GenePic").unwrap();

        assert_eq!(path, dir.path().join("GenePic2.png"));
        assert_eq!(encoder.attempts.borrow().len(), 1);
    }

    #[test]
    fn test_save_falls_back_once() {
        let dir = tempfile::tempdir().unwrap();
        let encoder = RecordingEncoder {
            fail_on: "GenePic",
            attempts: RefCell::new(Vec::new()),
        };

        let pixels = PixelBuffer::black(2).unwrap();
        let path = save_image(&encoder, &pixels, dir.path(), "GenePic").unwrap();

        let attempts = encoder.attempts.borrow();
        assert_eq!(attempts.len(), 2);
        assert!(path.to_string_lossy().contains(FALLBACK_BASE_NAME));
    }

    #[test]
    fn test_save_reports_double_failure() {
        let dir = tempfile::tempdir().unwrap();
        let encoder = RecordingEncoder {
            fail_on: ".png",
            attempts: RefCell::new(Vec::new()),
        };

        let pixels = PixelBuffer::black(2).unwrap();
        assert!(save_image(&encoder, &pixels, dir.path(), "GenePic").is_err());
        assert_eq!(encoder.attempts.borrow().len(), 2);
    }
}
