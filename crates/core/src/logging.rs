//! Système de logging pour gene2pic

use tracing_subscriber::{fmt, EnvFilter};

/// Initialise le système de logging
///
/// `RUST_LOG` a priorité; sinon `default_level` (ex. "info", "debug") est utilisé.
pub fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    // Un subscriber peut déjà être installé (tests, bibliothèque hôte)
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Macro pour le logging et le chronométrage d'une phase du pipeline
///
/// Évalue le bloc dans un span INFO et renvoie `(résultat, secondes écoulées)`.
#[macro_export]
macro_rules! log_operation {
    ($name:expr, $block:block) => {{
        let span = tracing::span!(tracing::Level::INFO, $name);
        let _enter = span.enter();
        tracing::info!("Début de l'opération: {}", $name);
        let start = std::time::Instant::now();
        let result = $block;
        let elapsed = start.elapsed().as_secs_f64();
        tracing::info!("Fin de l'opération: {} ({:.6} s)", $name, elapsed);
        (result, elapsed)
    }};
}

/// Macro pour le logging des erreurs
#[macro_export]
macro_rules! log_error {
    ($error:expr) => {{
        let error = $error;
        tracing::error!("Erreur: {}", error);
        error
    }};
}
