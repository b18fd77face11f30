// FICHIER : jsondb/src/utils/logger.rs

use std::path::Path;
use std::sync::Once;
use tracing_appender::rolling;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

// Sécurité pour éviter la double initialisation (crash fréquent en tests)
static INIT: Once = Once::new();

/// Initialise le logging global.
/// Console (stderr) filtrée par `RUST_LOG` (défaut : `warn`) ; si `log_dir` est fourni,
/// un fichier JSON journalier `jsondb.log` y est ajouté.
pub fn init_logging(log_dir: Option<&Path>) {
    INIT.call_once(|| {
        // =========================================================================
        // LAYER 1 : CONSOLE
        // =========================================================================
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

        let console_layer = fmt::layer()
            .compact()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_filter(env_filter);

        // =========================================================================
        // LAYER 2 : FICHIER (optionnel)
        // =========================================================================
        let file_layer = log_dir.and_then(|dir| {
            if let Err(e) = std::fs::create_dir_all(dir) {
                eprintln!("⚠️ [Logger] Dossier de logs inaccessible {:?} : {}", dir, e);
                return None;
            }
            let file_appender = rolling::daily(dir, "jsondb.log");
            Some(
                fmt::layer()
                    .json()
                    .with_writer(file_appender)
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
        });

        let registry = tracing_subscriber::registry()
            .with(console_layer)
            .with(file_layer);

        if registry.try_init().is_err() {
            tracing::warn!("⚠️ [Logger] Ré-initialisation ignorée (subscriber global déjà actif).");
            return;
        }

        tracing::debug!(log_dir = ?log_dir, "Logger initialisé");
    });
}
