//! Dictionary checker - compares every locale dictionary with the default one
//!
//! Usage:
//!   cargo run --bin check-dictionaries                 # Check the embedded dictionaries
//!   cargo run --bin check-dictionaries -- locales      # Check <dir>/<code>.json files
//!   cargo run --bin check-dictionaries -- --strict     # Treat warnings as errors
//!
//! Exits with a non-zero status when any dictionary has errors.

use anyhow::{Context, Result};
use euromotors_web::i18n::{DictionarySource, DictionaryStore, DictionaryValidator, Locale};
use std::path::PathBuf;
use tracing::{error, info, warn};

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("check_dictionaries=info".parse()?),
        )
        .init();

    // Parse CLI arguments
    let args: Vec<String> = std::env::args().skip(1).collect();
    let strict = args.iter().any(|arg| arg == "--strict");
    let source = match args.iter().find(|arg| !arg.starts_with("--")) {
        Some(dir) => {
            info!("Checking dictionaries in {}", dir);
            DictionarySource::Directory(PathBuf::from(dir))
        }
        None => {
            info!("Checking embedded dictionaries");
            DictionarySource::Embedded
        }
    };

    let store = DictionaryStore::new(source);
    let default_locale = Locale::default_locale();
    let reference = store
        .dictionary(default_locale)
        .with_context(|| format!("Failed to load reference dictionary '{}'", default_locale))?;

    let mut error_count = 0;
    let mut warning_count = 0;

    for locale in Locale::all().into_iter().filter(|l| !l.is_default()) {
        let candidate = store
            .dictionary(locale)
            .with_context(|| format!("Failed to load dictionary '{}'", locale))?;
        let report = DictionaryValidator::validate(&reference, &candidate);

        for message in &report.errors {
            error!("[{}] {}", locale, message);
        }
        for message in &report.warnings {
            warn!("[{}] {}", locale, message);
        }

        if report.is_clean() {
            info!("✓ {} ({})", locale, locale.native_name());
        }

        error_count += report.errors.len();
        warning_count += report.warnings.len();
    }

    info!("{} errors, {} warnings", error_count, warning_count);

    if error_count > 0 || (strict && warning_count > 0) {
        anyhow::bail!("Dictionary check failed");
    }

    Ok(())
}
