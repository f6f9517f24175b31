//! Locale type: a code validated against the registry.
//!
//! A `Locale` can only be obtained from the registry, so holding one means the
//! code is supported. Request input goes through [`Locale::resolve`], which
//! never fails and degrades to the default locale.

use crate::i18n::{LocaleConfig, LocaleRegistry};
use anyhow::{bail, Result};
use serde::{Serialize, Serializer};
use std::fmt;

/// A supported locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Locale {
    code: &'static str,
}

impl Locale {
    pub const CS: Locale = Locale { code: "cs" };
    pub const EN: Locale = Locale { code: "en" };
    pub const DE: Locale = Locale { code: "de" };
    pub const RU: Locale = Locale { code: "ru" };
    pub const UK: Locale = Locale { code: "uk" };

    /// Create a Locale from a code, rejecting unsupported codes.
    ///
    /// Request handling should use [`Locale::resolve`] instead; this is for
    /// tooling that wants to report bad input.
    pub fn from_code(code: &str) -> Result<Locale> {
        match LocaleRegistry::get().get_by_code(code) {
            Some(config) => Ok(Locale { code: config.code }),
            None => bail!("Unknown locale code: '{}'", code),
        }
    }

    /// Resolve an arbitrary candidate into a supported locale.
    ///
    /// Returns the candidate if it is a supported code, otherwise the default
    /// locale. Total and idempotent.
    pub fn resolve(candidate: Option<&str>) -> Locale {
        candidate
            .and_then(|code| LocaleRegistry::get().get_by_code(code))
            .map(|config| Locale { code: config.code })
            .unwrap_or_else(Locale::default_locale)
    }

    /// The default locale (Czech).
    pub fn default_locale() -> Locale {
        Locale {
            code: LocaleRegistry::get().default_locale().code,
        }
    }

    /// All supported locales in switcher order.
    pub fn all() -> Vec<Locale> {
        LocaleRegistry::get()
            .list()
            .iter()
            .map(|config| Locale { code: config.code })
            .collect()
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Full metadata from the registry.
    pub fn config(&self) -> &'static LocaleConfig {
        LocaleRegistry::get()
            .get_by_code(self.code)
            .expect("Locale is only constructed from registry codes")
    }

    pub fn native_name(&self) -> &'static str {
        self.config().native_name
    }

    pub fn html_lang(&self) -> &'static str {
        self.config().html_lang
    }

    pub fn is_default(&self) -> bool {
        self.config().is_default
    }
}

impl Default for Locale {
    fn default() -> Self {
        Locale::default_locale()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}

impl Serialize for Locale {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code)
    }
}
