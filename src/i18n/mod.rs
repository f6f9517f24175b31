//! Internationalization (i18n) module for multi-language support.
//!
//! All locale-related logic, dictionaries and localized URL handling is
//! contained here.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for all supported locales and their metadata
//! - `locale`: Type-safe Locale type with silent fallback resolution
//! - `dictionary`: Per-locale translation trees, loaded once and memoized
//! - `translator`: Key-path lookup with the path itself as missing-key sentinel
//! - `routing`: Locale-preserving URL building for links and alternates
//! - `validator`: Dictionary consistency checks against the default locale
//!
//! # Example
//!
//! ```rust,ignore
//! use euromotors_web::i18n::{build_locale_href, DictionaryStore, Locale, SearchParams};
//!
//! // Unknown codes fall back to the default locale (Czech)
//! let locale = Locale::resolve(Some("fr"));
//!
//! // Translate through the memoizing store
//! let store = DictionaryStore::embedded();
//! let title = store.translator(Locale::EN).translate("meta.home.title");
//!
//! // Link to the same page in German
//! let href = build_locale_href("/pricing", &SearchParams::new(), Locale::DE);
//! ```

mod dictionary;
mod locale;
mod registry;
mod routing;
mod translator;
mod validator;

pub use dictionary::{Dictionary, DictionaryError, DictionarySource, DictionaryStore, Node};
pub use locale::Locale;
pub use registry::{LocaleConfig, LocaleRegistry};
pub use routing::{build_locale_href, extract_locale, localized_href, ParamValue, SearchParams};
pub use translator::Translator;
pub use validator::{DictionaryValidator, ValidationReport};
