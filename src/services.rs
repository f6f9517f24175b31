//! Services catalog, read from the `services.items` list of each dictionary.

use crate::i18n::{Dictionary, DictionaryStore, Locale, Node};
use regex::Regex;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, OnceLock, PoisonError, RwLock};
use tracing::debug;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

const SERVICES_PATH: &str = "services.items";

/// A service offered by the shop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Service {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub price: String,
    /// Unique within one locale's catalog.
    pub slug: String,
}

static NON_SLUG_CHARS: OnceLock<Regex> = OnceLock::new();

/// Turn a title into a URL slug: ASCII-folded, lowercase, dash separated.
///
/// Characters that do not fold to ASCII letters or digits act as separators,
/// so "Pneuservis & geometrie" becomes `pneuservis-geometrie`.
pub fn slugify(value: &str) -> String {
    let folded: String = value
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase();

    let re = NON_SLUG_CHARS.get_or_init(|| Regex::new(r"[^a-z0-9]+").unwrap());
    re.replace_all(&folded, "-").trim_matches('-').to_string()
}

/// Reserve a unique slug: `base`, then `base-2`, `base-3`, ...
fn ensure_unique_slug(base: &str, used: &mut HashSet<String>) -> String {
    let base = if base.is_empty() { "service" } else { base };
    let mut candidate = base.to_string();
    let mut suffix = 1;

    while used.contains(&candidate) {
        suffix += 1;
        candidate = format!("{}-{}", base, suffix);
    }

    used.insert(candidate.clone());
    candidate
}

/// A string field: trimmed text, or a number's decimal form. Anything else is empty.
fn sanitize(node: Option<&Node>) -> String {
    match node {
        Some(Node::Leaf(text)) => text.trim().to_string(),
        Some(Node::Number(number)) => number.to_string(),
        _ => String::new(),
    }
}

/// Normalize raw records into services.
///
/// Records that are not objects, or that lack a title, description or
/// price, are dropped. Positions used for fallback slugs are 1-based over the
/// raw list.
pub fn normalize_services(records: &[Node]) -> Vec<Service> {
    let mut services = Vec::new();
    let mut used = HashSet::new();

    for (index, record) in records.iter().enumerate() {
        let Some(fields) = record.as_branch() else {
            continue;
        };

        let title = sanitize(fields.get("title"));
        let subtitle = sanitize(fields.get("subtitle"));
        let description = sanitize(fields.get("description"));
        let price = sanitize(fields.get("price"));

        if title.is_empty() || description.is_empty() || price.is_empty() {
            debug!("Skipping incomplete service record #{}", index + 1);
            continue;
        }

        let explicit = sanitize(fields.get("slug"));
        let base = if explicit.is_empty() {
            slugify(&title)
        } else {
            explicit
        };
        let base = if base.is_empty() {
            format!("service-{}", index + 1)
        } else {
            base
        };

        services.push(Service {
            slug: ensure_unique_slug(&base, &mut used),
            title,
            subtitle,
            description,
            price,
        });
    }

    services
}

/// Services listed in a dictionary.
pub fn services_from_dictionary(dictionary: &Dictionary) -> Vec<Service> {
    dictionary
        .lookup(SERVICES_PATH)
        .and_then(Node::as_list)
        .map(normalize_services)
        .unwrap_or_default()
}

/// Per-locale services, memoized.
pub struct ServiceCatalog {
    dictionaries: Arc<DictionaryStore>,
    cache: RwLock<HashMap<Locale, Arc<Vec<Service>>>>,
}

impl ServiceCatalog {
    pub fn new(dictionaries: Arc<DictionaryStore>) -> Self {
        Self {
            dictionaries,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// All services for a locale, in dictionary order.
    ///
    /// A locale whose dictionary cannot be loaded has no services.
    pub fn services(&self, locale: Locale) -> Arc<Vec<Service>> {
        if let Some(services) = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&locale)
        {
            return Arc::clone(services);
        }

        let services = Arc::new(
            self.dictionaries
                .dictionary(locale)
                .map(|dictionary| services_from_dictionary(&dictionary))
                .unwrap_or_default(),
        );

        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(cache.entry(locale).or_insert(services))
    }

    pub fn service_by_slug(&self, locale: Locale, slug: &str) -> Option<Service> {
        self.services(locale)
            .iter()
            .find(|service| service.slug == slug)
            .cloned()
    }

    pub fn reset(&self) {
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}
