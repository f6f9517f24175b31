//! Locale-aware URL building.
//!
//! The active locale travels in a single query parameter, `lang` or `locale`.
//! Links to the same page in another locale are rebuilt from the current
//! query, keeping every other parameter and the key the visitor arrived with.

use crate::i18n::Locale;
use url::form_urlencoded;

/// Query parameter names reserved for the locale.
const LOCALE_KEYS: [&str; 2] = ["lang", "locale"];

/// A query parameter value: one string or a repeated key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Single(String),
    Many(Vec<String>),
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Single(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Single(value)
    }
}

impl From<Vec<&str>> for ParamValue {
    fn from(values: Vec<&str>) -> Self {
        ParamValue::Many(values.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(values: Vec<String>) -> Self {
        ParamValue::Many(values)
    }
}

/// Route search parameters in insertion order.
///
/// An entry may be present without a value; such entries are ignored by
/// every consumer, the same as a missing key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParams {
    entries: Vec<(String, Option<ParamValue>)>,
}

impl SearchParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a raw query string (without the leading `?`).
    ///
    /// Repeated keys become [`ParamValue::Many`] at the position of their
    /// first occurrence.
    pub fn from_query(query: &str) -> Self {
        let mut params = Self::new();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            let value = value.into_owned();
            match params.entries.iter_mut().find(|(k, _)| *k == key) {
                Some((_, slot)) => {
                    *slot = Some(match slot.take() {
                        Some(ParamValue::Single(first)) => ParamValue::Many(vec![first, value]),
                        Some(ParamValue::Many(mut values)) => {
                            values.push(value);
                            ParamValue::Many(values)
                        }
                        None => ParamValue::Single(value),
                    });
                }
                None => params
                    .entries
                    .push((key.into_owned(), Some(ParamValue::Single(value)))),
            }
        }
        params
    }

    /// Builder-style insert.
    pub fn with(mut self, key: &str, value: impl Into<ParamValue>) -> Self {
        self.insert(key, Some(value.into()));
        self
    }

    /// Set a key, replacing its value in place if the key already exists.
    pub fn insert(&mut self, key: &str, value: Option<ParamValue>) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key.to_string(), value)),
        }
    }

    /// The value under `key`; entries without a value read as missing.
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, value)| value.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&ParamValue>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_ref()))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The locale code requested by the query, if any.
///
/// Reads `lang`, falling back to `locale`. A repeated key yields its first
/// value. The code is not validated here; see [`Locale::resolve`].
pub fn extract_locale(params: &SearchParams) -> Option<&str> {
    let raw = params.get("lang").or_else(|| params.get("locale"))?;
    match raw {
        ParamValue::Single(value) => Some(value),
        ParamValue::Many(values) => values.first().map(String::as_str),
    }
}

/// Ordered query pairs with `URLSearchParams` set/append semantics.
#[derive(Default)]
struct QueryPairs(Vec<(String, String)>);

impl QueryPairs {
    fn append(&mut self, key: &str, value: &str) {
        self.0.push((key.to_string(), value.to_string()));
    }

    /// Replace the first pair with this key and drop the others, or append.
    fn set(&mut self, key: &str, value: &str) {
        match self.0.iter().position(|(k, _)| k == key) {
            Some(index) => {
                self.0[index].1 = value.to_string();
                let mut seen = 0;
                self.0.retain(|(k, _)| {
                    if k != key {
                        return true;
                    }
                    seen += 1;
                    seen == 1
                });
            }
            None => self.append(key, value),
        }
    }

    fn serialize(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.0.iter())
            .finish()
    }
}

/// Build the URL of `pathname` in `target`.
///
/// Every non-locale parameter is carried over (repeated keys stay repeated).
/// The locale parameter keeps the key the current URL used (`lang` when there
/// was none) and is left out entirely for the default locale.
pub fn build_locale_href(pathname: &str, params: &SearchParams, target: Locale) -> String {
    let mut pairs = QueryPairs::default();
    let mut locale_key: Option<&str> = None;

    for (key, value) in params.iter() {
        let Some(value) = value else {
            continue;
        };

        if let Some(reserved) = LOCALE_KEYS.iter().copied().find(|k| *k == key) {
            locale_key = Some(reserved);
            continue;
        }

        match value {
            ParamValue::Many(values) => {
                for entry in values {
                    pairs.append(key, entry);
                }
            }
            ParamValue::Single(single) => pairs.set(key, single),
        }
    }

    if !target.is_default() {
        pairs.set(locale_key.unwrap_or(LOCALE_KEYS[0]), target.code());
    }

    let query = pairs.serialize();
    if query.is_empty() {
        pathname.to_string()
    } else {
        format!("{}?{}", pathname, query)
    }
}

/// Like [`build_locale_href`], for hrefs that may end in a `#fragment`.
///
/// The fragment is split off before rebuilding and re-attached unchanged.
pub fn localized_href(href: &str, params: &SearchParams, target: Locale) -> String {
    match href.split_once('#') {
        Some((path, fragment)) => {
            format!("{}#{}", build_locale_href(path, params, target), fragment)
        }
        None => build_locale_href(href, params, target),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn decode(href: &str) -> Vec<(String, String)> {
        let query = href.split_once('?').map(|(_, q)| q).unwrap_or("");
        form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect()
    }

    // ==================== extract_locale Tests ====================

    #[test]
    fn test_extract_locale_prefers_lang() {
        let params = SearchParams::new().with("locale", "de").with("lang", "en");
        assert_eq!(extract_locale(&params), Some("en"));
    }

    #[test]
    fn test_extract_locale_falls_back_to_locale() {
        let params = SearchParams::new().with("locale", "ru");
        assert_eq!(extract_locale(&params), Some("ru"));
    }

    #[test]
    fn test_extract_locale_takes_first_of_list() {
        let params = SearchParams::new().with("lang", vec!["uk", "en"]);
        assert_eq!(extract_locale(&params), Some("uk"));
    }

    #[test]
    fn test_extract_locale_absent() {
        assert_eq!(extract_locale(&SearchParams::new()), None);
        assert_eq!(extract_locale(&SearchParams::new().with("q", "x")), None);
    }

    #[test]
    fn test_extract_locale_skips_valueless_lang() {
        let mut params = SearchParams::new();
        params.insert("lang", None);
        params.insert("locale", Some("de".into()));
        assert_eq!(extract_locale(&params), Some("de"));
    }

    #[test]
    fn test_extract_locale_does_not_validate() {
        let params = SearchParams::new().with("lang", "xx");
        assert_eq!(extract_locale(&params), Some("xx"));
    }

    // ==================== from_query Tests ====================

    #[test]
    fn test_from_query_groups_repeated_keys() {
        let params = SearchParams::from_query("tag=a&q=x&tag=b&lang=en");
        assert_eq!(params.get("tag"), Some(&ParamValue::from(vec!["a", "b"])));
        assert_eq!(params.get("q"), Some(&ParamValue::from("x")));
        let keys: Vec<_> = params.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["tag", "q", "lang"]);
    }

    #[test]
    fn test_from_query_decodes_values() {
        let params = SearchParams::from_query("q=brake+pads&note=a%26b");
        assert_eq!(params.get("q"), Some(&ParamValue::from("brake pads")));
        assert_eq!(params.get("note"), Some(&ParamValue::from("a&b")));
    }

    // ==================== build_locale_href Tests ====================

    #[test]
    fn test_non_default_target_is_appended() {
        let params = SearchParams::new().with("q", "a");
        assert_eq!(build_locale_href("/pricing", &params, Locale::EN), "/pricing?q=a&lang=en");
    }

    #[test]
    fn test_default_target_drops_locale_key() {
        let params = SearchParams::new().with("lang", "en").with("q", "a");
        assert_eq!(build_locale_href("/pricing", &params, Locale::CS), "/pricing?q=a");
    }

    #[test]
    fn test_default_target_without_params_returns_pathname() {
        assert_eq!(build_locale_href("/about", &SearchParams::new(), Locale::CS), "/about");
        let only_lang = SearchParams::new().with("lang", "de");
        assert_eq!(build_locale_href("/about", &only_lang, Locale::CS), "/about");
    }

    #[test]
    fn test_repeated_keys_are_preserved() {
        let params = SearchParams::new().with("tag", vec!["a", "b"]);
        assert_eq!(build_locale_href("/x", &params, Locale::CS), "/x?tag=a&tag=b");
    }

    #[test]
    fn test_locale_key_identity_is_preserved() {
        let params = SearchParams::new().with("locale", "en").with("q", "a");
        assert_eq!(build_locale_href("/blog", &params, Locale::DE), "/blog?q=a&locale=de");
    }

    #[test]
    fn test_both_locale_keys_collapse_to_last_seen() {
        let params = SearchParams::new().with("lang", "en").with("locale", "de");
        assert_eq!(build_locale_href("/", &params, Locale::RU), "/?locale=ru");
    }

    #[test]
    fn test_valueless_entries_are_skipped() {
        let mut params = SearchParams::new().with("q", "a");
        params.insert("empty", None);
        params.insert("locale", None);
        assert_eq!(build_locale_href("/", &params, Locale::EN), "/?q=a&lang=en");
    }

    #[test]
    fn test_values_are_form_encoded() {
        let params = SearchParams::new().with("q", "brake pads & oil");
        assert_eq!(
            build_locale_href("/", &params, Locale::CS),
            "/?q=brake+pads+%26+oil"
        );
    }

    // ==================== localized_href Tests ====================

    #[test]
    fn test_localized_href_keeps_fragment() {
        let params = SearchParams::new().with("lang", "en");
        assert_eq!(localized_href("/#services", &params, Locale::EN), "/?lang=en#services");
        assert_eq!(localized_href("/#services", &params, Locale::CS), "/#services");
    }

    #[test]
    fn test_localized_href_without_fragment() {
        assert_eq!(
            localized_href("/contact", &SearchParams::new(), Locale::UK),
            "/contact?lang=uk"
        );
    }

    // ==================== Properties ====================

    fn params_strategy() -> impl Strategy<Value = SearchParams> {
        let key = prop_oneof![
            Just("lang".to_string()),
            Just("locale".to_string()),
            "[a-z]{1,4}"
        ];
        let value = prop_oneof![
            "[a-z0-9 ]{0,4}".prop_map(ParamValue::Single),
            prop::collection::vec("[a-z0-9]{0,3}", 0..3).prop_map(ParamValue::Many),
        ];
        prop::collection::vec((key, prop::option::of(value)), 0..6).prop_map(|entries| {
            let mut params = SearchParams::new();
            for (k, v) in entries {
                params.insert(&k, v);
            }
            params
        })
    }

    proptest! {
        #[test]
        fn prop_at_most_one_locale_key(params in params_strategy(), index in 0usize..5) {
            let target = Locale::all()[index];
            let href = build_locale_href("/p", &params, target);
            let locale_pairs: Vec<_> = decode(&href)
                .into_iter()
                .filter(|(k, _)| k == "lang" || k == "locale")
                .collect();

            if target.is_default() {
                prop_assert!(locale_pairs.is_empty());
            } else {
                prop_assert_eq!(locale_pairs.len(), 1);
                prop_assert_eq!(locale_pairs[0].1.as_str(), target.code());
            }
        }

        #[test]
        fn prop_other_params_survive(params in params_strategy()) {
            let href = build_locale_href("/p", &params, Locale::EN);
            let decoded = decode(&href);
            for (key, value) in params.iter() {
                if key == "lang" || key == "locale" {
                    continue;
                }
                if let Some(ParamValue::Single(v)) = value {
                    prop_assert!(decoded.contains(&(key.to_string(), v.clone())));
                }
            }
        }
    }
}
