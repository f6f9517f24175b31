//! Path-based translation lookup over a locale's dictionary.

use crate::i18n::{Dictionary, Locale, Node};
use chrono::Weekday;
use std::sync::Arc;
use tracing::debug;

/// Resolves dot paths against one locale's dictionary.
///
/// Cheap to clone: the dictionary is shared.
#[derive(Debug, Clone)]
pub struct Translator {
    dictionary: Arc<Dictionary>,
}

impl Translator {
    pub fn new(dictionary: Arc<Dictionary>) -> Self {
        Self { dictionary }
    }

    pub fn locale(&self) -> Locale {
        self.dictionary.locale()
    }

    /// The string at `path`, if the path resolves to a string leaf.
    pub fn lookup(&self, path: &str) -> Option<&str> {
        self.dictionary.lookup(path).and_then(Node::as_str)
    }

    /// Translate a dot path.
    ///
    /// Returns the path itself when any segment is missing, when an
    /// intermediate node is not an object, or when the final node is not a
    /// string. Callers detect untranslated keys with `translate(p) == p`.
    pub fn translate(&self, path: &str) -> String {
        match self.lookup(path) {
            Some(text) => text.to_string(),
            None => {
                debug!("Missing translation '{}' for locale '{}'", path, self.locale());
                path.to_string()
            }
        }
    }

    /// Whether `path` resolves to a string.
    pub fn has(&self, path: &str) -> bool {
        self.lookup(path).is_some()
    }

    /// Translate and fill `{name}` placeholders.
    ///
    /// Only the first occurrence of each placeholder is replaced.
    pub fn format(&self, path: &str, args: &[(&str, &str)]) -> String {
        args.iter()
            .fold(self.translate(path), |text, (name, value)| {
                text.replacen(&format!("{{{}}}", name), value, 1)
            })
    }

    /// The weekday as it reads inside the "opens on {weekday}" sentence.
    ///
    /// Dictionaries store the phrase-ready form (grammatical case and
    /// preposition included), e.g. "ve středu" in Czech or "am Mittwoch" in
    /// German.
    pub fn weekday_phrase(&self, weekday: Weekday) -> String {
        self.translate(&format!("home.availability.days.{}", weekday_key(weekday)))
    }
}

fn weekday_key(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}
