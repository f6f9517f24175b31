//! Per-locale dictionaries and the store that memoizes them.
//!
//! A dictionary is a JSON tree. Leaves are addressed with dot paths such as
//! `home.hero.badge`. The store loads each locale at most once and hands out
//! shared, read-only trees.

use crate::i18n::{Locale, Translator};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};
use thiserror::Error;
use tracing::{info, warn};

/// Errors raised while loading a dictionary.
#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("failed to read dictionary for '{locale}' from {path}: {source}")]
    Io {
        locale: Locale,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("dictionary for '{locale}' is not valid JSON: {source}")]
    Parse {
        locale: Locale,
        #[source]
        source: serde_json::Error,
    },

    #[error("dictionary for '{0}' must have an object at its root")]
    NotAnObject(Locale),
}

/// A node of a dictionary tree.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Leaf(String),
    Number(serde_json::Number),
    List(Vec<Node>),
    Branch(BTreeMap<String, Node>),
    /// Booleans and nulls. Never rendered.
    Opaque(serde_json::Value),
}

impl Node {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::Leaf(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_branch(&self) -> Option<&BTreeMap<String, Node>> {
        match self {
            Node::Branch(children) => Some(children),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Node]> {
        match self {
            Node::List(items) => Some(items),
            _ => None,
        }
    }
}

/// The translated strings of one locale.
#[derive(Debug, Clone)]
pub struct Dictionary {
    locale: Locale,
    root: Node,
}

impl Dictionary {
    /// Parse a dictionary from its JSON text.
    pub fn parse(locale: Locale, json: &str) -> Result<Self, DictionaryError> {
        let root: Node =
            serde_json::from_str(json).map_err(|source| DictionaryError::Parse { locale, source })?;

        if root.as_branch().is_none() {
            return Err(DictionaryError::NotAnObject(locale));
        }

        Ok(Self { locale, root })
    }

    /// A dictionary without entries. Every lookup misses.
    pub fn empty(locale: Locale) -> Self {
        Self {
            locale,
            root: Node::Branch(BTreeMap::new()),
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Walk the tree along a dot path.
    ///
    /// Returns `None` as soon as a segment is missing or the current node is
    /// not a branch.
    pub fn lookup(&self, path: &str) -> Option<&Node> {
        path.split('.').try_fold(&self.root, |node, segment| {
            node.as_branch().and_then(|children| children.get(segment))
        })
    }

    /// Dot paths of every string leaf reachable through branches, sorted.
    pub fn leaf_paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        collect_leaf_paths(&self.root, String::new(), &mut paths);
        paths
    }
}

fn collect_leaf_paths(node: &Node, prefix: String, out: &mut Vec<String>) {
    match node {
        Node::Leaf(_) => out.push(prefix),
        Node::Branch(children) => {
            for (key, child) in children {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                collect_leaf_paths(child, path, out);
            }
        }
        _ => {}
    }
}

/// Where dictionary JSON comes from.
#[derive(Debug, Clone, Default)]
pub enum DictionarySource {
    /// The dictionaries compiled into the binary from `locales/`.
    #[default]
    Embedded,
    /// A directory holding `<code>.json` files.
    Directory(PathBuf),
}

impl DictionarySource {
    fn load(&self, locale: Locale) -> Result<Dictionary, DictionaryError> {
        match self {
            DictionarySource::Embedded => Dictionary::parse(locale, embedded_json(locale)),
            DictionarySource::Directory(dir) => {
                let path = dir.join(format!("{}.json", locale.code()));
                let json = std::fs::read_to_string(&path).map_err(|source| {
                    DictionaryError::Io {
                        locale,
                        path: path.clone(),
                        source,
                    }
                })?;
                Dictionary::parse(locale, &json)
            }
        }
    }
}

fn embedded_json(locale: Locale) -> &'static str {
    match locale.code() {
        "en" => include_str!("../../locales/en.json"),
        "de" => include_str!("../../locales/de.json"),
        "ru" => include_str!("../../locales/ru.json"),
        "uk" => include_str!("../../locales/uk.json"),
        _ => include_str!("../../locales/cs.json"),
    }
}

/// Memoizing dictionary store, keyed by locale.
///
/// Owned by the application state rather than held in a global so tests can
/// build their own store or [`reset`](Self::reset) it between cases.
#[derive(Debug, Default)]
pub struct DictionaryStore {
    source: DictionarySource,
    cache: RwLock<HashMap<Locale, Arc<Dictionary>>>,
}

impl DictionaryStore {
    pub fn new(source: DictionarySource) -> Self {
        Self {
            source,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Store over the embedded dictionaries.
    pub fn embedded() -> Self {
        Self::new(DictionarySource::Embedded)
    }

    /// Get the dictionary for a locale, loading it on first use.
    pub fn dictionary(&self, locale: Locale) -> Result<Arc<Dictionary>, DictionaryError> {
        if let Some(dictionary) = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&locale)
        {
            return Ok(Arc::clone(dictionary));
        }

        let dictionary = Arc::new(self.source.load(locale)?);
        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        Ok(Arc::clone(cache.entry(locale).or_insert(dictionary)))
    }

    /// Load every supported locale up front so load errors surface at startup.
    pub fn preload(&self) -> Result<(), DictionaryError> {
        for locale in Locale::all() {
            let dictionary = self.dictionary(locale)?;
            info!(
                "Loaded dictionary '{}' ({} strings)",
                locale,
                dictionary.leaf_paths().len()
            );
        }
        Ok(())
    }

    /// Translator for a locale.
    ///
    /// Never fails: if the dictionary cannot be loaded, the translator works
    /// over an empty dictionary and every key renders as its own path.
    pub fn translator(&self, locale: Locale) -> Translator {
        let dictionary = self.dictionary(locale).unwrap_or_else(|e| {
            warn!("Falling back to an empty dictionary: {}", e);
            Arc::new(Dictionary::empty(locale))
        });
        Translator::new(dictionary)
    }

    /// Drop all memoized dictionaries.
    pub fn reset(&self) {
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Number of memoized dictionaries.
    pub fn cached_len(&self) -> usize {
        self.cache.read().unwrap_or_else(PoisonError::into_inner).len()
    }
}
