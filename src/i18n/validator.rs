//! Dictionary consistency validation.
//!
//! Every locale dictionary is compared against the default locale's
//! dictionary: a key the default has and a translation lacks is an error,
//! while differing `{placeholder}` sets, extra keys and blank strings are
//! warnings.

use super::dictionary::Dictionary;
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;

/// Validation report containing errors and warnings about a dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Keys whose absence makes pages render raw key paths
    pub errors: Vec<String>,

    /// Likely mistakes that still render
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// Create a new empty validation report
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Check if the report has any errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Check if the report has any warnings
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Check if the report is clean (no errors or warnings)
    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator for translated dictionaries.
pub struct DictionaryValidator;

static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

impl DictionaryValidator {
    /// Compare a translated dictionary with the reference dictionary.
    ///
    /// # Arguments
    /// * `reference` - The default locale's dictionary
    /// * `candidate` - The dictionary being checked
    pub fn validate(reference: &Dictionary, candidate: &Dictionary) -> ValidationReport {
        let mut report = ValidationReport::new();
        let reference_paths = reference.leaf_paths();
        let candidate_paths: BTreeSet<String> = candidate.leaf_paths().into_iter().collect();

        for path in &reference_paths {
            let Some(original) = reference.lookup(path).and_then(|n| n.as_str()) else {
                continue;
            };
            let Some(translated) = candidate.lookup(path).and_then(|n| n.as_str()) else {
                report.errors.push(format!("Missing key: {}", path));
                continue;
            };

            if translated.trim().is_empty() && !original.trim().is_empty() {
                report.warnings.push(format!("Empty value: {}", path));
            }

            let expected = Self::extract_placeholders(original);
            let found = Self::extract_placeholders(translated);
            if expected != found {
                report.warnings.push(format!(
                    "Placeholder mismatch at {}: expected {:?}, found {:?}",
                    path, expected, found
                ));
            }
        }

        let reference_set: BTreeSet<&String> = reference_paths.iter().collect();
        for path in candidate_paths.iter().filter(|p| !reference_set.contains(p)) {
            report.warnings.push(format!("Extra key: {}", path));
        }

        Self::compare_lists(reference, candidate, "services.items", &mut report);

        report
    }

    fn compare_lists(
        reference: &Dictionary,
        candidate: &Dictionary,
        path: &str,
        report: &mut ValidationReport,
    ) {
        let expected = reference.lookup(path).and_then(|n| n.as_list()).map(<[_]>::len);
        let found = candidate.lookup(path).and_then(|n| n.as_list()).map(<[_]>::len);

        match (expected, found) {
            (Some(_), None) => report.errors.push(format!("Missing list: {}", path)),
            (Some(e), Some(f)) if e != f => report.warnings.push(format!(
                "List length mismatch at {}: expected {}, found {}",
                path, e, f
            )),
            _ => {}
        }
    }

    /// Extract the set of `{name}` placeholders from a template
    fn extract_placeholders(text: &str) -> BTreeSet<String> {
        let regex = PLACEHOLDER_REGEX.get_or_init(|| Regex::new(r"\{(\w+)\}").unwrap());

        regex
            .captures_iter(text)
            .filter_map(|cap| cap.get(1).map(|m| m.as_str().to_string()))
            .collect()
    }
}
