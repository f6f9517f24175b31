//! Server-rendered pages.
//!
//! Every page is a full HTML document built from the request's
//! [`PageContext`]: the resolved locale with its translator, the current
//! path and query (for the language switcher and canonical links), the
//! latest availability status and the visitor's cookie consent.

mod about;
mod blog;
mod contact;
mod home;
mod layout;
mod not_found;
mod pricing;
mod service;
mod terms;

pub use about::{render_about, render_careers};
pub use blog::render_blog;
pub use contact::render_contact;
pub use home::render_home;
pub use layout::{escape_html, PageMeta};
pub use not_found::render_not_found;
pub use pricing::render_pricing;
pub use service::render_service;
pub use terms::render_terms;

use crate::availability::AvailabilityStatus;
use crate::consent::ConsentState;
use crate::i18n::{extract_locale, localized_href, Locale, SearchParams, Translator};

/// Everything a page needs to know about the request being rendered.
pub struct PageContext {
    pub locale: Locale,
    pub t: Translator,
    pub pathname: String,
    pub params: SearchParams,
    pub site_url: String,
    pub availability: AvailabilityStatus,
    pub consent: ConsentState,
    pub year: i32,
}

impl PageContext {
    /// Locale requested by the query string, falling back to the default.
    pub fn requested_locale(params: &SearchParams) -> Locale {
        Locale::resolve(extract_locale(params))
    }

    /// Link to another page of the site in the current locale.
    ///
    /// Only the locale travels with the link; the current page's other
    /// query parameters do not.
    pub fn href(&self, target: &str) -> String {
        localized_href(target, &SearchParams::new(), self.locale)
    }

    /// Translated and HTML-escaped.
    pub fn text(&self, path: &str) -> String {
        escape_html(&self.t.translate(path))
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::i18n::DictionaryStore;

    pub fn context(locale: Locale, pathname: &str, query: &str) -> PageContext {
        PageContext {
            locale,
            t: DictionaryStore::embedded().translator(locale),
            pathname: pathname.to_string(),
            params: SearchParams::from_query(query),
            site_url: "https://euromotors.cz".to_string(),
            availability: AvailabilityStatus {
                is_open: true,
                label: "Open now".to_string(),
                detail: "closes today at 19:00".to_string(),
            },
            consent: ConsentState::pending(),
            year: 2024,
        }
    }

    /// No `a.b.c` key path leaked into the markup.
    pub fn assert_no_missing_keys(html: &str) {
        for prefix in [
            "home.",
            "chrome.",
            "meta.",
            "services.",
            "aboutPage.",
            "careerPage.",
            "pricingPage.",
            "contactPage.",
            "termsPage.",
            "blogPage.",
            "notFoundPage.",
            "cookieConsent.",
            "servicePage.",
        ] {
            assert!(!html.contains(&format!(">{}", prefix)), "leaked key {}", prefix);
            assert!(!html.contains(&format!("\"{}", prefix)), "leaked key {}", prefix);
        }
    }
}
