//! Cookie consent preferences.
//!
//! Preferences live in a single cookie holding URL-encoded JSON. Anything
//! unreadable in that cookie counts as "no consent yet": the banner is shown
//! again and nothing fails.

use serde::{Deserialize, Serialize};
use tracing::debug;
use url::form_urlencoded;

pub const STORAGE_KEY: &str = "euromotors.cookie-preferences";

/// One year.
const COOKIE_MAX_AGE_SECS: u64 = 365 * 24 * 60 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookiePreferences {
    /// Always true. Necessary cookies cannot be declined.
    #[serde(default = "always")]
    pub necessary: bool,
    pub analytics: bool,
    pub marketing: bool,
}

fn always() -> bool {
    true
}

impl CookiePreferences {
    pub fn new(analytics: bool, marketing: bool) -> Self {
        Self {
            necessary: true,
            analytics,
            marketing,
        }
    }

    pub fn all() -> Self {
        Self::new(true, true)
    }

    pub fn necessary_only() -> Self {
        Self::new(false, false)
    }
}

impl Default for CookiePreferences {
    fn default() -> Self {
        Self::necessary_only()
    }
}

/// What the visitor has agreed to, and whether to ask them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsentState {
    pub preferences: CookiePreferences,
    pub has_consent: bool,
    pub show_banner: bool,
}

impl ConsentState {
    /// No stored choice: necessary cookies only, banner visible.
    pub fn pending() -> Self {
        Self {
            preferences: CookiePreferences::default(),
            has_consent: false,
            show_banner: true,
        }
    }

    fn decided(preferences: CookiePreferences) -> Self {
        Self {
            preferences: CookiePreferences {
                necessary: true,
                ..preferences
            },
            has_consent: true,
            show_banner: false,
        }
    }

    /// Restore from the raw stored cookie value.
    pub fn restore(stored: Option<&str>) -> Self {
        let Some(raw) = stored.filter(|s| !s.is_empty()) else {
            return Self::pending();
        };

        match decode_preferences(raw) {
            Some(preferences) => Self::decided(preferences),
            None => {
                debug!("Ignoring unreadable cookie preferences");
                Self::pending()
            }
        }
    }

    /// Restore from a request's `Cookie` header.
    pub fn from_cookie_header(header: Option<&str>) -> Self {
        Self::restore(header.and_then(|h| cookie_value(h, STORAGE_KEY)))
    }

    pub fn accept_all() -> Self {
        Self::decided(CookiePreferences::all())
    }

    pub fn reject_all() -> Self {
        Self::decided(CookiePreferences::necessary_only())
    }

    pub fn save(preferences: CookiePreferences) -> Self {
        Self::decided(preferences)
    }

    /// The cookie value to persist.
    pub fn stored_value(&self) -> String {
        encode_preferences(&self.preferences)
    }

    /// A complete `Set-Cookie` header value.
    pub fn set_cookie_header(&self) -> String {
        format!(
            "{}={}; Path=/; Max-Age={}; SameSite=Lax",
            STORAGE_KEY,
            self.stored_value(),
            COOKIE_MAX_AGE_SECS
        )
    }
}

/// A consent decision posted by the banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ConsentAction {
    AcceptAll,
    RejectAll,
    Save {
        #[serde(default)]
        analytics: bool,
        #[serde(default)]
        marketing: bool,
    },
}

impl ConsentAction {
    pub fn apply(self) -> ConsentState {
        match self {
            ConsentAction::AcceptAll => ConsentState::accept_all(),
            ConsentAction::RejectAll => ConsentState::reject_all(),
            ConsentAction::Save {
                analytics,
                marketing,
            } => ConsentState::save(CookiePreferences::new(analytics, marketing)),
        }
    }
}

pub fn encode_preferences(preferences: &CookiePreferences) -> String {
    let json = serde_json::json!({
        "necessary": true,
        "analytics": preferences.analytics,
        "marketing": preferences.marketing,
    })
    .to_string();
    form_urlencoded::byte_serialize(json.as_bytes()).collect()
}

/// `None` for anything that is not URL-encoded JSON of the right shape.
pub fn decode_preferences(raw: &str) -> Option<CookiePreferences> {
    // Our encoding never leaves these characters bare.
    if raw.contains(['&', '=']) {
        return None;
    }
    let (json, _) = form_urlencoded::parse(raw.as_bytes()).next()?;
    serde_json::from_str(&json).ok()
}

/// Find a cookie by name in a `Cookie` request header.
pub fn cookie_value<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}
