use anyhow::{Context, Result};
use chrono_tz::Tz;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub port: u16,
    pub site_url: String,

    // Opening hours
    pub business_timezone: Tz,
    pub availability_refresh_secs: u64,

    // Dictionaries
    pub locales_dir: Option<PathBuf>,

    // Instagram
    pub instagram_access_token: Option<String>,
    pub instagram_api_base: String,
    pub instagram_post_limit: u32,
    pub instagram_refresh_minutes: u64,

    // Admin
    pub api_key: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            site_url: "https://euromotors.cz".to_string(),
            business_timezone: chrono_tz::Europe::Prague,
            availability_refresh_secs: 60,
            locales_dir: None,
            instagram_access_token: None,
            instagram_api_base: crate::instagram::DEFAULT_API_BASE.to_string(),
            instagram_post_limit: crate::instagram::DEFAULT_LIMIT,
            instagram_refresh_minutes: 30,
            api_key: None,
        }
    }
}

/// One refresh per day at most.
const MAX_REFRESH_MINUTES: u64 = 24 * 60;

fn optional(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parsed<T: FromStr>(name: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional(name) {
        Some(value) => value
            .trim()
            .parse()
            .with_context(|| format!("{} is not valid: {:?}", name, value)),
        None => Ok(default),
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let instagram_refresh_minutes = parsed(
            "INSTAGRAM_REFRESH_MINUTES",
            defaults.instagram_refresh_minutes,
        )?;
        if !(1..=MAX_REFRESH_MINUTES).contains(&instagram_refresh_minutes) {
            anyhow::bail!(
                "INSTAGRAM_REFRESH_MINUTES must be between 1 and {}, got {}",
                MAX_REFRESH_MINUTES,
                instagram_refresh_minutes
            );
        }

        let business_timezone = match optional("BUSINESS_TIMEZONE") {
            Some(name) => name
                .trim()
                .parse::<Tz>()
                .map_err(|e| anyhow::anyhow!(e))
                .with_context(|| format!("BUSINESS_TIMEZONE is not a known timezone: {}", name))?,
            None => defaults.business_timezone,
        };

        Ok(Self {
            // Server
            port: parsed("PORT", defaults.port)?,
            site_url: optional("SITE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.site_url),

            // Opening hours
            business_timezone,
            availability_refresh_secs: parsed(
                "AVAILABILITY_REFRESH_SECS",
                defaults.availability_refresh_secs,
            )?,

            // Dictionaries
            locales_dir: optional("LOCALES_DIR").map(PathBuf::from),

            // Instagram
            instagram_access_token: optional("INSTAGRAM_ACCESS_TOKEN"),
            instagram_api_base: optional("INSTAGRAM_API_BASE")
                .unwrap_or(defaults.instagram_api_base),
            instagram_post_limit: parsed("INSTAGRAM_POST_LIMIT", defaults.instagram_post_limit)?,
            instagram_refresh_minutes,

            // Admin
            api_key: optional("API_KEY"),
        })
    }

    pub fn availability_refresh(&self) -> Duration {
        Duration::from_secs(self.availability_refresh_secs.max(1))
    }

    pub fn instagram_ttl(&self) -> Duration {
        Duration::from_secs(self.instagram_refresh_minutes.max(1).saturating_mul(60))
    }
}
