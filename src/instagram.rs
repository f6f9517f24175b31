//! Instagram feed for the blog page.
//!
//! Posts come from the Instagram Graph API (`/me/media`). Every failure is
//! turned into an error message on an otherwise empty result, so the page
//! always renders.

use crate::config::Config;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{info, warn};

pub const DEFAULT_API_BASE: &str = "https://graph.instagram.com";
pub const DEFAULT_LIMIT: u32 = 9;

const MEDIA_FIELDS: &str = "id,caption,media_type,media_url,permalink,thumbnail_url,timestamp,username";
const CAPTION_PREVIEW_MAX: usize = 80;
const DEFAULT_CAPTION_PREVIEW: &str = "Instagram příspěvek";

#[derive(Debug, Error)]
pub enum InstagramError {
    #[error("INSTAGRAM_ACCESS_TOKEN is not set. Add an Instagram Graph API access token.")]
    MissingToken,

    #[error("Failed to reach the Instagram API: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Instagram API responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("{0}")]
    Api(String),

    #[error("Malformed Instagram API response: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct MediaResponse {
    data: Option<Vec<Media>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Media {
    id: String,
    caption: Option<String>,
    media_url: Option<String>,
    permalink: String,
    thumbnail_url: Option<String>,
    timestamp: String,
    username: Option<String>,
}

/// A post as shown on the blog page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstagramPost {
    pub id: String,
    pub caption: Option<String>,
    /// At most 80 characters, ellipsized.
    pub caption_preview: String,
    pub media_url: String,
    pub permalink: String,
    pub timestamp: String,
    pub alt: Option<String>,
    pub username: Option<String>,
}

/// Posts plus the reason they are missing, if they are.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InstagramPostsResult {
    pub posts: Vec<InstagramPost>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

static WHITESPACE: OnceLock<Regex> = OnceLock::new();

/// Single-line caption preview of at most 80 characters.
pub fn caption_preview(caption: Option<&str>) -> String {
    let Some(caption) = caption.filter(|c| !c.is_empty()) else {
        return DEFAULT_CAPTION_PREVIEW.to_string();
    };

    let re = WHITESPACE.get_or_init(|| Regex::new(r"\s+").unwrap());
    let normalized = re.replace_all(caption.trim(), " ");

    if normalized.chars().count() <= CAPTION_PREVIEW_MAX {
        return normalized.into_owned();
    }

    let truncated: String = normalized.chars().take(CAPTION_PREVIEW_MAX - 3).collect();
    format!("{}...", truncated)
}

fn normalize_media(media: Media) -> Option<InstagramPost> {
    let media_url = media.media_url.or(media.thumbnail_url)?;
    let caption = media.caption.filter(|c| !c.is_empty());
    let preview = caption_preview(caption.as_deref());

    Some(InstagramPost {
        id: media.id,
        alt: caption.as_ref().map(|_| preview.clone()),
        caption,
        caption_preview: preview,
        media_url,
        permalink: media.permalink,
        timestamp: media.timestamp,
        username: media.username,
    })
}

/// Instagram Graph API client.
#[derive(Debug, Clone)]
pub struct InstagramClient {
    http: reqwest::Client,
    base_url: String,
    access_token: Option<String>,
    limit: u32,
}

impl InstagramClient {
    pub fn new(base_url: &str, access_token: Option<String>, limit: u32) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token: access_token.filter(|t| !t.is_empty()),
            limit,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.instagram_api_base,
            config.instagram_access_token.clone(),
            config.instagram_post_limit,
        )
    }

    /// Fetch the latest posts. Media without a displayable URL is skipped.
    pub async fn fetch_posts(&self) -> Result<Vec<InstagramPost>, InstagramError> {
        let token = self
            .access_token
            .as_deref()
            .ok_or(InstagramError::MissingToken)?;

        let response = self
            .http
            .get(format!("{}/me/media", self.base_url))
            .query(&[
                ("fields", MEDIA_FIELDS),
                ("limit", &self.limit.to_string()),
                ("access_token", token),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(InstagramError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let payload: MediaResponse = serde_json::from_str(&body)?;

        if let Some(error) = payload.error {
            return Err(InstagramError::Api(
                error
                    .message
                    .unwrap_or_else(|| "Unknown Instagram API error".to_string()),
            ));
        }

        Ok(payload
            .data
            .unwrap_or_default()
            .into_iter()
            .filter_map(normalize_media)
            .collect())
    }

    /// Fetch posts, folding any failure into the result.
    pub async fn get_posts(&self) -> InstagramPostsResult {
        match self.fetch_posts().await {
            Ok(posts) => InstagramPostsResult { posts, error: None },
            Err(e) => {
                warn!("Instagram feed unavailable: {}", e);
                InstagramPostsResult {
                    posts: Vec::new(),
                    error: Some(e.to_string()),
                }
            }
        }
    }
}

struct CachedPosts {
    fetched_at: Instant,
    result: InstagramPostsResult,
}

/// Instagram posts cached for a fixed time.
pub struct InstagramFeed {
    client: InstagramClient,
    ttl: Duration,
    cached: RwLock<Option<CachedPosts>>,
}

impl InstagramFeed {
    pub fn new(client: InstagramClient, ttl: Duration) -> Self {
        Self {
            client,
            ttl,
            cached: RwLock::new(None),
        }
    }

    /// Cached posts, fetching when the cache is empty or stale.
    ///
    /// Concurrent callers that find the cache stale share a single fetch.
    pub async fn posts(&self) -> InstagramPostsResult {
        if let Some(result) = self.fresh(&*self.cached.read().await) {
            return result;
        }

        let mut cached = self.cached.write().await;
        // Another caller may have refreshed while we waited for the lock
        if let Some(result) = self.fresh(&cached) {
            return result;
        }
        self.fetch_into(&mut cached).await
    }

    /// Fetch now and replace the cache.
    pub async fn refresh(&self) -> InstagramPostsResult {
        let mut cached = self.cached.write().await;
        self.fetch_into(&mut cached).await
    }

    fn fresh(&self, cached: &Option<CachedPosts>) -> Option<InstagramPostsResult> {
        cached
            .as_ref()
            .filter(|c| c.fetched_at.elapsed() < self.ttl)
            .map(|c| c.result.clone())
    }

    async fn fetch_into(&self, slot: &mut Option<CachedPosts>) -> InstagramPostsResult {
        let result = self.client.get_posts().await;
        info!("Instagram feed refreshed ({} posts)", result.posts.len());
        *slot = Some(CachedPosts {
            fetched_at: Instant::now(),
            result: result.clone(),
        });
        result
    }
}
