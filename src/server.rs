//! HTTP server: page routes, JSON API and the admin refresh endpoint.

use crate::availability::{
    AvailabilityBoard, AvailabilityEngine, AvailabilityStatus, Clock, WeeklySchedule,
};
use crate::config::Config;
use crate::consent::{ConsentAction, ConsentState, CookiePreferences};
use crate::i18n::{DictionarySource, DictionaryStore, SearchParams};
use crate::instagram::{InstagramClient, InstagramFeed, InstagramPostsResult};
use crate::pages::{self, PageContext};
use crate::services::{Service, ServiceCatalog};
use anyhow::{Context, Result};
use axum::{
    extract::{Path, RawQuery, State},
    http::{header, HeaderMap, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{Datelike, Utc};
use std::sync::Arc;
use subtle::ConstantTimeEq;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Shared application state
pub struct AppState {
    pub config: Config,
    pub dictionaries: Arc<DictionaryStore>,
    pub services: ServiceCatalog,
    pub availability: AvailabilityBoard,
    pub instagram: Arc<InstagramFeed>,
}

impl AppState {
    /// Load dictionaries and start the availability refresh.
    ///
    /// Must be called inside a tokio runtime.
    pub fn build(config: Config, clock: Arc<dyn Clock>) -> Result<Self> {
        let source = match &config.locales_dir {
            Some(dir) => DictionarySource::Directory(dir.clone()),
            None => DictionarySource::Embedded,
        };
        let dictionaries = Arc::new(DictionaryStore::new(source));
        dictionaries
            .preload()
            .context("Failed to load locale dictionaries")?;

        let engine = AvailabilityEngine::new(
            WeeklySchedule::shop_hours(),
            config.business_timezone,
            clock,
        );
        let availability = AvailabilityBoard::start(
            engine,
            Arc::clone(&dictionaries),
            config.availability_refresh(),
        );

        let instagram = Arc::new(InstagramFeed::new(
            InstagramClient::from_config(&config),
            config.instagram_ttl(),
        ));

        Ok(Self {
            services: ServiceCatalog::new(Arc::clone(&dictionaries)),
            config,
            dictionaries,
            availability,
            instagram,
        })
    }

    fn page_context(&self, pathname: &str, query: Option<String>, headers: &HeaderMap) -> PageContext {
        let params = SearchParams::from_query(query.as_deref().unwrap_or_default());
        let locale = PageContext::requested_locale(&params);
        let cookie = headers
            .get(header::COOKIE)
            .and_then(|value| value.to_str().ok());

        PageContext {
            locale,
            t: self.dictionaries.translator(locale),
            pathname: pathname.to_string(),
            params,
            site_url: self.config.site_url.clone(),
            availability: self.availability.status(locale),
            consent: ConsentState::from_cookie_header(cookie),
            year: Utc::now()
                .with_timezone(&self.config.business_timezone)
                .year(),
        }
    }
}

/// Build the router with all routes
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/about", get(about))
        .route("/about/kariera", get(careers))
        .route("/pricing", get(pricing))
        .route("/contact", get(contact))
        .route("/services/:slug", get(service_detail))
        .route("/vseobecne-obchodni-podminky", get(terms))
        .route("/blog", get(blog))
        .route("/api/availability", get(availability_api))
        .route("/api/services", get(services_api))
        .route("/api/instagram", get(instagram_api))
        .route("/api/consent", post(consent_api))
        .route("/admin/instagram/refresh", post(refresh_instagram))
        .route("/health", get(health))
        .route("/static/site.css", get(stylesheet))
        .route("/static/consent.js", get(consent_script))
        .route("/static/logo.svg", get(logo))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until the process is stopped
pub async fn serve(state: Arc<AppState>) -> Result<()> {
    let addr = format!("0.0.0.0:{}", state.config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("🚀 Listening on http://{}", addr);
    axum::serve(listener, router(state)).await?;

    Ok(())
}

// ==================== Pages ====================

async fn home(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> Html<String> {
    let ctx = state.page_context("/", query, &headers);
    let services = state.services.services(ctx.locale);
    Html(pages::render_home(&ctx, &services))
}

async fn about(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> Html<String> {
    Html(pages::render_about(&state.page_context("/about", query, &headers)))
}

async fn careers(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> Html<String> {
    Html(pages::render_careers(&state.page_context(
        "/about/kariera",
        query,
        &headers,
    )))
}

async fn pricing(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> Html<String> {
    Html(pages::render_pricing(&state.page_context("/pricing", query, &headers)))
}

async fn contact(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> Html<String> {
    Html(pages::render_contact(&state.page_context("/contact", query, &headers)))
}

async fn service_detail(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    // The raw path stays percent-encoded so a decoded `?` or `#` cannot leak into links
    let ctx = state.page_context(uri.path(), uri.query().map(str::to_string), &headers);

    match state.services.service_by_slug(ctx.locale, &slug) {
        Some(service) => Html(pages::render_service(&ctx, &service)).into_response(),
        None => (StatusCode::NOT_FOUND, Html(pages::render_not_found(&ctx))).into_response(),
    }
}

async fn terms(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> Html<String> {
    Html(pages::render_terms(&state.page_context(
        "/vseobecne-obchodni-podminky",
        query,
        &headers,
    )))
}

async fn blog(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> Html<String> {
    let ctx = state.page_context("/blog", query, &headers);
    let feed = state.instagram.posts().await;
    Html(pages::render_blog(&ctx, &feed))
}

async fn not_found(
    State(state): State<Arc<AppState>>,
    uri: Uri,
    headers: HeaderMap,
) -> (StatusCode, Html<String>) {
    let ctx = state.page_context(uri.path(), uri.query().map(str::to_string), &headers);
    (StatusCode::NOT_FOUND, Html(pages::render_not_found(&ctx)))
}

// ==================== API ====================

async fn availability_api(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> Json<AvailabilityStatus> {
    let params = SearchParams::from_query(query.as_deref().unwrap_or_default());
    Json(state.availability.status(PageContext::requested_locale(&params)))
}

async fn services_api(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> Json<Vec<Service>> {
    let params = SearchParams::from_query(query.as_deref().unwrap_or_default());
    let services = state.services.services(PageContext::requested_locale(&params));
    Json(services.as_ref().clone())
}

async fn instagram_api(State(state): State<Arc<AppState>>) -> Json<InstagramPostsResult> {
    Json(state.instagram.posts().await)
}

async fn consent_api(Json(action): Json<ConsentAction>) -> impl IntoResponse {
    let consent = action.apply();
    (
        [(header::SET_COOKIE, consent.set_cookie_header())],
        Json::<CookiePreferences>(consent.preferences),
    )
}

/// Force an Instagram refresh. Requires the `X-API-Key` header.
async fn refresh_instagram(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let Some(expected) = state.config.api_key.as_deref() else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let provided = headers
        .get("x-api-key")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    // Constant-time comparison
    if !bool::from(provided.as_bytes().ct_eq(expected.as_bytes())) {
        warn!("Rejected Instagram refresh with invalid API key");
        return StatusCode::UNAUTHORIZED.into_response();
    }

    info!("Manual Instagram refresh requested");
    Json(state.instagram.refresh().await).into_response()
}

async fn health() -> &'static str {
    "OK"
}

// ==================== Static assets ====================

async fn stylesheet() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        include_str!("../static/site.css"),
    )
}

async fn consent_script() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/javascript; charset=utf-8")],
        include_str!("../static/consent.js"),
    )
}

async fn logo() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "image/svg+xml")],
        include_str!("../static/logo.svg"),
    )
}
