//! Integration tests for the EURO MOTORS website
//!
//! These tests build the full application state with a fixed clock and drive
//! the router directly, so every page, API endpoint and the admin refresh are
//! exercised without binding a socket. The Instagram Graph API is mocked.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use chrono::{TimeZone, Utc};
use euromotors_web::availability::FixedClock;
use euromotors_web::config::Config;
use euromotors_web::server::{router, AppState};
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

// ==================== Test Helpers ====================

/// Wednesday 2024-07-10, 10:00 in Prague.
fn open_clock() -> Arc<FixedClock> {
    Arc::new(FixedClock(
        Utc.with_ymd_and_hms(2024, 7, 10, 8, 0, 0).unwrap(),
    ))
}

/// Wednesday 2024-07-10, 20:00 in Prague.
fn closed_clock() -> Arc<FixedClock> {
    Arc::new(FixedClock(
        Utc.with_ymd_and_hms(2024, 7, 10, 18, 0, 0).unwrap(),
    ))
}

fn test_config(instagram_base: &str) -> Config {
    Config {
        instagram_api_base: instagram_base.to_string(),
        instagram_access_token: Some("test-instagram-token".to_string()),
        api_key: Some("test-api-key".to_string()),
        ..Default::default()
    }
}

fn app_with(config: Config, clock: Arc<FixedClock>) -> axum::Router {
    let state = AppState::build(config, clock).expect("Failed to build state");
    router(Arc::new(state))
}

fn app() -> axum::Router {
    app_with(
        Config {
            api_key: Some("test-api-key".to_string()),
            ..Default::default()
        },
        open_clock(),
    )
}

async fn get(app: axum::Router, uri: &str) -> Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}

fn media_payload() -> serde_json::Value {
    serde_json::json!({
        "data": [
            {
                "id": "1789",
                "caption": "Nové pneumatiky na zimu",
                "media_type": "IMAGE",
                "media_url": "https://cdn.example.com/1789.jpg",
                "permalink": "https://www.instagram.com/p/1789/",
                "timestamp": "2024-05-01T10:00:00+0000",
                "username": "euromotorscz"
            }
        ]
    })
}

// ==================== Page Tests ====================

#[tokio::test]
async fn test_every_page_renders() {
    let app = app();
    for uri in [
        "/",
        "/about",
        "/about/kariera",
        "/pricing",
        "/contact",
        "/vseobecne-obchodni-podminky",
        "/services/pneuservis",
    ] {
        let response = get(app.clone(), uri).await;
        assert_eq!(response.status(), StatusCode::OK, "{}", uri);
        let html = body_text(response).await;
        assert!(html.starts_with("<!DOCTYPE html>"), "{}", uri);
        assert!(html.contains("<html lang=\"cs-CZ\">"), "{}", uri);
    }
}

#[tokio::test]
async fn test_home_page_uses_requested_locale() {
    let html = body_text(get(app(), "/?lang=en").await).await;
    assert!(html.contains("<html lang=\"en\">"));
    assert!(html.contains("Open now"));
    assert!(html.contains("href=\"/pricing?lang=en\""));
}

#[tokio::test]
async fn test_unknown_locale_falls_back_to_czech() {
    let html = body_text(get(app(), "/?lang=fr").await).await;
    assert!(html.contains("<html lang=\"cs-CZ\">"));
    assert!(html.contains("Otevřeno"));
}

#[tokio::test]
async fn test_closed_shop_shows_next_opening() {
    let app = app_with(Config::default(), closed_clock());
    let html = body_text(get(app, "/?lang=en").await).await;
    assert!(html.contains("opens tomorrow at 09:00"));
}

#[tokio::test]
async fn test_service_page_is_localized() {
    let response = get(app(), "/services/pneuservis?lang=de").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("<title>Reifenservice | EURO MOTORS</title>"));
}

#[tokio::test]
async fn test_unknown_service_is_not_found() {
    let response = get(app(), "/services/no-such-service").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let html = body_text(response).await;
    assert!(html.contains("Stránka nenalezena"));
}

#[tokio::test]
async fn test_encoded_query_in_service_slug_stays_in_path() {
    let response = get(app(), "/services/x%3Flang%3Dde?lang=en").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let html = body_text(response).await;

    assert!(html.contains(
        "<link rel=\"canonical\" href=\"https://euromotors.cz/services/x%3Flang%3Dde?lang=en\">"
    ));
    assert!(html.contains("href=\"/services/x%3Flang%3Dde?lang=de\""));
    assert!(!html.contains("?lang=de?"));
    assert!(!html.contains("?lang=en?"));
}

#[tokio::test]
async fn test_unknown_route_renders_not_found_page() {
    let response = get(app(), "/nowhere?lang=uk").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let html = body_text(response).await;
    assert!(html.contains("<html lang=\"uk\">"));
    assert!(html.contains("href=\"/contact?lang=uk\""));
}

// ==================== Blog Tests ====================

#[tokio::test]
async fn test_blog_lists_instagram_posts() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/me/media"))
        .and(query_param("access_token", "test-instagram-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(media_payload()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let app = app_with(test_config(&mock_server.uri()), open_clock());

    let html = body_text(get(app.clone(), "/blog").await).await;
    assert!(html.contains("Nové pneumatiky na zimu"));
    assert!(html.contains("1. května 2024"));

    // Second request is served from the cache
    let html = body_text(get(app, "/blog?lang=en").await).await;
    assert!(html.contains("May 1, 2024"));
}

#[tokio::test]
async fn test_blog_without_token_shows_error_detail() {
    let html = body_text(get(app(), "/blog").await).await;
    assert!(html.contains("class=\"error\""));
    assert!(html.contains("INSTAGRAM_ACCESS_TOKEN is not set"));
}

// ==================== API Tests ====================

#[tokio::test]
async fn test_availability_api() {
    let json = body_json(get(app(), "/api/availability?lang=en").await).await;
    assert_eq!(json["isOpen"], true);
    assert_eq!(json["label"], "Open now");
    assert_eq!(json["detail"], "closes today at 19:00");
}

#[tokio::test]
async fn test_availability_api_defaults_to_czech() {
    let json = body_json(get(app(), "/api/availability").await).await;
    assert_eq!(json["label"], "Otevřeno");
}

#[tokio::test]
async fn test_services_api() {
    let json = body_json(get(app(), "/api/services?lang=ru").await).await;
    let services = json.as_array().unwrap();
    assert_eq!(services.len(), 6);
    assert_eq!(services[0]["slug"], "autoservis");
    assert_eq!(services[0]["title"], "Автосервис");
}

#[tokio::test]
async fn test_instagram_api_reports_upstream_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/me/media"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "error": { "message": "Invalid OAuth access token." }
        })))
        .mount(&mock_server)
        .await;

    let app = app_with(test_config(&mock_server.uri()), open_clock());
    let json = body_json(get(app, "/api/instagram").await).await;

    assert_eq!(json["posts"].as_array().unwrap().len(), 0);
    assert_eq!(json["error"], "Invalid OAuth access token.");
}

#[tokio::test]
async fn test_instagram_api_returns_posts() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/me/media"))
        .respond_with(ResponseTemplate::new(200).set_body_json(media_payload()))
        .mount(&mock_server)
        .await;

    let app = app_with(test_config(&mock_server.uri()), open_clock());
    let json = body_json(get(app, "/api/instagram").await).await;

    assert_eq!(json["posts"][0]["id"], "1789");
    assert_eq!(json["posts"][0]["captionPreview"], "Nové pneumatiky na zimu");
    assert!(json.get("error").is_none());
}

// ==================== Consent Tests ====================

#[tokio::test]
async fn test_consent_sets_cookie_and_hides_banner() {
    let app = app();

    let html = body_text(get(app.clone(), "/").await).await;
    assert!(html.contains("cookie-banner"));

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/consent")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"action":"save","analytics":true}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.starts_with("euromotors.cookie-preferences="));
    assert!(set_cookie.contains("SameSite=Lax"));

    let json = body_json(response).await;
    assert_eq!(json["necessary"], true);
    assert_eq!(json["analytics"], true);
    assert_eq!(json["marketing"], false);

    let cookie = set_cookie.split(';').next().unwrap().to_string();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/")
                .header(header::COOKIE, cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let html = body_text(response).await;
    assert!(!html.contains("cookie-banner"));
}

#[tokio::test]
async fn test_consent_rejects_unknown_action() {
    let response = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/consent")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"action":"maybe"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}

// ==================== Admin Tests ====================

fn refresh_request(key: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/admin/instagram/refresh");
    if let Some(key) = key {
        builder = builder.header("x-api-key", key);
    }
    builder.body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_admin_refresh_hidden_without_api_key() {
    let app = app_with(Config::default(), open_clock());
    let response = app.oneshot(refresh_request(Some("anything"))).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_refresh_rejects_wrong_key() {
    let response = app().oneshot(refresh_request(Some("wrong"))).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app().oneshot(refresh_request(None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_refresh_bypasses_cache() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/me/media"))
        .respond_with(ResponseTemplate::new(200).set_body_json(media_payload()))
        .expect(2)
        .mount(&mock_server)
        .await;

    let app = app_with(test_config(&mock_server.uri()), open_clock());

    let response = get(app.clone(), "/api/instagram").await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(refresh_request(Some("test-api-key")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["posts"][0]["id"], "1789");
}

// ==================== Misc Tests ====================

#[tokio::test]
async fn test_health() {
    let response = get(app(), "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "OK");
}

#[tokio::test]
async fn test_static_assets_have_content_types() {
    let app = app();
    for (uri, content_type) in [
        ("/static/site.css", "text/css"),
        ("/static/consent.js", "text/javascript"),
        ("/static/logo.svg", "image/svg+xml"),
    ] {
        let response = get(app.clone(), uri).await;
        assert_eq!(response.status(), StatusCode::OK, "{}", uri);
        let value = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
        assert!(value.starts_with(content_type), "{}: {}", uri, value);
    }
}
