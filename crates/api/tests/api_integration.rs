//! Integration tests for the inventory server.

use std::sync::OnceLock;

use api::config::Config;
use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE};
use axum::http::{Request, Response, StatusCode};
use metrics_exporter_prometheus::PrometheusHandle;
use tower::ServiceExt;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

fn get_metrics_handle() -> PrometheusHandle {
    METRICS_HANDLE
        .get_or_init(|| {
            let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
            builder
                .install_recorder()
                .expect("failed to install Prometheus recorder")
        })
        .clone()
}

fn setup_with(config: Config) -> axum::Router {
    let state = api::create_default_state(&config, get_metrics_handle()).unwrap();
    api::create_app(state)
}

fn setup() -> axum::Router {
    setup_with(Config::default())
}

fn get_page(cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri("/");
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

fn post_form(cookie: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/")
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// Returns the `name=value` part of the session cookie set by a response.
fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}

async fn body_text(response: Response<Body>) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}

/// Opens a session and returns its cookie.
async fn open_session(app: &axum::Router) -> String {
    let response = app.clone().oneshot(get_page(None)).await.unwrap();
    session_cookie(&response).expect("first visit should set a session cookie")
}

const MOUSE_ROW: &str = r#"<td class="fw-semibold">Mouse</td>"#;

const MOUSE: &str = "name=Mouse&description=Wireless&price=19.99&category=Electronics";

#[tokio::test]
async fn test_health_check() {
    let app = setup();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["sessions"], 0);
}

#[tokio::test]
async fn test_first_visit_shows_seed_products_and_sets_cookie() {
    let app = setup();

    let response = app.oneshot(get_page(None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = session_cookie(&response).unwrap();
    assert!(cookie.starts_with("inventory_session="));

    let html = body_text(response).await;
    assert!(html.contains("Laptop"));
    assert!(html.contains("Coffee Maker"));
    assert!(html.contains("899.99"));
    assert!(!html.contains("alert-success"));
}

#[tokio::test]
async fn test_known_session_gets_no_new_cookie() {
    let app = setup();
    let cookie = open_session(&app).await;

    let response = app.oneshot(get_page(Some(&cookie))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(SET_COOKIE).is_none());
}

#[tokio::test]
async fn test_valid_submission_redirects_and_flashes_once() {
    let app = setup();
    let cookie = open_session(&app).await;

    let response = app
        .clone()
        .oneshot(post_form(Some(&cookie), MOUSE))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(LOCATION).unwrap(), "/");
    assert!(body_text(response).await.is_empty());

    let response = app
        .clone()
        .oneshot(get_page(Some(&cookie)))
        .await
        .unwrap();
    let html = body_text(response).await;
    assert!(html.contains("Product added successfully!"));
    assert!(html.contains(MOUSE_ROW));
    assert!(html.contains("<td>3</td>"));

    let response = app.oneshot(get_page(Some(&cookie))).await.unwrap();
    let html = body_text(response).await;
    assert!(!html.contains("Product added successfully!"));
    assert!(html.contains(MOUSE_ROW));
}

#[tokio::test]
async fn test_invalid_submission_rerenders_with_errors() {
    let app = setup();
    let cookie = open_session(&app).await;

    let response = app
        .clone()
        .oneshot(post_form(
            Some(&cookie),
            "name=++Mouse+&description=&price=abc&category=Books",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(LOCATION).is_none());

    let html = body_text(response).await;
    assert!(html.contains("There are 2 errors in the form."));
    assert!(html.contains("Please add a short description."));
    assert!(html.contains("Price must be a positive number."));
    assert!(html.contains(r#"value="Mouse""#));
    assert!(html.contains(r#"value="abc""#));
    assert!(html.contains(r#"<option value="Books" selected>"#));
    assert!(!html.contains("<td>3</td>"));
}

#[tokio::test]
async fn test_missing_name_scenario_keeps_store_unchanged() {
    let app = setup();
    let cookie = open_session(&app).await;

    let response = app
        .clone()
        .oneshot(post_form(
            Some(&cookie),
            "name=&description=x&price=5&category=Books",
        ))
        .await
        .unwrap();
    let html = body_text(response).await;
    assert!(html.contains("There is 1 error in the form."));
    assert!(html.contains("Please enter a product name."));

    let response = app.oneshot(get_page(Some(&cookie))).await.unwrap();
    let html = body_text(response).await;
    assert!(html.contains("<td>2</td>"));
    assert!(!html.contains("<td>3</td>"));
}

#[tokio::test]
async fn test_missing_form_fields_are_treated_as_empty() {
    let app = setup();

    let response = app.oneshot(post_form(None, "")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("There are 4 errors in the form."));
    assert!(html.contains("Choose a category."));
}

#[tokio::test]
async fn test_submission_without_cookie_starts_a_session() {
    let app = setup();

    let response = app.clone().oneshot(post_form(None, MOUSE)).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let cookie = session_cookie(&response).unwrap();

    let response = app.oneshot(get_page(Some(&cookie))).await.unwrap();
    let html = body_text(response).await;
    assert!(html.contains("Product added successfully!"));
    assert!(html.contains(MOUSE_ROW));
}

#[tokio::test]
async fn test_sessions_are_isolated() {
    let app = setup();
    let alice = open_session(&app).await;
    let bob = open_session(&app).await;

    app.clone()
        .oneshot(post_form(Some(&alice), MOUSE))
        .await
        .unwrap();

    let response = app.oneshot(get_page(Some(&bob))).await.unwrap();
    let html = body_text(response).await;
    assert!(!html.contains(MOUSE_ROW));
    assert!(!html.contains("Product added successfully!"));
}

#[tokio::test]
async fn test_user_input_is_escaped() {
    let app = setup();
    let cookie = open_session(&app).await;

    app.clone()
        .oneshot(post_form(
            Some(&cookie),
            "name=%3Cscript%3Ealert(1)%3C%2Fscript%3E&description=Bad&price=1&category=Other",
        ))
        .await
        .unwrap();

    let response = app.oneshot(get_page(Some(&cookie))).await.unwrap();
    let html = body_text(response).await;
    assert!(!html.contains("<script>alert(1)"));
    assert!(html.contains("&lt;script&gt;"));
}

#[tokio::test]
async fn test_unlisted_category_is_accepted_by_default() {
    let app = setup();

    let response = app
        .oneshot(post_form(
            None,
            "name=Apples&description=Red&price=2&category=Groceries",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_strict_categories_reject_unlisted_category() {
    let app = setup_with(Config {
        strict_categories: true,
        ..Config::default()
    });

    let response = app
        .oneshot(post_form(
            None,
            "name=Apples&description=Red&price=2&category=Groceries",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Choose a category from the list."));
}

#[tokio::test]
async fn test_full_session_store_returns_service_unavailable() {
    let app = setup_with(Config {
        max_sessions: 1,
        ..Config::default()
    });
    open_session(&app).await;

    let response = app.oneshot(get_page(None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let app = setup();
    open_session(&app).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/metrics")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers().get(CONTENT_TYPE).unwrap();
    assert!(content_type.to_str().unwrap().starts_with("text/plain"));
}
