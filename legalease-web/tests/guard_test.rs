mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{body_text, document_json, location, user_json, TestApp};
use legalease_core::routing::ReturnPolicy;
use legalease_web::config::Settings;
use wiremock::matchers::{any, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn protected_pages_redirect_anonymous_visitors_to_login() {
    let mut app = TestApp::spawn().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.backend)
        .await;

    for page in ["/upload", "/result/doc_1", "/history"] {
        let response = app.get(page).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{page}");
        assert_eq!(location(&response), "/login", "{page}");
    }
}

#[tokio::test]
async fn htmx_delete_without_session_gets_client_redirect() {
    let mut app = TestApp::spawn().await;

    let response = app
        .send(
            Request::delete("/history/doc_1")
                .header("HX-Request", "true")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["hx-redirect"], "/login");
}

#[tokio::test]
async fn public_pages_render_without_session() {
    let mut app = TestApp::spawn().await;

    for page in ["/", "/login", "/register"] {
        let response = app.get(page).await;
        assert_eq!(response.status(), StatusCode::OK, "{page}");
    }

    let response = app.get("/health").await;
    assert_eq!(body_text(response).await, "OK");
}

#[tokio::test]
async fn unknown_path_renders_not_found_page() {
    let mut app = TestApp::spawn().await;

    let response = app.get("/no/such/page").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("Page not found"));
}

#[tokio::test]
async fn responses_carry_request_id_and_hardening_headers() {
    let mut app = TestApp::spawn().await;

    let response = app
        .send(
            Request::get("/")
                .header("x-request-id", "req-42")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

    assert_eq!(response.headers()["x-request-id"], "req-42");
    assert_eq!(response.headers()["x-content-type-options"], "nosniff");
    assert_eq!(response.headers()["x-frame-options"], "DENY");
}

#[tokio::test]
async fn fixed_default_policy_always_lands_on_upload() {
    let mut app = TestApp::spawn().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "user": user_json(),
            "token": "tok_1",
        })))
        .mount(&app.backend)
        .await;

    let response = app
        .post_form(
            "/login",
            &[
                ("email", "ada@example.com"),
                ("password", "hunter22"),
                ("next", "/history"),
            ],
        )
        .await;

    assert_eq!(location(&response), "/upload");
}

#[tokio::test]
async fn preserve_deep_link_policy_returns_to_requested_page() {
    let backend = MockServer::start().await;
    let mut settings = Settings::with_backend(backend.uri());
    settings.navigation.return_policy = ReturnPolicy::PreserveDeepLink;
    let mut app = TestApp::with_settings(backend, settings);

    let response = app.get("/result/doc_1?tab=risks").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let login_url = location(&response).to_string();
    assert_eq!(login_url, "/login?next=%2Fresult%2Fdoc_1%3Ftab%3Drisks");

    let page = body_text(app.get(&login_url).await).await;
    assert!(page.contains(r#"name="next""#));
    assert!(page.contains("doc_1?tab=risks"));

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "user": user_json(),
            "token": "tok_1",
        })))
        .mount(&app.backend)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/document/doc_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(document_json("doc_1")))
        .mount(&app.backend)
        .await;

    let response = app
        .post_form(
            "/login",
            &[
                ("email", "ada@example.com"),
                ("password", "hunter22"),
                ("next", "/result/doc_1?tab=risks"),
            ],
        )
        .await;
    assert_eq!(location(&response), "/result/doc_1?tab=risks");

    let response = app.get("/result/doc_1?tab=risks").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn preserve_deep_link_policy_ignores_external_targets() {
    let backend = MockServer::start().await;
    let mut settings = Settings::with_backend(backend.uri());
    settings.navigation.return_policy = ReturnPolicy::PreserveDeepLink;
    let mut app = TestApp::with_settings(backend, settings);
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "user": user_json(),
            "token": "tok_1",
        })))
        .mount(&app.backend)
        .await;

    let response = app
        .post_form(
            "/login",
            &[
                ("email", "ada@example.com"),
                ("password", "hunter22"),
                ("next", "https://evil.example/phish"),
            ],
        )
        .await;

    assert_eq!(location(&response), "/upload");
}
