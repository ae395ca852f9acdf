//! Router harness with a mocked backend and a cookie jar of one.

#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use legalease_web::config::Settings;
use legalease_web::startup::build_router;
use legalease_web::AppState;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const BOUNDARY: &str = "legalease-test-boundary";

pub fn user_json() -> Value {
    json!({ "id": "u_1", "name": "Ada Lovelace", "email": "ada@example.com" })
}

pub fn document_json(id: &str) -> Value {
    json!({
        "id": id,
        "fileName": "lease.pdf",
        "documentType": "rental",
        "summary": "Twelve month residential lease.",
        "riskClauses": [
            { "clause": "Tenant bears all repairs", "explanation": "Shifts landlord duties", "severity": "high" }
        ],
        "keyTerms": [ { "term": "Monthly rent", "value": "₹25,000" } ],
        "createdAt": "2026-03-05T10:15:30.123456"
    })
}

pub struct TestApp {
    pub backend: MockServer,
    pub router: Router,
    cookie: Option<String>,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let backend = MockServer::start().await;
        let settings = Settings::with_backend(backend.uri());
        Self::with_settings(backend, settings)
    }

    pub fn with_settings(backend: MockServer, settings: Settings) -> Self {
        Self {
            router: build_router(AppState::new(settings)),
            backend,
            cookie: None,
        }
    }

    /// Send a request, carrying the session cookie across calls.
    pub async fn send(&mut self, request: Request<Body>) -> Response {
        let request = match &self.cookie {
            Some(cookie) => {
                let (mut parts, body) = request.into_parts();
                parts
                    .headers
                    .insert(header::COOKIE, cookie.parse().unwrap());
                Request::from_parts(parts, body)
            }
            None => request,
        };

        let response = self.router.clone().oneshot(request).await.unwrap();

        if let Some(set_cookie) = response.headers().get(header::SET_COOKIE) {
            let pair = set_cookie.to_str().unwrap().split(';').next().unwrap();
            self.cookie = Some(pair.to_string());
        }
        response
    }

    pub async fn get(&mut self, uri: &str) -> Response {
        self.send(Request::get(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn post_form(&mut self, uri: &str, form: &[(&str, &str)]) -> Response {
        let body = serde_urlencoded::to_string(form).unwrap();
        self.send(
            Request::post(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
    }

    pub async fn post_file(&mut self, file_name: &str, content_type: &str, bytes: &[u8]) -> Response {
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        self.send(
            Request::post("/upload")
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={BOUNDARY}"),
                )
                .body(Body::from(body))
                .unwrap(),
        )
        .await
    }

    /// Log in as Ada with bearer token `token`.
    pub async fn sign_in(&mut self, token: &str) {
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": "Login successful",
                "user": user_json(),
                "token": token,
            })))
            .mount(&self.backend)
            .await;

        let response = self
            .post_form(
                "/login",
                &[("email", "ada@example.com"), ("password", "hunter22")],
            )
            .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
    }
}

pub fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .expect("redirect has a location")
        .to_str()
        .unwrap()
}

pub async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
