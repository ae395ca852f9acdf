use axum::http::HeaderValue;
use axum::{extract::Request, middleware::Next, response::Response};
use legalease_core::observability::REQUEST_ID_HEADER;
use uuid::Uuid;

/// Tag the request and its response with `x-request-id`, minting one when
/// the caller sent none. Handlers forward it to the backend.
pub async fn request_id_middleware(mut req: Request, next: Next) -> Response {
    let request_id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .filter(|value| !value.is_empty())
        .cloned()
        .or_else(|| HeaderValue::from_str(&Uuid::new_v4().to_string()).ok());

    if let Some(value) = &request_id {
        req.headers_mut().insert(REQUEST_ID_HEADER, value.clone());
    }

    let mut response = next.run(req).await;

    if let Some(value) = request_id {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}
