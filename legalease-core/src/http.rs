//! Outbound HTTP to the document-analysis backend.

use std::sync::Arc;
use std::time::Instant;

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::error::{classify, ClientError, Operation};
use crate::observability::trace_context::{inject_trace_context, REQUEST_ID_HEADER};

/// Where the client reads the bearer token from, once per request.
pub trait TokenSource: Send + Sync {
    fn bearer_token(&self) -> Option<String>;
}

/// A token source that never has a token.
pub struct Anonymous;

impl TokenSource for Anonymous {
    fn bearer_token(&self) -> Option<String> {
        None
    }
}

/// Backend client. Attaches `Authorization: Bearer` from its [`TokenSource`]
/// at the moment each request is built.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn TokenSource>,
    request_id: Option<String>,
}

impl ApiClient {
    pub fn new(
        http: reqwest::Client,
        base_url: impl Into<String>,
        tokens: Arc<dyn TokenSource>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http,
            base_url,
            tokens,
            request_id: None,
        }
    }

    /// Tag outbound requests with the inbound request's correlation id.
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut headers = HeaderMap::new();
        inject_trace_context(&mut headers);
        if let Some(value) = self
            .request_id
            .as_deref()
            .and_then(|id| HeaderValue::from_str(id).ok())
        {
            headers.insert(REQUEST_ID_HEADER, value);
        }

        let builder = self.http.request(method, self.url(path)).headers(headers);
        match self.tokens.bearer_token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub fn get(&self, path: &str) -> RequestBuilder {
        self.request(Method::GET, path)
    }

    pub fn post(&self, path: &str) -> RequestBuilder {
        self.request(Method::POST, path)
    }

    pub fn delete(&self, path: &str) -> RequestBuilder {
        self.request(Method::DELETE, path)
    }

    /// Send and turn any non-2xx status into a [`ClientError`].
    pub async fn send(
        &self,
        operation: Operation,
        builder: RequestBuilder,
    ) -> Result<Response, ClientError> {
        let started = Instant::now();

        let response = builder.send().await.map_err(|e| {
            tracing::error!(operation = operation.as_str(), error = %e, "Backend request failed");
            ClientError::Network(
                "Could not reach the server. Check your connection and try again.".to_string(),
            )
        })?;

        let status = response.status();
        tracing::debug!(
            operation = operation.as_str(),
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Backend responded"
        );

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let err = classify(operation, status, &body);
        tracing::warn!(
            operation = operation.as_str(),
            status = status.as_u16(),
            error = %err,
            "Backend rejected request"
        );
        Err(err)
    }

    pub async fn send_json<T: DeserializeOwned>(
        &self,
        operation: Operation,
        builder: RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = self.send(operation, builder).await?;
        response.json::<T>().await.map_err(|e| {
            tracing::error!(operation = operation.as_str(), error = %e, "Malformed backend response");
            ClientError::Decode("The server sent a response we could not read.".to_string())
        })
    }
}
