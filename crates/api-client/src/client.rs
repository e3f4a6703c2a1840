//! API client wrapper

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::config::ClientConfig;
use crate::error::Error;
use crate::request::{default_headers, merge_headers, RequestOptions, CSRF_HEADER};
use crate::response::{RawResponse, Response};

/// Backend endpoint serving the CSRF token
const CSRF_PATH: &str = "/csrf/";

/// Body of the CSRF token endpoint
#[derive(Debug, Deserialize)]
struct CsrfResponse {
    #[serde(rename = "csrfToken", default)]
    csrf_token: String,
}

/// Async client for the backend JSON API
///
/// Stateless apart from its configuration: every call resolves the base URL
/// fresh and makes an independent round trip. The underlying client keeps a
/// cookie store so session cookies are sent on every request.
#[derive(Debug, Clone)]
pub struct ApiClient {
    config: ClientConfig,
    inner: reqwest::Client,
}

impl ApiClient {
    /// Create a new client with a cookie-enabled HTTP transport
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        let inner = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|e| Error::Build(e.to_string()))?;
        Ok(Self { config, inner })
    }

    /// Create an ApiClient from a pre-built reqwest::Client
    ///
    /// The caller is responsible for enabling a cookie store if session
    /// cookies are needed.
    pub fn from_reqwest(client: reqwest::Client, config: ClientConfig) -> Self {
        Self {
            config,
            inner: client,
        }
    }

    /// Build an absolute URL for an API path
    ///
    /// Guarantees exactly one slash between base and path; anything else
    /// (trailing slashes, encoding) is the caller's responsibility.
    pub fn build_url(&self, path: &str) -> Result<String, Error> {
        let base_url = self.config.base_url()?;
        if path.starts_with('/') {
            Ok(format!("{}{}", base_url, path))
        } else {
            Ok(format!("{}/{}", base_url, path))
        }
    }

    /// Fetch the CSRF token from the backend
    ///
    /// Returns an empty string on any failure (missing configuration,
    /// network error, non-2xx status, malformed body). Failures are logged
    /// but never propagated, so the calling request proceeds without the
    /// header and lets the server reject it.
    pub async fn csrf_token(&self) -> String {
        match self.try_csrf_token().await {
            Ok(token) => token,
            Err(err) => {
                tracing::warn!("Failed to fetch CSRF token: {}", err);
                String::new()
            }
        }
    }

    async fn try_csrf_token(&self) -> Result<String, Error> {
        let url = self.build_url(CSRF_PATH)?;
        tracing::debug!("Fetching CSRF token from {}", url);

        let response = self
            .inner
            .get(&url)
            .header("Cache-Control", "no-cache")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(Error::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body: CsrfResponse = response.json().await?;
        Ok(body.csrf_token)
    }

    /// Perform a request with default headers, cookies, and CSRF handling
    ///
    /// Non-GET methods first await a CSRF token; a non-empty token is added
    /// as the `X-CSRFToken` header. Header precedence is defaults, then
    /// caller options, then the CSRF header, last write wins per key.
    ///
    /// Any HTTP status resolves to `Ok`; only network-level failures return
    /// an error.
    pub async fn fetch_with_auth(
        &self,
        url: &str,
        options: RequestOptions,
    ) -> Response<RawResponse> {
        let method = options.method.clone().unwrap_or(Method::GET);

        let defaults = default_headers();
        let mut csrf_layer: Vec<(String, String)> = Vec::new();
        if method != Method::GET {
            let token = self.csrf_token().await;
            if !token.is_empty() {
                csrf_layer.push((CSRF_HEADER.to_string(), token));
            }
        }

        let headers = merge_headers(&[&defaults, &options.headers, &csrf_layer]);

        let mut request = self.inner.request(method, url);
        for (key, value) in &headers {
            request = request.header(key, value);
        }
        if let Some(body) = options.body {
            request = request.body(body);
        }

        let response = request.send().await?;
        Ok(RawResponse::new(response))
    }

    // === Convenience methods ===

    /// GET request to an API path
    pub async fn get(&self, path: &str) -> Response<RawResponse> {
        let url = self.build_url(path)?;
        self.fetch_with_auth(&url, RequestOptions::new()).await
    }

    /// POST request with a JSON-serialized body
    pub async fn post<T: Serialize + ?Sized>(
        &self,
        path: &str,
        data: &T,
    ) -> Response<RawResponse> {
        let url = self.build_url(path)?;
        let options = RequestOptions::new().method(Method::POST).json(data)?;
        self.fetch_with_auth(&url, options).await
    }

    /// PUT request with a JSON-serialized body
    pub async fn put<T: Serialize + ?Sized>(&self, path: &str, data: &T) -> Response<RawResponse> {
        let url = self.build_url(path)?;
        let options = RequestOptions::new().method(Method::PUT).json(data)?;
        self.fetch_with_auth(&url, options).await
    }

    /// DELETE request, sent without a body
    pub async fn delete(&self, path: &str) -> Response<RawResponse> {
        let url = self.build_url(path)?;
        let options = RequestOptions::new().method(Method::DELETE);
        self.fetch_with_auth(&url, options).await
    }
}
