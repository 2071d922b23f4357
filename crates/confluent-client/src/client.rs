//! Shared HTTP client for the Confluent REST APIs
//!
//! One [`Client`] serves every resource manager. It owns the base URL and
//! credentials, applies basic auth and JSON headers to each request, and
//! turns error responses into structured [`ApiError`] values at this single
//! boundary, so downstream code never inspects raw status codes.

use std::sync::Arc;
use std::time::Duration;

use confluent_core::ApiError;
use reqwest::header::{HeaderMap, ACCEPT, RETRY_AFTER};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::error::{ClientError, Result};

/// Configuration for the REST client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the API, e.g. `https://api.confluent.cloud`.
    pub base_url: String,
    /// Cloud API key used as the basic-auth username.
    pub api_key: String,
    /// Cloud API secret used as the basic-auth password.
    pub api_secret: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// User-Agent header value.
    pub user_agent: String,
}

impl ClientConfig {
    /// Create a configuration with the default timeout and user agent.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            timeout: Duration::from_secs(30),
            user_agent: default_user_agent(),
        }
    }

    /// Build a configuration from `CONFLUENT_BASE_URL`, `CONFLUENT_API_KEY`,
    /// `CONFLUENT_API_SECRET`, and optionally `CONFLUENT_TIMEOUT` (seconds).
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("CONFLUENT_BASE_URL")
            .map_err(|_| ClientError::InvalidConfig("CONFLUENT_BASE_URL is not set".into()))?;
        let api_key = std::env::var("CONFLUENT_API_KEY")
            .map_err(|_| ClientError::InvalidConfig("CONFLUENT_API_KEY is not set".into()))?;
        let api_secret = std::env::var("CONFLUENT_API_SECRET")
            .map_err(|_| ClientError::InvalidConfig("CONFLUENT_API_SECRET is not set".into()))?;
        let timeout_secs = std::env::var("CONFLUENT_TIMEOUT")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(30);

        Ok(Self {
            base_url,
            api_key,
            api_secret,
            timeout: Duration::from_secs(timeout_secs),
            user_agent: default_user_agent(),
        })
    }

    /// Override the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the User-Agent header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

fn default_user_agent() -> String {
    format!(
        "confluent-client/{} ({}; {})",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}

/// An HTTP request to the Confluent API.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    /// Path relative to the base URL, e.g. `/cmk/v2/clusters`.
    pub path: String,
    /// Query parameters, percent-encoded on send.
    pub query: Vec<(String, String)>,
    /// JSON body, when the method carries one.
    pub body: Option<Value>,
}

impl Request {
    /// Create a request with no query parameters or body.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    /// Append a query parameter.
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Attach a JSON body.
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// An HTTP response from the Confluent API, always with status < 400.
#[derive(Debug)]
pub struct Response {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl Response {
    /// Decode the response body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}

/// REST client for Confluent Cloud and Platform APIs.
///
/// Cheap to clone; every clone shares the same connection pool and
/// configuration.
#[derive(Debug, Clone)]
pub struct Client {
    config: Arc<ClientConfig>,
    http: reqwest::Client,
}

impl Client {
    /// Create a new client, validating the configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        if config.base_url.is_empty() {
            return Err(ClientError::InvalidConfig("base_url is required".into()));
        }
        if config.api_key.is_empty() {
            return Err(ClientError::InvalidConfig("api_key is required".into()));
        }
        if config.api_secret.is_empty() {
            return Err(ClientError::InvalidConfig("api_secret is required".into()));
        }
        Url::parse(&config.base_url)?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            config: Arc::new(config),
            http,
        })
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Execute a request against the API.
    ///
    /// Statuses below 400 return the raw [`Response`] for typed decoding;
    /// everything else is parsed into an [`ApiError`], capturing the
    /// `Retry-After` header when present.
    pub async fn send(&self, request: Request) -> Result<Response> {
        let url = format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            request.path.trim_start_matches('/')
        );

        debug!(method = %request.method, path = %request.path, "sending api request");

        let mut builder = self
            .http
            .request(request.method, &url)
            .basic_auth(&self.config.api_key, Some(&self.config.api_secret))
            .header(ACCEPT, "application/json");

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();

        if status >= 400 {
            let retry_after = headers
                .get(RETRY_AFTER)
                .and_then(|value| value.to_str().ok());
            let api_error = ApiError::from_response(status, &body, retry_after);
            warn!(status, code = %api_error.code, "api request failed");
            return Err(ClientError::Api(api_error));
        }

        Ok(Response {
            status,
            headers,
            body,
        })
    }
}
