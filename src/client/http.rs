//! HTTP client for Redfish services

use super::Client;
use crate::error::{Error, TransportError};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use std::fmt;
use std::time::Duration;
use url::Url;

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Default request timeout. BMCs can be slow, but not this slow.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Sanitize response body for logging
/// Truncates long responses and drops control characters
fn sanitize_for_log(body: &str) -> String {
    let total = body.chars().count();
    let truncated = if total > MAX_LOG_BODY_LENGTH {
        let head: String = body.chars().take(MAX_LOG_BODY_LENGTH).collect();
        format!("{}... [truncated, {} bytes total]", head, body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// Static HTTP basic credentials.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Connection settings for [`HttpClient`]
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Base endpoint, e.g. `https://10.0.0.2`. Service-relative URIs are
    /// resolved against it.
    pub endpoint: String,
    pub credentials: Option<Credentials>,
    /// Accept self-signed certificates (the norm for BMCs)
    pub accept_invalid_certs: bool,
    pub timeout: Duration,
}

impl HttpConfig {
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            credentials: None,
            accept_invalid_certs: false,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }
}

/// HTTP client wrapper for Redfish API calls
#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    base: Url,
    credentials: Option<Credentials>,
}

impl HttpClient {
    /// Create a new HTTP client
    pub fn new(config: HttpConfig) -> Result<Self, TransportError> {
        let base = Url::parse(&config.endpoint).map_err(|source| TransportError::InvalidUri {
            uri: config.endpoint.clone(),
            source,
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .user_agent(concat!("rfmodel/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            base,
            credentials: config.credentials,
        })
    }

    /// Resolve a service-relative (or absolute) URI against the endpoint
    pub fn resolve(&self, uri: &str) -> Result<Url, TransportError> {
        self.base.join(uri).map_err(|source| TransportError::InvalidUri {
            uri: uri.to_string(),
            source,
        })
    }
}

#[async_trait]
impl Client for HttpClient {
    async fn get(&self, uri: &str) -> Result<Vec<u8>, TransportError> {
        let url = self.resolve(uri)?;
        tracing::debug!("GET {}", url);

        let mut request = self.client.get(url);
        if let Some(credentials) = &self.credentials {
            request = request.basic_auth(&credentials.username, Some(&credentials.password));
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            // Only log sanitized/truncated error body, BMC errors can echo request data
            tracing::error!(
                "Redfish error: {} - {}",
                status,
                sanitize_for_log(&String::from_utf8_lossy(&body))
            );
            return Err(TransportError::Status {
                status: status.as_u16(),
            });
        }

        Ok(body.to_vec())
    }
}

/// Format a Redfish error for display
pub fn format_redfish_error(error: &Error) -> String {
    if let Some(status) = error.status() {
        return match status {
            401 => "Authentication failed. Check the BMC username and password.".to_string(),
            403 => "Permission denied. The account lacks the required Redfish role.".to_string(),
            404 => "Resource not found.".to_string(),
            503 => "Redfish service temporarily unavailable. Please try again.".to_string(),
            _ => format!("Request failed with HTTP {}.", status),
        };
    }

    let error_str = error.to_string();
    let sanitized = error_str
        .chars()
        .filter(|c| c.is_ascii_graphic() || *c == ' ')
        .take(120)
        .collect::<String>();

    if sanitized.len() < error_str.len() {
        format!("{}...", sanitized)
    } else {
        sanitized
    }
}
