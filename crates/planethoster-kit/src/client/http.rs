//! Low-level HTTP layer: request construction, execution and decoding.

use std::fmt;
use std::time::Duration;

use reqwest::header;
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, trace, warn};

use crate::error::Error;
use crate::types::{ApiResponse, Params};

/// Production endpoint of the reseller API.
pub const DEFAULT_BASE_URL: &str = "https://api.planethoster.net";

/// Per-request timeout used unless configured otherwise.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// `User-Agent` sent with every request.
pub const USER_AGENT: &str = concat!("planethoster-kit/", env!("CARGO_PKG_VERSION"));

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// API key and API user, sent as `api_key` / `api_user` on every request.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    api_key: String,
    api_user: String,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, api_user: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_user: api_user.into(),
        }
    }

    pub fn api_user(&self) -> &str {
        &self.api_user
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("api_user", &self.api_user)
            .finish()
    }
}

/// Low-level client for the reseller API.
///
/// Builds form-encoded requests carrying the credentials, sends them with a
/// per-request timeout and decodes JSON bodies. Holds no per-request state.
#[derive(Debug, Clone)]
pub struct HttpClient {
    base_url: String,
    credentials: Credentials,
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpClient {
    /// Create a client.
    ///
    /// `accept_invalid_certs` disables TLS certificate validation and should
    /// only be used against test servers.
    pub fn new(
        base_url: impl Into<String>,
        credentials: Credentials,
        timeout: Duration,
        accept_invalid_certs: bool,
    ) -> Result<Self, Error> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        if accept_invalid_certs {
            warn!(base_url = %base_url, "TLS certificate validation is disabled");
        }

        let client = reqwest::Client::builder()
            .danger_accept_invalid_certs(accept_invalid_certs)
            .build()?;

        Ok(Self {
            base_url,
            credentials,
            client,
            timeout,
        })
    }

    /// The base URL, without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Change the per-request timeout for subsequent requests.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    /// Resolve `path` against the base URL.
    fn endpoint_url(&self, path: &str) -> Result<Url, Error> {
        if !path.starts_with('/') {
            return Err(Error::InvalidRequest(format!(
                "path must start with '/': {path:?}"
            )));
        }
        let raw = format!("{}{}", self.base_url, path);
        Url::parse(&raw).map_err(|e| Error::InvalidRequest(format!("{raw}: {e}")))
    }

    /// Encode the credentials followed by `params` as a form body.
    fn encode_body(&self, params: &Params) -> Result<String, Error> {
        let mut pairs: Vec<(&str, &str)> = Vec::with_capacity(params.len() + 2);
        pairs.push(("api_key", self.credentials.api_key.as_str()));
        pairs.push(("api_user", self.credentials.api_user.as_str()));
        pairs.extend(params.pairs());

        serde_urlencoded::to_string(&pairs).map_err(|e| Error::InvalidRequest(e.to_string()))
    }

    /// Build a fully formed request without sending it.
    pub fn build_request(
        &self,
        method: Method,
        path: &str,
        params: &Params,
    ) -> Result<reqwest::Request, Error> {
        let url = self.endpoint_url(path)?;
        let body = self.encode_body(params)?;

        self.client
            .request(method, url)
            .header(header::CONTENT_TYPE, FORM_CONTENT_TYPE)
            .header(header::USER_AGENT, USER_AGENT)
            .timeout(self.timeout)
            .body(body)
            .build()
            .map_err(|e| Error::InvalidRequest(e.to_string()))
    }

    /// Send a request and decode the full body as `R`.
    ///
    /// The HTTP status is logged but not interpreted: the API reports
    /// failures in the body.
    pub async fn execute<R: DeserializeOwned>(&self, request: reqwest::Request) -> Result<R, Error> {
        let method = request.method().clone();
        let path = request.url().path().to_string();
        debug!(%method, %path, "sending request");

        let response = self.client.execute(request).await?;
        let status = response.status();
        let body = response.bytes().await?;

        debug!(%method, %path, status = status.as_u16(), bytes = body.len(), "received response");
        trace!(body = %String::from_utf8_lossy(&body), "response body");

        decode(status.as_u16(), &body)
    }

    /// Build, send, decode and apply the envelope check.
    pub async fn call<R: ApiResponse>(
        &self,
        method: Method,
        path: &str,
        params: &Params,
    ) -> Result<R, Error> {
        let request = self.build_request(method, path, params)?;
        let result: R = self.execute(request).await?;
        result.check()
    }
}

/// Decode a response body.
pub(crate) fn decode<R: DeserializeOwned>(status: u16, body: &[u8]) -> Result<R, Error> {
    serde_json::from_slice(body).map_err(|e| Error::decode(status, body, e))
}
