//
//  upcloud-api
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # HTTP Client for the UpCloud API
//!
//! This module provides the core HTTP client for the UpCloud control plane.
//! It owns the base URL, credentials and default timeout, performs single
//! request/response exchanges, and implements the generic five-verb
//! dispatcher every facade operation goes through.
//!
//! ## Features
//!
//! - HTTP Basic authentication on every control-plane request
//! - JSON serialization/deserialization
//! - Structured errors for non-2xx responses
//! - Cancellation through [`CancellationToken`]
//! - Per-request timeouts
//! - Custom User-Agent header

use std::fmt;
use std::time::{Duration, Instant};

use reqwest::header::{HeaderMap, ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::{Body, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use url::Url;

use crate::api::common::{decode_error_response, Error, Result};
use crate::api::request::{marshal, Request};
use crate::config::Config;

/// Production endpoint of the UpCloud API.
pub const DEFAULT_BASE_URL: &str = "https://api.upcloud.com/1.3";

/// Transport timeout applied when a request does not ask for its own.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Delay between polls in the wait loops.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

const APPLICATION_JSON: &str = "application/json";

fn user_agent() -> String {
    format!("upcloud-api/{}", crate::VERSION)
}

/// Username and password for HTTP Basic authentication.
///
/// The `Debug` implementation never prints the password.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// Creates a credential pair.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// The API username.
    pub fn username(&self) -> &str {
        &self.username
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// A raw HTTP response as returned by the transport.
///
/// Non-2xx statuses are not errors at this layer; callers inspect `status`.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The response headers.
    pub headers: HeaderMap,
    /// The full response body.
    pub body: Vec<u8>,
}

/// The main HTTP client for the UpCloud API.
///
/// A `Client` is created once per session and may be shared between
/// concurrent callers; every operation issues independent requests and the
/// handle holds no state that operations mutate.
///
/// # Creating a Client
///
/// ```rust,no_run
/// use std::time::Duration;
/// use upcloud_api::api::Client;
///
/// let client = Client::new("api-user", "secret")?
///     .with_timeout(Duration::from_secs(30));
/// assert_eq!(client.base_url(), "https://api.upcloud.com/1.3");
/// # Ok::<(), upcloud_api::Error>(())
/// ```
///
/// # Dispatching Requests
///
/// ```rust,no_run
/// use tokio_util::sync::CancellationToken;
/// use upcloud_api::api::Client;
/// use upcloud_api::api::server::DeleteServerRequest;
///
/// # async fn example(client: Client) -> upcloud_api::Result<()> {
/// let ctx = CancellationToken::new();
/// client
///     .delete(&ctx, &DeleteServerRequest { uuid: "00af".to_string() })
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    /// The underlying HTTP client
    http: reqwest::Client,
    /// API root without a trailing slash
    base_url: String,
    /// Basic auth credentials
    credentials: Credentials,
    /// Default per-request timeout
    timeout: Duration,
    /// Delay between wait-loop polls
    poll_interval: Duration,
}

impl Client {
    /// Creates a client targeting the production API.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] if the HTTP client could not be built.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder().build().map_err(Error::Transport)?;

        Ok(Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
            credentials: Credentials::new(username, password),
            timeout: DEFAULT_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
        })
    }

    /// Creates a client from a loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if credentials are missing, the API URL is invalid,
    /// or the timeout or poll interval is zero.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        config.validate()?;
        let credentials = config.credentials()?;
        let client = Self::new(credentials.username, credentials.password)?
            .with_base_url(&config.api_url)?
            .with_timeout(config.timeout())
            .with_poll_interval(config.poll_interval());
        Ok(client)
    }

    /// Points the client at a different API root.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `url` is not an absolute URL.
    pub fn with_base_url(mut self, url: impl AsRef<str>) -> Result<Self> {
        let url = url.as_ref();
        Url::parse(url)
            .map_err(|e| Error::InvalidArgument(format!("invalid base URL {}: {}", url, e)))?;
        self.base_url = url.trim_end_matches('/').to_string();
        Ok(self)
    }

    /// Replaces the underlying HTTP client.
    ///
    /// Headers and authentication are attached per request, so a custom
    /// client needs no special configuration.
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    /// Sets the default per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the delay between wait-loop polls.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Returns the API root used for every control-plane request.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the default per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Changes the default per-request timeout.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    /// Returns the delay between wait-loop polls.
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    fn url_for(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Performs exactly one authenticated exchange with the control plane.
    ///
    /// HTTP error statuses are returned as a [`RawResponse`] so the caller can
    /// decode the payload.
    ///
    /// # Errors
    ///
    /// - [`Error::Canceled`] if `ctx` fires before the response is read
    /// - [`Error::Timeout`] if the exchange exceeds its timeout
    /// - [`Error::Transport`] for network, TLS and DNS failures
    pub async fn exchange(
        &self,
        ctx: &CancellationToken,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
        timeout: Option<Duration>,
    ) -> Result<RawResponse> {
        let url = self.url_for(path);
        let mut request = self
            .http
            .request(method.clone(), &url)
            .basic_auth(&self.credentials.username, Some(&self.credentials.password))
            .header(ACCEPT, APPLICATION_JSON)
            .header(USER_AGENT, user_agent())
            .timeout(timeout.unwrap_or(self.timeout));

        if let Some(body) = body {
            request = request.header(CONTENT_TYPE, APPLICATION_JSON).body(body);
        }

        let started = Instant::now();
        let response = send(ctx, request).await?;
        debug!(
            %method,
            path,
            status = response.status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "api exchange"
        );
        Ok(response)
    }

    /// Streams `body` to a pre-signed URL with HTTP PUT.
    ///
    /// No `Authorization` header is sent: the URL carries its own signature.
    /// No client-side timeout is applied, since uploads may be arbitrarily
    /// large; cancellation still aborts the transfer.
    pub(crate) async fn upload(
        &self,
        ctx: &CancellationToken,
        url: Url,
        content_type: &str,
        body: Body,
    ) -> Result<RawResponse> {
        let host = url.host_str().unwrap_or_default().to_string();
        let request = self
            .http
            .put(url)
            .header(CONTENT_TYPE, content_type)
            .header(USER_AGENT, user_agent())
            .body(body);

        let started = Instant::now();
        let response = send(ctx, request).await?;
        debug!(
            host = %host,
            content_type,
            status = response.status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "direct upload"
        );
        Ok(response)
    }

    async fn dispatch(
        &self,
        ctx: &CancellationToken,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
        timeout: Option<Duration>,
    ) -> Result<Vec<u8>> {
        let response = self.exchange(ctx, method, path, body, timeout).await?;
        if !response.status.is_success() {
            return Err(decode_error_response(response.status, &response.body).into());
        }
        Ok(response.body)
    }

    async fn dispatch_json<R, T>(
        &self,
        ctx: &CancellationToken,
        method: Method,
        req: &R,
        out: &mut T,
    ) -> Result<()>
    where
        R: Request + Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let payload = marshal(req).map_err(Error::Encode)?;
        let body = self
            .dispatch(ctx, method, &req.request_url(), Some(payload), req.timeout())
            .await?;
        decode_into(&body, out)
    }

    /// Fetches a resource with HTTP GET and decodes it into `out`.
    ///
    /// `out` is left untouched on any error and when the body is empty.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use tokio_util::sync::CancellationToken;
    /// use upcloud_api::api::Client;
    /// use upcloud_api::api::server::{GetServerDetailsRequest, ServerDetailsEnvelope};
    ///
    /// # async fn example(client: Client) -> upcloud_api::Result<()> {
    /// let ctx = CancellationToken::new();
    /// let mut out = ServerDetailsEnvelope::default();
    /// client
    ///     .get(&ctx, &GetServerDetailsRequest { uuid: "00af".to_string() }, &mut out)
    ///     .await?;
    /// println!("state: {}", out.server.server.state);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get<R, T>(&self, ctx: &CancellationToken, req: &R, out: &mut T) -> Result<()>
    where
        R: Request + ?Sized,
        T: DeserializeOwned,
    {
        let body = self
            .dispatch(ctx, Method::GET, &req.request_url(), None, req.timeout())
            .await?;
        decode_into(&body, out)
    }

    /// Sends `req` with HTTP POST and decodes the response into `out`.
    ///
    /// Pass a [`serde::de::IgnoredAny`] to discard the response body.
    pub async fn create<R, T>(&self, ctx: &CancellationToken, req: &R, out: &mut T) -> Result<()>
    where
        R: Request + Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.dispatch_json(ctx, Method::POST, req, out).await
    }

    /// Sends `req` with HTTP PUT and decodes the response into `out`.
    pub async fn replace<R, T>(&self, ctx: &CancellationToken, req: &R, out: &mut T) -> Result<()>
    where
        R: Request + Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.dispatch_json(ctx, Method::PUT, req, out).await
    }

    /// Modifies a resource.
    ///
    /// The API implements every current modification as PUT, so this is an
    /// alias of [`Client::replace`].
    pub async fn modify<R, T>(&self, ctx: &CancellationToken, req: &R, out: &mut T) -> Result<()>
    where
        R: Request + Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.replace(ctx, req, out).await
    }

    /// Deletes a resource with HTTP DELETE; any response body is discarded.
    pub async fn delete<R>(&self, ctx: &CancellationToken, req: &R) -> Result<()>
    where
        R: Request + ?Sized,
    {
        self.dispatch(ctx, Method::DELETE, &req.request_url(), None, req.timeout())
            .await?;
        Ok(())
    }
}

/// Sends a prepared request, racing it against `ctx`.
async fn send(ctx: &CancellationToken, request: RequestBuilder) -> Result<RawResponse> {
    let exchange = async {
        let response = request.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();
        Ok::<_, Error>(RawResponse {
            status,
            headers,
            body,
        })
    };

    tokio::select! {
        biased;
        _ = ctx.cancelled() => Err(Error::Canceled),
        result = exchange => result,
    }
}

/// Decodes a 2xx body into `out`, leaving it untouched when the body is empty.
fn decode_into<T: DeserializeOwned>(body: &[u8], out: &mut T) -> Result<()> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(());
    }
    *out = serde_json::from_slice(body).map_err(|e| Error::decode(e, body))?;
    Ok(())
}
