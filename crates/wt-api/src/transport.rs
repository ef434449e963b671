//! The network seam between classification and HTTP.

use std::error::Error as StdError;
use std::fmt;
use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use thiserror::Error;

/// Request timeout for the single API call.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// A fully built action request.
#[derive(Clone)]
pub struct ApiRequest {
    pub url: String,
    pub user_agent: String,
    pub authorization: String,
    pub body: String,
}

impl fmt::Debug for ApiRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiRequest")
            .field("url", &self.url)
            .field("user_agent", &self.user_agent)
            .field("authorization", &"[REDACTED]")
            .field("body", &self.body)
            .finish()
    }
}

/// Status and body of whatever the server answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// What went wrong below the HTTP status level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// The request or client could not be built (e.g. invalid header value).
    Builder,
    Timeout,
    /// DNS resolution or TCP/TLS connection failed.
    Connect,
    Redirect,
    /// The response body could not be read.
    Body,
    Decode,
    Request,
    Other,
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Builder => "builder",
            Self::Timeout => "timeout",
            Self::Connect => "connect",
            Self::Redirect => "redirect",
            Self::Body => "body",
            Self::Decode => "decode",
            Self::Request => "request",
            Self::Other => "other",
        };
        write!(f, "{s}")
    }
}

/// A transport-level failure.
#[derive(Debug, Error)]
#[error("{kind} error: {message}")]
pub struct TransportError {
    pub kind: TransportErrorKind,
    pub message: String,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    #[must_use]
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_builder() {
            TransportErrorKind::Builder
        } else if err.is_timeout() {
            TransportErrorKind::Timeout
        } else if err.is_connect() {
            TransportErrorKind::Connect
        } else if err.is_redirect() {
            TransportErrorKind::Redirect
        } else if err.is_body() {
            TransportErrorKind::Body
        } else if err.is_decode() {
            TransportErrorKind::Decode
        } else if err.is_request() {
            TransportErrorKind::Request
        } else {
            TransportErrorKind::Other
        };
        Self::new(kind, err.to_string()).with_source(err)
    }
}

/// Sends a built request and returns the raw response.
///
/// Any HTTP status is a successful send; only failures to get a complete
/// response are errors.
pub trait Transport {
    fn send(&self, request: &ApiRequest) -> Result<RawResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: &ApiRequest) -> Result<RawResponse, TransportError> {
        (**self).send(request)
    }
}

/// Blocking HTTP transport over reqwest.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::blocking::Client,
}

impl HttpTransport {
    /// Builds the HTTP client.
    ///
    /// Must not be called from inside an async runtime.
    pub fn new() -> Result<Self, TransportError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()?;
        Ok(Self { http })
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: &ApiRequest) -> Result<RawResponse, TransportError> {
        let response = self
            .http
            .post(&request.url)
            .header(USER_AGENT, &request.user_agent)
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, &request.authorization)
            .body(request.body.clone())
            .send()?;

        let status = response.status().as_u16();
        let body = response.text()?;
        Ok(RawResponse { status, body })
    }
}
