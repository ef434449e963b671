//! Sending one event and classifying the outcome.

use std::error::Error as StdError;

use reqwest::StatusCode;
use tracing::{debug, error};
use wt_core::{Event, ProjectContext};

use crate::credentials::Credentials;
use crate::payload::ActionPayload;
use crate::transport::{ApiRequest, RawResponse, Transport, TransportErrorKind};
use crate::{CLIENT_NAME, CLIENT_VERSION, DEFAULT_API_URL};

/// Outcome of a single submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionResult {
    /// The API answered with a 2xx status.
    Success { status: u16, body: String },
    /// The API answered with any other status.
    Rejected { status: u16, body: String },
    /// No complete response was received.
    Failed {
        kind: TransportErrorKind,
        message: String,
    },
}

impl SubmissionResult {
    /// Classifies a complete HTTP response by status.
    pub fn classify(status: u16, body: String) -> Self {
        if (200..300).contains(&status) {
            Self::Success { status, body }
        } else {
            Self::Rejected { status, body }
        }
    }

    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Platform description for the User-Agent, e.g. `linux-x86_64`.
pub fn platform() -> String {
    format!("{}-{}", std::env::consts::OS, std::env::consts::ARCH)
}

/// Client identification header value.
///
/// `wakatime/<version> (<platform>)`, followed by the plugin identity when
/// one was given.
pub fn user_agent(plugin: Option<&str>) -> String {
    let agent = format!("{CLIENT_NAME}/{CLIENT_VERSION} ({})", platform());
    match plugin.map(str::trim).filter(|p| !p.is_empty()) {
        Some(plugin) => format!("{agent} {plugin}"),
        None => agent,
    }
}

/// Submits activity events to the API, one request per call.
///
/// No retries: a failed event is reported back to the caller.
#[derive(Debug)]
pub struct Submitter<T> {
    transport: T,
    endpoint: String,
}

impl<T: Transport> Submitter<T> {
    /// Creates a submitter targeting [`DEFAULT_API_URL`].
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            endpoint: DEFAULT_API_URL.to_string(),
        }
    }

    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Sends `event` with its project context and classifies the response.
    pub fn submit(
        &self,
        event: &Event,
        context: &ProjectContext,
        credentials: &Credentials,
    ) -> SubmissionResult {
        let payload = ActionPayload::new(event, context);
        debug!(url = %self.endpoint, "sending action to api");
        debug!(?payload, "action payload");

        let body = match serde_json::to_string(&payload) {
            Ok(body) => body,
            Err(err) => {
                error!(error = %err, "failed to encode action payload");
                return SubmissionResult::Failed {
                    kind: TransportErrorKind::Builder,
                    message: err.to_string(),
                };
            }
        };

        let request = ApiRequest {
            url: self.endpoint.clone(),
            user_agent: user_agent(event.plugin.as_deref()),
            authorization: credentials.authorization(),
            body,
        };

        match self.transport.send(&request) {
            Ok(RawResponse { status, body }) => {
                let result = SubmissionResult::classify(status, body);
                log_response(&result, &request);
                result
            }
            Err(err) => {
                error!(kind = %err.kind, message = %err.message, "failed to send action");
                debug!(chain = %error_chain(&err), ?request, "transport failure detail");
                SubmissionResult::Failed {
                    kind: err.kind,
                    message: err.message,
                }
            }
        }
    }
}

fn log_response(result: &SubmissionResult, request: &ApiRequest) {
    match result {
        SubmissionResult::Success { status, body } => {
            debug!(response_code = status, response_content = %body, "api accepted action");
        }
        SubmissionResult::Rejected { status, body } => {
            let reason = StatusCode::from_u16(*status)
                .ok()
                .and_then(|code| code.canonical_reason())
                .unwrap_or("unknown status");
            error!(
                response_code = status,
                response_content = %body,
                reason,
                "api rejected action"
            );
            debug!(?request, "rejected request detail");
        }
        SubmissionResult::Failed { .. } => {}
    }
}

/// Renders an error and its sources as `outer: inner: root`.
fn error_chain(err: &dyn StdError) -> String {
    std::iter::successors(Some(err), |&e| e.source())
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(": ")
}
