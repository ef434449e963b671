//! Activity API client for the wakatime event appender.
//!
//! Provides:
//! - The JSON action payload and its omission rules
//! - API key credentials and the client identification header
//! - A [`Transport`] seam with a blocking reqwest implementation
//! - [`Submitter`], which sends one event and classifies the outcome

mod credentials;
mod payload;
mod submit;
mod transport;

pub use credentials::{Credentials, CredentialsError};
pub use payload::ActionPayload;
pub use submit::{SubmissionResult, Submitter, platform, user_agent};
pub use transport::{
    ApiRequest, HttpTransport, RawResponse, Transport, TransportError, TransportErrorKind,
};

/// Versioned endpoint that accepts activity events.
pub const DEFAULT_API_URL: &str = "https://www.wakati.me/api/v1/actions";

/// Client name reported in the User-Agent header.
pub const CLIENT_NAME: &str = "wakatime";

/// Client version reported in the User-Agent header.
pub const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");
