//! Orchestration of a single invocation.
//!
//! Resolve credentials, check the target file, detect the project, submit,
//! and map the result onto the process exit code.

use std::process::ExitCode;

use wt_api::{Credentials, CredentialsError, SubmissionResult, Submitter, Transport};
use wt_core::{Event, ProjectDetector};

use crate::{Cli, Config};

/// How an invocation ended, short of a usage error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The API accepted the event.
    Sent,
    /// The target file does not exist; nothing was sent.
    Ignored,
    /// The API rejected the event or could not be reached.
    ApiError,
}

impl Outcome {
    /// Process exit code.
    pub const fn code(self) -> u8 {
        match self {
            Self::Sent => 0,
            Self::Ignored => 101,
            Self::ApiError => 102,
        }
    }
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        Self::from(outcome.code())
    }
}

/// Runs one invocation.
///
/// Credentials are resolved before anything touches the filesystem or the
/// network; a missing key is the only error returned.
pub fn run<T: Transport>(
    cli: &Cli,
    config: &Config,
    detector: &ProjectDetector,
    transport: T,
) -> Result<Outcome, CredentialsError> {
    let credentials = Credentials::resolve(cli.key.as_deref(), config.api_key.as_deref())?;
    let submitter = Submitter::new(transport).with_endpoint(config.api_url.as_str());
    Ok(report(&cli.event(), detector, &submitter, &credentials))
}

/// Reports `event` unless its target file is gone.
pub fn report<T: Transport>(
    event: &Event,
    detector: &ProjectDetector,
    submitter: &Submitter<T>,
    credentials: &Credentials,
) -> Outcome {
    if !event.target_exists() {
        tracing::debug!(
            file = %event.target_file.display(),
            "file does not exist; ignoring this action"
        );
        return Outcome::Ignored;
    }

    let context = detector.detect(&event.target_file);
    match submitter.submit(event, &context, credentials) {
        SubmissionResult::Success { .. } => Outcome::Sent,
        SubmissionResult::Rejected { .. } | SubmissionResult::Failed { .. } => Outcome::ApiError,
    }
}
