use std::process::ExitCode;

use anyhow::Context;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};

use wt_api::HttpTransport;
use wt_cli::{Cli, Config, Outcome, app, logging};
use wt_core::ProjectDetector;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = logging::init(cli.logfile.as_deref(), cli.verbose) {
        eprintln!("wakatime: {err:#}; logging to stderr");
        logging::init_stderr(cli.verbose);
    }
    tracing::debug!(version = wt_api::CLIENT_VERSION, ?cli, "wakatime invoked");

    let config = match Config::load_from(cli.config.as_deref()).context("failed to load configuration") {
        Ok(config) => config,
        Err(err) => Cli::command()
            .error(ErrorKind::InvalidValue, format!("{err:#}"))
            .exit(),
    };
    tracing::debug!(?config, "loaded configuration");

    let transport = match HttpTransport::new() {
        Ok(transport) => transport,
        Err(err) => {
            tracing::error!(error = %err, "failed to build HTTP client");
            return Outcome::ApiError.into();
        }
    };

    match app::run(&cli, &config, &ProjectDetector::default(), transport) {
        Ok(outcome) => {
            tracing::debug!(?outcome, code = outcome.code(), "finished");
            outcome.into()
        }
        Err(err) => Cli::command()
            .error(ErrorKind::MissingRequiredArgument, err)
            .exit(),
    }
}
