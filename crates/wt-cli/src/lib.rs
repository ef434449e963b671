//! wakatime event appender CLI library.
//!
//! This crate wires argument parsing, configuration and logging around the
//! project detector and the activity submitter.

pub mod app;
mod cli;
pub mod config;
pub mod logging;

pub use app::Outcome;
pub use cli::Cli;
pub use config::Config;
